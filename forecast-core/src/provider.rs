use crate::{
    Config, Forecast, ForecastError,
    provider::{local::LocalForecastProvider, remote::RemoteForecastProvider},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod local;
pub mod remote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Local,
    Remote,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Local => "local",
            ProviderId::Remote => "remote",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Local, ProviderId::Remote]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "local" => Ok(ProviderId::Local),
            "remote" => Ok(ProviderId::Remote),
            _ => Err(anyhow::anyhow!(
                "Unknown forecast source '{value}'. Supported sources: local, remote."
            )),
        }
    }
}

/// A source of forecasts: generated in-process or fetched from a server.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// Forecasts for the days following `start`, in date order.
    async fn get_forecasts(&self, start: NaiveDate) -> Result<Vec<Forecast>, ForecastError>;
}

/// Construct a provider of an explicit kind from config.
pub fn provider_for(id: ProviderId, config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let boxed: Box<dyn ForecastProvider> = match id {
        ProviderId::Local => Box::new(LocalForecastProvider::new(config.seed)),
        ProviderId::Remote => {
            let remote = config.remote.as_ref().ok_or_else(|| {
                anyhow::anyhow!(
                    "No base URL configured for the remote forecast source.\n\
                     Hint: run `forecast configure` and choose `remote`, or pass `--base-url`."
                )
            })?;

            let provider = match remote.timeout_secs {
                Some(secs) => RemoteForecastProvider::with_timeout(
                    &remote.base_url,
                    Duration::from_secs(secs),
                )?,
                None => RemoteForecastProvider::new(&remote.base_url)?,
            };
            Box::new(provider)
        }
    };

    Ok(boxed)
}

/// Construct the provider selected by `config.source`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let id = config.source_id()?;
    provider_for(id, config)
}
