use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::{error::ForecastError, model::Forecast};

use super::{ForecastProvider, ProviderId};

/// Endpoint path, relative to the configured base URL.
pub const FORECAST_PATH: &str = "weatherforecast";

/// Proxy that fetches forecasts from a forecast server over HTTP.
///
/// No retries and no caching: one call, one GET.
#[derive(Debug, Clone)]
pub struct RemoteForecastProvider {
    endpoint: Url,
    http: Client,
}

impl RemoteForecastProvider {
    /// Build a proxy for the server at `base_url`, using reqwest's default timeouts.
    pub fn new(base_url: &str) -> Result<Self, ForecastError> {
        Self::with_client(base_url, Client::new())
    }

    /// Same as [`new`](Self::new) but with a whole-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ForecastError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    pub fn with_client(base_url: &str, http: Client) -> Result<Self, ForecastError> {
        let endpoint = endpoint_url(base_url)?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Join [`FORECAST_PATH`] onto `base_url`, treating the base as a directory so
/// that `http://host/app` resolves to `http://host/app/weatherforecast`.
fn endpoint_url(base_url: &str) -> Result<Url, ForecastError> {
    let invalid = |source| ForecastError::InvalidBaseUrl { url: base_url.to_string(), source };

    let mut base = Url::parse(base_url.trim()).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(FORECAST_PATH).map_err(invalid)
}

#[async_trait]
impl ForecastProvider for RemoteForecastProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Remote
    }

    // The server picks its own start date; `start` only shows up in the span.
    #[instrument(skip(self))]
    async fn get_forecasts(&self, start: NaiveDate) -> Result<Vec<Forecast>, ForecastError> {
        let res = self.http.get(self.endpoint.clone()).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ForecastError::Status { status, body: truncate_body(&body) });
        }

        let forecasts: Vec<Forecast> = serde_json::from_str(&body)?;
        debug!(endpoint = %self.endpoint, count = forecasts.len(), "fetched forecasts");

        Ok(forecasts)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_joined_onto_base_path() {
        let cases = [
            ("http://localhost:3000", "http://localhost:3000/weatherforecast"),
            ("http://localhost:3000/", "http://localhost:3000/weatherforecast"),
            ("http://example.com/app", "http://example.com/app/weatherforecast"),
            ("http://example.com/app/", "http://example.com/app/weatherforecast"),
        ];

        for (base, expected) in cases {
            let provider = RemoteForecastProvider::new(base).unwrap();
            assert_eq!(provider.endpoint().as_str(), expected, "{base}");
        }
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = RemoteForecastProvider::new("not a url").unwrap_err();

        assert!(matches!(err, ForecastError::InvalidBaseUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "é".repeat(150);

        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
