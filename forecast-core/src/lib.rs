//! Core library for the forecast service.
//!
//! This crate defines:
//! - The `Forecast` record and its JSON wire shape
//! - The `ForecastProvider` abstraction with a seeded local generator and an HTTP proxy
//! - Configuration handling
//!
//! It is used by `forecast-server` and `forecast-cli`.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, RemoteConfig, ServerConfig};
pub use error::ForecastError;
pub use model::{Forecast, SUMMARIES};
pub use provider::{
    ForecastProvider, ProviderId,
    local::{DEFAULT_SEED, FORECAST_DAYS, LocalForecastProvider},
    provider_for, provider_from_config,
    remote::RemoteForecastProvider,
};
