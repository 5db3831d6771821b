use reqwest::StatusCode;
use thiserror::Error;

/// Failures a [`ForecastProvider`](crate::ForecastProvider) can report.
///
/// Only the remote provider produces these; local generation is infallible.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid forecast service URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("forecast request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("forecast service responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
