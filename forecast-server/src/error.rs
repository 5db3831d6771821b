//! API error handling
//!
//! Failures are logged with their cause and answered with a generic body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use forecast_core::ForecastError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "forecast request failed");

        let body = ErrorBody { error: "internal server error" };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
