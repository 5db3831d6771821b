//! Request handlers

use axum::{Json, extract::State};
use forecast_core::Forecast;
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Forecasts for the days following today.
pub async fn get_weather_forecast(
    State(state): State<AppState>,
) -> Result<Json<Vec<Forecast>>, ApiError> {
    let start = (state.today)();
    info!(source = %state.provider.id(), %start, "getting forecast");

    let forecasts = state.provider.get_forecasts(start).await?;
    Ok(Json(forecasts))
}
