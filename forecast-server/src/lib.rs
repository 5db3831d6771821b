//! HTTP surface of the forecast service.
//!
//! Serves `GET /WeatherForecast` (any casing) as a JSON array of forecasts,
//! backed by whichever [`ForecastProvider`](forecast_core::ForecastProvider)
//! the configuration selects.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::ServiceExt;
use std::future::Future;
use tokio::net::TcpListener;

pub use routes::{App, create_app, create_router};
pub use state::AppState;

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_app(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}
