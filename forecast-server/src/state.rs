//! Shared application state

use chrono::{Local, NaiveDate};
use forecast_core::ForecastProvider;
use std::sync::Arc;

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn ForecastProvider>,
    /// Source of the start date for each request.
    pub today: fn() -> NaiveDate,
}

impl AppState {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider, today: local_today }
    }

    /// Pin the start date, e.g. for tests.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// Today's date in the server's local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
