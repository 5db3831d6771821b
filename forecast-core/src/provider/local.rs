use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, instrument};

use crate::{
    error::ForecastError,
    model::{Forecast, SUMMARIES},
};

use super::{ForecastProvider, ProviderId};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 101;

/// Number of days a provider returns, starting the day after the start date.
pub const FORECAST_DAYS: u64 = 5;

/// Lowest generated temperature (inclusive).
pub const MIN_TEMPERATURE_C: i32 = -20;
/// Highest generated temperature (exclusive).
pub const MAX_TEMPERATURE_C: i32 = 55;

/// In-process provider drawing forecasts from a seeded generator.
///
/// Every call reseeds, so the same seed and start date always yield the same
/// sequence.
#[derive(Debug, Clone, Copy)]
pub struct LocalForecastProvider {
    seed: u64,
}

impl LocalForecastProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Synchronous core of [`ForecastProvider::get_forecasts`].
    ///
    /// The sequence stops early at the end of chrono's calendar: a start date
    /// within [`FORECAST_DAYS`] of `NaiveDate::MAX` yields fewer records.
    pub fn generate(&self, start: NaiveDate) -> Vec<Forecast> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        (1..=FORECAST_DAYS)
            .map_while(|offset| {
                let date = start.checked_add_days(Days::new(offset))?;
                let temperature_c = rng.random_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C);
                let summary = SUMMARIES[rng.random_range(0..SUMMARIES.len())];

                Some(Forecast::new(date, temperature_c, summary))
            })
            .collect()
    }
}

impl Default for LocalForecastProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[async_trait]
impl ForecastProvider for LocalForecastProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Local
    }

    #[instrument(skip(self))]
    async fn get_forecasts(&self, start: NaiveDate) -> Result<Vec<Forecast>, ForecastError> {
        debug!(seed = self.seed, "generating forecasts");
        Ok(self.generate(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn returns_five_consecutive_days_after_start() {
        let forecasts = LocalForecastProvider::default().generate(start());

        let dates: Vec<_> = forecasts.iter().map(|f| f.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-06"]);
    }

    #[test]
    fn default_seed_yields_known_sequence() {
        let forecasts = LocalForecastProvider::default().generate(start());

        let rows: Vec<_> = forecasts
            .iter()
            .map(|f| (f.date.to_string(), f.temperature_c, f.temperature_f(), f.summary.as_str()))
            .collect();

        assert_eq!(
            rows,
            [
                ("2024-01-02".to_string(), 41, 105, "Balmy"),
                ("2024-01-03".to_string(), -7, 20, "Mild"),
                ("2024-01-04".to_string(), -12, 11, "Balmy"),
                ("2024-01-05".to_string(), 2, 35, "Bracing"),
                ("2024-01-06".to_string(), 39, 102, "Cool"),
            ]
        );
    }

    #[test]
    fn stops_at_end_of_calendar() {
        let provider = LocalForecastProvider::default();

        assert!(provider.generate(NaiveDate::MAX).is_empty());

        let near_end = NaiveDate::MAX.checked_sub_days(Days::new(2)).unwrap();
        let forecasts = provider.generate(near_end);
        let dates: Vec<_> = forecasts.iter().map(|f| f.date).collect();
        assert_eq!(dates, [NaiveDate::MAX.pred_opt().unwrap(), NaiveDate::MAX]);

        // Draws for the days that do exist are unchanged.
        let full = provider.generate(start());
        assert_eq!(forecasts[0].temperature_c, full[0].temperature_c);
        assert_eq!(forecasts[1].summary, full[1].summary);
    }

    #[test]
    fn dates_cross_month_and_leap_day() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let forecasts = LocalForecastProvider::default().generate(start);

        let dates: Vec<_> = forecasts.iter().map(|f| f.date.to_string()).collect();
        assert_eq!(dates, ["2024-02-28", "2024-02-29", "2024-03-01", "2024-03-02", "2024-03-03"]);
    }

    #[test]
    fn values_stay_within_bounds_and_vocabulary() {
        for seed in 0..200 {
            for forecast in LocalForecastProvider::new(seed).generate(start()) {
                assert!((MIN_TEMPERATURE_C..MAX_TEMPERATURE_C).contains(&forecast.temperature_c));
                assert!(SUMMARIES.contains(&forecast.summary.as_str()));
                assert_eq!(
                    forecast.temperature_f(),
                    32 + (f64::from(forecast.temperature_c) / 0.5556) as i32
                );
            }
        }
    }

    #[test]
    fn same_seed_reproduces_sequence() {
        let provider = LocalForecastProvider::new(DEFAULT_SEED);

        assert_eq!(provider.generate(start()), provider.generate(start()));
        assert_eq!(
            provider.generate(start()),
            LocalForecastProvider::default().generate(start())
        );
    }

    #[test]
    fn values_do_not_depend_on_start_date() {
        let provider = LocalForecastProvider::default();
        let later = NaiveDate::from_ymd_opt(2031, 7, 14).unwrap();

        let strip = |fs: Vec<Forecast>| -> Vec<(i32, String)> {
            fs.into_iter().map(|f| (f.temperature_c, f.summary)).collect()
        };

        assert_eq!(strip(provider.generate(start())), strip(provider.generate(later)));
    }

    #[test]
    fn different_seeds_diverge() {
        let a = LocalForecastProvider::new(101).generate(start());
        let b = LocalForecastProvider::new(102).generate(start());

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn async_path_matches_sync_generation() {
        let provider = LocalForecastProvider::default();

        let forecasts = provider.get_forecasts(start()).await.unwrap();

        assert_eq!(forecasts, provider.generate(start()));
        assert_eq!(provider.id(), ProviderId::Local);
    }
}
