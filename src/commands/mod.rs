mod alerts;
mod config_cmd;
mod plan;
mod weight;

pub use alerts::AlertsCommand;
pub use config_cmd::ConfigCommand;
pub use plan::PlanCommand;
pub use weight::WeightCommand;

use chrono::{DateTime, Utc};
use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses an optional `--now`/`--at` argument, defaulting to the current time.
fn instant_or_now(raw: Option<&str>) -> Result<DateTime<Utc>, String> {
    match raw {
        Some(raw) => scheda_core::document::parse_start_date(raw)
            .ok_or_else(|| format!("Invalid date-time '{}'. Use RFC 3339, e.g. 2024-01-25T09:00:00Z", raw)),
        None => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_instant_or_now() {
        assert_eq!(
            instant_or_now(Some("2024-01-25T09:00:00Z")).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 25, 9, 0, 0).unwrap()
        );
        assert!(instant_or_now(Some("tomorrow")).is_err());
        assert!(instant_or_now(None).is_ok());
    }
}
