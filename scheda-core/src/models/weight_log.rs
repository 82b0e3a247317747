use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// One recorded weight for an exercise.
///
/// Weight logs are immutable: recording a new weight always creates a new
/// log rather than editing an old one. The timestamp is always stored in
/// milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeightLog")]
pub struct WeightLog {
    id: String,
    timestamp_millis: i64,
    weight: f64,
}

/// Unchecked serde shape; deserialized logs go through [`WeightLog::new`].
#[derive(Deserialize)]
struct RawWeightLog {
    id: String,
    timestamp_millis: i64,
    weight: f64,
}

impl TryFrom<RawWeightLog> for WeightLog {
    type Error = ValidationError;

    fn try_from(raw: RawWeightLog) -> Result<Self, Self::Error> {
        WeightLog::new(raw.id, raw.timestamp_millis, raw.weight)
    }
}

impl WeightLog {
    /// Creates a log, rejecting weights that are not strictly positive and
    /// timestamps no calendar date can represent.
    pub fn new(
        id: impl Into<String>,
        timestamp_millis: i64,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ValidationError::NonPositiveWeight(weight));
        }
        if DateTime::from_timestamp_millis(timestamp_millis).is_none() {
            return Err(ValidationError::TimestampOutOfRange(timestamp_millis));
        }
        Ok(Self {
            id: id.into(),
            timestamp_millis,
            weight,
        })
    }

    /// Creates a log stamped at the given instant.
    pub fn at(
        id: impl Into<String>,
        when: DateTime<Utc>,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(id, when.timestamp_millis(), weight)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The instant the weight was recorded (second precision).
    pub fn date(&self) -> DateTime<Utc> {
        // In range: checked in `new`
        DateTime::from_timestamp(self.timestamp_millis.div_euclid(1000), 0).unwrap_or_default()
    }
}

impl fmt::Display for WeightLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kg @ {}",
            self.weight,
            self.date().format("%Y-%m-%d %H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_weight_log_new() {
        let log = WeightLog::new("log1", 1_700_000_000_000, 42.5).unwrap();
        assert_eq!(log.id(), "log1");
        assert_eq!(log.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(log.weight(), 42.5);
    }

    #[test]
    fn test_weight_log_rejects_non_positive() {
        assert_eq!(
            WeightLog::new("a", 0, 0.0),
            Err(ValidationError::NonPositiveWeight(0.0))
        );
        assert!(WeightLog::new("b", 0, -5.0).is_err());
        assert!(WeightLog::new("c", 0, f64::NAN).is_err());
    }

    #[test]
    fn test_weight_log_rejects_unrepresentable_timestamp() {
        assert_eq!(
            WeightLog::new("a", i64::MAX, 50.0),
            Err(ValidationError::TimestampOutOfRange(i64::MAX))
        );
        assert!(WeightLog::new("b", i64::MIN, 50.0).is_err());
    }

    #[test]
    fn test_weight_log_date() {
        let log = WeightLog::new("log1", 1_700_000_000_999, 10.0).unwrap();
        assert_eq!(log.date().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_weight_log_at() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap();
        let log = WeightLog::at("x", when, 80.0).unwrap();
        assert_eq!(log.date(), when);
    }

    #[test]
    fn test_weight_log_display() {
        let log = WeightLog::new("log1", 1_700_000_000_000, 42.5).unwrap();
        assert_eq!(format!("{}", log), "42.5 kg @ 2023-11-14 22:13");
    }

    #[test]
    fn test_weight_log_json_roundtrip() {
        let log = WeightLog::new("log1", 1_700_000_000_000, 60.0).unwrap();
        let json = serde_json::to_string(&log).unwrap();
        let parsed: WeightLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log, parsed);
    }

    #[test]
    fn test_weight_log_deserialize_validates() {
        let negative = r#"{"id":"x","timestamp_millis":0,"weight":-5.0}"#;
        let err = serde_json::from_str::<WeightLog>(negative).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        let zero = r#"{"id":"x","timestamp_millis":0,"weight":0}"#;
        assert!(serde_json::from_str::<WeightLog>(zero).is_err());

        let far = format!(r#"{{"id":"x","timestamp_millis":{},"weight":10}}"#, i64::MAX);
        assert!(serde_json::from_str::<WeightLog>(&far).is_err());
    }
}
