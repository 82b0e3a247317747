//! Reading alert records from the alert feed.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::coerce;
use crate::models::{Urgency, UserAlert};

const ID: &str = "id";
const TITLE: &str = "titolo";
const DESCRIPTION: &str = "descrizione";
const EXPIRY: &str = "scadenza";
const URGENCY: &str = "urgenza";

impl UserAlert {
    /// Builds an alert from a raw feed record.
    ///
    /// Returns `None` when the title or description is missing. The expiry is
    /// read as epoch milliseconds; an unknown or missing urgency means
    /// [`Urgency::None`]. An `id` field in the record wins over `key`.
    pub fn from_raw(key: &str, record: &Value) -> Option<Self> {
        let title = record.get(TITLE).and_then(coerce::text)?;
        let description = record.get(DESCRIPTION).and_then(coerce::text)?;
        let id = record
            .get(ID)
            .and_then(coerce::text)
            .unwrap_or_else(|| key.to_string());

        let expiry = record
            .get(EXPIRY)
            .and_then(coerce::number)
            .and_then(|millis| DateTime::<Utc>::from_timestamp_millis(millis.round() as i64));
        let urgency = record
            .get(URGENCY)
            .and_then(Value::as_str)
            .map(Urgency::from_label)
            .unwrap_or_default();

        Some(Self {
            id,
            title,
            description,
            expiry,
            urgency,
        })
    }
}

/// Reads every usable alert from a feed snapshot.
///
/// The snapshot may be a map keyed by alert id or a list of records.
/// Records that cannot form an alert are skipped.
pub fn parse_alerts(feed: &Value) -> Vec<UserAlert> {
    let records: Vec<(String, &Value)> = match feed {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(list) => list
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    };

    records
        .into_iter()
        .filter_map(|(key, record)| {
            let alert = UserAlert::from_raw(&key, record);
            if alert.is_none() {
                tracing::debug!("Skipping incomplete alert {}", key);
            }
            alert
        })
        .collect()
}
