//! Weight log codec.

use serde_json::{json, Map, Value};

use super::coerce;
use super::keys;
use crate::models::WeightLog;

/// Timestamps at or below this magnitude are in seconds, above it in milliseconds.
pub const SECONDS_THRESHOLD: f64 = 10_000_000_000.0;

/// Converts a raw upstream timestamp (seconds or milliseconds) to milliseconds.
pub fn normalize_timestamp_millis(raw: f64) -> i64 {
    if raw.abs() > SECONDS_THRESHOLD {
        raw.round() as i64
    } else {
        (raw * 1000.0).round() as i64
    }
}

/// Parses a map of `id -> { timestamp, weight }` into logs ordered by time.
///
/// Entries whose timestamp or weight cannot be read, whose weight is not
/// positive, or whose timestamp falls outside the calendar range are
/// skipped rather than failing the whole map.
pub fn parse_all(raw: &Map<String, Value>) -> Vec<WeightLog> {
    let mut logs: Vec<WeightLog> = raw
        .iter()
        .filter_map(|(id, fields)| {
            let log = parse_one(id, fields);
            if log.is_none() {
                tracing::debug!("Skipping unreadable weight log {}", id);
            }
            log
        })
        .collect();

    // Stable, so equal timestamps keep map order
    logs.sort_by_key(WeightLog::timestamp_millis);
    logs
}

fn parse_one(id: &str, fields: &Value) -> Option<WeightLog> {
    let timestamp = fields.get(keys::TIMESTAMP).and_then(coerce::number)?;
    let weight = fields.get(keys::WEIGHT).and_then(coerce::number)?;
    WeightLog::new(id, normalize_timestamp_millis(timestamp), weight).ok()
}

/// Encodes one log as `{ timestamp: <millis>, weight: <number> }`.
pub fn encode(log: &WeightLog) -> Value {
    let mut fields = Map::new();
    fields.insert(keys::TIMESTAMP.to_string(), json!(log.timestamp_millis()));
    fields.insert(keys::WEIGHT.to_string(), json!(log.weight()));
    Value::Object(fields)
}

/// Encodes logs keyed by their ids.
pub fn encode_all(logs: &[WeightLog]) -> Map<String, Value> {
    logs.iter()
        .map(|log| (log.id().to_string(), encode(log)))
        .collect()
}
