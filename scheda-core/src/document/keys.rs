//! Field names and synthetic child keys of the plan document.
//!
//! Children are stored as maps keyed `giorno1`, `giorno2`, ... so their
//! order has to be recovered from the key. Ordering is numeric on the
//! trailing integer, which keeps `giorno10` after `giorno9`.

use serde_json::{Map, Value};
use std::cmp::Ordering;

pub const START_DATE: &str = "startDate";
pub const DURATION_WEEKS: &str = "durationWeeks";
pub const CHANGE_REQUESTED: &str = "changeRequested";
pub const DAYS: &str = "days";
pub const MUSCLE_GROUPS: &str = "muscleGroups";
pub const EXERCISES: &str = "exercises";
pub const NAME: &str = "name";

pub const PRESCRIPTION: &str = "serie";
pub const REST: &str = "riposo";
pub const TRAINER_NOTE: &str = "notePT";
pub const USER_NOTE: &str = "noteUtente";
pub const WEIGHT_LOGS: &str = "weightLogs";

pub const TIMESTAMP: &str = "timestamp";
pub const WEIGHT: &str = "weight";

pub const DAY_PREFIX: &str = "giorno";
pub const GROUP_PREFIX: &str = "gruppo";
pub const EXERCISE_PREFIX: &str = "esercizio";

/// Start dates are stored as e.g. `2024-01-01T00:00:00+0000`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Builds the key for the child at the given 0-based position.
pub fn synthetic_key(prefix: &str, index: usize) -> String {
    format!("{}{}", prefix, index + 1)
}

/// The trailing integer of a key (`gruppo12` -> 12).
pub fn ordinal(key: &str) -> Option<u64> {
    let digits_start = key
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    key[digits_start..].parse().ok()
}

/// Orders keys by trailing integer; keys without one come last, by text.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (ordinal(a), ordinal(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// The entries of a child map that are themselves maps, in document order.
pub fn ordered_children(map: &Map<String, Value>) -> Vec<(&str, &Map<String, Value>)> {
    let mut children: Vec<(&str, &Map<String, Value>)> = map
        .iter()
        .filter_map(|(key, value)| match value.as_object() {
            Some(child) => Some((key.as_str(), child)),
            None => {
                tracing::debug!("Skipping non-map child entry {}", key);
                None
            }
        })
        .collect();
    children.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_synthetic_key_is_one_based() {
        assert_eq!(synthetic_key(DAY_PREFIX, 0), "giorno1");
        assert_eq!(synthetic_key(EXERCISE_PREFIX, 9), "esercizio10");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal("giorno1"), Some(1));
        assert_eq!(ordinal("gruppo12"), Some(12));
        assert_eq!(ordinal("esercizio"), None);
        assert_eq!(ordinal("42"), Some(42));
        assert_eq!(ordinal(""), None);
    }

    #[test]
    fn test_compare_keys_is_numeric() {
        let mut keys = vec!["giorno10", "giorno2", "giorno9", "giorno1", "extra"];
        keys.sort_by(|a, b| compare_keys(a, b));
        assert_eq!(keys, vec!["giorno1", "giorno2", "giorno9", "giorno10", "extra"]);
    }

    #[test]
    fn test_ordered_children_skips_non_maps() {
        let value = json!({
            "name": "Push",
            "gruppo2": { "name": "B" },
            "gruppo1": { "name": "A" },
        });
        let children = ordered_children(value.as_object().unwrap());
        let keys: Vec<&str> = children.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["gruppo1", "gruppo2"]);
    }
}
