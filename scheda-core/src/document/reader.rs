//! Decoding plan documents into the entity tree.

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::{Map, Value};

use super::coerce;
use super::keys;
use super::weight_logs;
use crate::error::PlanError;
use crate::models::{Day, Exercise, MuscleGroup, Plan};

/// Decodes a plan document.
///
/// Only the start date is mandatory; every other missing field falls back
/// to its default. Children are ordered by the number in their key and keep
/// that key as their id.
pub fn decode_plan(tree: &Value) -> Result<Plan, PlanError> {
    let root = tree
        .as_object()
        .ok_or_else(|| PlanError::Malformed("plan document is not a map".to_string()))?;

    let raw_date = root
        .get(keys::START_DATE)
        .and_then(Value::as_str)
        .ok_or_else(|| PlanError::Malformed(format!("missing {}", keys::START_DATE)))?;
    let start_date = parse_start_date(raw_date).ok_or_else(|| {
        PlanError::Malformed(format!("unparseable {}: {}", keys::START_DATE, raw_date))
    })?;

    let duration_weeks = root
        .get(keys::DURATION_WEEKS)
        .and_then(coerce::count)
        .unwrap_or(0);
    let change_requested = root
        .get(keys::CHANGE_REQUESTED)
        .and_then(coerce::flag)
        .unwrap_or(false);

    let days: Vec<Day> = children(root, keys::DAYS)
        .into_iter()
        .map(|(id, map)| read_day(id, map))
        .collect();

    tracing::debug!(
        "Decoded plan starting {} with {} day(s)",
        start_date,
        days.len()
    );

    Ok(Plan {
        start_date,
        duration_weeks,
        days,
        change_requested,
    })
}

/// Parses a start date such as `2024-01-01T00:00:00+0000`.
///
/// RFC 3339 strings (`...Z`, `...+01:00`) are accepted as well. Fractions
/// of a second are dropped.
pub fn parse_start_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, keys::DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(0))
}

/// Decodes a single exercise node; `id` is its document key.
pub fn decode_exercise(id: &str, node: &Map<String, Value>) -> Exercise {
    let mut exercise = Exercise::new(id, get_text(node, keys::NAME).unwrap_or_default())
        .with_prescription(get_text(node, keys::PRESCRIPTION).unwrap_or_default());
    exercise.rest_text = get_non_empty(node, keys::REST);
    exercise.trainer_note = get_non_empty(node, keys::TRAINER_NOTE);
    exercise.user_note = get_non_empty(node, keys::USER_NOTE);

    match node.get(keys::WEIGHT_LOGS).and_then(Value::as_object) {
        Some(logs) => exercise.with_weight_logs(weight_logs::parse_all(logs)),
        None => exercise,
    }
}

fn read_day(id: &str, node: &Map<String, Value>) -> Day {
    let groups = children(node, keys::MUSCLE_GROUPS)
        .into_iter()
        .map(|(group_id, group)| read_muscle_group(group_id, group))
        .collect();

    Day::new(id, get_text(node, keys::NAME).unwrap_or_default()).with_muscle_groups(groups)
}

fn read_muscle_group(id: &str, node: &Map<String, Value>) -> MuscleGroup {
    let exercises = children(node, keys::EXERCISES)
        .into_iter()
        .map(|(exercise_id, exercise)| decode_exercise(exercise_id, exercise))
        .collect();

    MuscleGroup::new(id, get_text(node, keys::NAME).unwrap_or_default()).with_exercises(exercises)
}

fn children<'a>(node: &'a Map<String, Value>, key: &str) -> Vec<(&'a str, &'a Map<String, Value>)> {
    node.get(key)
        .and_then(Value::as_object)
        .map(keys::ordered_children)
        .unwrap_or_default()
}

fn get_text(node: &Map<String, Value>, key: &str) -> Option<String> {
    node.get(key).and_then(coerce::text)
}

/// Optional text fields are stored as `""` when unset.
fn get_non_empty(node: &Map<String, Value>, key: &str) -> Option<String> {
    get_text(node, key).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_tree() -> Value {
        json!({
            "startDate": "2024-01-01T00:00:00+0000",
            "durationWeeks": 6,
            "changeRequested": true,
            "days": {
                "giorno2": { "name": "Pull" },
                "giorno1": {
                    "name": "Push",
                    "muscleGroups": {
                        "gruppo1": {
                            "name": "Chest",
                            "exercises": {
                                "esercizio1": {
                                    "name": "Bench press",
                                    "serie": "4x8",
                                    "riposo": "90s",
                                    "notePT": "Pause at the bottom",
                                    "noteUtente": "",
                                    "weightLogs": {
                                        "w2": { "timestamp": 1_700_100_000, "weight": 62.5 },
                                        "w1": { "timestamp": 1_700_000_000, "weight": 60 }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_decode_plan() {
        let plan = decode_plan(&sample_tree()).unwrap();

        assert_eq!(
            plan.start_date,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(plan.duration_weeks, 6);
        assert!(plan.change_requested);

        let day_names: Vec<&str> = plan.days.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(day_names, vec!["Push", "Pull"]);
        assert_eq!(plan.days[0].id, "giorno1");

        let exercise = plan.exercise("giorno1", "gruppo1", "esercizio1").unwrap();
        assert_eq!(exercise.name, "Bench press");
        assert_eq!(exercise.prescription_text, "4x8");
        assert_eq!(exercise.rest_text.as_deref(), Some("90s"));
        assert_eq!(exercise.trainer_note.as_deref(), Some("Pause at the bottom"));
        assert!(exercise.user_note.is_none());

        let log_ids: Vec<&str> = exercise.weight_logs().iter().map(|l| l.id()).collect();
        assert_eq!(log_ids, vec!["w1", "w2"]);
    }

    #[test]
    fn test_decode_orders_past_nine_numerically() {
        let mut days = Map::new();
        for n in 1..=11 {
            days.insert(format!("giorno{}", n), json!({ "name": format!("Day {}", n) }));
        }
        let tree = json!({
            "startDate": "2024-01-01T00:00:00+0000",
            "days": Value::Object(days),
        });

        let plan = decode_plan(&tree).unwrap();
        let ids: Vec<&str> = plan.days.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "giorno1", "giorno2", "giorno3", "giorno4", "giorno5", "giorno6", "giorno7",
                "giorno8", "giorno9", "giorno10", "giorno11"
            ]
        );
    }

    #[test]
    fn test_decode_defaults() {
        let tree = json!({
            "startDate": "2024-01-01T00:00:00+0000",
            "days": { "giorno1": { "muscleGroups": { "gruppo1": { "exercises": { "esercizio1": {} } } } } }
        });

        let plan = decode_plan(&tree).unwrap();
        assert_eq!(plan.duration_weeks, 0);
        assert!(!plan.change_requested);
        assert_eq!(plan.days[0].name, "");

        let exercise = &plan.days[0].muscle_groups[0].exercises[0];
        assert_eq!(exercise.name, "");
        assert_eq!(exercise.prescription_text, "");
        assert!(exercise.rest_text.is_none());
        assert!(exercise.weight_logs().is_empty());
    }

    #[test]
    fn test_decode_tolerates_string_duration() {
        let tree = json!({ "startDate": "2024-01-01T00:00:00+0000", "durationWeeks": "8" });
        assert_eq!(decode_plan(&tree).unwrap().duration_weeks, 8);
    }

    #[test]
    fn test_decode_missing_start_date() {
        let result = decode_plan(&json!({ "durationWeeks": 4 }));
        assert!(matches!(result, Err(PlanError::Malformed(_))));
    }

    #[test]
    fn test_decode_bad_start_date() {
        let result = decode_plan(&json!({ "startDate": "next monday" }));
        assert!(matches!(result, Err(PlanError::Malformed(msg)) if msg.contains("next monday")));
    }

    #[test]
    fn test_decode_non_map_root() {
        assert!(matches!(
            decode_plan(&json!([1, 2, 3])),
            Err(PlanError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_start_date_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_start_date("2024-01-01T00:00:00+0000"), Some(expected));
        assert_eq!(parse_start_date("2024-01-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_start_date("2024-01-01T01:00:00+01:00"), Some(expected));
        assert_eq!(parse_start_date("2024-01-01T00:00:00.750Z"), Some(expected));
        assert_eq!(parse_start_date("2024-01-01"), None);
    }

    #[test]
    fn test_decode_exercise_alone() {
        let node = json!({ "name": "Row", "serie": 12 });
        let exercise = decode_exercise("esercizio3", node.as_object().unwrap());
        assert_eq!(exercise.id, "esercizio3");
        assert_eq!(exercise.prescription_text, "12");
    }
}
