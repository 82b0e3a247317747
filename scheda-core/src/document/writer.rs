//! Encoding the entity tree into a plan document.
//!
//! Children are written under fresh synthetic keys matching their current
//! position (`giorno1`, `giorno2`, ...). Previous keys are not preserved, so
//! ids of days, muscle groups and exercises change on a full re-encode;
//! targeted updates of existing nodes go through [`super::paths`] instead.

use serde_json::{json, Map, Value};

use super::keys;
use super::weight_logs;
use crate::models::{Day, Exercise, MuscleGroup, Plan};

/// Encodes a whole plan.
///
/// The start date is written with second precision in UTC.
pub fn encode_plan(plan: &Plan) -> Value {
    let mut root = Map::new();
    root.insert(
        keys::START_DATE.to_string(),
        json!(plan.start_date.format(keys::DATE_FORMAT).to_string()),
    );
    root.insert(keys::DURATION_WEEKS.to_string(), json!(plan.duration_weeks));
    root.insert(
        keys::CHANGE_REQUESTED.to_string(),
        json!(plan.change_requested),
    );
    root.insert(
        keys::DAYS.to_string(),
        keyed(keys::DAY_PREFIX, plan.days.iter().map(encode_day)),
    );
    Value::Object(root)
}

/// Encodes one day with its muscle groups.
pub fn encode_day(day: &Day) -> Value {
    let mut node = Map::new();
    node.insert(keys::NAME.to_string(), json!(day.name));
    node.insert(
        keys::MUSCLE_GROUPS.to_string(),
        keyed(
            keys::GROUP_PREFIX,
            day.muscle_groups.iter().map(encode_muscle_group),
        ),
    );
    Value::Object(node)
}

/// Encodes one muscle group with its exercises.
pub fn encode_muscle_group(group: &MuscleGroup) -> Value {
    let mut node = Map::new();
    node.insert(keys::NAME.to_string(), json!(group.name));
    node.insert(
        keys::EXERCISES.to_string(),
        keyed(
            keys::EXERCISE_PREFIX,
            group.exercises.iter().map(encode_exercise),
        ),
    );
    Value::Object(node)
}

/// Encodes one exercise. Unset optional text is written as `""`, and the
/// weight log map is only present when there are logs.
pub fn encode_exercise(exercise: &Exercise) -> Value {
    let optional = |text: &Option<String>| json!(text.as_deref().unwrap_or_default());

    let mut node = Map::new();
    node.insert(keys::NAME.to_string(), json!(exercise.name));
    node.insert(keys::REST.to_string(), optional(&exercise.rest_text));
    node.insert(
        keys::PRESCRIPTION.to_string(),
        json!(exercise.prescription_text),
    );
    node.insert(
        keys::TRAINER_NOTE.to_string(),
        optional(&exercise.trainer_note),
    );
    node.insert(keys::USER_NOTE.to_string(), optional(&exercise.user_note));

    if !exercise.weight_logs().is_empty() {
        node.insert(
            keys::WEIGHT_LOGS.to_string(),
            Value::Object(weight_logs::encode_all(exercise.weight_logs())),
        );
    }
    Value::Object(node)
}

fn keyed(prefix: &str, children: impl Iterator<Item = Value>) -> Value {
    Value::Object(
        children
            .enumerate()
            .map(|(index, child)| (keys::synthetic_key(prefix, index), child))
            .collect(),
    )
}
