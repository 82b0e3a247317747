//! Backend paths to nodes inside a plan document.
//!
//! Full re-encodes renumber every child, so updates to existing data (a new
//! weight log, an edited note) are written to the node's existing path
//! instead. Paths are built from explicit ids rooted at the plan's location,
//! which the host supplies (e.g. `users/AB12CD/scheda`).

use serde_json::{Map, Value};
use std::fmt;

use super::keys;

/// A slash-separated path in the backend tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// A path rooted at `root`; empty segments are ignored.
    pub fn new(root: &str) -> Self {
        Self {
            segments: split(root),
        }
    }

    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(split(segment));
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path of a day node.
    pub fn day(&self, day_id: &str) -> Self {
        self.child(keys::DAYS).child(day_id)
    }

    /// Path of a muscle group node.
    pub fn muscle_group(&self, day_id: &str, group_id: &str) -> Self {
        self.day(day_id).child(keys::MUSCLE_GROUPS).child(group_id)
    }

    /// Path of an exercise node.
    pub fn exercise(&self, day_id: &str, group_id: &str, exercise_id: &str) -> Self {
        self.muscle_group(day_id, group_id)
            .child(keys::EXERCISES)
            .child(exercise_id)
    }

    /// Path of one weight log under an exercise.
    pub fn weight_log(&self, day_id: &str, group_id: &str, exercise_id: &str, log_id: &str) -> Self {
        self.exercise(day_id, group_id, exercise_id)
            .child(keys::WEIGHT_LOGS)
            .child(log_id)
    }

    /// Path of an exercise's user note field.
    pub fn user_note(&self, day_id: &str, group_id: &str, exercise_id: &str) -> Self {
        self.exercise(day_id, group_id, exercise_id)
            .child(keys::USER_NOTE)
    }

    /// Path of the plan's renewal flag.
    pub fn change_requested(&self) -> Self {
        self.child(keys::CHANGE_REQUESTED)
    }

    /// The node at this path inside a local copy of the tree.
    pub fn get<'a>(&self, tree: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(tree, |node, segment| node.get(segment))
    }

    /// Writes `value` at this path inside a local copy of the tree, creating
    /// missing maps on the way. An empty path replaces the whole tree.
    pub fn put(&self, tree: &mut Value, value: Value) {
        let Some((last, parents)) = self.segments.split_last() else {
            *tree = value;
            return;
        };

        let mut node = tree;
        for segment in parents {
            node = as_map(node)
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        as_map(node).insert(last.clone(), value);
    }
}

/// Replaces non-map nodes with an empty map.
fn as_map(node: &mut Value) -> &mut Map<String, Value> {
    match node {
        Value::Object(map) => map,
        other => {
            *other = Value::Object(Map::new());
            as_map(other)
        }
    }
}

fn split(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
