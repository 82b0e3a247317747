use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::sequence::Identified;
use super::weight_log::WeightLog;
use crate::error::ValidationError;
use crate::note::{summarize, NoteFormat};

/// Separator joining the movements of a superset in an exercise name.
pub const SUPERSET_SEPARATOR: char = '+';

/// A prescribed movement, or a superset of movements joined by `+`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawExercise")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    /// Sets/reps prescription, e.g. "4x8"
    pub prescription_text: String,
    pub rest_text: Option<String>,
    pub trainer_note: Option<String>,
    pub user_note: Option<String>,
    /// Ascending by timestamp, unique by id
    weight_logs: Vec<WeightLog>,
}

/// Serde shape of an exercise; logs are re-sorted and deduplicated on the way in.
#[derive(Deserialize)]
struct RawExercise {
    id: String,
    name: String,
    prescription_text: String,
    rest_text: Option<String>,
    trainer_note: Option<String>,
    user_note: Option<String>,
    weight_logs: Vec<WeightLog>,
}

impl From<RawExercise> for Exercise {
    fn from(raw: RawExercise) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            prescription_text: raw.prescription_text,
            rest_text: raw.rest_text,
            trainer_note: raw.trainer_note,
            user_note: raw.user_note,
            weight_logs: Vec::new(),
        }
        .with_weight_logs(raw.weight_logs)
    }
}

impl Exercise {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prescription_text: String::new(),
            rest_text: None,
            trainer_note: None,
            user_note: None,
            weight_logs: Vec::new(),
        }
    }

    /// Creates an exercise with a freshly generated id.
    pub fn with_generated_id(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name)
    }

    pub fn with_prescription(mut self, prescription: impl Into<String>) -> Self {
        self.prescription_text = prescription.into();
        self
    }

    pub fn with_rest(mut self, rest: impl Into<String>) -> Self {
        self.rest_text = Some(rest.into());
        self
    }

    pub fn with_trainer_note(mut self, note: impl Into<String>) -> Self {
        self.trainer_note = Some(note.into());
        self
    }

    pub fn with_user_note(mut self, note: impl Into<String>) -> Self {
        self.user_note = Some(note.into());
        self
    }

    /// Replaces all weight logs, restoring time order.
    pub fn with_weight_logs(mut self, logs: Vec<WeightLog>) -> Self {
        self.weight_logs.clear();
        for log in logs {
            self.insert_log(log);
        }
        self
    }

    /// The individual movements named by this exercise.
    pub fn movements(&self) -> Vec<String> {
        parse_superset(&self.name)
    }

    pub fn is_superset(&self) -> bool {
        self.movements().len() > 1
    }

    pub fn weight_logs(&self) -> &[WeightLog] {
        &self.weight_logs
    }

    pub fn latest_log(&self) -> Option<&WeightLog> {
        self.weight_logs.last()
    }

    /// Inserts a log in time order. A log with the same id is replaced.
    pub fn insert_log(&mut self, log: WeightLog) {
        self.insert_sorted(log);
    }

    fn insert_sorted(&mut self, log: WeightLog) -> usize {
        self.weight_logs.retain(|existing| existing.id() != log.id());
        let pos = self
            .weight_logs
            .partition_point(|existing| existing.timestamp_millis() <= log.timestamp_millis());
        self.weight_logs.insert(pos, log);
        pos
    }

    /// Removes a log by id.
    pub fn remove_log(&mut self, id: &str) -> Option<WeightLog> {
        let pos = self.weight_logs.iter().position(|log| log.id() == id)?;
        Some(self.weight_logs.remove(pos))
    }

    /// Records a new weight and rewrites the user note with its summary.
    ///
    /// A non-positive weight or an unusable note format is rejected and
    /// leaves the exercise untouched.
    pub fn record_weight(
        &mut self,
        weight: f64,
        when: DateTime<Utc>,
        format: &NoteFormat,
    ) -> Result<&WeightLog, ValidationError> {
        let log = WeightLog::at(Uuid::new_v4().to_string(), when, weight)?;
        self.user_note = Some(summarize(&log, format)?);
        let pos = self.insert_sorted(log);
        Ok(&self.weight_logs[pos])
    }

    /// Explicit user edit of the note. An empty string clears it.
    pub fn set_user_note(&mut self, note: impl Into<String>) {
        let note = note.into();
        self.user_note = if note.is_empty() { None } else { Some(note) };
    }
}

impl Identified for Exercise {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Splits a superset name such as `"Pull-up + Row"` into its movements.
///
/// Segments are trimmed and empty ones dropped, so a name made only of
/// separators and whitespace yields an empty list.
pub fn parse_superset(name: &str) -> Vec<String> {
    name.split(SUPERSET_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.prescription_text.is_empty() {
            write!(f, " - {}", self.prescription_text)?;
        }
        if let Some(rest) = self.rest_text.as_deref().filter(|r| !r.is_empty()) {
            write!(f, " (rest {})", rest)?;
        }
        Ok(())
    }
}
