use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::exercise::Exercise;
use super::sequence::{self, Identified};
use crate::error::ValidationError;

/// Exercises targeting one body area within a day, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroup {
    pub id: String,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl MuscleGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            exercises: Vec::new(),
        }
    }

    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    /// Appends a new exercise with a freshly generated id.
    pub fn add_exercise(&mut self, name: impl Into<String>) -> &mut Exercise {
        self.exercises
            .push(Exercise::new(Uuid::new_v4().to_string(), name));
        let last = self.exercises.len() - 1;
        &mut self.exercises[last]
    }

    /// Appends a caller-built exercise; its id must not be taken.
    pub fn push_exercise(&mut self, exercise: Exercise) -> Result<&mut Exercise, ValidationError> {
        sequence::push_unique(&mut self.exercises, exercise)
    }

    pub fn remove_exercise(&mut self, id: &str) -> Option<Exercise> {
        sequence::remove(&mut self.exercises, id)
    }

    pub fn move_exercise(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        sequence::move_item(&mut self.exercises, from, to)
    }

    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        sequence::find(&self.exercises, id)
    }

    pub fn exercise_mut(&mut self, id: &str) -> Option<&mut Exercise> {
        sequence::find_mut(&mut self.exercises, id)
    }
}

impl Identified for MuscleGroup {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.name, self.id)?;
        for exercise in &self.exercises {
            writeln!(f, "  - {} [{}]", exercise, exercise.id)?;
        }
        Ok(())
    }
}
