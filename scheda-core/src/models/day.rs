use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::muscle_group::MuscleGroup;
use super::sequence::{self, Identified};
use crate::error::ValidationError;

/// One training session within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub id: String,
    pub name: String,
    pub muscle_groups: Vec<MuscleGroup>,
}

impl Day {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            muscle_groups: Vec::new(),
        }
    }

    pub fn with_muscle_groups(mut self, muscle_groups: Vec<MuscleGroup>) -> Self {
        self.muscle_groups = muscle_groups;
        self
    }

    /// Appends a new muscle group with a freshly generated id.
    pub fn add_muscle_group(&mut self, name: impl Into<String>) -> &mut MuscleGroup {
        self.muscle_groups
            .push(MuscleGroup::new(Uuid::new_v4().to_string(), name));
        let last = self.muscle_groups.len() - 1;
        &mut self.muscle_groups[last]
    }

    pub fn push_muscle_group(
        &mut self,
        group: MuscleGroup,
    ) -> Result<&mut MuscleGroup, ValidationError> {
        sequence::push_unique(&mut self.muscle_groups, group)
    }

    pub fn remove_muscle_group(&mut self, id: &str) -> Option<MuscleGroup> {
        sequence::remove(&mut self.muscle_groups, id)
    }

    pub fn move_muscle_group(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        sequence::move_item(&mut self.muscle_groups, from, to)
    }

    pub fn muscle_group(&self, id: &str) -> Option<&MuscleGroup> {
        sequence::find(&self.muscle_groups, id)
    }

    pub fn muscle_group_mut(&mut self, id: &str) -> Option<&mut MuscleGroup> {
        sequence::find_mut(&mut self.muscle_groups, id)
    }

    pub fn exercise_count(&self) -> usize {
        self.muscle_groups.iter().map(|g| g.exercises.len()).sum()
    }
}

impl Identified for Day {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.name, self.id)?;
        writeln!(f, "{}", "-".repeat(self.name.len()))?;
        for group in &self.muscle_groups {
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}
