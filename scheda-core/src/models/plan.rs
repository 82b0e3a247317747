use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use super::day::Day;
use super::exercise::Exercise;
use super::sequence;
use crate::error::{PlanError, ValidationError};

/// A trainer-assigned multi-week workout program ("scheda").
///
/// A plan has no id of its own: there is at most one plan per user record,
/// so the host addresses it through the owning user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Whole seconds; documents store no finer precision
    #[serde(deserialize_with = "whole_seconds")]
    pub start_date: DateTime<Utc>,
    /// Validity length in weeks. At least 1 unless decoded from incomplete data.
    pub duration_weeks: u32,
    pub days: Vec<Day>,
    /// Set when the client asked the trainer for a new plan
    pub change_requested: bool,
}

impl Plan {
    pub fn new(start_date: DateTime<Utc>, duration_weeks: u32) -> Result<Self, ValidationError> {
        if duration_weeks == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        Ok(Self {
            start_date: start_date.trunc_subsecs(0),
            duration_weeks,
            days: Vec::new(),
            change_requested: false,
        })
    }

    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    /// Sets the start date, dropping any fraction of a second.
    pub fn set_start_date(&mut self, start_date: DateTime<Utc>) {
        self.start_date = start_date.trunc_subsecs(0);
    }

    pub fn set_duration_weeks(&mut self, weeks: u32) -> Result<(), ValidationError> {
        if weeks == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        self.duration_weeks = weeks;
        Ok(())
    }

    /// The instant the plan stops being valid.
    pub fn end_date(&self) -> DateTime<Utc> {
        self.start_date
            .checked_add_signed(Duration::weeks(i64::from(self.duration_weeks)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn request_change(&mut self) {
        self.change_requested = true;
    }

    pub fn clear_change_request(&mut self) {
        self.change_requested = false;
    }

    /// Appends a new day with a freshly generated id.
    pub fn add_day(&mut self, name: impl Into<String>) -> &mut Day {
        self.days.push(Day::new(Uuid::new_v4().to_string(), name));
        let last = self.days.len() - 1;
        &mut self.days[last]
    }

    pub fn push_day(&mut self, day: Day) -> Result<&mut Day, ValidationError> {
        sequence::push_unique(&mut self.days, day)
    }

    pub fn remove_day(&mut self, id: &str) -> Option<Day> {
        sequence::remove(&mut self.days, id)
    }

    pub fn move_day(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        sequence::move_item(&mut self.days, from, to)
    }

    pub fn day(&self, id: &str) -> Option<&Day> {
        sequence::find(&self.days, id)
    }

    pub fn day_mut(&mut self, id: &str) -> Option<&mut Day> {
        sequence::find_mut(&mut self.days, id)
    }

    /// Looks up an exercise by the ids along its path.
    pub fn exercise(
        &self,
        day_id: &str,
        group_id: &str,
        exercise_id: &str,
    ) -> Result<&Exercise, PlanError> {
        self.day(day_id)
            .ok_or_else(|| PlanError::DayNotFound(day_id.to_string()))?
            .muscle_group(group_id)
            .ok_or_else(|| PlanError::MuscleGroupNotFound(group_id.to_string()))?
            .exercise(exercise_id)
            .ok_or_else(|| PlanError::ExerciseNotFound(exercise_id.to_string()))
    }

    pub fn exercise_mut(
        &mut self,
        day_id: &str,
        group_id: &str,
        exercise_id: &str,
    ) -> Result<&mut Exercise, PlanError> {
        self.day_mut(day_id)
            .ok_or_else(|| PlanError::DayNotFound(day_id.to_string()))?
            .muscle_group_mut(group_id)
            .ok_or_else(|| PlanError::MuscleGroupNotFound(group_id.to_string()))?
            .exercise_mut(exercise_id)
            .ok_or_else(|| PlanError::ExerciseNotFound(exercise_id.to_string()))
    }

    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(Day::exercise_count).sum()
    }
}

fn whole_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    DateTime::<Utc>::deserialize(deserializer).map(|date| date.trunc_subsecs(0))
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workout plan")?;
        writeln!(f, "============")?;
        writeln!(f, "Start: {}", self.start_date.format("%Y-%m-%d"))?;
        writeln!(
            f,
            "Duration: {} week(s), until {}",
            self.duration_weeks,
            self.end_date().format("%Y-%m-%d")
        )?;
        if self.change_requested {
            writeln!(f, "Change requested")?;
        }

        for day in &self.days {
            writeln!(f)?;
            write!(f, "{}", day)?;
        }

        Ok(())
    }
}
