//! "Last weight" note derivation.
//!
//! Recording a weight writes a short summary of that log into the
//! exercise's user note. This is the only automatic change ever made to a
//! user note; every other edit comes from the user and overwrites it.

use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::error::ValidationError;
use crate::models::WeightLog;

/// Locale-dependent pieces of the summary string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteFormat {
    pub label: String,
    pub unit: String,
    /// chrono strftime pattern for the log date
    pub date_format: String,
    /// Offset from UTC the date is rendered in
    pub utc_offset_minutes: i32,
}

impl Default for NoteFormat {
    fn default() -> Self {
        Self {
            label: "Last weight".to_string(),
            unit: "kg".to_string(),
            date_format: "%d %b %Y %H:%M".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

impl NoteFormat {
    /// Rejects a date pattern chrono cannot render.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ValidationError::InvalidDateFormat(self.date_format.clone()));
        }
        Ok(())
    }

    fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

/// Formats a weight with at most two fraction digits, dropping trailing zeros.
pub fn format_weight(weight: f64) -> String {
    let formatted = format!("{:.2}", weight);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Builds the summary written into `user_note`, e.g.
/// `"Last weight: 42.5 kg - 14 Nov 2023 22:13"`.
pub fn summarize(log: &WeightLog, format: &NoteFormat) -> Result<String, ValidationError> {
    format.validate()?;
    let date = log.date().with_timezone(&format.offset());

    let mut note = String::new();
    write!(
        note,
        "{}: {} {} - {}",
        format.label,
        format_weight(log.weight()),
        format.unit,
        date.format(&format.date_format)
    )
    .map_err(|_| ValidationError::InvalidDateFormat(format.date_format.clone()))?;
    Ok(note)
}
