use clap::{Args, Subcommand};
use scheda_core::document::{coerce, weight_logs};
use scheda_core::{decode_plan, format_weight, DocumentPath, NoteFormat, WeightLog};
use serde_json::{json, Value};

use super::{instant_or_now, OutputFormat};
use crate::config::Config;
use crate::storage::DocumentFile;

/// Ids locating an exercise inside a plan document.
#[derive(Args, Clone)]
pub struct ExerciseTarget {
    /// Day key (e.g. giorno1)
    #[arg(long)]
    pub day: String,

    /// Muscle group key (e.g. gruppo2)
    #[arg(long)]
    pub group: String,

    /// Exercise key (e.g. esercizio1)
    #[arg(long)]
    pub exercise: String,
}

#[derive(Args)]
pub struct WeightCommand {
    #[command(subcommand)]
    pub command: WeightSubcommand,
}

#[derive(Subcommand)]
pub enum WeightSubcommand {
    /// Record a weight for an exercise
    Add {
        /// Plan document (JSON)
        file: String,

        #[command(flatten)]
        target: ExerciseTarget,

        /// Weight lifted; "42,5" and "42.5" are both accepted
        #[arg(long, short)]
        weight: String,

        /// When the weight was lifted (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// List recorded weights for an exercise
    List {
        /// Plan document (JSON)
        file: String,

        #[command(flatten)]
        target: ExerciseTarget,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl WeightCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            WeightSubcommand::Add {
                file,
                target,
                weight,
                at,
            } => {
                let weight = coerce::number(&Value::String(weight.clone()))
                    .ok_or_else(|| format!("Invalid weight '{}'", weight))?;
                let when = instant_or_now(at.as_deref())?;

                let document = DocumentFile::new(file);
                let recorded = record_weight(&document, target, weight, when, &config.note_format())?;

                println!(
                    "Recorded {} {}",
                    format_weight(recorded.log.weight()),
                    config.weight_unit.value
                );
                println!("Note: {}", recorded.note);

                let root = DocumentPath::new(&config.plan_root.value);
                println!("Backend updates:");
                println!(
                    "  {}",
                    root.weight_log(&target.day, &target.group, &target.exercise, recorded.log.id())
                );
                println!(
                    "  {}",
                    root.user_note(&target.day, &target.group, &target.exercise)
                );
                Ok(())
            }

            WeightSubcommand::List {
                file,
                target,
                format,
            } => {
                let tree = DocumentFile::new(file).load()?;
                let plan = decode_plan(&tree)?;
                let exercise = plan.exercise(&target.day, &target.group, &target.exercise)?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(exercise.weight_logs())?);
                    }
                    OutputFormat::Text => {
                        println!("{}", exercise.name);
                        if exercise.weight_logs().is_empty() {
                            println!("No weights recorded.");
                        }
                        for log in exercise.weight_logs() {
                            println!(
                                "  {}  {} {}",
                                log.date().format("%Y-%m-%d %H:%M"),
                                format_weight(log.weight()),
                                config.weight_unit.value
                            );
                        }
                        if let Some(note) = &exercise.user_note {
                            println!("Note: {}", note);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

struct RecordedWeight {
    log: WeightLog,
    note: String,
}

/// Records a weight and writes only the new log and the note back, leaving
/// every existing key of the document untouched.
fn record_weight(
    document: &DocumentFile,
    target: &ExerciseTarget,
    weight: f64,
    when: chrono::DateTime<chrono::Utc>,
    format: &NoteFormat,
) -> Result<RecordedWeight, Box<dyn std::error::Error>> {
    let mut tree = document.load()?;
    let mut plan = decode_plan(&tree)?;
    let exercise = plan.exercise_mut(&target.day, &target.group, &target.exercise)?;

    let log = exercise.record_weight(weight, when, format)?.clone();
    let note = exercise.user_note.clone().unwrap_or_default();

    let paths = DocumentPath::new("");
    paths
        .weight_log(&target.day, &target.group, &target.exercise, log.id())
        .put(&mut tree, weight_logs::encode(&log));
    paths
        .user_note(&target.day, &target.group, &target.exercise)
        .put(&mut tree, json!(note));
    document.save(&tree)?;

    tracing::info!(
        "Recorded weight {} for exercise {}",
        log.weight(),
        target.exercise
    );
    Ok(RecordedWeight { log, note })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use scheda_core::PlanError;
    use tempfile::TempDir;

    fn target() -> ExerciseTarget {
        ExerciseTarget {
            day: "giorno1".to_string(),
            group: "gruppo1".to_string(),
            exercise: "esercizio1".to_string(),
        }
    }

    fn write_plan(dir: &TempDir) -> DocumentFile {
        let document = DocumentFile::new(dir.path().join("plan.json"));
        document
            .save(&json!({
                "startDate": "2024-01-01T00:00:00+0000",
                "durationWeeks": 4,
                "days": { "giorno1": { "name": "Push", "muscleGroups": { "gruppo1": {
                    "name": "Chest",
                    "exercises": { "esercizio1": {
                        "name": "Bench press",
                        "serie": "4x8",
                        "noteUtente": "my note",
                        "weightLogs": { "old": { "timestamp": 1_690_000_000, "weight": 55 } }
                    } }
                } } } }
            }))
            .unwrap();
        document
    }

    #[test]
    fn test_record_weight_updates_document_in_place() {
        let dir = TempDir::new().unwrap();
        let document = write_plan(&dir);
        let when = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();

        let recorded =
            record_weight(&document, &target(), 42.5, when, &NoteFormat::default()).unwrap();
        assert_eq!(recorded.note, "Last weight: 42.5 kg - 14 Nov 2023 22:13");

        let tree = document.load().unwrap();
        let exercise = &tree["days"]["giorno1"]["muscleGroups"]["gruppo1"]["exercises"]["esercizio1"];
        assert_eq!(exercise["noteUtente"], "Last weight: 42.5 kg - 14 Nov 2023 22:13");
        assert_eq!(exercise["weightLogs"]["old"]["weight"], 55);
        assert_eq!(
            exercise["weightLogs"][recorded.log.id()]["timestamp"],
            1_700_000_000_000_i64
        );

        let plan = decode_plan(&tree).unwrap();
        let logs = plan
            .exercise("giorno1", "gruppo1", "esercizio1")
            .unwrap()
            .weight_logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id(), "old");
    }

    #[test]
    fn test_record_non_positive_weight_leaves_document_untouched() {
        let dir = TempDir::new().unwrap();
        let document = write_plan(&dir);
        let before = document.load().unwrap();

        let result = record_weight(&document, &target(), 0.0, Utc::now(), &NoteFormat::default());
        assert!(result.is_err());
        assert_eq!(document.load().unwrap(), before);
    }

    #[test]
    fn test_record_weight_bad_date_format_is_an_error() {
        let dir = TempDir::new().unwrap();
        let document = write_plan(&dir);
        let before = document.load().unwrap();
        let format = NoteFormat {
            date_format: "%Q".to_string(),
            ..NoteFormat::default()
        };

        let err = record_weight(&document, &target(), 50.0, Utc::now(), &format)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Invalid date format"));
        assert_eq!(document.load().unwrap(), before);
    }

    #[test]
    fn test_record_weight_unknown_exercise() {
        let dir = TempDir::new().unwrap();
        let document = write_plan(&dir);
        let mut missing = target();
        missing.exercise = "esercizio9".to_string();

        let err = record_weight(&document, &missing, 50.0, Utc::now(), &NoteFormat::default())
            .err()
            .unwrap();
        assert_eq!(
            err.downcast_ref::<PlanError>(),
            Some(&PlanError::ExerciseNotFound("esercizio9".to_string()))
        );
    }
}
