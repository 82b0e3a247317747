use clap::{Args, Subcommand};
use scheda_core::{decode_plan, encode_plan, lifecycle, DocumentPath, Plan};
use serde_json::json;

use super::{instant_or_now, OutputFormat};
use crate::storage::DocumentFile;

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show the days, muscle groups and exercises of a plan
    Show {
        /// Plan document (JSON)
        file: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show how long the plan stays valid
    Status {
        /// Plan document (JSON)
        file: String,

        /// Evaluate at this instant instead of now (RFC 3339)
        #[arg(long)]
        now: Option<String>,
    },

    /// Ask the trainer for a new plan
    RequestChange {
        /// Plan document (JSON)
        file: String,
    },

    /// Rewrite the document with keys renumbered in display order
    Normalize {
        /// Plan document (JSON)
        file: String,
    },
}

impl PlanCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PlanSubcommand::Show { file, format } => {
                let plan = load_plan(&DocumentFile::new(file))?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
                    OutputFormat::Text => print!("{}", plan),
                }
                Ok(())
            }

            PlanSubcommand::Status { file, now } => {
                let plan = load_plan(&DocumentFile::new(file))?;
                let now = instant_or_now(now.as_deref())?;
                let status = lifecycle::status(&plan, now);

                println!("Plan ends: {}", plan.end_date().format("%Y-%m-%d %H:%M"));
                println!("Status: {}", status);
                if plan.change_requested {
                    println!("A new plan has been requested.");
                } else if !matches!(status, lifecycle::PlanStatus::Active { .. }) {
                    println!("Use 'scheda plan request-change' to ask for a new plan.");
                }
                Ok(())
            }

            PlanSubcommand::RequestChange { file } => {
                let document = DocumentFile::new(file);
                if request_change(&document)? {
                    println!("Change requested.");
                } else {
                    println!("A change was already requested.");
                }
                Ok(())
            }

            PlanSubcommand::Normalize { file } => {
                let plan = normalize(&DocumentFile::new(file))?;
                println!(
                    "Rewrote {} day(s), {} exercise(s).",
                    plan.days.len(),
                    plan.exercise_count()
                );
                Ok(())
            }
        }
    }
}

pub(crate) fn load_plan(document: &DocumentFile) -> Result<Plan, Box<dyn std::error::Error>> {
    let tree = document.load()?;
    Ok(decode_plan(&tree)?)
}

/// Sets the renewal flag in place. Returns false if it was already set.
fn request_change(document: &DocumentFile) -> Result<bool, Box<dyn std::error::Error>> {
    let mut tree = document.load()?;
    let mut plan = decode_plan(&tree)?;
    if plan.change_requested {
        return Ok(false);
    }
    plan.request_change();

    DocumentPath::new("")
        .change_requested()
        .put(&mut tree, json!(plan.change_requested));
    document.save(&tree)?;
    tracing::info!("Requested plan change in {}", document.path().display());
    Ok(true)
}

/// Re-encodes the whole plan, renumbering every child key.
fn normalize(document: &DocumentFile) -> Result<Plan, Box<dyn std::error::Error>> {
    let plan = load_plan(document)?;
    document.save(&encode_plan(&plan))?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_plan(dir: &TempDir) -> DocumentFile {
        let document = DocumentFile::new(dir.path().join("plan.json"));
        document
            .save(&json!({
                "startDate": "2024-01-01T00:00:00+0000",
                "durationWeeks": 4,
                "days": { "giorno1": { "name": "Push" } }
            }))
            .unwrap();
        document
    }

    #[test]
    fn test_load_plan() {
        let dir = TempDir::new().unwrap();
        let plan = load_plan(&write_plan(&dir)).unwrap();
        assert_eq!(plan.duration_weeks, 4);
        assert_eq!(plan.days[0].name, "Push");
    }

    #[test]
    fn test_load_malformed_plan() {
        let dir = TempDir::new().unwrap();
        let document = DocumentFile::new(dir.path().join("plan.json"));
        document.save(&json!({ "durationWeeks": 4 })).unwrap();

        let err = load_plan(&document).unwrap_err();
        assert!(err.to_string().contains("Malformed plan"));
    }

    #[test]
    fn test_request_change_writes_flag_once() {
        let dir = TempDir::new().unwrap();
        let document = write_plan(&dir);

        assert!(request_change(&document).unwrap());
        let tree = document.load().unwrap();
        assert_eq!(tree["changeRequested"], true);
        assert_eq!(tree["days"]["giorno1"]["name"], "Push");
        assert!(!request_change(&document).unwrap());
    }

    #[test]
    fn test_normalize_renumbers_keys() {
        let dir = TempDir::new().unwrap();
        let document = DocumentFile::new(dir.path().join("plan.json"));
        document
            .save(&json!({
                "startDate": "2024-01-01T00:00:00+0000",
                "durationWeeks": 4,
                "days": {
                    "giorno10": { "name": "Second" },
                    "giorno3": { "name": "First" }
                }
            }))
            .unwrap();

        normalize(&document).unwrap();

        let tree = document.load().unwrap();
        assert_eq!(tree["days"]["giorno1"]["name"], "First");
        assert_eq!(tree["days"]["giorno2"]["name"], "Second");
        assert!(tree["days"].get("giorno10").is_none());
    }
}
