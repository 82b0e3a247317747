use clap::Args;
use scheda_core::{parse_alerts, rank, UserAlert};

use super::{instant_or_now, OutputFormat};
use crate::storage::DocumentFile;

/// Show the trainer's alerts, most urgent first
#[derive(Args)]
pub struct AlertsCommand {
    /// Alert feed snapshot (JSON)
    pub file: String,

    /// Evaluate expiry at this instant instead of now (RFC 3339)
    #[arg(long)]
    pub now: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl AlertsCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let now = instant_or_now(self.now.as_deref())?;
        let alerts = load_alerts(&DocumentFile::new(&self.file), now)?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
            }
            OutputFormat::Text => {
                if alerts.is_empty() {
                    println!("No alerts.");
                }
                for alert in &alerts {
                    println!("{}", alert);
                }
            }
        }
        Ok(())
    }
}

fn load_alerts(
    document: &DocumentFile,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<Vec<UserAlert>, Box<dyn std::error::Error>> {
    let feed = document.load()?;
    let alerts = parse_alerts(&feed);
    tracing::debug!("Read {} alert(s) from {}", alerts.len(), document.path().display());
    Ok(rank(alerts, now))
}
