use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::Config;

const DEFAULT_CONFIG: &str = "\
# Label written at the start of the \"last weight\" note
note_label: Last weight
# Unit printed after weights
weight_unit: kg
# strftime pattern for the date in the note
date_format: \"%d %b %Y %H:%M\"
# Offset from UTC, in minutes, for note dates
utc_offset_minutes: 0
# Backend location of the plan document
plan_root: scheda
";

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a config file with the default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("note_label: {}", config.note_label.value);
                        println!("  source: {}", config.note_label.source);
                        println!("weight_unit: {}", config.weight_unit.value);
                        println!("  source: {}", config.weight_unit.source);
                        println!("date_format: {}", config.date_format.value);
                        println!("  source: {}", config.date_format.source);
                        println!("utc_offset_minutes: {}", config.utc_offset_minutes.value);
                        println!("  source: {}", config.utc_offset_minutes.source);
                        println!("plan_root: {}", config.plan_root.value);
                        println!("  source: {}", config.plan_root.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init { force } => {
                let path = config_path.unwrap_or_else(Config::default_config_path);
                if write_default_config(&path, *force)? {
                    println!("Wrote {}", path.display());
                } else {
                    println!(
                        "{} already exists. Use --force to overwrite.",
                        path.display()
                    );
                }
                Ok(())
            }
        }
    }
}

/// Writes the default config file. Returns false if one exists and `force` is off.
fn write_default_config(path: &std::path::Path, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_matches_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");

        assert!(write_default_config(&path, false).unwrap());
        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.note_label.source, ConfigSource::File);
        assert_eq!(config.note_format(), scheda_core::NoteFormat::default());
        assert_eq!(config.plan_root.value, "scheda");
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "weight_unit: lb\n").unwrap();

        assert!(!write_default_config(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "weight_unit: lb\n");

        assert!(write_default_config(&path, true).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("weight_unit: kg"));
    }
}
