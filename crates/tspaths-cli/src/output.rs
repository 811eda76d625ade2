//! Output formatting
//!
//! Human output is meant for reading in a terminal, JSON output mirrors the
//! loader result with the mapping entries attached.

use crate::OutputFormat;
use anyhow::Result;
use colored::*;
use serde::Serialize;
use tspaths_core::{ConfigLoaderSuccess, MappingEntry};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuccessReport<'a> {
    result_type: &'static str,
    #[serde(flatten)]
    success: &'a ConfigLoaderSuccess,
    mapping_entries: Vec<MappingEntry>,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn print_success(&self, success: &ConfigLoaderSuccess) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                self.print_human(success);
                Ok(())
            }
            OutputFormat::Json => {
                let report = SuccessReport {
                    result_type: "success",
                    success,
                    mapping_entries: success.mapping_entries(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(())
            }
        }
    }

    pub fn print_failure(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "error:".red().bold(), message),
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "resultType": "failed",
                    "message": message,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Ok(())
    }

    fn print_human(&self, success: &ConfigLoaderSuccess) {
        println!(
            "{:>18} {}",
            "Config file".bold(),
            success.config_file_absolute_path.display()
        );
        println!(
            "{:>18} {}",
            "baseUrl".bold(),
            success.base_url.as_deref().unwrap_or("(none)")
        );
        println!(
            "{:>18} {}",
            "Absolute baseUrl".bold(),
            success.absolute_base_url.display()
        );

        let entries = success.mapping_entries();
        if entries.is_empty() {
            println!("\n{}", "No path mappings".dimmed());
            return;
        }

        println!("\n{}", "Mappings (most specific first)".bold().underline());
        for entry in &entries {
            println!("  {}", entry.pattern.cyan());
            for path in &entry.paths {
                println!("    {} {}", "→".dimmed(), path.display());
            }
        }
    }
}
