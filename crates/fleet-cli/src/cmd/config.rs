use crate::output::{print_fields, print_json};
use anyhow::Context;
use clap::Subcommand;
use fleet_core::config::{Config, WarnLevel};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;

    if json {
        return print_json(&config);
    }

    println!("Fleet: {}", config.fleet.name);
    let a = &config.alerts;
    println!("\nAlerts (days):");
    print_fields(&[
        ("consumable expiry window", a.consumable_expiry_days.to_string()),
        ("ampulario expiry window", a.ampulario_expiry_days.to_string()),
        ("review overdue after", a.review_overdue_days.to_string()),
        ("cleaning overdue after", a.cleaning_overdue_days.to_string()),
    ]);
    println!("\nImport:");
    print_fields(&[
        ("date formats", config.import.date_formats.join(", ")),
        ("max rows", config.import.max_rows.to_string()),
    ]);
    println!("\nServer:");
    print_fields(&[
        ("port", config.server.port.to_string()),
        ("demo data", config.server.seed_demo_data.to_string()),
    ]);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
