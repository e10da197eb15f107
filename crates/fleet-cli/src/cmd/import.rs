use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use fleet_core::config::Config;
use fleet_core::import;
use fleet_core::FleetError;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ImportSubcommand {
    /// Validate an Ampulario CSV without importing it
    Check {
        /// Path to the CSV file
        file: PathBuf,
    },
}

pub fn run(root: &Path, subcmd: ImportSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ImportSubcommand::Check { file } => check(root, &file, json),
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

/// Parse `file` against the configured date formats and the demo spaces.
/// Exits non-zero when the file would be rejected.
fn check(root: &Path, file: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let store = super::load_store(&config, false)?;
    let data = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    let rows = match import::parse_csv(&data, &config.import, store.spaces()) {
        Ok(rows) => rows,
        Err(FleetError::ImportRejected { message, details }) => {
            if json {
                print_json(&serde_json::json!({
                    "ok": false,
                    "error": message,
                    "details": details,
                }))?;
            } else {
                println!("{message}");
                for d in &details {
                    println!("  {d}");
                }
            }
            anyhow::bail!("{} rejected", file.display());
        }
        Err(e) => return Err(e).context("failed to parse CSV"),
    };

    if json {
        return print_json(&serde_json::json!({
            "ok": true,
            "rows": rows.len(),
        }));
    }

    let table = rows
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                format!("{} {}", r.dose, r.unit).trim().to_string(),
                r.quantity.to_string(),
                r.route.to_string(),
                r.expiry_date.to_string(),
                r.space_id.clone(),
            ]
        })
        .collect();
    print_table(
        &["NAME", "DOSE", "QTY", "ROUTE", "EXPIRY", "SPACE"],
        table,
    );
    println!("\n{} rows would be imported.", rows.len());
    Ok(())
}
