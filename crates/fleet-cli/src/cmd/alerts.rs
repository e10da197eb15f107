use crate::output::{print_json, print_table};
use anyhow::Context;
use fleet_core::alerts;
use fleet_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let store = super::load_store(&config, false)?;

    let mut list = store.alerts(&config.alerts);
    alerts::sort_by_priority(&mut list);

    if json {
        return print_json(&list);
    }

    if list.is_empty() {
        println!("No active alerts.");
        return Ok(());
    }

    let rows = list
        .iter()
        .map(|a| {
            vec![
                a.severity.to_string(),
                a.kind.to_string(),
                a.source.to_string(),
                a.source_id.clone(),
                a.days.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                a.message.clone(),
            ]
        })
        .collect();
    print_table(
        &["SEVERITY", "KIND", "SOURCE", "ID", "DAYS", "MESSAGE"],
        rows,
    );
    Ok(())
}
