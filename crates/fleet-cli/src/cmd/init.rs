use anyhow::Context;
use fleet_core::config::Config;
use fleet_core::paths;
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let fleet_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fleet".to_string());

    println!("Initializing fleet in: {}", root.display());

    let config_path = paths::config_path(root);
    if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        Config::new(fleet_name)
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    Ok(())
}
