use crate::error::{FleetError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const FLEET_DIR: &str = ".fleet";
pub const CONFIG_FILE: &str = ".fleet/config.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

fn id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("static regex"))
}

/// Ambulance and space ids are human-chosen slugs (`amb-03`, `cabinet-a`).
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 64 || !id_re().is_match(id) {
        return Err(FleetError::InvalidId(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids() {
        for id in ["amb-01", "a", "cabinet-a", "base-3-room-2"] {
            validate_id(id).unwrap_or_else(|_| panic!("expected valid: {id}"));
        }
    }

    #[test]
    fn invalid_ids() {
        for id in ["", "-amb", "Amb-01", "amb 01", "amb_01"] {
            assert!(validate_id(id).is_err(), "expected invalid: {id:?}");
        }
        assert!(validate_id(&"a".repeat(65)).is_err());
    }

    #[test]
    fn config_lives_under_fleet_dir() {
        let p = config_path(Path::new("/srv/fleet"));
        assert_eq!(p, PathBuf::from("/srv/fleet/.fleet/config.yaml"));
    }
}
