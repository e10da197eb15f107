use crate::error::{FleetError, Result};
use crate::paths;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Named format accepted in `import.date_formats` for full RFC 3339
/// timestamps (`2027-03-01T00:00:00Z`); only the date part is kept.
pub const RFC3339_FORMAT: &str = "rfc3339";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// AlertConfig
// ---------------------------------------------------------------------------

/// Lookahead windows and overdue thresholds for the alert scan, in days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_consumable_expiry_days")]
    pub consumable_expiry_days: i64,
    #[serde(default = "default_ampulario_expiry_days")]
    pub ampulario_expiry_days: i64,
    #[serde(default = "default_review_overdue_days")]
    pub review_overdue_days: i64,
    #[serde(default = "default_cleaning_overdue_days")]
    pub cleaning_overdue_days: i64,
}

fn default_consumable_expiry_days() -> i64 {
    7
}

fn default_ampulario_expiry_days() -> i64 {
    3
}

fn default_review_overdue_days() -> i64 {
    14
}

fn default_cleaning_overdue_days() -> i64 {
    7
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            consumable_expiry_days: default_consumable_expiry_days(),
            ampulario_expiry_days: default_ampulario_expiry_days(),
            review_overdue_days: default_review_overdue_days(),
            cleaning_overdue_days: default_cleaning_overdue_days(),
        }
    }
}

// ---------------------------------------------------------------------------
// ImportConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Accepted `expiry_date` formats, chrono strftime syntax or `rfc3339`.
    /// A value matching several formats with different results is rejected.
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_date_formats() -> Vec<String> {
    vec![
        "%Y-%m-%d".to_string(),
        RFC3339_FORMAT.to_string(),
        "%d/%m/%Y".to_string(),
        "%m/%d/%Y".to_string(),
    ]
}

fn default_max_rows() -> usize {
    5000
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            date_formats: default_date_formats(),
            max_rows: default_max_rows(),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_seed")]
    pub seed_demo_data: bool,
}

fn default_port() -> u16 {
    3141
}

fn default_seed() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            seed_demo_data: default_seed(),
        }
    }
}

// ---------------------------------------------------------------------------
// FleetConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub fleet: FleetConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self::new("fleet")
    }
}

impl Config {
    pub fn new(fleet_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            fleet: FleetConfig {
                name: fleet_name.into(),
                description: None,
            },
            alerts: AlertConfig::default(),
            import: ImportConfig::default(),
            server: ServerConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let data = crate::io::read_optional(&paths::config_path(root))?
            .ok_or(FleetError::NotInitialized)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like `load`, but an uninitialized root yields the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(FleetError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let windows = [
            ("consumable_expiry_days", self.alerts.consumable_expiry_days),
            ("ampulario_expiry_days", self.alerts.ampulario_expiry_days),
            ("review_overdue_days", self.alerts.review_overdue_days),
            ("cleaning_overdue_days", self.alerts.cleaning_overdue_days),
        ];
        for (name, days) in windows {
            if days < 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("alerts.{name} is negative ({days})"),
                });
            } else if days == 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("alerts.{name} is 0; only same-day items will be flagged"),
                });
            }
        }

        if self.import.date_formats.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "import.date_formats is empty; every CSV date would be rejected"
                    .to_string(),
            });
        }

        let mut seen = HashSet::new();
        for fmt in &self.import.date_formats {
            if !seen.insert(fmt.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("import.date_formats lists '{fmt}' more than once"),
                });
                continue;
            }
            if fmt != RFC3339_FORMAT && StrftimeItems::new(fmt).any(|i| matches!(i, Item::Error)) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("import.date_formats entry '{fmt}' is not a valid format"),
                });
            }
        }

        if self.import.max_rows == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "import.max_rows is 0; every CSV import would be rejected".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::new("north-base");
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.fleet.name, "north-base");
        assert_eq!(parsed.alerts.ampulario_expiry_days, 3);
        assert_eq!(parsed.alerts.consumable_expiry_days, 7);
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("fleet:\n  name: south\n").unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.alerts.review_overdue_days, 14);
        assert_eq!(cfg.server.port, 3141);
        assert!(cfg.import.date_formats.contains(&"%Y-%m-%d".to_string()));
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(FleetError::NotInitialized)
        ));
        let cfg = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(cfg.fleet.name, "fleet");
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("east");
        cfg.alerts.cleaning_overdue_days = 5;
        cfg.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.fleet.name, "east");
        assert_eq!(loaded.alerts.cleaning_overdue_days, 5);
    }

    #[test]
    fn default_config_has_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_formats_and_thresholds() {
        let mut cfg = Config::default();
        cfg.alerts.ampulario_expiry_days = -1;
        cfg.import.date_formats = vec!["%Q".into(), "%d/%m/%Y".into(), "%d/%m/%Y".into()];

        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("ampulario_expiry_days")));
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("'%Q'")));
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Warning && w.message.contains("more than once")));
    }

    #[test]
    fn default_formats_accept_day_and_month_first() {
        let formats = ImportConfig::default().date_formats;
        assert!(formats.contains(&"%d/%m/%Y".to_string()));
        assert!(formats.contains(&"%m/%d/%Y".to_string()));
    }
}
