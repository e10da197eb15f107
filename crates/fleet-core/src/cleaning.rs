use crate::error::{FleetError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only cleaning log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningLog {
    pub id: String,
    pub ambulance_id: String,
    pub responsible: String,
    #[serde(default)]
    pub deep_clean: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCleaning {
    pub responsible: String,
    #[serde(default)]
    pub deep_clean: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewCleaning {
    pub fn validate(&self) -> Result<()> {
        if self.responsible.trim().is_empty() {
            return Err(FleetError::Validation("responsible is required".to_string()));
        }
        Ok(())
    }

    pub fn into_log(self, ambulance_id: &str, at: DateTime<Utc>) -> CleaningLog {
        CleaningLog {
            id: uuid::Uuid::new_v4().to_string(),
            ambulance_id: ambulance_id.to_string(),
            responsible: self.responsible.trim().to_string(),
            deep_clean: self.deep_clean,
            notes: self.notes,
            created_at: at,
        }
    }
}
