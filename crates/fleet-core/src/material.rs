use crate::error::{FleetError, Result};
use crate::types::EquipmentStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ConsumableMaterial
// ---------------------------------------------------------------------------

/// Per-ambulance stock item that runs out or expires (gauze, gloves, saline).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableMaterial {
    pub id: String,
    pub ambulance_id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewConsumable {
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl NewConsumable {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FleetError::Validation("name is required".to_string()));
        }
        Ok(())
    }

    pub fn into_material(self, ambulance_id: &str, at: DateTime<Utc>) -> ConsumableMaterial {
        ConsumableMaterial {
            id: uuid::Uuid::new_v4().to_string(),
            ambulance_id: ambulance_id.to_string(),
            name: self.name.trim().to_string(),
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            created_at: at,
            updated_at: at,
        }
    }
}

// ---------------------------------------------------------------------------
// NonConsumableMaterial
// ---------------------------------------------------------------------------

/// Per-ambulance equipment tracked by condition rather than expiry
/// (defibrillator, stretcher, oxygen regulator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonConsumableMaterial {
    pub id: String,
    pub ambulance_id: String,
    pub name: String,
    pub status: EquipmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEquipment {
    pub name: String,
    #[serde(default)]
    pub status: EquipmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewEquipment {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FleetError::Validation("name is required".to_string()));
        }
        Ok(())
    }

    pub fn into_equipment(self, ambulance_id: &str, at: DateTime<Utc>) -> NonConsumableMaterial {
        NonConsumableMaterial {
            id: uuid::Uuid::new_v4().to_string(),
            ambulance_id: ambulance_id.to_string(),
            name: self.name.trim().to_string(),
            status: self.status,
            notes: self.notes,
            updated_at: at,
        }
    }
}
