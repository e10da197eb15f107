//! Ampulario: medication stock held in storage spaces, independent of the
//! per-ambulance consumables.

use crate::error::{FleetError, Result};
use crate::types::{Route, SpaceKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Space
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
    pub kind: SpaceKind,
    /// Set when the space is a vehicle compartment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambulance_id: Option<String>,
}

impl Space {
    pub fn cabinet(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: SpaceKind::Cabinet,
            ambulance_id: None,
        }
    }

    pub fn vehicle(
        id: impl Into<String>,
        name: impl Into<String>,
        ambulance_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: SpaceKind::Vehicle,
            ambulance_id: Some(ambulance_id.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// AmpularioMaterial
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmpularioMaterial {
    pub id: String,
    pub space_id: String,
    pub name: String,
    pub dose: String,
    pub unit: String,
    pub quantity: u32,
    pub route: Route,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a material, from a JSON body or a CSV row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaterialInput {
    pub name: String,
    #[serde(default)]
    pub dose: String,
    #[serde(default)]
    pub unit: String,
    pub quantity: u32,
    pub route: Route,
    pub expiry_date: NaiveDate,
    #[serde(alias = "spaceId")]
    pub space_id: String,
}

impl MaterialInput {
    /// Field checks that do not need the store. Space existence is checked by
    /// the caller.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FleetError::Validation("name is required".to_string()));
        }
        if self.space_id.trim().is_empty() {
            return Err(FleetError::Validation("space_id is required".to_string()));
        }
        Ok(())
    }

    pub fn into_material(self, at: DateTime<Utc>) -> AmpularioMaterial {
        AmpularioMaterial {
            id: uuid::Uuid::new_v4().to_string(),
            space_id: self.space_id.trim().to_string(),
            name: self.name.trim().to_string(),
            dose: self.dose.trim().to_string(),
            unit: self.unit.trim().to_string(),
            quantity: self.quantity,
            route: self.route,
            expiry_date: self.expiry_date,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Partial update for `PUT /api/materials/{id}`. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub dose: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<u32>,
    pub route: Option<Route>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(alias = "spaceId")]
    pub space_id: Option<String>,
}

impl AmpularioMaterial {
    pub fn apply(&mut self, patch: MaterialPatch, at: DateTime<Utc>) -> Result<()> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(FleetError::Validation("name cannot be empty".to_string()));
            }
            self.name = name.trim().to_string();
        }
        if let Some(dose) = patch.dose {
            self.dose = dose.trim().to_string();
        }
        if let Some(unit) = patch.unit {
            self.unit = unit.trim().to_string();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(route) = patch.route {
            self.route = route;
        }
        if let Some(expiry) = patch.expiry_date {
            self.expiry_date = expiry;
        }
        if let Some(space_id) = patch.space_id {
            self.space_id = space_id.trim().to_string();
        }
        self.updated_at = at;
        Ok(())
    }
}
