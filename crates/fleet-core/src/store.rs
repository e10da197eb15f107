use crate::alerts::{self, Alert, Snapshot};
use crate::ambulance::{Ambulance, StepOutcome};
use crate::ampulario::{AmpularioMaterial, MaterialInput, MaterialPatch, Space};
use crate::cleaning::{CleaningLog, NewCleaning};
use crate::config::AlertConfig;
use crate::error::{FleetError, Result};
use crate::material::{ConsumableMaterial, NewConsumable, NewEquipment, NonConsumableMaterial};
use crate::paths;
use crate::review::{MechanicalReview, NewReview};
use crate::types::{EquipmentStatus, WorkflowStep};
use chrono::{DateTime, Utc};

/// Source of "now" for timestamps and the alert scan.
pub type Clock = fn() -> DateTime<Utc>;

/// Process-local fleet state. Nothing here survives a restart.
///
/// Every successful mutation bumps `revision`, which the server uses to
/// notify change-feed subscribers.
pub struct Store {
    ambulances: Vec<Ambulance>,
    reviews: Vec<MechanicalReview>,
    cleanings: Vec<CleaningLog>,
    consumables: Vec<ConsumableMaterial>,
    equipment: Vec<NonConsumableMaterial>,
    spaces: Vec<Space>,
    ampulario: Vec<AmpularioMaterial>,
    revision: u64,
    clock: Clock,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            ambulances: Vec::new(),
            reviews: Vec::new(),
            cleanings: Vec::new(),
            consumables: Vec::new(),
            equipment: Vec::new(),
            spaces: Vec::new(),
            ampulario: Vec::new(),
            revision: 0,
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // -----------------------------------------------------------------------
    // Ambulances
    // -----------------------------------------------------------------------

    pub fn add_ambulance(&mut self, ambulance: Ambulance) -> Result<()> {
        paths::validate_id(&ambulance.id)?;
        if self.ambulances.iter().any(|a| a.id == ambulance.id) {
            return Err(FleetError::AmbulanceExists(ambulance.id));
        }
        self.ambulances.push(ambulance);
        self.touch();
        Ok(())
    }

    pub fn ambulances(&self) -> &[Ambulance] {
        &self.ambulances
    }

    pub fn ambulance(&self, id: &str) -> Result<&Ambulance> {
        self.ambulances
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| FleetError::AmbulanceNotFound(id.to_string()))
    }

    fn ambulance_mut(&mut self, id: &str) -> Result<&mut Ambulance> {
        self.ambulances
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| FleetError::AmbulanceNotFound(id.to_string()))
    }

    pub fn complete_step(&mut self, id: &str, step: WorkflowStep) -> Result<StepOutcome> {
        let now = self.now();
        let outcome = self.ambulance_mut(id)?.complete_step(step, now)?;
        self.touch();
        Ok(outcome)
    }

    pub fn revoke_step(&mut self, id: &str, step: WorkflowStep) -> Result<Vec<WorkflowStep>> {
        let now = self.now();
        let cleared = self.ambulance_mut(id)?.revoke_step(step, now);
        if !cleared.is_empty() {
            self.touch();
        }
        Ok(cleared)
    }

    /// Record a mechanical review and complete the mechanical step.
    pub fn submit_review(&mut self, id: &str, review: NewReview) -> Result<MechanicalReview> {
        review.validate()?;
        let now = self.now();
        self.ambulance_mut(id)?
            .complete_step(WorkflowStep::Mechanical, now)?;

        let review = review.into_review(id, now);
        if review.needs_repair() {
            tracing::warn!(
                ambulance = id,
                repairs = review.repairs().count(),
                "mechanical review flagged items for repair"
            );
        }
        self.reviews.push(review.clone());
        self.touch();
        Ok(review)
    }

    pub fn reviews_for(&self, id: &str) -> Result<Vec<&MechanicalReview>> {
        self.ambulance(id)?;
        Ok(self.reviews.iter().filter(|r| r.ambulance_id == id).collect())
    }

    /// Append a cleaning log entry and complete the cleaning step. Locked
    /// until the mechanical review of the current cycle is done.
    pub fn log_cleaning(&mut self, id: &str, cleaning: NewCleaning) -> Result<CleaningLog> {
        cleaning.validate()?;
        let now = self.now();
        self.ambulance_mut(id)?
            .complete_step(WorkflowStep::Cleaning, now)?;

        let log = cleaning.into_log(id, now);
        self.cleanings.push(log.clone());
        self.touch();
        Ok(log)
    }

    pub fn cleanings_for(&self, id: &str) -> Result<Vec<&CleaningLog>> {
        self.ambulance(id)?;
        Ok(self
            .cleanings
            .iter()
            .filter(|c| c.ambulance_id == id)
            .collect())
    }

    pub fn complete_inventory(&mut self, id: &str) -> Result<StepOutcome> {
        self.complete_step(id, WorkflowStep::Inventory)
    }

    // -----------------------------------------------------------------------
    // Consumables and equipment
    // -----------------------------------------------------------------------

    pub fn add_consumable(&mut self, ambulance_id: &str, item: NewConsumable) -> Result<ConsumableMaterial> {
        item.validate()?;
        self.ambulance(ambulance_id)?;
        let material = item.into_material(ambulance_id, self.now());
        self.consumables.push(material.clone());
        self.touch();
        Ok(material)
    }

    pub fn consumables_for(&self, ambulance_id: &str) -> Result<Vec<&ConsumableMaterial>> {
        self.ambulance(ambulance_id)?;
        Ok(self
            .consumables
            .iter()
            .filter(|c| c.ambulance_id == ambulance_id)
            .collect())
    }

    pub fn remove_consumable(&mut self, id: &str) -> Result<ConsumableMaterial> {
        let pos = self
            .consumables
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| FleetError::ConsumableNotFound(id.to_string()))?;
        let removed = self.consumables.remove(pos);
        self.touch();
        Ok(removed)
    }

    pub fn add_equipment(&mut self, ambulance_id: &str, item: NewEquipment) -> Result<NonConsumableMaterial> {
        item.validate()?;
        self.ambulance(ambulance_id)?;
        let equipment = item.into_equipment(ambulance_id, self.now());
        self.equipment.push(equipment.clone());
        self.touch();
        Ok(equipment)
    }

    pub fn equipment_for(&self, ambulance_id: &str) -> Result<Vec<&NonConsumableMaterial>> {
        self.ambulance(ambulance_id)?;
        Ok(self
            .equipment
            .iter()
            .filter(|e| e.ambulance_id == ambulance_id)
            .collect())
    }

    pub fn set_equipment_status(
        &mut self,
        id: &str,
        status: EquipmentStatus,
        notes: Option<String>,
    ) -> Result<NonConsumableMaterial> {
        let now = self.now();
        let item = self
            .equipment
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| FleetError::EquipmentNotFound(id.to_string()))?;
        item.status = status;
        if notes.is_some() {
            item.notes = notes;
        }
        item.updated_at = now;
        let updated = item.clone();
        self.touch();
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Spaces
    // -----------------------------------------------------------------------

    pub fn add_space(&mut self, space: Space) -> Result<()> {
        paths::validate_id(&space.id)?;
        if self.spaces.iter().any(|s| s.id == space.id) {
            return Err(FleetError::SpaceExists(space.id));
        }
        if let Some(amb) = &space.ambulance_id {
            self.ambulance(amb)?;
        }
        self.spaces.push(space);
        self.touch();
        Ok(())
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    fn require_space(&self, id: &str) -> Result<()> {
        if self.spaces.iter().any(|s| s.id == id) {
            Ok(())
        } else {
            Err(FleetError::Validation(format!("unknown space_id '{id}'")))
        }
    }

    // -----------------------------------------------------------------------
    // Ampulario materials
    // -----------------------------------------------------------------------

    /// All materials, or only those in `space_id`, in insertion order.
    pub fn materials(&self, space_id: Option<&str>) -> Vec<&AmpularioMaterial> {
        self.ampulario
            .iter()
            .filter(|m| space_id.map_or(true, |s| m.space_id == s))
            .collect()
    }

    pub fn material(&self, id: &str) -> Result<&AmpularioMaterial> {
        self.ampulario
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| FleetError::MaterialNotFound(id.to_string()))
    }

    pub fn create_material(&mut self, input: MaterialInput) -> Result<AmpularioMaterial> {
        input.validate()?;
        self.require_space(input.space_id.trim())?;
        let material = input.into_material(self.now());
        self.ampulario.push(material.clone());
        self.touch();
        Ok(material)
    }

    pub fn update_material(&mut self, id: &str, patch: MaterialPatch) -> Result<AmpularioMaterial> {
        if let Some(space_id) = &patch.space_id {
            self.require_space(space_id.trim())?;
        }
        let now = self.now();
        let material = self
            .ampulario
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| FleetError::MaterialNotFound(id.to_string()))?;
        material.apply(patch, now)?;
        let updated = material.clone();
        self.touch();
        Ok(updated)
    }

    pub fn delete_material(&mut self, id: &str) -> Result<AmpularioMaterial> {
        let pos = self
            .ampulario
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| FleetError::MaterialNotFound(id.to_string()))?;
        let removed = self.ampulario.remove(pos);
        self.touch();
        Ok(removed)
    }

    /// Insert a pre-validated batch. Everything is checked before anything is
    /// inserted, so either all rows land or none do.
    pub fn import_materials(&mut self, inputs: Vec<MaterialInput>) -> Result<usize> {
        let mut details = Vec::new();
        for (i, input) in inputs.iter().enumerate() {
            if let Err(e) = input
                .validate()
                .and_then(|_| self.require_space(input.space_id.trim()))
            {
                details.push(format!("item {}: {e}", i + 1));
            }
        }
        if !details.is_empty() {
            return Err(FleetError::ImportRejected {
                message: "import rejected: no rows were imported".to_string(),
                details,
            });
        }

        let now = self.now();
        let count = inputs.len();
        self.ampulario
            .extend(inputs.into_iter().map(|i| i.into_material(now)));
        self.touch();
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Alerts
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            ambulances: &self.ambulances,
            consumables: &self.consumables,
            ampulario: &self.ampulario,
        }
    }

    /// Alerts for the current state, in scan order.
    pub fn alerts(&self, cfg: &AlertConfig) -> Vec<Alert> {
        alerts::generate(&self.snapshot(), cfg, self.now())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
