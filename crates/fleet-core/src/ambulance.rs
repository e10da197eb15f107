use crate::error::{FleetError, Result};
use crate::types::{Stage, WorkflowStep};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// Completion flags for the current cycle. Flags only ever turn on in
/// mechanical → cleaning → inventory order; they turn off together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub mechanical_review_completed: bool,
    pub cleaning_completed: bool,
    pub inventory_completed: bool,
}

impl Workflow {
    pub fn is_complete(&self, step: WorkflowStep) -> bool {
        match step {
            WorkflowStep::Mechanical => self.mechanical_review_completed,
            WorkflowStep::Cleaning => self.cleaning_completed,
            WorkflowStep::Inventory => self.inventory_completed,
        }
    }

    fn set(&mut self, step: WorkflowStep, value: bool) {
        match step {
            WorkflowStep::Mechanical => self.mechanical_review_completed = value,
            WorkflowStep::Cleaning => self.cleaning_completed = value,
            WorkflowStep::Inventory => self.inventory_completed = value,
        }
    }

    pub fn stage(&self) -> Stage {
        if !self.mechanical_review_completed {
            Stage::NeedsReview
        } else if !self.cleaning_completed {
            Stage::NeedsCleaning
        } else if !self.inventory_completed {
            Stage::NeedsInventory
        } else {
            Stage::Ready
        }
    }
}

// ---------------------------------------------------------------------------
// StepOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: WorkflowStep,
    /// Stage after the transition. Completing inventory restarts the cycle,
    /// so this reads `needs_review` with `cycle_completed` set.
    pub stage: Stage,
    pub cycle_completed: bool,
}

// ---------------------------------------------------------------------------
// Ambulance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ambulance {
    pub id: String,
    pub name: String,
    pub plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default)]
    pub workflow: Workflow,
    pub last_mechanical_review: Option<DateTime<Utc>>,
    pub last_cleaning: Option<DateTime<Utc>>,
    pub last_inventory_check: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ambulance {
    pub fn new(id: impl Into<String>, name: impl Into<String>, plate: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            plate: plate.into(),
            base: None,
            workflow: Workflow::default(),
            last_mechanical_review: None,
            last_cleaning: None,
            last_inventory_check: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn stage(&self) -> Stage {
        self.workflow.stage()
    }

    pub fn last_action(&self, step: WorkflowStep) -> Option<DateTime<Utc>> {
        match step {
            WorkflowStep::Mechanical => self.last_mechanical_review,
            WorkflowStep::Cleaning => self.last_cleaning,
            WorkflowStep::Inventory => self.last_inventory_check,
        }
    }

    // -----------------------------------------------------------------------
    // Workflow gate
    // -----------------------------------------------------------------------

    pub fn can_complete(&self, step: WorkflowStep) -> Result<()> {
        if let Some(prior) = step.prerequisite() {
            if !self.workflow.is_complete(prior) {
                return Err(FleetError::StepLocked {
                    step: step.to_string(),
                    reason: format!("'{prior}' must be completed first"),
                });
            }
        }
        Ok(())
    }

    /// Mark `step` done and stamp its timestamp. Completing inventory ends the
    /// cycle: every flag goes back to false.
    pub fn complete_step(&mut self, step: WorkflowStep, at: DateTime<Utc>) -> Result<StepOutcome> {
        self.can_complete(step)?;

        match step {
            WorkflowStep::Mechanical => {
                self.workflow.mechanical_review_completed = true;
                self.last_mechanical_review = Some(at);
            }
            WorkflowStep::Cleaning => {
                self.workflow.cleaning_completed = true;
                self.last_cleaning = Some(at);
            }
            WorkflowStep::Inventory => {
                self.workflow = Workflow::default();
                self.last_inventory_check = Some(at);
            }
        }
        self.updated_at = at;

        tracing::debug!(ambulance = %self.id, %step, stage = %self.stage(), "workflow step completed");

        Ok(StepOutcome {
            step,
            stage: self.stage(),
            cycle_completed: step == WorkflowStep::Inventory,
        })
    }

    /// Un-mark `step` and every later step. Returns the flags that were
    /// actually cleared, in cycle order. Timestamps are left as they were.
    pub fn revoke_step(&mut self, step: WorkflowStep, at: DateTime<Utc>) -> Vec<WorkflowStep> {
        let mut cleared = Vec::new();
        for &s in WorkflowStep::all().iter().filter(|&&s| s >= step) {
            if self.workflow.is_complete(s) {
                cleared.push(s);
            }
            self.workflow.set(s, false);
        }
        if !cleared.is_empty() {
            self.updated_at = at;
            tracing::debug!(ambulance = %self.id, %step, ?cleared, "workflow step revoked");
        }
        cleared
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn amb() -> Ambulance {
        Ambulance::new("amb-01", "Alpha 1", "1234-ABC")
    }

    fn all_done(a: &mut Ambulance) {
        let now = Utc::now();
        a.complete_step(WorkflowStep::Mechanical, now).unwrap();
        a.complete_step(WorkflowStep::Cleaning, now).unwrap();
    }

    #[test]
    fn new_ambulance_needs_review() {
        assert_eq!(amb().stage(), Stage::NeedsReview);
    }

    #[test]
    fn steps_unlock_in_order() {
        let mut a = amb();
        let now = Utc::now();
        assert!(matches!(
            a.complete_step(WorkflowStep::Cleaning, now),
            Err(FleetError::StepLocked { .. })
        ));
        assert!(matches!(
            a.complete_step(WorkflowStep::Inventory, now),
            Err(FleetError::StepLocked { .. })
        ));

        let out = a.complete_step(WorkflowStep::Mechanical, now).unwrap();
        assert_eq!(out.stage, Stage::NeedsCleaning);
        assert_eq!(a.last_mechanical_review, Some(now));

        assert!(a.complete_step(WorkflowStep::Inventory, now).is_err());
        let out = a.complete_step(WorkflowStep::Cleaning, now).unwrap();
        assert_eq!(out.stage, Stage::NeedsInventory);
        assert_eq!(a.last_cleaning, Some(now));
    }

    #[test]
    fn inventory_restarts_cycle() {
        let mut a = amb();
        all_done(&mut a);
        let at = Utc::now();

        let out = a.complete_step(WorkflowStep::Inventory, at).unwrap();

        assert!(out.cycle_completed);
        assert_eq!(out.stage, Stage::NeedsReview);
        assert_eq!(a.workflow, Workflow::default());
        assert_eq!(a.last_inventory_check, Some(at));
    }

    #[test]
    fn revoking_mechanical_clears_everything_after_it() {
        let mut a = amb();
        all_done(&mut a);
        a.workflow.inventory_completed = true;

        let cleared = a.revoke_step(WorkflowStep::Mechanical, Utc::now());

        assert_eq!(
            cleared,
            vec![
                WorkflowStep::Mechanical,
                WorkflowStep::Cleaning,
                WorkflowStep::Inventory
            ]
        );
        assert!(!a.workflow.mechanical_review_completed);
        assert!(!a.workflow.cleaning_completed);
        assert!(!a.workflow.inventory_completed);
    }

    #[test]
    fn revoking_cleaning_keeps_mechanical() {
        let mut a = amb();
        all_done(&mut a);

        let cleared = a.revoke_step(WorkflowStep::Cleaning, Utc::now());

        assert_eq!(cleared, vec![WorkflowStep::Cleaning]);
        assert!(a.workflow.mechanical_review_completed);
        assert_eq!(a.stage(), Stage::NeedsCleaning);
    }

    #[test]
    fn revoking_incomplete_step_is_a_noop() {
        let mut a = amb();
        let before = a.updated_at;
        let cleared = a.revoke_step(WorkflowStep::Cleaning, Utc::now());
        assert!(cleared.is_empty());
        assert_eq!(a.updated_at, before);
    }

    #[test]
    fn all_flags_set_reads_ready() {
        let w = Workflow {
            mechanical_review_completed: true,
            cleaning_completed: true,
            inventory_completed: true,
        };
        assert_eq!(w.stage(), Stage::Ready);
    }
}
