use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FleetError;

// ---------------------------------------------------------------------------
// WorkflowStep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Mechanical,
    Cleaning,
    Inventory,
}

impl WorkflowStep {
    pub fn all() -> &'static [WorkflowStep] {
        &[
            WorkflowStep::Mechanical,
            WorkflowStep::Cleaning,
            WorkflowStep::Inventory,
        ]
    }

    /// The step that must be complete before this one unlocks.
    pub fn prerequisite(self) -> Option<WorkflowStep> {
        match self {
            WorkflowStep::Mechanical => None,
            WorkflowStep::Cleaning => Some(WorkflowStep::Mechanical),
            WorkflowStep::Inventory => Some(WorkflowStep::Cleaning),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStep::Mechanical => "mechanical",
            WorkflowStep::Cleaning => "cleaning",
            WorkflowStep::Inventory => "inventory",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkflowStep {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mechanical" | "mechanical_review" | "review" => Ok(WorkflowStep::Mechanical),
            "cleaning" => Ok(WorkflowStep::Cleaning),
            "inventory" => Ok(WorkflowStep::Inventory),
            _ => Err(FleetError::InvalidStep(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Where an ambulance sits in the current workflow cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    NeedsReview,
    NeedsCleaning,
    NeedsInventory,
    Ready,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::NeedsReview => "needs_review",
            Stage::NeedsCleaning => "needs_cleaning",
            Stage::NeedsInventory => "needs_inventory",
            Stage::Ready => "ready",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckStatus
// ---------------------------------------------------------------------------

/// Outcome of a single mechanical checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Repair,
    #[serde(rename = "n_a", alias = "na", alias = "not_applicable")]
    NotApplicable,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Repair => "repair",
            CheckStatus::NotApplicable => "n_a",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// Administration route of an Ampulario medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Route {
    Iv,
    Im,
    Sc,
    Oral,
    Sublingual,
    Inhaled,
    Intranasal,
    Intraosseous,
    Rectal,
    Topical,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Iv,
            Route::Im,
            Route::Sc,
            Route::Oral,
            Route::Sublingual,
            Route::Inhaled,
            Route::Intranasal,
            Route::Intraosseous,
            Route::Rectal,
            Route::Topical,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Route::Iv => "iv",
            Route::Im => "im",
            Route::Sc => "sc",
            Route::Oral => "oral",
            Route::Sublingual => "sublingual",
            Route::Inhaled => "inhaled",
            Route::Intranasal => "intranasal",
            Route::Intraosseous => "intraosseous",
            Route::Rectal => "rectal",
            Route::Topical => "topical",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Route {
    type Err = FleetError;

    /// Case-insensitive; accepts the common clinical abbreviations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iv" | "intravenous" => Ok(Route::Iv),
            "im" | "intramuscular" => Ok(Route::Im),
            "sc" | "subcutaneous" => Ok(Route::Sc),
            "oral" | "po" | "vo" => Ok(Route::Oral),
            "sublingual" | "sl" => Ok(Route::Sublingual),
            "inhaled" | "inhalation" | "neb" | "nebulized" => Ok(Route::Inhaled),
            "intranasal" | "in" => Ok(Route::Intranasal),
            "intraosseous" | "io" => Ok(Route::Intraosseous),
            "rectal" | "pr" => Ok(Route::Rectal),
            "topical" => Ok(Route::Topical),
            _ => Err(FleetError::InvalidRoute(s.to_string())),
        }
    }
}

impl TryFrom<String> for Route {
    type Error = FleetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    Operational,
    NeedsRepair,
    Missing,
    OutOfService,
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EquipmentStatus::Operational => "operational",
            EquipmentStatus::NeedsRepair => "needs_repair",
            EquipmentStatus::Missing => "missing",
            EquipmentStatus::OutOfService => "out_of_service",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operational" => Ok(EquipmentStatus::Operational),
            "needs_repair" => Ok(EquipmentStatus::NeedsRepair),
            "missing" => Ok(EquipmentStatus::Missing),
            "out_of_service" => Ok(EquipmentStatus::OutOfService),
            _ => Err(FleetError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SpaceKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    Vehicle,
    Cabinet,
}

// ---------------------------------------------------------------------------
// Alert vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Expired,
    ExpiringSoon,
    ReviewPending,
    CleaningPending,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Expired => "expired",
            AlertKind::ExpiringSoon => "expiring_soon",
            AlertKind::ReviewPending => "review_pending",
            AlertKind::CleaningPending => "cleaning_pending",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSource {
    Ambulance,
    Consumable,
    Ampulario,
}

impl fmt::Display for AlertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertSource::Ambulance => "ambulance",
            AlertSource::Consumable => "consumable",
            AlertSource::Ampulario => "ampulario",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn step_ordering_matches_cycle() {
        assert!(WorkflowStep::Mechanical < WorkflowStep::Cleaning);
        assert!(WorkflowStep::Cleaning < WorkflowStep::Inventory);
    }

    #[test]
    fn step_prerequisites() {
        assert_eq!(WorkflowStep::Mechanical.prerequisite(), None);
        assert_eq!(
            WorkflowStep::Cleaning.prerequisite(),
            Some(WorkflowStep::Mechanical)
        );
        assert_eq!(
            WorkflowStep::Inventory.prerequisite(),
            Some(WorkflowStep::Cleaning)
        );
    }

    #[test]
    fn step_parse_rejects_unknown() {
        assert_eq!(
            WorkflowStep::from_str("cleaning").unwrap(),
            WorkflowStep::Cleaning
        );
        assert!(matches!(
            WorkflowStep::from_str("washing"),
            Err(FleetError::InvalidStep(_))
        ));
    }

    #[test]
    fn route_parse_is_case_insensitive() {
        assert_eq!(Route::from_str("IV").unwrap(), Route::Iv);
        assert_eq!(Route::from_str(" Im ").unwrap(), Route::Im);
        assert_eq!(Route::from_str("VO").unwrap(), Route::Oral);
        assert!(Route::from_str("intergalactic").is_err());
    }

    #[test]
    fn route_deserializes_through_parser() {
        let r: Route = serde_json::from_str("\"Nebulized\"").unwrap();
        assert_eq!(r, Route::Inhaled);
        assert!(serde_json::from_str::<Route>("\"bogus\"").is_err());
        assert_eq!(serde_json::to_string(&Route::Iv).unwrap(), "\"iv\"");
    }

    #[test]
    fn check_status_wire_names() {
        let s: CheckStatus = serde_json::from_str("\"n_a\"").unwrap();
        assert_eq!(s, CheckStatus::NotApplicable);
        assert_eq!(
            serde_json::to_string(&CheckStatus::NotApplicable).unwrap(),
            "\"n_a\""
        );
    }

    #[test]
    fn severity_ranks_high_first() {
        assert!(Severity::High > Severity::Medium);
        assert_eq!(Severity::Medium.to_string(), "medium");
    }
}
