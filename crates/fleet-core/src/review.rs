use crate::error::{FleetError, Result};
use crate::types::CheckStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub name: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A submitted mechanical inspection. Records are never edited after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanicalReview {
    pub id: String,
    pub ambulance_id: String,
    pub reviewer: String,
    pub items: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MechanicalReview {
    pub fn repairs(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.items
            .iter()
            .filter(|i| matches!(i.status, CheckStatus::Repair))
    }

    pub fn needs_repair(&self) -> bool {
        self.repairs().next().is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub reviewer: String,
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewReview {
    pub fn validate(&self) -> Result<()> {
        if self.reviewer.trim().is_empty() {
            return Err(FleetError::Validation("reviewer is required".to_string()));
        }
        if self.items.is_empty() {
            return Err(FleetError::Validation(
                "a review needs at least one checklist item".to_string(),
            ));
        }
        if let Some(pos) = self.items.iter().position(|i| i.name.trim().is_empty()) {
            return Err(FleetError::Validation(format!(
                "checklist item {} has no name",
                pos + 1
            )));
        }
        Ok(())
    }

    pub fn into_review(self, ambulance_id: &str, at: DateTime<Utc>) -> MechanicalReview {
        MechanicalReview {
            id: uuid::Uuid::new_v4().to_string(),
            ambulance_id: ambulance_id.to_string(),
            reviewer: self.reviewer.trim().to_string(),
            items: self.items,
            notes: self.notes,
            created_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, status: CheckStatus) -> ChecklistItem {
        ChecklistItem {
            name: name.to_string(),
            status,
            notes: None,
        }
    }

    #[test]
    fn empty_checklist_is_rejected() {
        let r = NewReview {
            reviewer: "Marta".into(),
            items: vec![],
            notes: None,
        };
        assert!(matches!(r.validate(), Err(FleetError::Validation(_))));
    }

    #[test]
    fn blank_item_name_is_rejected() {
        let r = NewReview {
            reviewer: "Marta".into(),
            items: vec![item("Brakes", CheckStatus::Ok), item(" ", CheckStatus::Ok)],
            notes: None,
        };
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("item 2"));
    }

    #[test]
    fn repairs_are_reported() {
        let review = NewReview {
            reviewer: "Marta".into(),
            items: vec![
                item("Brakes", CheckStatus::Ok),
                item("Tyres", CheckStatus::Repair),
                item("Siren", CheckStatus::NotApplicable),
            ],
            notes: None,
        }
        .into_review("amb-01", Utc::now());

        assert!(review.needs_repair());
        let names: Vec<_> = review.repairs().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tyres"]);
    }
}
