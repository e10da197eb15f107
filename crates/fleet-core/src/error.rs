use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("not initialized: run 'fleet init'")]
    NotInitialized,

    #[error("ambulance not found: {0}")]
    AmbulanceNotFound(String),

    #[error("ambulance already exists: {0}")]
    AmbulanceExists(String),

    #[error("material not found: {0}")]
    MaterialNotFound(String),

    #[error("consumable not found: {0}")]
    ConsumableNotFound(String),

    #[error("equipment not found: {0}")]
    EquipmentNotFound(String),

    #[error("space already exists: {0}")]
    SpaceExists(String),

    #[error("step '{step}' is locked: {reason}")]
    StepLocked { step: String, reason: String },

    #[error("invalid workflow step: {0}")]
    InvalidStep(String),

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("invalid equipment status: {0}")]
    InvalidStatus(String),

    #[error("invalid id '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidId(String),

    #[error("validation failed: {0}")]
    Validation(String),

    /// Whole-batch CSV rejection. `details` holds one entry per offending row.
    #[error("{message}")]
    ImportRejected {
        message: String,
        details: Vec<String>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, FleetError>;
