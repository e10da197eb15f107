pub mod alerts;
pub mod ambulance;
pub mod ampulario;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod import;
pub mod io;
pub mod material;
pub mod paths;
pub mod review;
pub mod seed;
pub mod store;
pub mod types;

pub use error::{FleetError, Result};
