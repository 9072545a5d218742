//! # grc-core
//!
//! Foundation crate for the risk register.
//! Defines models, scoring, the storage trait, errors, config, events and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod models;
pub mod scoring;
pub mod tracing_setup;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GrcConfig;
pub use errors::{GrcError, GrcResult};
pub use models::{
    ControlAssessment, ControlStatus, MitigationStatus, Risk, RiskCategory, RiskFilter, RiskLevel,
    RiskStatistics,
};
pub use traits::IRegisterStorage;
