//! # grc-register
//!
//! The risk register service. [`RiskRegister`] validates input, drives an
//! [`IRegisterStorage`](grc_core::IRegisterStorage) backend, raises risks for
//! non-compliant controls, exports CSV and builds compliance reports.

pub mod assessment;
pub mod audit;
pub mod auto_risk;
pub mod export;
pub mod register;
pub mod report;

pub use assessment::ControlRecorded;
pub use audit::AuditLogHandler;
pub use auto_risk::{AutoRiskOutcome, AutoRiskPolicy, RiskAction};
pub use export::{CsvExport, CsvExporter};
pub use register::RiskRegister;
pub use report::ComplianceReport;
