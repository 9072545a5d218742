//! Compliance report over one assessment's control assessments.

pub mod aggregation;
pub mod compliance;
pub mod findings;
pub mod markdown;

pub use aggregation::{aggregate, Aggregation, CategorySummary, FunctionSummary, StatusTally};
pub use compliance::ComplianceReport;
pub use findings::{Findings, FunctionRef, Priority, Recommendation};
pub use markdown::render_markdown;
