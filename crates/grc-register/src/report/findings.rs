//! Findings and priority-tagged recommendations derived from an aggregation.

use grc_core::constants::{MATURING_FUNCTION_PCT, WEAK_FUNCTION_PCT};
use serde::Serialize;

use super::aggregation::{Aggregation, FunctionSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRef {
    pub code: String,
    pub name: String,
    pub completion: u32,
}

impl From<&FunctionSummary> for FunctionRef {
    fn from(f: &FunctionSummary) -> Self {
        Self {
            code: f.code.clone(),
            name: f.name.clone(),
            completion: f.completion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Findings {
    pub strongest_function: Option<FunctionRef>,
    pub weakest_function: Option<FunctionRef>,
    pub not_implemented_controls: u32,
    pub not_started_controls: u32,
    pub open_critical_risks: u64,
    /// Human-readable finding lines, in report order.
    pub highlights: Vec<String>,
}

/// Ordered High → Medium → Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub detail: String,
}

impl Recommendation {
    fn new(priority: Priority, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            priority,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Functions with at least one applicable control, in canonical order.
fn rated_functions(agg: &Aggregation) -> impl Iterator<Item = &FunctionSummary> {
    agg.functions.iter().filter(|f| f.tally.applicable() > 0)
}

pub fn findings(agg: &Aggregation, open_critical_risks: u64) -> Findings {
    // Ties keep the earlier function in canonical order.
    let strongest = rated_functions(agg).fold(None::<&FunctionSummary>, |best, f| match best {
        Some(b) if b.completion >= f.completion => Some(b),
        _ => Some(f),
    });
    let weakest = rated_functions(agg).fold(None::<&FunctionSummary>, |worst, f| match worst {
        Some(w) if w.completion <= f.completion => Some(w),
        _ => Some(f),
    });

    let mut highlights = Vec::new();
    if agg.overall.total == 0 {
        highlights.push("No controls assessed".to_string());
    } else {
        highlights.push(format!(
            "{} of {} controls assessed, overall completion {}%",
            agg.overall.total - agg.overall.not_started,
            agg.overall.total,
            agg.overall_completion
        ));
        if let Some(f) = strongest {
            highlights.push(format!("Strongest function: {} ({}%)", f.name, f.completion));
        }
        if let Some(f) = weakest {
            highlights.push(format!("Weakest function: {} ({}%)", f.name, f.completion));
        }
        if agg.overall.not_implemented > 0 {
            highlights.push(format!(
                "{} control(s) not implemented",
                agg.overall.not_implemented
            ));
        }
        if agg.overall.not_started > 0 {
            highlights.push(format!("{} control(s) not started", agg.overall.not_started));
        }
    }
    if open_critical_risks > 0 {
        highlights.push(format!("{open_critical_risks} open critical risk(s)"));
    }

    Findings {
        strongest_function: strongest.map(FunctionRef::from),
        weakest_function: weakest.map(FunctionRef::from),
        not_implemented_controls: agg.overall.not_implemented,
        not_started_controls: agg.overall.not_started,
        open_critical_risks,
        highlights,
    }
}

pub fn recommendations(agg: &Aggregation, findings: &Findings) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if agg.overall.total == 0 {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Record control assessments",
            "No controls have been assessed yet; complete the questionnaire to establish a baseline.",
        ));
    }

    for f in rated_functions(agg) {
        if f.completion < WEAK_FUNCTION_PCT {
            recs.push(Recommendation::new(
                Priority::High,
                format!("Strengthen {} ({})", f.name, f.code),
                format!(
                    "{} is {}% complete; prioritise remediation of its outstanding controls.",
                    f.name, f.completion
                ),
            ));
        } else if f.completion < MATURING_FUNCTION_PCT {
            recs.push(Recommendation::new(
                Priority::Medium,
                format!("Mature {} ({})", f.name, f.code),
                format!(
                    "{} is {}% complete; close the remaining gaps to reach {}%.",
                    f.name, f.completion, MATURING_FUNCTION_PCT
                ),
            ));
        }
    }

    if findings.not_implemented_controls > 0 {
        recs.push(Recommendation::new(
            Priority::High,
            "Implement missing controls",
            format!(
                "{} control(s) are not implemented and are tracked in the risk register.",
                findings.not_implemented_controls
            ),
        ));
    }
    if findings.open_critical_risks > 0 {
        recs.push(Recommendation::new(
            Priority::High,
            "Treat critical risks",
            format!(
                "{} critical risk(s) remain open; assign owners and target dates.",
                findings.open_critical_risks
            ),
        ));
    }
    if findings.not_started_controls > 0 {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Assess pending controls",
            format!(
                "{} control(s) have not been started.",
                findings.not_started_controls
            ),
        ));
    }

    if recs.is_empty() {
        recs.push(Recommendation::new(
            Priority::Low,
            "Maintain current posture",
            "All functions are at or above target; schedule periodic reassessment.",
        ));
    }

    recs.sort_by_key(|r| r.priority);
    recs
}
