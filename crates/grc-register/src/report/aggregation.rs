//! Grouping by CSF function and category with weighted completion.

use std::collections::BTreeMap;

use grc_core::models::{ControlAssessment, ControlStatus, CsfFunction};
use serde::Serialize;

/// Status counts for a group of controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub total: u32,
    pub complete: u32,
    pub in_progress: u32,
    pub not_started: u32,
    pub not_implemented: u32,
    pub not_applicable: u32,
}

impl StatusTally {
    pub fn add(&mut self, status: ControlStatus) {
        self.total += 1;
        match status {
            ControlStatus::Complete => self.complete += 1,
            ControlStatus::InProgress => self.in_progress += 1,
            ControlStatus::NotStarted => self.not_started += 1,
            ControlStatus::NotImplemented => self.not_implemented += 1,
            ControlStatus::NotApplicable => self.not_applicable += 1,
        }
    }

    pub fn merge(&mut self, other: &StatusTally) {
        self.total += other.total;
        self.complete += other.complete;
        self.in_progress += other.in_progress;
        self.not_started += other.not_started;
        self.not_implemented += other.not_implemented;
        self.not_applicable += other.not_applicable;
    }

    pub fn applicable(&self) -> u32 {
        self.total - self.not_applicable
    }

    /// `round((complete + 0.5 × in_progress) / applicable × 100)`; 0 when
    /// nothing is applicable.
    pub fn completion(&self) -> u32 {
        let applicable = self.applicable();
        if applicable == 0 {
            return 0;
        }
        let weighted = f64::from(self.complete) + 0.5 * f64::from(self.in_progress);
        (weighted / f64::from(applicable) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    #[serde(flatten)]
    pub tally: StatusTally,
    pub completion: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSummary {
    pub code: String,
    pub name: String,
    #[serde(flatten)]
    pub tally: StatusTally,
    pub completion: u32,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub overall: StatusTally,
    pub overall_completion: u32,
    pub functions: Vec<FunctionSummary>,
}

/// CSF functions first in framework order, then unknown codes alphabetically.
fn function_sort_key(code: &str) -> (usize, String) {
    let rank = CsfFunction::ALL
        .iter()
        .position(|f| f.code() == code)
        .unwrap_or(CsfFunction::ALL.len());
    (rank, code.to_string())
}

pub fn aggregate(controls: &[ControlAssessment]) -> Aggregation {
    let mut groups: BTreeMap<(usize, String), BTreeMap<String, StatusTally>> = BTreeMap::new();
    for control in controls {
        groups
            .entry(function_sort_key(&control.function_code()))
            .or_default()
            .entry(control.category_name.clone())
            .or_default()
            .add(control.status);
    }

    let mut overall = StatusTally::default();
    let functions = groups
        .into_iter()
        .map(|((_, code), categories)| {
            let mut tally = StatusTally::default();
            let categories: Vec<CategorySummary> = categories
                .into_iter()
                .map(|(name, cat)| {
                    tally.merge(&cat);
                    CategorySummary {
                        name,
                        completion: cat.completion(),
                        tally: cat,
                    }
                })
                .collect();
            overall.merge(&tally);
            FunctionSummary {
                name: CsfFunction::from_code(&code)
                    .map(|f| f.name().to_string())
                    .unwrap_or_else(|| code.clone()),
                code,
                completion: tally.completion(),
                tally,
                categories,
            }
        })
        .collect();

    Aggregation {
        overall_completion: overall.completion(),
        overall,
        functions,
    }
}
