//! Scoring policy for risks raised from failed controls.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_IMPACT, DEFAULT_LIKELIHOOD};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Likelihood of an auto-created risk. Default: 3.
    pub auto_risk_likelihood: Option<u8>,
    /// Impact of an auto-created risk. Default: 3.
    pub auto_risk_impact: Option<u8>,
}

impl ScoringConfig {
    pub fn effective_auto_risk_likelihood(&self) -> u8 {
        self.auto_risk_likelihood.unwrap_or(DEFAULT_LIKELIHOOD)
    }

    pub fn effective_auto_risk_impact(&self) -> u8 {
        self.auto_risk_impact.unwrap_or(DEFAULT_IMPACT)
    }
}
