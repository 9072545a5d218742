//! Risk scoring: `score = likelihood × impact`, bucketed into a [`RiskLevel`].
//!
//! Factors are never clamped. Out-of-range input is rejected by
//! [`validate_factor`] before it reaches [`risk_score`].

use crate::constants::{
    CRITICAL_THRESHOLD, HIGH_THRESHOLD, MAX_FACTOR, MEDIUM_THRESHOLD, MIN_FACTOR,
};
use crate::errors::ValidationError;
use crate::models::RiskLevel;

/// A score and the level it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub score: u8,
    pub level: RiskLevel,
}

/// Product of two validated 1–5 factors.
pub fn risk_score(likelihood: u8, impact: u8) -> u8 {
    debug_assert!((MIN_FACTOR..=MAX_FACTOR).contains(&likelihood));
    debug_assert!((MIN_FACTOR..=MAX_FACTOR).contains(&impact));
    likelihood * impact
}

/// Step function over score: ≥17 Critical, ≥10 High, ≥5 Medium, else Low.
pub fn risk_level(score: u8) -> RiskLevel {
    if score >= CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn assess(likelihood: u8, impact: u8) -> Assessment {
    let score = risk_score(likelihood, impact);
    Assessment {
        score,
        level: risk_level(score),
    }
}

/// Residual assessment; `None` until both residual factors are set.
pub fn assess_residual(likelihood: Option<u8>, impact: Option<u8>) -> Option<Assessment> {
    match (likelihood, impact) {
        (Some(l), Some(i)) => Some(assess(l, i)),
        _ => None,
    }
}

/// Reject a likelihood/impact rating outside 1–5.
pub fn validate_factor(field: &'static str, value: i64) -> Result<u8, ValidationError> {
    if (i64::from(MIN_FACTOR)..=i64::from(MAX_FACTOR)).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: i64::from(MIN_FACTOR),
            max: i64::from(MAX_FACTOR),
        })
    }
}
