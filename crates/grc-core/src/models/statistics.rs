//! Aggregate register statistics.

use serde::{Deserialize, Serialize};

use super::risk::{MitigationStatus, Risk, RiskLevel};

/// Progress bucket a mitigation status is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    NotStarted,
    InProgress,
    Completed,
    Deferred,
}

impl MitigationStatus {
    /// open → not_started, in_progress → in_progress, mitigated → completed,
    /// accepted/transferred → deferred.
    pub fn bucket(self) -> StatusBucket {
        match self {
            Self::Open => StatusBucket::NotStarted,
            Self::InProgress => StatusBucket::InProgress,
            Self::Mitigated => StatusBucket::Completed,
            Self::Accepted | Self::Transferred => StatusBucket::Deferred,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
}

impl LevelCounts {
    pub fn add(&mut self, level: RiskLevel, n: u64) {
        match level {
            RiskLevel::Low => self.low += n,
            RiskLevel::Medium => self.medium += n,
            RiskLevel::High => self.high += n,
            RiskLevel::Critical => self.critical += n,
        }
    }

    pub fn get(&self, level: RiskLevel) -> u64 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub not_started: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub deferred: u64,
}

impl StatusCounts {
    pub fn add(&mut self, bucket: StatusBucket, n: u64) {
        match bucket {
            StatusBucket::NotStarted => self.not_started += n,
            StatusBucket::InProgress => self.in_progress += n,
            StatusBucket::Completed => self.completed += n,
            StatusBucket::Deferred => self.deferred += n,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskStatistics {
    pub total_risks: u64,
    pub by_level: LevelCounts,
    pub by_status: StatusCounts,
}

impl RiskStatistics {
    pub fn from_risks<'a>(risks: impl IntoIterator<Item = &'a Risk>) -> Self {
        let mut stats = Self::default();
        for risk in risks {
            stats.total_risks += 1;
            stats.by_level.add(risk.risk_level, 1);
            stats.by_status.add(risk.mitigation_status.bucket(), 1);
        }
        stats
    }
}
