/// Risk register version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lowest accepted likelihood/impact rating.
pub const MIN_FACTOR: u8 = 1;

/// Highest accepted likelihood/impact rating.
pub const MAX_FACTOR: u8 = 5;

/// Scores at or above this are Critical.
pub const CRITICAL_THRESHOLD: u8 = 17;

/// Scores at or above this are High.
pub const HIGH_THRESHOLD: u8 = 10;

/// Scores at or above this are Medium.
pub const MEDIUM_THRESHOLD: u8 = 5;

/// Likelihood applied when the caller supplies none.
pub const DEFAULT_LIKELIHOOD: u8 = 3;

/// Impact applied when the caller supplies none.
pub const DEFAULT_IMPACT: u8 = 3;

/// Prefix of the human-readable risk identifier (`RISK-0001`).
pub const RISK_ID_PREFIX: &str = "RISK";

/// Default prefix of exported CSV file names.
pub const DEFAULT_EXPORT_PREFIX: &str = "risk-register";

/// Completion below this percentage yields a High priority recommendation.
pub const WEAK_FUNCTION_PCT: u32 = 50;

/// Completion below this percentage (and at or above the weak mark) yields Medium.
pub const MATURING_FUNCTION_PCT: u32 = 80;

/// Formats the human-readable identifier for a risk row id.
pub fn format_risk_id(id: i64) -> String {
    format!("{RISK_ID_PREFIX}-{id:04}")
}
