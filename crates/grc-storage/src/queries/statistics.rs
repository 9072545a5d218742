//! Aggregate counts over the risks table.

use grc_core::errors::StorageError;
use grc_core::models::{MitigationStatus, RiskLevel, RiskStatistics};
use rusqlite::{params, Connection};

use super::parse_col;
use crate::sqlite_err;

/// Totals by level and by status bucket, optionally scoped to one assessment.
pub fn risk_statistics(
    conn: &Connection,
    assessment_id: Option<i64>,
) -> Result<RiskStatistics, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT risk_level, mitigation_status, COUNT(*) FROM risks
             WHERE (?1 IS NULL OR assessment_id = ?1)
             GROUP BY risk_level, mitigation_status",
        )
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![assessment_id], |row| {
            Ok((
                parse_col::<RiskLevel>(row, 0)?,
                parse_col::<MitigationStatus>(row, 1)?,
                row.get::<_, i64>(2)?,
            ))
        })
        .map_err(sqlite_err)?;

    let mut stats = RiskStatistics::default();
    for row in rows {
        let (level, status, count) = row.map_err(sqlite_err)?;
        let n = count as u64;
        stats.total_risks += n;
        stats.by_level.add(level, n);
        stats.by_status.add(status.bucket(), n);
    }
    Ok(stats)
}
