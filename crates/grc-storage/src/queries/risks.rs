//! Queries for the risks table.

use chrono::{DateTime, Utc};
use grc_core::constants::format_risk_id;
use grc_core::errors::StorageError;
use grc_core::models::{Risk, RiskDraft, RiskFilter};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{format_timestamp, parse_col, parse_opt_col};
use crate::sqlite_err;

const RISK_COLUMNS: &str = "id, risk_id, assessment_id, control_id, description, category,
    likelihood, impact, risk_score, risk_level, mitigation_strategy, mitigation_status,
    owner, target_date, residual_likelihood, residual_impact, residual_score, residual_level,
    mitigation_notes, auto_generated, created_at, updated_at";

fn row_to_risk(row: &Row<'_>) -> rusqlite::Result<Risk> {
    Ok(Risk {
        id: row.get(0)?,
        risk_id: row.get(1)?,
        assessment_id: row.get(2)?,
        control_id: row.get(3)?,
        description: row.get(4)?,
        category: parse_col(row, 5)?,
        likelihood: row.get(6)?,
        impact: row.get(7)?,
        risk_score: row.get(8)?,
        risk_level: parse_col(row, 9)?,
        mitigation_strategy: row.get(10)?,
        mitigation_status: parse_col(row, 11)?,
        owner: row.get(12)?,
        target_date: parse_opt_col(row, 13)?,
        residual_likelihood: row.get(14)?,
        residual_impact: row.get(15)?,
        residual_score: row.get(16)?,
        residual_level: parse_opt_col(row, 17)?,
        mitigation_notes: row.get(18)?,
        auto_generated: row.get(19)?,
        created_at: parse_col(row, 20)?,
        updated_at: parse_col(row, 21)?,
    })
}

/// Insert a validated risk and assign its `RISK-NNNN` identifier.
/// Two statements: run inside a transaction.
pub fn insert_risk(
    conn: &Connection,
    draft: &RiskDraft,
    now: DateTime<Utc>,
) -> Result<Risk, StorageError> {
    let ts = format_timestamp(&now);
    conn.execute(
        "INSERT INTO risks (
            risk_id, assessment_id, control_id, description, category, likelihood, impact,
            mitigation_strategy, mitigation_status, owner, target_date,
            residual_likelihood, residual_impact, mitigation_notes, auto_generated,
            created_at, updated_at
        ) VALUES (
            'pending-' || hex(randomblob(8)), ?1, ?2, ?3, ?4, ?5, ?6,
            ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15
        )",
        params![
            draft.assessment_id,
            draft.control_id,
            draft.description,
            draft.category.as_str(),
            draft.likelihood,
            draft.impact,
            draft.mitigation_strategy,
            draft.mitigation_status.as_str(),
            draft.owner,
            draft.target_date.map(|d| d.to_string()),
            draft.residual_likelihood,
            draft.residual_impact,
            draft.mitigation_notes,
            draft.auto_generated,
            ts,
        ],
    )
    .map_err(sqlite_err)?;

    let id = conn.last_insert_rowid();
    conn.execute(
        "UPDATE risks SET risk_id = ?1 WHERE id = ?2",
        params![format_risk_id(id), id],
    )
    .map_err(sqlite_err)?;

    get_risk(conn, id)?.ok_or_else(|| StorageError::SqliteError {
        message: format!("risk {id} vanished after insert"),
    })
}

pub fn get_risk(conn: &Connection, id: i64) -> Result<Option<Risk>, StorageError> {
    conn.query_row(
        &format!("SELECT {RISK_COLUMNS} FROM risks WHERE id = ?1"),
        params![id],
        row_to_risk,
    )
    .optional()
    .map_err(sqlite_err)
}

/// Filtered register, highest score first, then oldest first.
pub fn list_risks(conn: &Connection, filter: &RiskFilter) -> Result<Vec<Risk>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {RISK_COLUMNS} FROM risks
             WHERE (?1 IS NULL OR assessment_id = ?1)
               AND (?2 IS NULL OR risk_level = ?2)
               AND (?3 IS NULL OR mitigation_status = ?3)
             ORDER BY risk_score DESC, id ASC"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(
            params![
                filter.assessment_id,
                filter.risk_level.map(|l| l.as_str()),
                filter.mitigation_status.map(|s| s.as_str()),
            ],
            row_to_risk,
        )
        .map_err(sqlite_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Write every mutable column of `risk` back to its row. Derived columns
/// follow from the factors.
pub fn update_risk(conn: &Connection, risk: &Risk) -> Result<bool, StorageError> {
    let changed = conn
        .execute(
            "UPDATE risks SET
                assessment_id = ?1, control_id = ?2, description = ?3, category = ?4,
                likelihood = ?5, impact = ?6, mitigation_strategy = ?7,
                mitigation_status = ?8, owner = ?9, target_date = ?10,
                residual_likelihood = ?11, residual_impact = ?12, mitigation_notes = ?13,
                updated_at = ?14
             WHERE id = ?15",
            params![
                risk.assessment_id,
                risk.control_id,
                risk.description,
                risk.category.as_str(),
                risk.likelihood,
                risk.impact,
                risk.mitigation_strategy,
                risk.mitigation_status.as_str(),
                risk.owner,
                risk.target_date.map(|d| d.to_string()),
                risk.residual_likelihood,
                risk.residual_impact,
                risk.mitigation_notes,
                format_timestamp(&risk.updated_at),
                risk.id,
            ],
        )
        .map_err(sqlite_err)?;
    Ok(changed > 0)
}

pub fn delete_risk(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let deleted = conn
        .execute("DELETE FROM risks WHERE id = ?1", params![id])
        .map_err(sqlite_err)?;
    Ok(deleted > 0)
}

/// The auto-generated risk for a control, if one exists.
pub fn find_control_risk(
    conn: &Connection,
    assessment_id: i64,
    control_id: &str,
) -> Result<Option<Risk>, StorageError> {
    conn.query_row(
        &format!(
            "SELECT {RISK_COLUMNS} FROM risks
             WHERE auto_generated = 1 AND assessment_id = ?1 AND control_id = ?2"
        ),
        params![assessment_id, control_id],
        row_to_risk,
    )
    .optional()
    .map_err(sqlite_err)
}

pub fn count_risks(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM risks", [], |row| row.get(0))
        .map_err(sqlite_err)
}
