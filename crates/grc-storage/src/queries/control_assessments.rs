//! Queries for the control_assessments table.

use chrono::{DateTime, Utc};
use grc_core::errors::StorageError;
use grc_core::models::{ControlAssessment, ControlAssessmentDraft};
use rusqlite::{params, Connection, Row};

use super::{format_timestamp, parse_col};
use crate::sqlite_err;

const CONTROL_COLUMNS: &str = "id, assessment_id, control_id, category_name, status,
    response, comments, created_at, updated_at";

fn row_to_control(row: &Row<'_>) -> rusqlite::Result<ControlAssessment> {
    Ok(ControlAssessment {
        id: row.get(0)?,
        assessment_id: row.get(1)?,
        control_id: row.get(2)?,
        category_name: row.get(3)?,
        status: parse_col(row, 4)?,
        response: row.get(5)?,
        comments: row.get(6)?,
        created_at: parse_col(row, 7)?,
        updated_at: parse_col(row, 8)?,
    })
}

/// Insert or update the row for (assessment_id, control_id). A blank category
/// name keeps the stored one.
pub fn upsert_control_assessment(
    conn: &Connection,
    draft: &ControlAssessmentDraft,
    now: DateTime<Utc>,
) -> Result<ControlAssessment, StorageError> {
    conn.query_row(
        &format!(
            "INSERT INTO control_assessments (
                assessment_id, control_id, category_name, status, response, comments,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            ON CONFLICT (assessment_id, control_id) DO UPDATE SET
                category_name = CASE
                    WHEN excluded.category_name = '' THEN category_name
                    ELSE excluded.category_name
                END,
                status = excluded.status,
                response = excluded.response,
                comments = excluded.comments,
                updated_at = excluded.updated_at
            RETURNING {CONTROL_COLUMNS}"
        ),
        params![
            draft.assessment_id,
            draft.control_id,
            draft.category_name,
            draft.status.as_str(),
            draft.response,
            draft.comments,
            format_timestamp(&now),
        ],
        row_to_control,
    )
    .map_err(sqlite_err)
}

/// Controls of one assessment, ordered by control id.
pub fn list_control_assessments(
    conn: &Connection,
    assessment_id: i64,
) -> Result<Vec<ControlAssessment>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {CONTROL_COLUMNS} FROM control_assessments
             WHERE assessment_id = ?1
             ORDER BY control_id"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![assessment_id], row_to_control)
        .map_err(sqlite_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}
