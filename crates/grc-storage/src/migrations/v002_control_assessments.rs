//! V002: control assessments, one row per (assessment, control).

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS control_assessments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    assessment_id INTEGER NOT NULL,
    control_id TEXT NOT NULL,
    category_name TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL CHECK (status IN (
        'not_started', 'in_progress', 'complete', 'not_implemented', 'not_applicable'
    )),
    response TEXT,
    comments TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (assessment_id, control_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_control_assessments_status
    ON control_assessments(assessment_id, status);
"#;
