//! V001: risk register.
//!
//! Score and level are generated columns, so a stored row can never disagree
//! with its factors. The level thresholds (17/10/5) mirror `grc_core::scoring`.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS risks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    risk_id TEXT NOT NULL UNIQUE,
    assessment_id INTEGER,
    control_id TEXT,
    description TEXT NOT NULL CHECK (length(trim(description)) > 0),
    category TEXT NOT NULL DEFAULT 'Compliance',
    likelihood INTEGER NOT NULL DEFAULT 3 CHECK (likelihood BETWEEN 1 AND 5),
    impact INTEGER NOT NULL DEFAULT 3 CHECK (impact BETWEEN 1 AND 5),
    risk_score INTEGER GENERATED ALWAYS AS (likelihood * impact) STORED,
    risk_level TEXT GENERATED ALWAYS AS (
        CASE
            WHEN likelihood * impact >= 17 THEN 'Critical'
            WHEN likelihood * impact >= 10 THEN 'High'
            WHEN likelihood * impact >= 5 THEN 'Medium'
            ELSE 'Low'
        END
    ) STORED,
    mitigation_strategy TEXT,
    mitigation_status TEXT NOT NULL DEFAULT 'open',
    owner TEXT,
    target_date TEXT,
    residual_likelihood INTEGER
        CHECK (residual_likelihood IS NULL OR residual_likelihood BETWEEN 1 AND 5),
    residual_impact INTEGER
        CHECK (residual_impact IS NULL OR residual_impact BETWEEN 1 AND 5),
    residual_score INTEGER GENERATED ALWAYS AS (residual_likelihood * residual_impact) STORED,
    residual_level TEXT GENERATED ALWAYS AS (
        CASE
            WHEN residual_likelihood IS NULL OR residual_impact IS NULL THEN NULL
            WHEN residual_likelihood * residual_impact >= 17 THEN 'Critical'
            WHEN residual_likelihood * residual_impact >= 10 THEN 'High'
            WHEN residual_likelihood * residual_impact >= 5 THEN 'Medium'
            ELSE 'Low'
        END
    ) STORED,
    mitigation_notes TEXT,
    auto_generated INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_risks_assessment
    ON risks(assessment_id) WHERE assessment_id IS NOT NULL;
CREATE INDEX IF NOT EXISTS idx_risks_level ON risks(risk_level);
CREATE INDEX IF NOT EXISTS idx_risks_status ON risks(mitigation_status);
CREATE INDEX IF NOT EXISTS idx_risks_score ON risks(risk_score DESC, id);

-- At most one auto-generated risk per failed control.
CREATE UNIQUE INDEX IF NOT EXISTS ux_risks_auto_control
    ON risks(assessment_id, control_id) WHERE auto_generated = 1;
"#;
