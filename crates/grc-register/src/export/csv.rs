//! CSV export of the risk register. Quoting follows RFC 4180.

use chrono::{DateTime, SecondsFormat, Utc};
use csv::Writer;
use grc_core::errors::ExportError;
use grc_core::models::Risk;

/// Column order of every export.
pub const HEADERS: [&str; 20] = [
    "Risk ID",
    "Description",
    "Category",
    "Likelihood",
    "Impact",
    "Risk Score",
    "Risk Level",
    "Mitigation Status",
    "Owner",
    "Target Date",
    "Mitigation Strategy",
    "Residual Likelihood",
    "Residual Impact",
    "Residual Score",
    "Residual Level",
    "Assessment ID",
    "Control ID",
    "Mitigation Notes",
    "Created At",
    "Updated At",
];

/// `<prefix>-<epoch_ms>.csv`
pub fn export_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}-{}.csv", now.timestamp_millis())
}

pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, risks: &[Risk]) -> Result<String, ExportError> {
        let mut wtr = Writer::from_writer(vec![]);

        wtr.write_record(HEADERS)
            .map_err(|e| ExportError::Csv(e.to_string()))?;

        for risk in risks {
            wtr.write_record([
                risk.risk_id.clone(),
                risk.description.clone(),
                risk.category.to_string(),
                risk.likelihood.to_string(),
                risk.impact.to_string(),
                risk.risk_score.to_string(),
                risk.risk_level.to_string(),
                risk.mitigation_status.to_string(),
                risk.owner.clone().unwrap_or_default(),
                risk.target_date.map(|d| d.to_string()).unwrap_or_default(),
                risk.mitigation_strategy.clone().unwrap_or_default(),
                opt_to_string(risk.residual_likelihood),
                opt_to_string(risk.residual_impact),
                opt_to_string(risk.residual_score),
                opt_to_string(risk.residual_level),
                opt_to_string(risk.assessment_id),
                risk.control_id.clone().unwrap_or_default(),
                risk.mitigation_notes.clone().unwrap_or_default(),
                risk.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                risk.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            ])
            .map_err(|e| ExportError::Csv(e.to_string()))?;
        }

        let data = wtr
            .into_inner()
            .map_err(|e| ExportError::Csv(e.to_string()))?;
        String::from_utf8(data).map_err(|e| ExportError::Encoding(e.to_string()))
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use grc_core::models::NewRisk;

    use super::*;

    #[test]
    fn test_csv_export_empty() {
        let result = CsvExporter::new().export(&[]).unwrap();
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Risk ID,Description,Category"));
        assert!(lines[0].ends_with("Created At,Updated At"));
    }

    #[test]
    fn test_csv_export_quotes_embedded_separators() {
        let risk = NewRisk::with_description("Backups, \"offsite\" copy missing")
            .into_draft()
            .unwrap()
            .into_risk(1, "RISK-0001".into(), Utc::now());
        let result = CsvExporter::new().export(&[risk]).unwrap();
        assert!(result.contains("\"Backups, \"\"offsite\"\" copy missing\""));
    }

    #[test]
    fn test_filename_uses_epoch_millis() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(
            export_filename("risk-register", now),
            "risk-register-1700000000123.csv"
        );
    }
}
