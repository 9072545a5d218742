//! Query strings. Values arrive as text and are parsed case-insensitively so a
//! bad value yields a validation error instead of a bare rejection.

use grc_core::errors::ValidationError;
use grc_core::models::RiskFilter;
use serde::Deserialize;

/// `?assessment_id&risk_level&mitigation_status`
#[derive(Debug, Default, Deserialize)]
pub struct RiskQuery {
    pub assessment_id: Option<String>,
    pub risk_level: Option<String>,
    pub mitigation_status: Option<String>,
}

impl RiskQuery {
    pub fn into_filter(self) -> Result<RiskFilter, ValidationError> {
        Ok(RiskFilter {
            assessment_id: parse_assessment_id(self.assessment_id)?,
            risk_level: non_blank(self.risk_level).map(|v| v.parse()).transpose()?,
            mitigation_status: non_blank(self.mitigation_status)
                .map(|v| v.parse())
                .transpose()?,
        })
    }
}

/// `?assessment_id`
#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    pub assessment_id: Option<String>,
}

impl StatisticsQuery {
    pub fn assessment_id(self) -> Result<Option<i64>, ValidationError> {
        parse_assessment_id(self.assessment_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
}

/// `?format=json|markdown`, json when absent.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>,
}

impl ReportQuery {
    pub fn format(&self) -> Result<ReportFormat, ValidationError> {
        match self.format.as_deref().map(|f| f.trim().to_ascii_lowercase()) {
            None => Ok(ReportFormat::Json),
            Some(f) if f.is_empty() || f == "json" => Ok(ReportFormat::Json),
            Some(f) if f == "markdown" || f == "md" => Ok(ReportFormat::Markdown),
            Some(f) => Err(ValidationError::InvalidValue {
                field: "format",
                value: f,
            }),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_assessment_id(value: Option<String>) -> Result<Option<i64>, ValidationError> {
    non_blank(value)
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidValue {
                    field: "assessment_id",
                    value: v,
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use grc_core::models::{MitigationStatus, RiskLevel};

    use super::*;

    #[test]
    fn test_filters_parse_case_insensitively() {
        let query = RiskQuery {
            assessment_id: Some("12".into()),
            risk_level: Some("HIGH".into()),
            mitigation_status: Some("Open".into()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.assessment_id, Some(12));
        assert_eq!(filter.risk_level, Some(RiskLevel::High));
        assert_eq!(filter.mitigation_status, Some(MitigationStatus::Open));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let query = RiskQuery {
            assessment_id: Some("".into()),
            risk_level: Some(" ".into()),
            mitigation_status: None,
        };
        assert!(query.into_filter().unwrap().is_empty());
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let query = RiskQuery {
            risk_level: Some("severe".into()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());

        let query = StatisticsQuery {
            assessment_id: Some("abc".into()),
        };
        assert!(query.assessment_id().is_err());

        let query = ReportQuery {
            format: Some("pdf".into()),
        };
        assert!(query.format().is_err());
    }
}
