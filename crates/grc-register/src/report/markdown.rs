//! Markdown rendering of a compliance report.

use super::compliance::ComplianceReport;
use super::findings::Priority;

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

pub fn render_markdown(report: &ComplianceReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Compliance Report: Assessment {}\n\n",
        report.assessment_id
    ));
    output.push_str(&format!(
        "_Generated {}_\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    // Summary
    let overall = &report.overall;
    output.push_str("## Summary\n\n");
    output.push_str(&format!("- **Overall Completion**: {}%\n", overall.completion));
    output.push_str(&format!("- **Controls**: {}\n", overall.tally.total));
    output.push_str(&format!("- **Complete**: {}\n", overall.tally.complete));
    output.push_str(&format!("- **In Progress**: {}\n", overall.tally.in_progress));
    output.push_str(&format!("- **Not Started**: {}\n", overall.tally.not_started));
    output.push_str(&format!(
        "- **Not Implemented**: {}\n",
        overall.tally.not_implemented
    ));
    output.push_str(&format!(
        "- **Not Applicable**: {}\n\n",
        overall.tally.not_applicable
    ));

    // Functions
    if !report.functions.is_empty() {
        output.push_str("## Functions\n\n");
        output.push_str("| Function | Controls | Complete | In Progress | Not Implemented | N/A | Completion |\n");
        output.push_str("|----------|----------|----------|-------------|-----------------|-----|------------|\n");
        for f in &report.functions {
            output.push_str(&format!(
                "| {} ({}) | {} | {} | {} | {} | {} | {}% |\n",
                f.name,
                f.code,
                f.tally.total,
                f.tally.complete,
                f.tally.in_progress,
                f.tally.not_implemented,
                f.tally.not_applicable,
                f.completion
            ));
        }
        output.push('\n');

        for f in &report.functions {
            output.push_str(&format!("### {} ({})\n\n", f.name, f.code));
            for c in &f.categories {
                let name = if c.name.is_empty() { "Uncategorized" } else { c.name.as_str() };
                output.push_str(&format!(
                    "- {}: {}% ({} of {} applicable complete)\n",
                    name,
                    c.completion,
                    c.tally.complete,
                    c.tally.applicable()
                ));
            }
            output.push('\n');
        }
    }

    // Risks
    let stats = &report.risk_statistics;
    output.push_str("## Risks\n\n");
    output.push_str(&format!(
        "- **Total**: {} (Critical {}, High {}, Medium {}, Low {})\n\n",
        stats.total_risks,
        stats.by_level.critical,
        stats.by_level.high,
        stats.by_level.medium,
        stats.by_level.low
    ));

    // Findings
    output.push_str("## Key Findings\n\n");
    for line in &report.findings.highlights {
        output.push_str(&format!("- {line}\n"));
    }
    output.push('\n');

    // Recommendations
    output.push_str("## Recommendations\n\n");
    for (i, rec) in report.recommendations.iter().enumerate() {
        output.push_str(&format!(
            "{}. **[{}] {}**: {}\n",
            i + 1,
            priority_label(rec.priority),
            rec.title,
            rec.detail
        ));
    }

    output
}
