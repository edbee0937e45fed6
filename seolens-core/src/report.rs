// Report generation for a single audit

use crate::audit::ScrapeResult;
use crate::checks::{self, Recommendation, TechnicalCheck};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub result: ScrapeResult,
    pub checks: Vec<TechnicalCheck>,
    pub recommendations: Vec<Recommendation>,
    pub issues_count: usize,
}

impl ReportData {
    pub fn from_result(result: ScrapeResult) -> Self {
        Self {
            checks: checks::run_checks(&result),
            recommendations: checks::recommendations(&result),
            issues_count: checks::count_issues(&result),
            result,
        }
    }

    fn display_or_none(value: &str) -> &str {
        if value.is_empty() { "(none)" } else { value }
    }
}

pub fn generate_report(data: &ReportData, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(data)),
        ReportFormat::Json => generate_json_report(data),
        ReportFormat::Markdown => Ok(generate_markdown_report(data)),
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let result = &data.result;
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                          SEOLENS ON-PAGE SEO REPORT\n");
    report.push_str(RULE);
    report.push('\n');

    report.push_str(&format!("URL:          {}\n", result.url));
    report.push_str(&format!("Audited:      {}\n", result.timestamp));
    report.push_str(&format!(
        "Title:        {} ({} chars)\n",
        ReportData::display_or_none(&result.title),
        result.title_length
    ));
    report.push_str(&format!(
        "Description:  {} chars\n",
        result.meta_description_length
    ));
    report.push_str(&format!("Issues:       {}\n", data.issues_count));
    report.push('\n');

    report.push_str(RULE);
    report.push_str("TECHNICAL CHECKS\n");
    report.push_str(RULE);
    report.push('\n');
    for check in &data.checks {
        report.push_str(&format!(
            "  [{:<7}] {:<18} {}\n",
            check.status.as_str().to_uppercase(),
            check.name,
            check.detail
        ));
    }
    report.push_str(&format!(
        "\n  Viewport meta: {}   Canonical link: {}\n\n",
        yes_no(result.has_viewport_meta),
        yes_no(result.has_canonical)
    ));

    if !result.h1_tags.is_empty() {
        report.push_str("H1 headings:\n");
        for h1 in &result.h1_tags {
            report.push_str(&format!("  - {}\n", ReportData::display_or_none(h1)));
        }
        report.push('\n');
    }

    if !result.images_without_alt.is_empty() {
        report.push_str("Images missing alt text:\n");
        for image in &result.images_without_alt {
            report.push_str(&format!(
                "  #{:<4} {}\n",
                image.index,
                ReportData::display_or_none(&image.src)
            ));
        }
        report.push('\n');
    }

    report.push_str(RULE);
    report.push_str("TOP KEYWORDS\n");
    report.push_str(RULE);
    report.push('\n');
    if result.keyword_analysis.is_empty() {
        report.push_str("  No keywords found.\n");
    }
    for (idx, keyword) in result.keyword_analysis.iter().enumerate() {
        report.push_str(&format!(
            "  {:>2}. {:<24} {}\n",
            idx + 1,
            keyword.word,
            keyword.count
        ));
    }
    report.push('\n');

    if !data.recommendations.is_empty() {
        report.push_str(RULE);
        report.push_str("RECOMMENDATIONS\n");
        report.push_str(RULE);
        report.push('\n');
        for (idx, rec) in data.recommendations.iter().enumerate() {
            report.push_str(&format!(
                "[{}] {} ({})\n",
                idx + 1,
                rec.title,
                rec.priority.as_str().to_uppercase()
            ));
            report.push_str(&wrap_text(&rec.description, 80, "  "));
            report.push_str("\n\n");
        }
    }

    report.push_str(RULE);
    report.push_str("\nGenerated by Seolens - on-page SEO audit\n\n");

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Seolens",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": {
                "issues_count": data.issues_count,
                "checks_passed": data
                    .checks
                    .iter()
                    .filter(|c| c.status == checks::CheckStatus::Pass)
                    .count(),
                "checks_total": data.checks.len()
            },
            "result": data.result,
            "checks": data.checks,
            "recommendations": data.recommendations
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(data: &ReportData) -> String {
    let result = &data.result;
    let mut report = String::new();

    report.push_str("# Seolens On-Page SEO Report\n\n");
    report.push_str(&format!("- **URL:** {}\n", result.url));
    report.push_str(&format!("- **Audited:** {}\n", result.timestamp));
    report.push_str(&format!(
        "- **Title:** {} ({} chars)\n",
        escape_markdown(ReportData::display_or_none(&result.title)),
        result.title_length
    ));
    report.push_str(&format!("- **Issues:** {}\n\n", data.issues_count));

    report.push_str("## Technical Checks\n\n");
    report.push_str("| Check | Status | Detail |\n|---|---|---|\n");
    for check in &data.checks {
        report.push_str(&format!(
            "| {} | {} | {} |\n",
            check.name,
            check.status.as_str(),
            check.detail
        ));
    }
    report.push('\n');

    report.push_str("## Top Keywords\n\n");
    if result.keyword_analysis.is_empty() {
        report.push_str("_No keywords found._\n\n");
    } else {
        report.push_str("| Keyword | Count |\n|---|---|\n");
        for keyword in &result.keyword_analysis {
            report.push_str(&format!("| {} | {} |\n", keyword.word, keyword.count));
        }
        report.push('\n');
    }

    if !result.images_without_alt.is_empty() {
        report.push_str("## Images Missing Alt Text\n\n");
        report.push_str("| Index | Source |\n|---|---|\n");
        for image in &result.images_without_alt {
            report.push_str(&format!(
                "| {} | {} |\n",
                image.index,
                escape_markdown(ReportData::display_or_none(&image.src))
            ));
        }
        report.push('\n');
    }

    if !data.recommendations.is_empty() {
        report.push_str("## Recommendations\n\n");
        for rec in &data.recommendations {
            report.push_str(&format!(
                "- **{}** ({}): {}\n",
                rec.title,
                rec.priority.as_str(),
                rec.description
            ));
        }
        report.push('\n');
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|")
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if !current_line.is_empty() && current_line.len() + word.len() + 1 > width - indent.len() {
            lines.push(format!("{}{}", indent, current_line));
            current_line.clear();
        }
        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        lines.push(format!("{}{}", indent, current_line));
    }

    lines.join("\n")
}
