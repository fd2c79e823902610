use crate::schema::{GroundingCitation, ReportRecord, ReportType};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_CITATION_TITLE: &str = "Online Report Result";

static RE_TITLE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b20(?:1[5-9]|2[0-9])\b").unwrap());

/// Mines the grounding citations for links that look like report filings.
///
/// A citation is kept when its URI points at a PDF or its title mentions a
/// report; other hits (news coverage and the like) are dropped. When the
/// title carries no year in 2015-2029, `current_year` is used instead.
pub fn extract_grounding_reports(
    citations: &[GroundingCitation],
    current_year: i32,
) -> Vec<ReportRecord> {
    let reports: Vec<ReportRecord> = citations
        .iter()
        .filter_map(|citation| citation_to_report(citation, current_year))
        .collect();
    debug!(
        "Kept {} of {} grounding citations as reports",
        reports.len(),
        citations.len()
    );
    reports
}

fn citation_to_report(citation: &GroundingCitation, current_year: i32) -> Option<ReportRecord> {
    let url = citation.uri.as_deref().filter(|u| !u.is_empty())?;
    let title = citation
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_CITATION_TITLE);

    if !looks_like_report(url, title) {
        return None;
    }

    let year = RE_TITLE_YEAR
        .find(title)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| current_year.to_string());

    Some(ReportRecord::new(year, classify_title(title), title, url))
}

fn looks_like_report(url: &str, title: &str) -> bool {
    url.to_lowercase().ends_with(".pdf") || title.to_lowercase().contains("report")
}

/// Like [`ReportType::classify`], but also treats "Business Responsibility"
/// as BRSR since search result titles often spell it out.
fn classify_title(title: &str) -> ReportType {
    if title.to_uppercase().contains("BUSINESS RESPONSIBILITY") {
        ReportType::Brsr
    } else {
        ReportType::classify(title)
    }
}
