//! Line-oriented parsing of the model's text body into report records.
//!
//! The model is asked for one `YYYY|TYPE|TITLE|URL` record per line. Lines
//! that do not follow that grammar are retried against a looser pattern
//! that only needs a year, a report-type token and a URL somewhere on the
//! line. Lines matching neither are dropped without error.

use crate::schema::{leading_year, ReportRecord, ReportType};
use log::debug;
use regex::{Match, Regex};
use std::ops::Range;
use std::sync::LazyLock;

pub const MIN_REPORT_YEAR: u32 = 2015;
pub const MAX_REPORT_YEAR: u32 = 2030;

const MIN_TITLE_CHARS: usize = 5;

static RE_LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*|-|[0-9]+\.)\s+").unwrap());
static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s)]+").unwrap());
static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}").unwrap());
static RE_TYPE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)BRSR|ESG|Sustainability").unwrap());

/// Parses every line of `text`, keeping source order.
pub fn parse_reports(text: &str) -> Vec<ReportRecord> {
    let reports: Vec<ReportRecord> = text.lines().filter_map(parse_line).collect();
    debug!("Parsed {} report records from response text", reports.len());
    reports
}

/// Parses a single line into at most one record.
pub fn parse_line(line: &str) -> Option<ReportRecord> {
    let clean = RE_LIST_MARKER.replace(line.trim(), "");
    if clean.is_empty() {
        return None;
    }

    parse_delimited(&clean).or_else(|| parse_fallback(&clean))
}

/// Strict `YEAR | TYPE | TITLE... | URL` grammar.
///
/// Every segment between the type and the URL belongs to the title, so a
/// title containing `|` survives intact. The leading digits of the year
/// must lie in [`MIN_REPORT_YEAR`, `MAX_REPORT_YEAR`] (`2022-23` is kept
/// as written) and the URL must start with `http`.
pub fn parse_delimited(line: &str) -> Option<ReportRecord> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.len() < 4 {
        return None;
    }

    let last = parts.len() - 1;
    let year = parts[0];
    let candidate = parts[last];
    let url = RE_URL
        .find(candidate)
        .map(|m| m.as_str())
        .unwrap_or(candidate);

    let year_in_range = leading_year(year)
        .map(|y| (MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&y))
        .unwrap_or(false);
    if !year_in_range || !url.starts_with("http") {
        return None;
    }

    let report_type = ReportType::classify(parts[1]);
    let mut title = parts[2..last].join(" | ");
    if title.is_empty() {
        title = format!("{} Report", report_type);
    }

    Some(ReportRecord::new(year, report_type, title, url))
}

/// Loose grammar: a four-digit year, a BRSR/ESG/Sustainability token and a
/// URL, in any order. The year is not range-checked here.
///
/// The title is whatever remains once the year and URL are cut out and the
/// `-`/`|` separators are blanked. Leftovers shorter than five characters
/// become `"<TOKEN> Report"`.
pub fn parse_fallback(line: &str) -> Option<ReportRecord> {
    let url = RE_URL.find(line)?;
    let year = find_outside(&RE_YEAR, line, &url)?;
    let token = find_outside(&RE_TYPE_TOKEN, line, &url)?;
    let token = &line[token];

    let mut cuts = [year.clone(), url.range()];
    cuts.sort_by_key(|r| r.start);
    let mut remainder = String::with_capacity(line.len());
    let mut cursor = 0;
    for cut in &cuts {
        remainder.push_str(&line[cursor..cut.start]);
        cursor = cut.end;
    }
    remainder.push_str(&line[cursor..]);

    let mut title = remainder
        .replace(['-', '|'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if title.chars().count() < MIN_TITLE_CHARS {
        title = format!("{} Report", token.to_uppercase());
    }

    Some(ReportRecord::new(
        &line[year],
        ReportType::classify(token),
        title,
        url.as_str(),
    ))
}

/// First match of `re` that does not fall inside the URL.
fn find_outside(re: &Regex, line: &str, url: &Match<'_>) -> Option<Range<usize>> {
    re.find(&line[..url.start()])
        .map(|m| m.range())
        .or_else(|| {
            re.find(&line[url.end()..])
                .map(|m| m.start() + url.end()..m.end() + url.end())
        })
}
