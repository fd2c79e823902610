use crate::schema::{ReportCollection, ReportRecord};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

const TRAILING_URL_PUNCTUATION: &[char] = &['.', ',', ';', ':', ')', ']', '>', '"', '\''];

/// Identity key for a report link.
pub fn canonical_url(url: &str) -> &str {
    url.trim_end_matches(TRAILING_URL_PUNCTUATION)
}

/// Merges text-parsed and grounding-derived records into one collection.
///
/// Records are keyed by canonical URL. A repeated URL within the text keeps
/// its first position but takes the later record's fields. Grounding
/// records are only added for URLs the text did not produce. The result is
/// ordered by year, newest first; records with the same year keep their
/// merge order.
pub fn merge_reports(
    text_reports: Vec<ReportRecord>,
    grounding_reports: Vec<ReportRecord>,
) -> ReportCollection {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut merged: ReportCollection =
        Vec::with_capacity(text_reports.len() + grounding_reports.len());

    for report in text_reports {
        match slots.entry(canonical_url(&report.url).to_string()) {
            Entry::Occupied(slot) => merged[*slot.get()] = report,
            Entry::Vacant(slot) => {
                slot.insert(merged.len());
                merged.push(report);
            }
        }
    }

    for report in grounding_reports {
        if let Entry::Vacant(slot) = slots.entry(canonical_url(&report.url).to_string()) {
            slot.insert(merged.len());
            merged.push(report);
        }
    }

    sort_by_year_desc(&mut merged);
    debug!("Merged report collection holds {} entries", merged.len());
    merged
}

/// Stable sort, newest year first. Non-numeric years sort last.
pub fn sort_by_year_desc(reports: &mut [ReportRecord]) {
    reports.sort_by(|a, b| b.year_value().cmp(&a.year_value()));
}
