use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Region {
    /// US-listed companies; prompts ask for ESG and Sustainability reports.
    DomesticUs,
    /// SENSEX constituents; prompts ask for BRSR and Integrated Annual Reports.
    IndiaSensex,
}

/// The company a report search is run for. Owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyDescriptor {
    pub name: String,
    pub ticker: String,
    pub region: Region,
}

impl CompanyDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, ticker: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            region,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReportType {
    #[serde(rename = "ESG")]
    Esg,
    #[serde(rename = "BRSR")]
    Brsr,
    Sustainability,
}

impl ReportType {
    /// Classifies a free-form label by substring, case-insensitively.
    /// Anything without a BRSR or Sustainability marker is an ESG report.
    pub fn classify(label: &str) -> Self {
        let upper = label.to_uppercase();
        if upper.contains("BRSR") {
            ReportType::Brsr
        } else if upper.contains("SUSTAINABILITY") {
            ReportType::Sustainability
        } else {
            ReportType::Esg
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Esg => "ESG",
            ReportType::Brsr => "BRSR",
            ReportType::Sustainability => "Sustainability",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRecord {
    /// Four-digit year, kept as the display string.
    pub year: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub title: String,
    /// Absolute link to the report. Identity key for deduplication.
    pub url: String,
}

impl ReportRecord {
    pub fn new(
        year: impl Into<String>,
        report_type: ReportType,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            report_type,
            title: title.into(),
            url: url.into(),
        }
    }

    /// Numeric year used for ordering. Unparseable years sort as 0.
    pub fn year_value(&self) -> u32 {
        leading_year(&self.year).unwrap_or(0)
    }
}

/// Reads the leading run of ASCII digits, so fiscal labels like `2022-23`
/// count as 2022.
pub fn leading_year(label: &str) -> Option<u32> {
    let label = label.trim();
    let end = label
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(label.len());
    label[..end].parse().ok()
}

/// Reports sorted by year (newest first), unique by URL.
pub type ReportCollection = Vec<ReportRecord>;

/// One web source from the grounding metadata. Either field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroundingCitation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl GroundingCitation {
    pub fn new(title: Option<&str>, uri: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            uri: uri.map(str::to_string),
        }
    }
}

/// Unparsed output of one search call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawQueryResponse {
    pub text: String,
    pub grounding_citations: Vec<GroundingCitation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchOutcome {
    pub reports: ReportCollection,
    /// The model's text body, kept for diagnostics.
    pub raw_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_classification() {
        assert_eq!(ReportType::classify("brsr"), ReportType::Brsr);
        assert_eq!(ReportType::classify("BRSR / Sustainability"), ReportType::Brsr);
        assert_eq!(ReportType::classify("Sustainability"), ReportType::Sustainability);
        assert_eq!(ReportType::classify("ESG"), ReportType::Esg);
        assert_eq!(ReportType::classify("Integrated"), ReportType::Esg);
    }

    #[test]
    fn test_record_serializes_with_display_type_names() {
        let record = ReportRecord::new(
            "2022",
            ReportType::Sustainability,
            "Impact Report",
            "https://example.com/r.pdf",
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Sustainability");
        assert_eq!(json["year"], "2022");

        let esg = serde_json::to_value(ReportType::Esg).unwrap();
        assert_eq!(esg, "ESG");
    }

    #[test]
    fn test_year_value_defaults_to_zero() {
        let record = ReportRecord::new("n/a", ReportType::Esg, "Report", "https://x.com");
        assert_eq!(record.year_value(), 0);
        let record = ReportRecord::new("2021", ReportType::Esg, "Report", "https://x.com");
        assert_eq!(record.year_value(), 2021);
        let record = ReportRecord::new("2022-23", ReportType::Brsr, "Report", "https://x.com");
        assert_eq!(record.year_value(), 2022);
    }

    #[test]
    fn test_leading_year() {
        assert_eq!(leading_year(" 2024 "), Some(2024));
        assert_eq!(leading_year("2022-23"), Some(2022));
        assert_eq!(leading_year("FY2022"), None);
        assert_eq!(leading_year("२०२२"), None);
        assert_eq!(leading_year(""), None);
    }
}
