// Prompt text for the grounded report search

use crate::schema::{CompanyDescriptor, Region};

pub const SEARCH_FIRST_YEAR: u32 = 2015;
pub const SEARCH_LAST_YEAR: u32 = 2025;

pub const INDIA_REGION_GUIDANCE: &str = "This is an Indian company. You MUST search for the \
'Business Responsibility and Sustainability Report' (BRSR) or 'Integrated Annual Report'.";

pub const US_REGION_GUIDANCE: &str =
    "This is a US company. Search for ESG or Sustainability Reports.";

pub fn region_guidance(region: Region) -> &'static str {
    match region {
        Region::IndiaSensex => INDIA_REGION_GUIDANCE,
        Region::DomesticUs => US_REGION_GUIDANCE,
    }
}

/// Builds the search instruction for one company.
///
/// The model is told to answer with one `YYYY|TYPE|TITLE|URL` line per
/// report, which is the grammar [`crate::parser`] expects.
pub fn build_report_prompt(company: &CompanyDescriptor) -> String {
    format!(
        r#"Find the official ESG, Sustainability, and Business Responsibility and Sustainability (BRSR) reports for '{name}' ({ticker}) for the years from {first} to {last}.
{guidance}

For each report found, output a single line strictly in this format:
YYYY|TYPE|TITLE|URL

Rules:
- YYYY must be a year between {first} and {last}.
- TYPE must be "BRSR", "ESG", or "Sustainability".
- TITLE should be the name of the report (e.g., "Integrated Annual Report 2022").
- URL must be a direct link to the PDF or the report landing page.
- Do not include bullet points.
- Do not include introductory text.
- Only list valid URLs found in your search.
- Sort by year, newest first.
"#,
        name = company.name,
        ticker = company.ticker,
        first = SEARCH_FIRST_YEAR,
        last = SEARCH_LAST_YEAR,
        guidance = region_guidance(company.region),
    )
}
