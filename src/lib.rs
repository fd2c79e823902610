//! # ESG Report Finder
//!
//! A library for retrieving ESG, Sustainability and BRSR report filings for a
//! listed company by delegating a web-grounded search to a generative model,
//! then turning the loosely formatted answer into clean, typed records.
//!
//! ## Core Concepts
//!
//! - **Text Records**: Lines of the model's answer in `YYYY|TYPE|TITLE|URL` form,
//!   with a looser fallback pattern for lines that drift from the format
//! - **Grounding Records**: Web citations the model consulted, kept when they
//!   look like report filings
//! - **Report Collection**: Both sources merged, unique by URL (text wins) and
//!   sorted newest year first
//! - **Retry Policy**: Transient service failures are retried with exponential
//!   backoff; client errors fail immediately
//!
//! ## Example
//!
//! ```rust,ignore
//! use esg_report_finder::*;
//!
//! let client = RetryingQueryClient::new(GeminiSearch::new(), ClientConfig::from_env());
//! let company = CompanyDescriptor::new("Infosys", "INFY", Region::IndiaSensex);
//!
//! let outcome = client.fetch_reports(&company).await?;
//! for report in &outcome.reports {
//!     println!("{} {} {} {}", report.year, report.report_type, report.title, report.url);
//! }
//! ```

pub mod config;
pub mod error;
pub mod grounding;
pub mod parser;
pub mod prompts;
pub mod query;
pub mod reconciler;
pub mod retry;
pub mod schema;

#[cfg(feature = "gemini")]
pub mod llm;

pub use config::ClientConfig;
pub use error::{ReportFinderError, Result};
pub use grounding::extract_grounding_reports;
pub use parser::parse_reports;
pub use prompts::build_report_prompt;
pub use query::{ReportSearch, RetryingQueryClient, SearchRequest};
pub use reconciler::merge_reports;
pub use retry::RetryPolicy;
pub use schema::*;

#[cfg(feature = "gemini")]
pub use llm::{fetch_company_reports, GeminiSearch};

use log::debug;

/// Turns one raw search response into the final report collection.
///
/// `current_year` stands in for grounding citations whose titles carry no
/// year of their own.
pub fn assemble_reports(raw: &RawQueryResponse, current_year: i32) -> ReportCollection {
    let text_reports = parse_reports(&raw.text);
    let grounding_reports = extract_grounding_reports(&raw.grounding_citations, current_year);
    debug!(
        "Assembling {} text records and {} grounding records",
        text_reports.len(),
        grounding_reports.len()
    );
    merge_reports(text_reports, grounding_reports)
}
