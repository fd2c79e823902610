pub mod client;
pub mod types;

pub use client::*;
pub use types::*;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::query::RetryingQueryClient;
use crate::schema::{CompanyDescriptor, FetchOutcome};

/// Fetches reports for `company` with a Gemini-backed client configured
/// from the environment (see [`ClientConfig::from_env`]).
pub async fn fetch_company_reports(company: &CompanyDescriptor) -> Result<FetchOutcome> {
    let config = ClientConfig::from_env();
    let search = GeminiSearch::from_config(&config);
    RetryingQueryClient::new(search, config)
        .fetch_reports(company)
        .await
}
