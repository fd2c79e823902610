use crate::assemble_reports;
use crate::config::ClientConfig;
use crate::error::{ReportFinderError, Result};
use crate::prompts::build_report_prompt;
use crate::schema::{CompanyDescriptor, FetchOutcome, RawQueryResponse};
use async_trait::async_trait;
use chrono::{Datelike, Local};
use log::{debug, info};
use std::fmt;
use tokio_util::sync::CancellationToken;

/// One outbound call to the generative search service.
#[derive(Clone)]
pub struct SearchRequest {
    pub model: String,
    pub prompt: String,
    pub api_key: String,
    /// Ask the service to ground its answer with a web search.
    pub web_search: bool,
}

impl fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRequest")
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .field("api_key", &"<redacted>")
            .field("web_search", &self.web_search)
            .finish()
    }
}

/// The generative search backend.
///
/// Implementations return the model's text body together with the web
/// citations it was grounded on, or a [`ReportFinderError`] whose
/// [`status`](ReportFinderError::status) drives retry classification.
#[async_trait]
pub trait ReportSearch: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<RawQueryResponse>;
}

#[async_trait]
impl<S: ReportSearch + ?Sized> ReportSearch for std::sync::Arc<S> {
    async fn search(&self, request: &SearchRequest) -> Result<RawQueryResponse> {
        (**self).search(request).await
    }
}

/// Fetches report collections for companies, retrying transient failures.
///
/// Stateless between calls: every fetch builds its own request and owns
/// its own response.
pub struct RetryingQueryClient<S> {
    search: S,
    config: ClientConfig,
}

impl<S: ReportSearch> RetryingQueryClient<S> {
    pub fn new(search: S, config: ClientConfig) -> Self {
        Self { search, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn fetch_reports(&self, company: &CompanyDescriptor) -> Result<FetchOutcome> {
        self.fetch_reports_cancellable(company, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_reports`](Self::fetch_reports), but gives up with
    /// [`ReportFinderError::Cancelled`] once `cancel` fires, whether a request
    /// or a backoff pause is pending.
    pub async fn fetch_reports_cancellable(
        &self,
        company: &CompanyDescriptor,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome> {
        let api_key = self
            .config
            .credential()
            .ok_or(ReportFinderError::MissingCredential)?;

        info!(
            "Searching reports for {} ({}) with model {}",
            company.name, company.ticker, self.config.model
        );

        let request = SearchRequest {
            model: self.config.model.clone(),
            prompt: build_report_prompt(company),
            api_key: api_key.to_string(),
            web_search: true,
        };

        let raw = self
            .config
            .retry
            .run(cancel, |attempt| {
                debug!("Search attempt {} for {}", attempt + 1, company.ticker);
                self.search.search(&request)
            })
            .await?;

        let reports = assemble_reports(&raw, Local::now().year());
        info!(
            "Found {} reports for {} ({})",
            reports.len(),
            company.name,
            company.ticker
        );

        Ok(FetchOutcome {
            reports,
            raw_text: raw.text,
        })
    }
}
