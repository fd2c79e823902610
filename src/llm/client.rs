use crate::config::{ClientConfig, GEMINI_BASE_URL};
use crate::error::{ReportFinderError, Result};
use crate::llm::types::*;
use crate::query::{ReportSearch, SearchRequest};
use crate::schema::RawQueryResponse;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

/// [`ReportSearch`] backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiSearch {
    client: Client,
    base_url: String,
}

impl Default for GeminiSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiSearch {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new().with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl ReportSearch for GeminiSearch {
    async fn search(&self, request: &SearchRequest) -> Result<RawQueryResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, request.model
        );
        let payload = GenerateContentRequest::new(&request.prompt, request.web_search);

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &request.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            let message = api_error_message(&err_text)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or(err_text);
            return Err(ReportFinderError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = res.json().await?;
        if body.candidates.is_empty() {
            debug!("Gemini returned no candidates");
        }

        Ok(body.into_raw())
    }
}
