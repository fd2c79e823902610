use crate::schema::{GroundingCitation, RawQueryResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, web_search: bool) -> Self {
        let tools = if web_search {
            vec![Tool::google_search()]
        } else {
            Vec::new()
        };
        Self {
            contents: vec![Content::user(prompt)],
            tools,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

/// A content part. Only text parts matter here; others deserialize with
/// `text: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: GoogleSearch {},
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate. Empty when the model
    /// returned no candidates.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Web citations of the first candidate, in the order the service listed them.
    pub fn grounding_citations(&self) -> Vec<GroundingCitation> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .map(|web| GroundingCitation {
                        title: web.title.clone(),
                        uri: web.uri.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn into_raw(self) -> RawQueryResponse {
        RawQueryResponse {
            text: self.text(),
            grounding_citations: self.grounding_citations(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub status: Option<String>,
}

/// Pulls `error.message` out of an API error body, if it has one.
pub fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_enables_google_search() {
        let request = GenerateContentRequest::new("find reports", true);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "find reports" }] }],
                "tools": [{ "google_search": {} }]
            })
        );

        let plain = serde_json::to_value(GenerateContentRequest::new("hi", false)).unwrap();
        assert!(plain.get("tools").is_none());
    }

    #[test]
    fn test_response_into_raw() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "2022|ESG|Impact Report|https://x.com/a.pdf\n" },
                        { "text": "2021|ESG|Climate Report|https://x.com/b.pdf" }
                    ]
                },
                "groundingMetadata": {
                    "webSearchQueries": ["x esg report"],
                    "groundingChunks": [
                        { "web": { "uri": "https://x.com/a.pdf", "title": "x.com" } },
                        { "retrievedContext": { "uri": "gs://bucket" } },
                        { "web": { "uri": "https://x.com/c.pdf" } }
                    ]
                }
            }]
        });

        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let raw = response.into_raw();
        assert_eq!(
            raw.text,
            "2022|ESG|Impact Report|https://x.com/a.pdf\n2021|ESG|Climate Report|https://x.com/b.pdf"
        );
        assert_eq!(
            raw.grounding_citations,
            vec![
                GroundingCitation::new(Some("x.com"), Some("https://x.com/a.pdf")),
                GroundingCitation::new(None, Some("https://x.com/c.pdf")),
            ]
        );
    }

    #[test]
    fn test_no_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        let raw = response.into_raw();
        assert!(raw.text.is_empty());
        assert!(raw.grounding_citations.is_empty());
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#;
        assert_eq!(
            api_error_message(body).as_deref(),
            Some("The model is overloaded.")
        );
        assert_eq!(api_error_message("<html>Bad Gateway</html>"), None);
    }
}
