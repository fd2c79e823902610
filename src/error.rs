use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportFinderError {
    #[error("API Key is missing. Please check your environment variables.")]
    MissingCredential,

    #[error("Search service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected search response: {0}")]
    InvalidResponse(String),

    #[error("Report search was cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

const TRANSPORT_MARKERS: &[&str] = &[
    "network",
    "fetch",
    "xhr",
    "connection",
    "connect",
    "timed out",
    "timeout",
];

impl ReportFinderError {
    /// HTTP-like status code carried by the failure, when one is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            #[cfg(feature = "gemini")]
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a retry has a reasonable chance of succeeding.
    ///
    /// Server-side failures (status >= 500) and transport-level failures are
    /// transient. Client errors, including 429, are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::MissingCredential | Self::Cancelled => false,
            Self::Transport(_) => true,
            #[cfg(feature = "gemini")]
            Self::Http(e) if e.is_connect() || e.is_timeout() || e.is_request() => true,
            _ => match self.status() {
                Some(status) => status >= 500,
                None => mentions_transport_failure(&self.to_string()),
            },
        }
    }
}

fn mentions_transport_failure(message: &str) -> bool {
    let lower = message.to_lowercase();
    TRANSPORT_MARKERS.iter().any(|marker| lower.contains(marker))
}

pub type Result<T> = std::result::Result<T, ReportFinderError>;
