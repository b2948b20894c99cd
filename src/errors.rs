use thiserror::Error;

/// Failure of a catalog request. Callers treat every variant as the same
/// opaque network failure and pick their own user-visible message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base url {base:?}: {reason}")]
    BaseUrl { base: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} is not JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("network error: {0}")]
    Network(#[from] ApiError),
    #[error("missing {what} identifier")]
    MissingIdentifier { what: &'static str },
    #[error("cart position {position} is out of range for {len} entries")]
    Index { position: String, len: usize },
}

impl WidgetError {
    pub fn missing(what: &'static str) -> Self {
        Self::MissingIdentifier { what }
    }

    pub fn index(position: impl ToString, len: usize) -> Self {
        Self::Index {
            position: position.to_string(),
            len,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
