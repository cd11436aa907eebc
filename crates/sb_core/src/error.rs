use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("No article found for topic '{topic}'")]
    NotFound { topic: String },

    #[error("Topic '{topic}' is ambiguous, it may refer to: {}", .options.join(", "))]
    Ambiguous { topic: String, options: Vec<String> },

    #[error("Article provider unavailable: {0}")]
    Unavailable(String),

    #[error("Corpus has {sentences} sentence(s), at least 2 are needed to answer")]
    DegenerateCorpus { sentences: usize },
}

impl Error {
    /// True for the failures that mean "we could not get an article for this topic".
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. }
                | Error::Ambiguous { .. }
                | Error::Unavailable(_)
                | Error::Timeout(_)
                | Error::Http(_)
        )
    }

    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Timeout(_) | Error::Unavailable(_) => true,
            Error::Http(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                e.status()
                    .map(|s| s.is_server_error() || s.as_u16() == 429)
                    .unwrap_or(false)
            }
            _ => false,
        }
    }
}
