use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_USER_AGENT: &str = concat!("seniorbot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Wikipedia language edition, e.g. `en` or `de`.
    pub language: String,
    /// Overrides the `https://{language}.wikipedia.org/w/api.php` endpoint.
    pub api_url: Option<String>,
    pub user_agent: String,
    pub retry: RetryPolicy,
    /// Resolve the topic through search before fetching the page.
    pub auto_suggest: bool,
    /// On an ambiguous topic, load the first candidate instead of failing.
    pub first_match: bool,
    /// Read the article from this file instead of the network.
    pub file: Option<PathBuf>,
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = Some(url.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.retry.timeout = timeout;
        self
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.retry.attempts = attempts.max(1);
        self
    }

    pub fn with_auto_suggest(mut self, auto_suggest: bool) -> Self {
        self.auto_suggest = auto_suggest;
        self
    }

    pub fn with_first_match(mut self, first_match: bool) -> Self {
        self.first_match = first_match;
        self
    }

    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    pub fn api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/w/api.php", self.language))
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            api_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
            auto_suggest: true,
            first_match: false,
            file: None,
        }
    }
}
