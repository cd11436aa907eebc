use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use sb_core::{Article, ArticleLoader, Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::disambiguation::extract_options;
use crate::config::LoaderConfig;
use crate::logging::Logger;
use crate::retry::with_retry;

pub const SOURCE: &str = "wikipedia";

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    error: Option<ApiError>,
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
    searchinfo: Option<SearchInfo>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    error: Option<ApiError>,
    query: Option<PageQuery>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    fullurl: Option<String>,
    #[serde(default)]
    pageprops: HashMap<String, serde_json::Value>,
}

impl Page {
    fn is_disambiguation(&self) -> bool {
        self.pageprops.contains_key("disambiguation")
    }
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    error: Option<ApiError>,
    parse: Option<ParsedPage>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    #[serde(default)]
    text: String,
}

fn api_error(error: ApiError) -> Error {
    Error::Unavailable(format!("{}: {}", error.code, error.info))
}

/// Picks the title to fetch from a search result. The search suggestion wins
/// over the first hit, matching what the site itself would redirect to.
fn resolve_title(topic: &str, response: SearchResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(api_error(error));
    }
    let query = response.query.ok_or_else(|| Error::NotFound { topic: topic.to_string() })?;

    let suggestion = query.searchinfo.and_then(|info| info.suggestion);
    suggestion
        .or_else(|| query.search.into_iter().next().map(|hit| hit.title))
        .ok_or_else(|| Error::NotFound { topic: topic.to_string() })
}

enum PageOutcome {
    Article(Article),
    Disambiguation(String),
}

fn page_outcome(topic: &str, response: PageResponse) -> Result<PageOutcome> {
    if let Some(error) = response.error {
        return Err(api_error(error));
    }
    let page = response
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| Error::NotFound { topic: topic.to_string() })?;

    if page.missing || page.invalid {
        return Err(Error::NotFound { topic: topic.to_string() });
    }
    if page.is_disambiguation() {
        return Ok(PageOutcome::Disambiguation(page.title));
    }

    let content = page.extract.unwrap_or_default();
    if content.trim().is_empty() {
        return Err(Error::NotFound { topic: topic.to_string() });
    }

    let mut article = Article::new(topic, &page.title, content, SOURCE);
    if let Some(url) = page.fullurl {
        article = article.with_url(url);
    }
    Ok(PageOutcome::Article(article))
}

/// Loads plain-text articles from the MediaWiki action API.
#[derive(Debug, Clone)]
pub struct WikipediaLoader {
    client: Client,
    config: LoaderConfig,
    logger: Logger,
}

impl WikipediaLoader {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.retry.timeout)
            .build()?;
        let logger = Logger::new()
            .with_prefix("📚".to_string())
            .with_prefix(SOURCE.to_string());
        Ok(Self { client, config, logger })
    }

    fn endpoint(&self, params: &[(&str, &str)]) -> Result<Url> {
        let mut all = vec![("format", "json"), ("formatversion", "2")];
        all.extend_from_slice(params);
        Url::parse_with_params(&self.config.api_url(), &all)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.config.api_url(), e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, logger: &Logger) -> Result<T> {
        with_retry(&self.config.retry, logger, || {
            let request = self.client.get(url.clone());
            async move {
                let response = request.send().await?;
                let status = response.status();
                if status.is_server_error() || status.as_u16() == 429 {
                    return Err(Error::Unavailable(format!("HTTP {}", status)));
                }
                let response = response.error_for_status()?;
                Ok(response.json::<T>().await?)
            }
        })
        .await
    }

    async fn search(&self, topic: &str, logger: &Logger) -> Result<String> {
        let url = self.endpoint(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", topic),
            ("srlimit", "1"),
            ("srinfo", "suggestion"),
            ("srprop", ""),
        ])?;
        logger.debug(&format!("searching: {}", url));
        let response: SearchResponse = self.get_json(url, logger).await?;
        let title = resolve_title(topic, response)?;
        logger.debug(&format!("resolved to '{}'", title));
        Ok(title)
    }

    async fn disambiguation_options(&self, title: &str, logger: &Logger) -> Result<Vec<String>> {
        let url = self.endpoint(&[
            ("action", "parse"),
            ("page", title),
            ("prop", "text"),
            ("redirects", "1"),
        ])?;
        let response: ParseResponse = self.get_json(url, logger).await?;
        if let Some(error) = response.error {
            return Err(api_error(error));
        }
        Ok(response.parse.map(|p| extract_options(&p.text)).unwrap_or_default())
    }

    async fn fetch_page(&self, topic: &str, title: &str, logger: &Logger) -> Result<Article> {
        let url = self.endpoint(&[
            ("action", "query"),
            ("prop", "extracts|pageprops|info"),
            ("explaintext", "1"),
            ("inprop", "url"),
            ("redirects", "1"),
            ("titles", title),
        ])?;
        logger.debug(&format!("fetching page '{}'", title));
        let response: PageResponse = self.get_json(url, logger).await?;

        match page_outcome(topic, response)? {
            PageOutcome::Article(article) => {
                logger.info(&format!(
                    "loaded '{}' ({} chars)",
                    article.title,
                    article.content.len()
                ));
                Ok(article)
            }
            PageOutcome::Disambiguation(page_title) => {
                let options = self.disambiguation_options(&page_title, logger).await?;
                logger.warn(&format!("'{}' is a disambiguation page with {} options", page_title, options.len()));
                Err(Error::Ambiguous { topic: topic.to_string(), options })
            }
        }
    }
}

#[async_trait]
impl ArticleLoader for WikipediaLoader {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn load(&self, topic: &str) -> Result<Article> {
        let logger = self.logger.for_topic(topic);
        let title = if self.config.auto_suggest {
            self.search(topic, &logger).await?
        } else {
            topic.to_string()
        };

        match self.fetch_page(topic, &title, &logger).await {
            Err(Error::Ambiguous { options, .. }) if self.config.first_match && !options.is_empty() => {
                logger.info(&format!("picking first candidate '{}'", options[0]));
                self.fetch_page(topic, &options[0], &logger).await
            }
            other => other,
        }
    }
}
