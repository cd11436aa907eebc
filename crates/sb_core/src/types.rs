use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// The topic the user asked for.
    pub topic: String,
    /// Resolved page title, after search suggestions and redirects.
    pub title: String,
    pub url: Option<String>,
    pub content: String,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

impl Article {
    pub fn new(topic: &str, title: &str, content: String, source: &str) -> Self {
        Self {
            topic: topic.to_string(),
            title: title.to_string(),
            url: None,
            content,
            source: source.to_string(),
            fetched_at: Utc::now(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Normalized working set of one session: the candidate answers and the word tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub sentences: Vec<String>,
    pub words: Vec<String>,
}

impl Corpus {
    pub fn new(sentences: Vec<String>, words: Vec<String>) -> Self {
        Self { sentences, words }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_builder() {
        let article = Article::new("rust", "Rust (programming language)", "text".into(), "wikipedia")
            .with_url("https://en.wikipedia.org/wiki/Rust_(programming_language)");
        assert_eq!(article.topic, "rust");
        assert_eq!(article.title, "Rust (programming language)");
        assert!(article.url.is_some());
    }

    #[test]
    fn test_article_serialization() {
        let article = Article::new("cats", "Cat", "the cat.".into(), "file");
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, "Cat");
        assert_eq!(back.fetched_at, article.fetched_at);
    }

    #[test]
    fn test_corpus_len() {
        let corpus = Corpus::new(vec!["a.".into(), "b.".into()], vec![]);
        assert_eq!(corpus.len(), 2);
        assert!(!corpus.is_empty());
        assert!(Corpus::default().is_empty());
    }
}
