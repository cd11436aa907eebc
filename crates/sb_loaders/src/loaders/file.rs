use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sb_core::{Article, ArticleLoader, Error, Result};

use crate::logging::Logger;

pub const SOURCE: &str = "file";

/// Reads the article text from a local file, for offline sessions.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
    logger: Logger,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            logger: Logger::new().with_prefix("📄".to_string()).with_prefix(SOURCE.to_string()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArticleLoader for FileLoader {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn load(&self, topic: &str) -> Result<Article> {
        let logger = self.logger.for_topic(topic);
        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            logger.warn(&format!("{} is empty", self.path.display()));
            return Err(Error::NotFound { topic: topic.to_string() });
        }

        let title = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| topic.to_string());
        logger.info(&format!("read {} chars from {}", content.len(), self.path.display()));

        Ok(Article::new(topic, &title, content, SOURCE).with_url(self.path.display().to_string()))
    }
}
