use async_trait::async_trait;
use sb_core::{Article, ArticleLoader, Result};

use crate::config::LoaderConfig;

pub mod disambiguation;
pub mod file;
pub mod wikipedia;

pub use file::FileLoader;
pub use wikipedia::WikipediaLoader;

/// Enum that holds all possible loader types
#[derive(Debug, Clone)]
pub enum LoaderType {
    Wikipedia(WikipediaLoader),
    File(FileLoader),
}

impl LoaderType {
    /// Builds the loader the configuration asks for: a local file when one is
    /// given, Wikipedia otherwise.
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        match &config.file {
            Some(path) => Ok(LoaderType::File(FileLoader::new(path.clone()))),
            None => Ok(LoaderType::Wikipedia(WikipediaLoader::new(config.clone())?)),
        }
    }
}

#[async_trait]
impl ArticleLoader for LoaderType {
    fn name(&self) -> &str {
        match self {
            LoaderType::Wikipedia(l) => l.name(),
            LoaderType::File(l) => l.name(),
        }
    }

    async fn load(&self, topic: &str) -> Result<Article> {
        match self {
            LoaderType::Wikipedia(l) => l.load(topic).await,
            LoaderType::File(l) => l.load(topic).await,
        }
    }
}
