use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleLoader: Send + Sync {
    /// Short name of the content provider, used in logs.
    fn name(&self) -> &str;

    /// Fetch the full text of the article for `topic`.
    async fn load(&self, topic: &str) -> Result<Article>;
}
