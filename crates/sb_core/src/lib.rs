pub mod error;
pub mod loader;
pub mod types;

pub use error::Error;
pub use loader::ArticleLoader;
pub use types::{Article, Corpus};

pub type Result<T> = std::result::Result<T, Error>;
