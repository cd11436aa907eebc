pub mod config;
pub mod loaders;
pub mod logging;
pub mod retry;

pub use config::LoaderConfig;
pub use loaders::{FileLoader, LoaderType, WikipediaLoader};
pub use logging::Logger;
pub use retry::RetryPolicy;
