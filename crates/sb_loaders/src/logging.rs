use std::collections::VecDeque;

/// Tags every line with a chain of prefixes, e.g. `📚 wikipedia [cats]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.prefixes.push_back(prefix);
        self
    }

    /// Logger scoped to a single topic lookup.
    pub fn for_topic(&self, topic: &str) -> Self {
        self.clone().with_prefix(format!("[{}]", topic))
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect::<String>()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}{}", self.prefix(), message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_chain() {
        let logger = Logger::new().with_prefix("📚".into()).with_prefix("wikipedia".into());
        assert_eq!(logger.prefix(), "📚 wikipedia ");
        assert_eq!(logger.for_topic("cats").prefix(), "📚 wikipedia [cats] ");
        // the parent logger keeps its own prefixes
        assert_eq!(logger.prefix(), "📚 wikipedia ");
    }
}
