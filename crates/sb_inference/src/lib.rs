pub mod lemma;
pub mod normalize;
pub mod responder;
pub mod stopwords;
pub mod tfidf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Drop English stop words before weighting.
    pub use_stop_words: bool,
    /// Reduce tokens to their noun base form.
    pub lemmatize: bool,
    /// Corpora smaller than this are answered with the apology.
    pub min_sentences: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_stop_words: true,
            lemmatize: true,
            min_sentences: 2,
        }
    }
}

pub mod prelude {
    pub use super::normalize::corpus;
    pub use super::responder::{Reply, Responder, APOLOGY};
    pub use super::Config;
    pub use sb_core::{Corpus, Error, Result};
}

pub use normalize::corpus;
pub use responder::{Reply, Responder};
