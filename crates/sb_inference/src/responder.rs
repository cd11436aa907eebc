use std::fmt;

use sb_core::{Corpus, Error, Result};
use tracing::debug;

use crate::tfidf::{cosine, TfIdf};
use crate::Config;

pub const APOLOGY: &str = "I am Sorry! I couldn't get it";

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The corpus sentence most similar to the utterance.
    Sentence {
        index: usize,
        text: String,
        score: f64,
    },
    Apology,
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Sentence { text, .. } => text,
            Reply::Apology => APOLOGY,
        }
    }

    pub fn is_apology(&self) -> bool {
        matches!(self, Reply::Apology)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Answers utterances with the closest sentence of a corpus.
#[derive(Debug, Clone)]
pub struct Responder {
    config: Config,
    vectorizer: TfIdf,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Responder {
    pub fn new(config: Config) -> Self {
        let vectorizer = TfIdf::new(&config);
        Self { config, vectorizer }
    }

    /// Similarity of the utterance to every corpus sentence, in corpus order.
    ///
    /// The utterance is appended as the last document when fitting idf, so its
    /// own terms count towards document frequency the same way a sentence's do.
    pub fn scores(&self, corpus: &Corpus, utterance: &str) -> Vec<f64> {
        let mut docs: Vec<&str> = corpus.sentences.iter().map(String::as_str).collect();
        docs.push(utterance);

        let mut vectors = self.vectorizer.fit_transform(&docs);
        let query = match vectors.pop() {
            Some(query) => query,
            None => return Vec::new(),
        };
        vectors.iter().map(|v| cosine(v, &query)).collect()
    }

    /// Picks the best sentence for `utterance`. Fails with
    /// [`Error::DegenerateCorpus`] when the corpus is too small to answer from.
    pub fn try_respond(&self, corpus: &Corpus, utterance: &str) -> Result<Reply> {
        if corpus.len() < self.config.min_sentences {
            return Err(Error::DegenerateCorpus {
                sentences: corpus.len(),
            });
        }

        let scores = self.scores(corpus, utterance);
        let mut best: Option<(usize, f64)> = None;
        for (index, score) in scores.into_iter().enumerate() {
            // strict comparison keeps the lowest index on ties
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score > 0.0 => {
                debug!(index, score, "Matched sentence");
                Ok(Reply::Sentence {
                    index,
                    text: corpus.sentences[index].clone(),
                    score,
                })
            }
            _ => {
                debug!("No sentence shares vocabulary with the utterance");
                Ok(Reply::Apology)
            }
        }
    }

    pub fn respond(&self, corpus: &Corpus, utterance: &str) -> Reply {
        match self.try_respond(corpus, utterance) {
            Ok(reply) => reply,
            Err(e) => {
                debug!("{}", e);
                Reply::Apology
            }
        }
    }
}
