use std::collections::{BTreeMap, HashMap};

use crate::lemma::lemmatize;
use crate::normalize::normalize;
use crate::stopwords::is_stop_word;
use crate::Config;

/// Sparse document vector keyed by vocabulary index.
pub type SparseVector = BTreeMap<usize, f64>;

/// TF-IDF vectorizer with raw term counts, smoothed idf and L2 normalization.
#[derive(Debug, Clone)]
pub struct TfIdf {
    use_stop_words: bool,
    lemmatize: bool,
}

impl TfIdf {
    pub fn new(config: &Config) -> Self {
        Self {
            use_stop_words: config.use_stop_words,
            lemmatize: config.lemmatize,
        }
    }

    /// Splits text into scoring terms. Stop words are dropped both as written
    /// and in their lemmatized form.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut terms = Vec::new();
        for token in normalize(text) {
            if self.use_stop_words && is_stop_word(&token) {
                continue;
            }
            let term = if self.lemmatize {
                lemmatize(&token)
            } else {
                token
            };
            if self.use_stop_words && is_stop_word(&term) {
                continue;
            }
            terms.push(term);
        }
        terms
    }

    /// Fits the vocabulary and idf weights on `docs` and returns one vector per
    /// document, in order.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseVector> {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| self.tokenize(d.as_ref())).collect();

        let mut vocabulary: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<BTreeMap<usize, f64>> = Vec::with_capacity(tokenized.len());
        for terms in &tokenized {
            let mut doc = BTreeMap::new();
            for term in terms {
                let next = vocabulary.len();
                let index = *vocabulary.entry(term.as_str()).or_insert(next);
                *doc.entry(index).or_insert(0.0) += 1.0;
            }
            counts.push(doc);
        }

        let mut df = vec![0usize; vocabulary.len()];
        for doc in &counts {
            for index in doc.keys() {
                df[*index] += 1;
            }
        }

        let n = counts.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        counts
            .into_iter()
            .map(|doc| {
                let mut weighted: SparseVector =
                    doc.into_iter().map(|(i, tf)| (i, tf * idf[i])).collect();
                let norm = weighted.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    weighted.values_mut().for_each(|w| *w /= norm);
                }
                weighted
            })
            .collect()
    }
}

/// Cosine similarity of two sparse vectors; zero when either is empty.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(i, w)| large.get(i).map(|v| w * v))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
