use lazy_static::lazy_static;
use regex::Regex;
use sb_core::Corpus;
use unicode_segmentation::UnicodeSegmentation;

use crate::lemma::lemmatize;

lazy_static! {
    static ref CITATION: Regex = Regex::new(r"\[[0-9]*\]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HEADING: Regex = Regex::new(r"=+").unwrap();
}

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "ca", "approx", "fig", "inc",
    "ltd", "co", "gen", "col", "lt", "sgt", "rev", "mt", "ft",
];

fn clean_pass(text: &str) -> String {
    let text = text.to_lowercase();
    let text = CITATION.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    HEADING.replace_all(&text, "").into_owned()
}

/// Lowercases, drops `[n]` citation markers, collapses whitespace and strips
/// `=` heading markup. Removing `=` can join two spaces or expose a new
/// citation marker, so the passes repeat until the text stops changing.
pub fn clean(raw: &str) -> String {
    let mut current = clean_pass(raw);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '”' | '’' | '»')
}

/// True when the text before a period ends in an abbreviation or an initial.
fn ends_with_abbreviation(before: &str) -> bool {
    let last = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    if last.is_empty() {
        return false;
    }
    if ABBREVIATIONS.contains(&last) {
        return true;
    }
    // single letters and dotted initials such as `j`, `u.s` or `e.g`
    last.split('.')
        .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic))
}

/// Splits cleaned text into sentences at `.`, `!` or `?` followed by whitespace.
pub fn sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !is_terminator(c) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && (is_terminator(chars[j].1) || is_closing(chars[j].1)) {
            j += 1;
        }

        let at_boundary = j == chars.len() || chars[j].1.is_whitespace();
        if at_boundary && !(c == '.' && ends_with_abbreviation(&text[start..pos])) {
            let end = chars.get(j).map(|(p, _)| *p).unwrap_or(text.len());
            push_sentence(&mut out, &text[start..end]);
            start = end;
        }
        i = j;
    }

    push_sentence(&mut out, &text[start..]);
    out
}

fn push_sentence(out: &mut Vec<String>, sentence: &str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        out.push(sentence.to_string());
    }
}

pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_string).collect()
}

/// Builds the working corpus of a session from raw article text.
pub fn corpus(raw: &str) -> Corpus {
    let cleaned = clean(raw);
    Corpus::new(sentences(&cleaned), words(&cleaned))
}

/// Lowercase, strip ASCII punctuation, split into words.
pub fn normalize(text: &str) -> Vec<String> {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    words(&stripped)
}

/// Scoring tokenizer: `normalize` followed by lemmatization of each token.
pub fn lem_normalize(text: &str) -> Vec<String> {
    normalize(text).iter().map(|token| lemmatize(token)).collect()
}
