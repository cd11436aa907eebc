use std::collections::HashSet;
use std::io::Write;

use sb_core::Corpus;
use sb_inference::normalize::words;
use sb_inference::Responder;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const FAREWELL: &str = "Senior Bot: Goodbye! Take care :))";
pub const WELCOME: &str = "Senior Bot: You are welcome";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Active,
    Terminated,
}

/// One conversation about a topic, from greeting to farewell.
#[derive(Debug)]
pub struct Session {
    topic: String,
    corpus: Corpus,
    responder: Responder,
    words: Vec<String>,
    state: State,
}

pub fn greeting(topic: &str) -> String {
    format!(
        "Senior Bot: Lets try to get to know about {} in detail, If you want to exit anytime, just type 'bye'",
        topic
    )
}

impl Session {
    pub fn new(topic: &str, corpus: Corpus, responder: Responder) -> Self {
        let words = corpus.words.clone();
        Self {
            topic: topic.to_string(),
            corpus,
            responder,
            words,
            state: State::Active,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Corpus words followed by the words of every answered utterance.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn distinct_words(&self) -> usize {
        self.words.iter().collect::<HashSet<_>>().len()
    }

    /// Handles one line of input and returns what to print.
    pub fn handle(&mut self, line: &str) -> Option<String> {
        if self.state == State::Terminated {
            return None;
        }

        let utterance = line.trim().to_lowercase();
        match utterance.as_str() {
            "bye" => {
                self.state = State::Terminated;
                Some(FAREWELL.to_string())
            }
            "thanks" | "thank you" => {
                self.state = State::Terminated;
                Some(WELCOME.to_string())
            }
            _ => {
                self.words.extend(words(&utterance));
                debug!(
                    words = self.words.len(),
                    distinct = self.distinct_words(),
                    "Session vocabulary updated"
                );
                let reply = self.responder.respond(&self.corpus, &utterance);
                Some(format!("Bot: {}", reply))
            }
        }
    }

    /// Greets, then answers lines from `reader` until the user leaves or the
    /// input ends.
    pub async fn run<R, W>(&mut self, reader: R, writer: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(writer, "{}", greeting(&self.topic))?;
        writer.flush()?;

        let mut lines = reader.lines();
        while self.state == State::Active {
            let output = match lines.next_line().await? {
                Some(line) => self.handle(&line),
                None => {
                    debug!("Input closed");
                    self.handle("bye")
                }
            };
            if let Some(output) = output {
                writeln!(writer, "{}", output)?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}
