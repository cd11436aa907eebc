use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sb_core::{ArticleLoader, Error};
use sb_inference::{Config, Responder};
use sb_loaders::{LoaderConfig, LoaderType};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod session;

use session::Session;

const MAX_LISTED_OPTIONS: usize = 10;

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

fn add_millis(total: u64, num: u64, unit: u64) -> std::result::Result<u64, String> {
    num.checked_mul(unit)
        .and_then(|millis| total.checked_add(millis))
        .ok_or_else(|| "Duration is too large".to_string())
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    'm' if chars.peek() == Some(&'s') => {
                        chars.next();
                        total_millis = add_millis(total_millis, num, 1)?;
                    }
                    's' => total_millis = add_millis(total_millis, num, 1_000)?,
                    'm' => total_millis = add_millis(total_millis, num, 60_000)?,
                    'h' => total_millis = add_millis(total_millis, num, 3_600_000)?,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // a bare number means seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_millis = add_millis(total_millis, num, 1_000)?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_millis == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

/// Chat about a Wikipedia topic. Type 'bye' to leave.
#[derive(Parser, Debug)]
#[command(name = "seniorbot", author, version, about, long_about = None)]
struct Cli {
    /// Topic to learn about, e.g. `Alan Turing`
    #[arg(required = true, num_args = 1..)]
    topic: Vec<String>,

    /// Wikipedia language edition
    #[arg(long, default_value = "en")]
    language: String,

    /// Time allowed for each request (e.g. 500ms, 10s, 1m)
    #[arg(long, default_value = "10s")]
    timeout: HumanDuration,

    /// Total attempts per request, including the first
    #[arg(long, default_value_t = 3)]
    attempts: u32,

    /// Look the topic up exactly as written instead of taking the search suggestion
    #[arg(long)]
    no_auto_suggest: bool,

    /// Pick the first option when the topic is ambiguous
    #[arg(long)]
    first_match: bool,

    /// Read the article from a local text file instead of Wikipedia
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn topic(&self) -> String {
        self.topic.join(" ")
    }

    fn loader_config(&self) -> LoaderConfig {
        let config = LoaderConfig::new()
            .with_language(&self.language)
            .with_timeout(self.timeout.0)
            .with_attempts(self.attempts)
            .with_auto_suggest(!self.no_auto_suggest)
            .with_first_match(self.first_match);
        match &self.file {
            Some(path) => config.with_file(path.clone()),
            None => config,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("sb_core=debug,sb_loaders=debug,sb_inference=debug,seniorbot=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// What the user sees when the article could not be fetched.
fn lookup_message(topic: &str, error: &Error) -> String {
    match error {
        Error::NotFound { .. } => {
            format!("Senior Bot: I couldn't find anything about '{}'.", topic)
        }
        Error::Ambiguous { options, .. } => {
            let mut message = format!(
                "Senior Bot: '{}' may refer to several things. Try one of:",
                topic
            );
            for option in options.iter().take(MAX_LISTED_OPTIONS) {
                message.push_str("\n  - ");
                message.push_str(option);
            }
            if options.len() > MAX_LISTED_OPTIONS {
                message.push_str(&format!("\n  ... and {} more", options.len() - MAX_LISTED_OPTIONS));
            }
            message
        }
        other => format!(
            "Senior Bot: I couldn't reach the encyclopedia right now ({}). Please try again later.",
            other
        ),
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let topic = cli.topic();
    let loader = LoaderType::from_config(&cli.loader_config())
        .context("Failed to set up the article loader")?;

    info!("Loading '{}' from {}", topic, loader.name());
    let article = match loader.load(&topic).await {
        Ok(article) => article,
        Err(e) if e.is_lookup_failure() => {
            eprintln!("{}", lookup_message(&topic, &e));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to load '{}'", topic)),
    };
    info!("Loaded '{}' ({} bytes)", article.title, article.content.len());

    let config = Config::default();
    let corpus = sb_inference::corpus(&article.content);
    if corpus.len() < config.min_sentences {
        warn!(
            "Article '{}' has only {} sentence(s), every answer will be an apology",
            article.title,
            corpus.len()
        );
    }

    let mut session = Session::new(&topic, corpus, Responder::new(config));
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    session
        .run(stdin, &mut stdout)
        .await
        .context("Conversation I/O failed")?;
    info!("Session ended, {} distinct words seen", session.distinct_words());

    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("10s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(10));
        assert_eq!("500ms".parse::<HumanDuration>().unwrap().0, Duration::from_millis(500));
        assert_eq!("1m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(60));
        assert_eq!("1m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("7".parse::<HumanDuration>().unwrap().0, Duration::from_secs(7));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("0s".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("s".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_too_large() {
        let err = "5124095576030432h".parse::<HumanDuration>().unwrap_err();
        assert_eq!(err, "Duration is too large");
        assert!("18446744073709552s".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615ms1ms".parse::<HumanDuration>().is_err());
        assert!("18446744073709552".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_cli_joins_topic_words() {
        let cli = Cli::parse_from(["seniorbot", "Alan", "Turing", "--first-match"]);
        assert_eq!(cli.topic(), "Alan Turing");
        let config = cli.loader_config();
        assert!(config.first_match);
        assert!(config.auto_suggest);
        assert_eq!(config.retry.timeout, Duration::from_secs(10));
        assert_eq!(config.retry.attempts, 3);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::parse_from([
            "seniorbot",
            "Mercury",
            "--language",
            "fr",
            "--timeout",
            "250ms",
            "--attempts",
            "5",
            "--no-auto-suggest",
            "--file",
            "mercury.txt",
        ]);
        let config = cli.loader_config();
        assert_eq!(config.language, "fr");
        assert!(!config.auto_suggest);
        assert_eq!(config.retry.timeout, Duration::from_millis(250));
        assert_eq!(config.retry.attempts, 5);
        assert!(Cli::try_parse_from(["seniorbot", "Mercury", "--retries", "5"]).is_err());
        assert_eq!(config.file, Some(PathBuf::from("mercury.txt")));
    }

    #[test]
    fn test_cli_requires_topic() {
        assert!(Cli::try_parse_from(["seniorbot"]).is_err());
    }

    #[test]
    fn test_ambiguous_message_lists_options() {
        let options: Vec<String> = (1..=12).map(|i| format!("Mercury {}", i)).collect();
        let message = lookup_message(
            "mercury",
            &Error::Ambiguous {
                topic: "mercury".to_string(),
                options,
            },
        );
        assert!(message.starts_with("Senior Bot:"));
        assert!(message.contains("Mercury 10"));
        assert!(!message.contains("Mercury 11"));
        assert!(message.contains("and 2 more"));
    }

    #[test]
    fn test_not_found_message() {
        let message = lookup_message("zzxq", &Error::NotFound { topic: "zzxq".to_string() });
        assert_eq!(message, "Senior Bot: I couldn't find anything about 'zzxq'.");
    }
}
