use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stringlens")]
#[command(about = "Analyze, store and filter strings by derived properties", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file
    #[arg(long, global = true, env = "STRINGLENS_DB", default_value = "stringlens.db")]
    pub db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "STRINGLENS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "STRINGLENS_LOG_DIR")]
    pub log_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a string and store it
    Analyze { text: String },

    /// Show one stored string
    Get { text: String },

    /// List stored strings, optionally filtered
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        is_palindrome: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        min_length: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        max_length: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        word_count: Option<String>,

        #[arg(long)]
        contains_character: Option<String>,
    },

    /// Filter stored strings with a natural-language phrase
    Query { phrase: String },

    /// Delete one stored string
    #[command(alias = "rm")]
    Delete { text: String },
}

impl Commands {
    /// Explicit filter parameters of `list`, as query-string pairs.
    pub fn list_params(&self) -> Vec<(&'static str, String)> {
        let Commands::List {
            is_palindrome,
            min_length,
            max_length,
            word_count,
            contains_character,
        } = self
        else {
            return Vec::new();
        };

        [
            ("is_palindrome", is_palindrome),
            ("min_length", min_length),
            ("max_length", max_length),
            ("word_count", word_count),
            ("contains_character", contains_character),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|value| (key, value)))
        .collect()
    }
}
