//! Command-line definition

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// text-search - search, highlight and replace text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding settings.json and the search history
    #[arg(long, global = true, env = "TEXT_SEARCH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable ANSI colour in highlights
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the lines matching a term
    Search {
        #[command(flatten)]
        pattern: PatternArgs,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Find a second term within a few words after a first one
    Near {
        term1: String,
        term2: String,
        /// Maximum number of words between the terms
        #[arg(short, long)]
        distance: Option<String>,
        /// Match case exactly
        #[arg(short = 'c', long, overrides_with = "no_case_sensitive")]
        case_sensitive: bool,
        /// Ignore case even when case-sensitive is saved as the default
        #[arg(long, overrides_with = "case_sensitive")]
        no_case_sensitive: bool,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Replace occurrences of a term
    Replace {
        #[command(flatten)]
        pattern: PatternArgs,
        /// Replacement text; `$1`/`${name}` expand in regex mode
        #[arg(long = "with", short = 'W', value_name = "TEXT")]
        replacement: String,
        /// Replace only the first occurrence
        #[arg(long)]
        next: bool,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Show the most frequent words
    Freq {
        /// Number of words to show
        #[arg(short = 'n', long, default_value_t = search_engine::DEFAULT_TOP_WORDS)]
        limit: usize,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Suggest alternative search terms
    Suggest { term: String },
    /// Show recently searched terms
    History {
        /// Forget every stored term
        #[arg(long)]
        clear: bool,
    },
    /// Convert a document between txt, csv, docx and pdf
    Convert {
        input: PathBuf,
        /// Output path; defaults to search_replace_text.<format>
        output: Option<PathBuf>,
        /// Output format when no output path is given
        #[arg(short, long, default_value = "txt")]
        format: String,
    },
    /// Show or change persisted settings
    Settings {
        /// Set the theme (light, dark, blue or toggle)
        #[arg(long)]
        theme: Option<String>,
        /// Restore defaults
        #[arg(long)]
        reset: bool,
    },
    /// Interactive session with undo and redo
    Shell {
        /// Document to load at start
        file: Option<PathBuf>,
    },
}

/// Term and matching flags shared by search and replace
#[derive(Args, Debug, Clone)]
pub struct PatternArgs {
    /// Term to search for
    pub term: String,
    /// Match case exactly
    #[arg(short = 'c', long, overrides_with = "no_case_sensitive")]
    pub case_sensitive: bool,
    /// Ignore case even when case-sensitive is saved as the default
    #[arg(long, overrides_with = "case_sensitive")]
    pub no_case_sensitive: bool,
    /// Treat the term as a regular expression
    #[arg(short = 'r', long, overrides_with = "no_regex")]
    pub regex: bool,
    /// Treat the term literally even when regex is saved as the default
    #[arg(long, overrides_with = "regex")]
    pub no_regex: bool,
    /// Match whole words only (ignored with --regex)
    #[arg(short = 'w', long, overrides_with = "no_whole_word")]
    pub whole_word: bool,
    /// Match inside words even when whole-word is saved as the default
    #[arg(long, overrides_with = "whole_word")]
    pub no_whole_word: bool,
}

/// Combine an on/off flag pair with the saved setting; the flags win
pub fn resolve_flag(on: bool, off: bool, saved: bool) -> bool {
    (saved || on) && !off
}

/// Where the text comes from: `--text`, a document, or stdin
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Document to read (txt, csv, docx or pdf)
    pub file: Option<PathBuf>,
    /// Use this text instead of a file
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replace() {
        let cli = Cli::parse_from([
            "text-search", "replace", "foo", "--with", "bar", "--next", "-w", "notes.txt",
        ]);
        match cli.command {
            Command::Replace { pattern, replacement, next, input, .. } => {
                assert_eq!(pattern.term, "foo");
                assert!(pattern.whole_word);
                assert_eq!(replacement, "bar");
                assert!(next);
                assert_eq!(input.file, Some(PathBuf::from("notes.txt")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_last_of_flag_pair_wins() {
        let cli = Cli::parse_from(["text-search", "search", "cat", "-c", "--no-case-sensitive"]);
        match cli.command {
            Command::Search { pattern, .. } => {
                assert!(!pattern.case_sensitive);
                assert!(pattern.no_case_sensitive);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_flag() {
        assert!(resolve_flag(false, false, true));
        assert!(!resolve_flag(false, true, true));
        assert!(resolve_flag(true, false, false));
        assert!(!resolve_flag(false, false, false));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["text-search", "freq", "--json", "--text", "a a b"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Freq { limit: 10, .. }));
    }
}
