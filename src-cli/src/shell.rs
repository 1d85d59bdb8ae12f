//! Interactive shell
//!
//! One session over one buffer, driven line by line. Typed edits are
//! snapshotted once input pauses for the configured window; every
//! replace is snapshotted straight away.

use crate::commands::RunContext;
use crate::output::{format_frequency, format_matches, format_proximity, ConsoleNotifier, Palette};
use anyhow::{bail, Result};
use edit_engine::{EditError, Notifier, SearchSession};
use search_engine::{
    parse_distance, positive_distance, suggestions, SearchOptions, DEFAULT_TOP_WORDS,
};
use std::path::Path;
use std::time::Instant;
use store::{export_document, import_document, AppSettings};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const HELP: &str = "\
commands:
  load <file>                 import a document
  save <file>                 export the buffer (txt, csv, docx, pdf)
  show                        print the buffer
  append <text>               add a line to the buffer
  find <term>                 list matching lines
  near <term1> <term2> [n]    term2 within n words after term1
  replace <term> <text>       replace every occurrence
  next <term> <text>          replace the next occurrence
  set case|regex|word on|off  matching flags
  undo, redo                  step through history
  freq [n]                    most frequent words
  suggest <term>              alternative terms
  history                     recent search terms
  quit                        leave the shell
Quote arguments containing spaces: find \"two words\"";

/// Matching flags toggled with `set`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub case_sensitive: bool,
    pub regex: bool,
    pub whole_word: bool,
}

impl Flags {
    fn from_settings(settings: &AppSettings) -> Self {
        Self {
            case_sensitive: settings.search.case_sensitive,
            regex: settings.search.regex_enabled,
            whole_word: settings.search.whole_word,
        }
    }

    fn options(&self, term: &str) -> Result<SearchOptions> {
        Ok(SearchOptions::new(term)?
            .case_sensitive(self.case_sensitive)
            .regex(self.regex)
            .whole_word(self.whole_word))
    }
}

/// What the loop should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

pub struct Shell<N: Notifier> {
    pub session: SearchSession,
    pub flags: Flags,
    palette: Palette,
    proximity_distance: usize,
    notifier: N,
    /// Terms searched during this shell, most recent last
    searched: Vec<String>,
}

impl<N: Notifier> Shell<N> {
    pub fn new(session: SearchSession, settings: &AppSettings, palette: Palette, notifier: N) -> Self {
        Self {
            session,
            flags: Flags::from_settings(settings),
            palette,
            proximity_distance: positive_distance(settings.search.proximity_distance),
            notifier,
            searched: Vec::new(),
        }
    }

    /// Terms searched so far, oldest first
    pub fn searched(&self) -> &[String] {
        &self.searched
    }

    /// Run one command line
    pub async fn execute(&mut self, line: &str) -> Result<Reply> {
        self.session.tick(Instant::now());

        let args = split_args(line);
        let Some((command, rest)) = args.split_first() else {
            return Ok(Reply::Print(String::new()));
        };
        let print = |s: String| -> Result<Reply> { Ok(Reply::Print(s)) };

        match (command.as_str(), rest) {
            ("help" | "?", _) => print(HELP.to_string()),
            ("quit" | "exit", _) => Ok(Reply::Quit),
            ("show", _) => print(number_lines(self.session.buffer())),
            ("load", [path]) => {
                let text = import_document(path).await?;
                self.session.load(text);
                print(format!("Loaded {}", path))
            }
            ("save", [path]) => {
                export_document(self.session.buffer(), path).await?;
                print(format!("Saved {}", path))
            }
            ("append", words) if !words.is_empty() => {
                let mut text = self.session.buffer().to_string();
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&words.join(" "));
                self.session.edit(text, Instant::now());
                print(String::new())
            }
            ("find", [term]) => {
                let options = self.flags.options(term)?;
                let outcome = self.session.search(&options, &mut self.notifier)?;
                self.searched.push(options.term().to_string());
                print(format_matches(&outcome, &options, self.palette))
            }
            ("near", [term1, term2, distance @ ..]) if distance.len() <= 1 => {
                let distance = distance
                    .first()
                    .map_or(self.proximity_distance, |raw| parse_distance(raw));
                let outcome = self.session.proximity(
                    term1,
                    term2,
                    distance,
                    self.flags.case_sensitive,
                    &mut self.notifier,
                )?;
                print(format_proximity(&outcome, self.palette))
            }
            ("replace", [term, replacement]) => {
                let options = self.flags.options(term)?;
                self.session.replace_all(&options, replacement, &mut self.notifier)?;
                self.searched.push(options.term().to_string());
                print(number_lines(self.session.buffer()))
            }
            ("next", [term, replacement]) => {
                let options = self.flags.options(term)?;
                self.session.replace_next(&options, replacement, &mut self.notifier)?;
                self.searched.push(options.term().to_string());
                print(number_lines(self.session.buffer()))
            }
            ("set", [flag, value]) => {
                let on = match value.as_str() {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    other => bail!("Expected on or off, got {}", other),
                };
                match flag.as_str() {
                    "case" => self.flags.case_sensitive = on,
                    "regex" => self.flags.regex = on,
                    "word" => self.flags.whole_word = on,
                    other => bail!("Unknown flag: {}", other),
                }
                print(format!(
                    "case={} regex={} word={}",
                    self.flags.case_sensitive, self.flags.regex, self.flags.whole_word
                ))
            }
            ("undo", []) => {
                let buffer = self.session.undo()?;
                print(number_lines(buffer))
            }
            ("redo", []) => {
                let buffer = self.session.redo()?;
                print(number_lines(buffer))
            }
            ("freq", []) => print(format_frequency(&self.session.word_frequency(DEFAULT_TOP_WORDS))),
            ("freq", [n]) => {
                let limit = n.parse().unwrap_or(DEFAULT_TOP_WORDS);
                print(format_frequency(&self.session.word_frequency(limit)))
            }
            ("suggest", [term]) => print(suggestions(term).join(", ")),
            _ => bail!("Unrecognised command; type help"),
        }
    }
}

/// Split a command line on whitespace, honouring double quotes
pub fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    args.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        args.push(current);
    }
    args
}

fn number_lines(buffer: &str) -> String {
    buffer
        .split('\n')
        .enumerate()
        .map(|(i, line)| format!("{:>4} | {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the shell on stdin/stdout until `quit` or end of input
pub async fn run(ctx: &mut RunContext, file: Option<&Path>) -> Result<()> {
    let text = match file {
        Some(path) => import_document(path).await?,
        None => String::new(),
    };
    let session = ctx.state.session(text);
    let mut shell = Shell::new(
        session,
        ctx.state.config(),
        ctx.palette,
        ConsoleNotifier::new(ctx.palette),
    );

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("Type help for commands.");

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match shell.execute(&line).await {
            Ok(Reply::Quit) => break,
            Ok(Reply::Print(out)) if out.is_empty() => {}
            Ok(Reply::Print(out)) => {
                stdout.write_all(out.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            // Session errors were already shown by the notifier
            Err(e) if e.downcast_ref::<EditError>().is_some() => {}
            Err(e) => eprintln!("error: {:#}", e),
        }
    }

    for term in shell.searched() {
        ctx.state.remember_term(term);
    }
    Ok(())
}
