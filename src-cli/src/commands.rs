//! One-shot subcommands

use crate::cli::{resolve_flag, Cli, Command, InputArgs, PatternArgs};
use crate::output::{
    format_frequency, format_matches, format_proximity, print_json, ConsoleNotifier, Palette,
};
use crate::shell;
use crate::state::{resolve_data_dir, AppState};
use anyhow::{Context, Result};
use search_engine::{parse_distance, positive_distance, suggestions, SearchOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};
use store::{
    default_export_name, export_document, import_document, AppSettings, DocumentFormat, Theme,
};
use tokio::io::AsyncReadExt;

/// Everything a subcommand needs besides its own arguments
pub struct RunContext {
    pub state: AppState,
    pub palette: Palette,
    pub json: bool,
}

impl RunContext {
    fn notifier(&self) -> ConsoleNotifier {
        ConsoleNotifier::new(self.palette)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let state = AppState::open(resolve_data_dir(cli.data_dir))?;
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let mut ctx = RunContext {
        state,
        palette: Palette::new(color),
        json: cli.json,
    };

    match cli.command {
        Command::Search { pattern, input } => search(&mut ctx, &pattern, &input).await,
        Command::Near {
            term1,
            term2,
            distance,
            case_sensitive,
            no_case_sensitive,
            input,
        } => {
            let case_sensitive = resolve_flag(
                case_sensitive,
                no_case_sensitive,
                ctx.state.config().search.case_sensitive,
            );
            near(&ctx, &term1, &term2, distance.as_deref(), case_sensitive, &input).await
        }
        Command::Replace {
            pattern,
            replacement,
            next,
            output,
            input,
        } => replace(&mut ctx, &pattern, &replacement, next, output.as_deref(), &input).await,
        Command::Freq { limit, input } => freq(&ctx, limit, &input).await,
        Command::Suggest { term } => suggest(&ctx, &term),
        Command::History { clear } => history(&mut ctx, clear),
        Command::Convert {
            input,
            output,
            format,
        } => convert(&input, output, &format).await,
        Command::Settings { theme, reset } => settings(&mut ctx, theme.as_deref(), reset),
        Command::Shell { file } => shell::run(&mut ctx, file.as_deref()).await,
    }
}

/// Build search options from flags, falling back to the saved defaults
pub fn search_options(args: &PatternArgs, defaults: &AppSettings) -> Result<SearchOptions> {
    let search = &defaults.search;
    Ok(SearchOptions::new(&args.term)?
        .case_sensitive(resolve_flag(
            args.case_sensitive,
            args.no_case_sensitive,
            search.case_sensitive,
        ))
        .regex(resolve_flag(args.regex, args.no_regex, search.regex_enabled))
        .whole_word(resolve_flag(args.whole_word, args.no_whole_word, search.whole_word)))
}

/// Read the input text from `--text`, a document, or stdin
pub async fn read_input(input: &InputArgs) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(path) = &input.file {
        return import_document(path)
            .await
            .with_context(|| format!("Failed to import {}", path.display()));
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;
    Ok(text)
}

async fn search(ctx: &mut RunContext, args: &PatternArgs, input: &InputArgs) -> Result<()> {
    let options = search_options(args, ctx.state.config())?;
    let session = ctx.state.session(read_input(input).await?);

    let outcome = session.search(&options, &mut ctx.notifier())?;
    ctx.state.remember_term(options.term());

    if ctx.json {
        print_json(&outcome)
    } else {
        println!("{}", format_matches(&outcome, &options, ctx.palette));
        Ok(())
    }
}

async fn near(
    ctx: &RunContext,
    term1: &str,
    term2: &str,
    distance: Option<&str>,
    case_sensitive: bool,
    input: &InputArgs,
) -> Result<()> {
    let distance = match distance {
        Some(raw) => parse_distance(raw),
        None => positive_distance(ctx.state.config().search.proximity_distance),
    };
    let session = ctx.state.session(read_input(input).await?);

    let outcome = session.proximity(term1, term2, distance, case_sensitive, &mut ctx.notifier())?;

    if ctx.json {
        print_json(&outcome)
    } else {
        println!("{}", format_proximity(&outcome, ctx.palette));
        Ok(())
    }
}

async fn replace(
    ctx: &mut RunContext,
    args: &PatternArgs,
    replacement: &str,
    next: bool,
    output: Option<&Path>,
    input: &InputArgs,
) -> Result<()> {
    let options = search_options(args, ctx.state.config())?;
    let mut session = ctx.state.session(read_input(input).await?);
    let mut notifier = ctx.notifier();

    let result = if next {
        session.replace_next(&options, replacement, &mut notifier)?
    } else {
        session.replace_all(&options, replacement, &mut notifier)?
    };
    ctx.state.remember_term(options.term());

    match output {
        Some(path) => {
            export_document(session.buffer(), path)
                .await
                .with_context(|| format!("Failed to export {}", path.display()))?;
            if ctx.json {
                print_json(&ReplaceReport {
                    occurrences_replaced: result.occurrences_replaced,
                    output: Some(path),
                })?;
            }
        }
        None if ctx.json => print_json(&result)?,
        None => print!("{}", session.buffer()),
    }
    Ok(())
}

#[derive(Serialize)]
struct ReplaceReport<'a> {
    occurrences_replaced: usize,
    output: Option<&'a Path>,
}

async fn freq(ctx: &RunContext, limit: usize, input: &InputArgs) -> Result<()> {
    let session = ctx.state.session(read_input(input).await?);
    let words = session.word_frequency(limit);

    if ctx.json {
        print_json(&words)
    } else {
        println!("{}", format_frequency(&words));
        Ok(())
    }
}

fn suggest(ctx: &RunContext, term: &str) -> Result<()> {
    let found = suggestions(term);
    if ctx.json {
        return print_json(&found);
    }
    if found.is_empty() {
        eprintln!("No suggestions for \"{}\".", term.trim());
    } else {
        println!("{}", found.join(", "));
    }
    Ok(())
}

fn history(ctx: &mut RunContext, clear: bool) -> Result<()> {
    if clear {
        ctx.state.history.clear()?;
        return Ok(());
    }
    let terms = ctx.state.history.terms()?;
    if ctx.json {
        print_json(&terms)
    } else {
        for term in terms {
            println!("{}", term);
        }
        Ok(())
    }
}

async fn convert(input: &Path, output: Option<PathBuf>, format: &str) -> Result<()> {
    let output = match output {
        Some(path) => path,
        None => PathBuf::from(default_export_name(format.parse::<DocumentFormat>()?)),
    };

    let text = import_document(input)
        .await
        .with_context(|| format!("Failed to import {}", input.display()))?;
    export_document(&text, &output)
        .await
        .with_context(|| format!("Failed to export {}", output.display()))?;

    eprintln!("Wrote {}", output.display());
    Ok(())
}

fn settings(ctx: &mut RunContext, theme: Option<&str>, reset: bool) -> Result<()> {
    if reset {
        ctx.state.settings.reset_sync()?;
    }
    if let Some(theme) = theme {
        let mut updated = ctx.state.config().clone();
        updated.general.theme = parse_theme(theme, updated.general.theme)?;
        ctx.state.settings.update_sync(updated)?;
    }

    if ctx.json {
        print_json(ctx.state.config())
    } else {
        println!("# {}", ctx.state.settings.settings_path().display());
        println!("{}", serde_json::to_string_pretty(ctx.state.config())?);
        Ok(())
    }
}

fn parse_theme(raw: &str, current: Theme) -> Result<Theme> {
    match raw.to_ascii_lowercase().as_str() {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        "blue" => Ok(Theme::Blue),
        "toggle" => Ok(current.toggled()),
        other => anyhow::bail!("Unknown theme: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(term: &str) -> PatternArgs {
        PatternArgs {
            term: term.to_string(),
            case_sensitive: false,
            no_case_sensitive: false,
            regex: false,
            no_regex: false,
            whole_word: false,
            no_whole_word: false,
        }
    }

    #[test]
    fn test_off_flags_override_saved_defaults() {
        let mut defaults = AppSettings::default();
        defaults.search.case_sensitive = true;
        defaults.search.regex_enabled = true;
        defaults.search.whole_word = true;

        let args = PatternArgs {
            no_case_sensitive: true,
            no_regex: true,
            no_whole_word: true,
            ..pattern("a.b")
        };
        let options = search_options(&args, &defaults).unwrap();
        assert!(!options.case_sensitive);
        assert!(!options.regex_enabled);
        assert!(!options.whole_word);
    }

    #[test]
    fn test_saved_defaults_apply() {
        let mut defaults = AppSettings::default();
        defaults.search.whole_word = true;

        let options = search_options(&pattern("cat"), &defaults).unwrap();
        assert!(options.whole_word);
        assert!(!options.case_sensitive);
    }

    #[test]
    fn test_blank_term_rejected() {
        let err = search_options(&pattern("   "), &AppSettings::default()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a search term.");
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme("Dark", Theme::Light).unwrap(), Theme::Dark);
        assert_eq!(parse_theme("toggle", Theme::Dark).unwrap(), Theme::Light);
        assert!(parse_theme("purple", Theme::Light).is_err());
    }

    #[tokio::test]
    async fn test_read_input_prefers_text() {
        let input = InputArgs {
            file: None,
            text: Some("inline".to_string()),
        };
        assert_eq!(read_input(&input).await.unwrap(), "inline");
    }

    #[tokio::test]
    async fn test_read_input_imports_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("in.csv");
        std::fs::write(&path, "a,b\nc,d").unwrap();

        let input = InputArgs {
            file: Some(path),
            text: None,
        };
        assert_eq!(read_input(&input).await.unwrap(), "a b\nc d");
    }
}
