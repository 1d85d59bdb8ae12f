//! Terminal rendering of results and notifications

use edit_engine::{NotificationKind, Notifier, ProximityOutcome, SearchOutcome};
use search_engine::{
    highlight_proximity, render_highlighted, HighlightTag, SearchOptions, WordFrequency,
};

const MATCH: &str = "\x1b[1;33m";
const TERM1: &str = "\x1b[1;36m";
const TERM2: &str = "\x1b[1;35m";
const ERROR: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// ANSI markers, or none when colour is off
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn markers(&self, tag: HighlightTag) -> (&'static str, &'static str) {
        if !self.color {
            return ("", "");
        }
        match tag {
            HighlightTag::Match => (MATCH, RESET),
            HighlightTag::Term1 => (TERM1, RESET),
            HighlightTag::Term2 => (TERM2, RESET),
        }
    }

    fn error(&self, message: &str) -> String {
        if self.color {
            format!("{}{}{}", ERROR, message, RESET)
        } else {
            message.to_string()
        }
    }
}

/// Notifier writing to stderr
pub struct ConsoleNotifier {
    palette: Palette,
}

impl ConsoleNotifier {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Info => eprintln!("{}", message),
            NotificationKind::Error => eprintln!("{}", self.palette.error(message)),
        }
    }
}

pub fn format_matches(outcome: &SearchOutcome, options: &SearchOptions, palette: Palette) -> String {
    let (open, close) = palette.markers(HighlightTag::Match);
    let mut out = String::new();
    for record in &outcome.matches {
        out.push_str(&format!(
            "Line {}: {}\n",
            record.line_number,
            render_highlighted(&record.content, options, open, close)
        ));
    }
    out.push_str(&outcome.stats.to_string());
    out
}

pub fn format_proximity(outcome: &ProximityOutcome, palette: Palette) -> String {
    let mut out = String::new();
    for record in &outcome.matches {
        let snippet = highlight_proximity(record).render_with(|tag| palette.markers(tag));
        out.push_str(&format!("Line {}: ...{}...\n", record.line_number, snippet));
    }
    out.push_str(&outcome.stats.to_string());
    out
}

pub fn format_frequency(words: &[WordFrequency]) -> String {
    let width = words.iter().map(|w| w.word.chars().count()).max().unwrap_or(0);
    words
        .iter()
        .map(|w| format!("{:<width$}  {}", w.word, w.count, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edit_engine::{RecordingNotifier, SearchSession};

    #[test]
    fn test_matches_without_color() {
        let session = SearchSession::new("a cat\nno\nthe cat sat");
        let options = SearchOptions::new("cat").unwrap();
        let outcome = session.search(&options, &mut RecordingNotifier::new()).unwrap();

        let text = format_matches(&outcome, &options, Palette::new(false));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Line 1: a cat");
        assert_eq!(lines[1], "Line 3: the cat sat");
        assert!(lines[2].starts_with("Words: 6 | Matches: 2 | Time: "));
    }

    #[test]
    fn test_matches_with_color() {
        let session = SearchSession::new("a cat");
        let options = SearchOptions::new("cat").unwrap();
        let outcome = session.search(&options, &mut RecordingNotifier::new()).unwrap();

        let text = format_matches(&outcome, &options, Palette::new(true));
        assert!(text.starts_with("Line 1: a \x1b[1;33mcat\x1b[0m\n"));
    }

    #[test]
    fn test_proximity_markers() {
        let session = SearchSession::new("alpha and beta");
        let outcome = session
            .proximity("alpha", "beta", 5, false, &mut RecordingNotifier::new())
            .unwrap();

        let text = format_proximity(&outcome, Palette::new(true));
        assert!(text.starts_with(
            "Line 1: ...\x1b[1;36malpha\x1b[0m and \x1b[1;35mbeta\x1b[0m...\n"
        ));
    }

    #[test]
    fn test_frequency_alignment() {
        let words = vec![
            WordFrequency { word: "the".to_string(), count: 3 },
            WordFrequency { word: "a".to_string(), count: 1 },
        ];
        assert_eq!(format_frequency(&words), "the  3\na    1");
    }
}
