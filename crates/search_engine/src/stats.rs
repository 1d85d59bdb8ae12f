//! Word statistics for the status line and frequency panel

use regex_lite::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

/// Number of entries shown by the frequency panel
pub const DEFAULT_TOP_WORDS: usize = 10;

/// Figures reported after a search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchStats {
    pub words: usize,
    pub matches: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn new(buffer: &str, matches: usize, elapsed: Duration) -> Self {
        Self {
            words: word_count(buffer),
            matches,
            elapsed,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Words: {} | Matches: {} | Time: {:.2}ms",
            self.words,
            self.matches,
            self.elapsed_ms()
        )
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A word and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("static word pattern is valid"))
}

/// The `limit` most frequent words, lower-cased.
///
/// Words are runs of `[0-9A-Za-z_]`. Ties keep first-seen order.
pub fn word_frequency(text: &str, limit: usize) -> Vec<WordFrequency> {
    let lowered = text.to_lowercase();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WordFrequency> = Vec::new();

    for m in word_regex().find_iter(&lowered) {
        match index.get(m.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(m.as_str(), counts.len());
                counts.push(WordFrequency {
                    word: m.as_str().to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\n\tthree  "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_frequency_counts_case_insensitively() {
        let freq = word_frequency("The cat and the hat. THE end", 10);
        assert_eq!(freq[0], WordFrequency { word: "the".into(), count: 3 });
        assert_eq!(freq.len(), 5);
    }

    #[test]
    fn test_frequency_ties_keep_first_seen_order() {
        let freq = word_frequency("b a c a b", 10);
        let words: Vec<&str> = freq.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_frequency_limit() {
        let text = "a b c d e f g h i j k l";
        assert_eq!(word_frequency(text, DEFAULT_TOP_WORDS).len(), 10);
    }

    #[test]
    fn test_frequency_splits_on_punctuation() {
        let freq = word_frequency("don't stop-me", 10);
        let words: Vec<&str> = freq.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["don", "t", "stop", "me"]);
    }

    #[test]
    fn test_stats_display() {
        let stats = SearchStats::new("one two three", 2, Duration::from_micros(1500));
        assert_eq!(stats.to_string(), "Words: 3 | Matches: 2 | Time: 1.50ms");
    }
}
