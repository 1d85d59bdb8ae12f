//! Static synonym suggestions for a search term

const SYNONYMS: &[(&str, &[&str])] = &[
    ("good", &["great", "excellent", "fine"]),
    ("bad", &["poor", "terrible", "awful"]),
    ("happy", &["joyful", "cheerful", "glad"]),
    ("big", &["large", "huge", "vast"]),
    ("small", &["tiny", "little", "mini"]),
];

/// Alternative terms for `term`, or an empty slice when none are known
pub fn suggestions(term: &str) -> &'static [&'static str] {
    let key = term.trim().to_lowercase();
    SYNONYMS
        .iter()
        .find(|(word, _)| *word == key)
        .map(|(_, alternatives)| *alternatives)
        .unwrap_or(&[])
}
