//! Search session
//!
//! Owns the text buffer and its undo history, and runs one complete
//! compile → match → report cycle per user action. Failures are reported
//! through a [`Notifier`] as well as returned, so the caller decides how
//! loudly to surface them.

use crate::{Debouncer, EditError, HistoryStore, NotificationKind, Notifier, Result, EDIT_DEBOUNCE};
use search_engine::{
    compile, find_line_matches, find_proximity, replace_all, replace_next, word_frequency,
    EmptyInput, MatchRecord, ProximityMatchRecord, ReplacementResult, SearchError, SearchOptions,
    SearchStats, WordFrequency,
};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Lines matched by a search plus status-line figures
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub matches: Vec<MatchRecord>,
    pub stats: SearchStats,
}

/// Proximity pairs plus status-line figures
#[derive(Debug, Clone, Serialize)]
pub struct ProximityOutcome {
    pub matches: Vec<ProximityMatchRecord>,
    pub stats: SearchStats,
}

/// Where the next "replace next" continues from
#[derive(Debug, Clone)]
struct ReplaceCursor {
    options: SearchOptions,
    replacement: String,
    offset: usize,
}

/// Buffer, history and replace position for one document
pub struct SearchSession {
    buffer: String,
    history: HistoryStore,
    cursor: Option<ReplaceCursor>,
    edits: Debouncer<()>,
}

impl SearchSession {
    /// Start a session; the initial buffer is the first history snapshot
    pub fn new(buffer: impl Into<String>) -> Self {
        Self::with_limits(buffer, HistoryStore::new(), EDIT_DEBOUNCE)
    }

    /// Start a session with a specific history depth and edit window
    pub fn with_limits(buffer: impl Into<String>, mut history: HistoryStore, edit_delay: Duration) -> Self {
        let buffer = buffer.into();
        history.push(buffer.clone());
        Self {
            buffer,
            history,
            cursor: None,
            edits: Debouncer::new(edit_delay),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Replace the whole buffer (e.g. after an import) and snapshot it
    pub fn load(&mut self, text: impl Into<String>) {
        self.edits.cancel();
        self.buffer = text.into();
        self.cursor = None;
        self.history.push(self.buffer.clone());
        tracing::info!(bytes = self.buffer.len(), "buffer loaded");
    }

    /// Record a typed edit; the snapshot is taken once typing pauses
    pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
        self.buffer = text.into();
        self.cursor = None;
        self.edits.schedule((), now);
    }

    /// Snapshot a pending edit whose window has elapsed.
    ///
    /// Returns whether a snapshot was taken.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.edits.poll(now).is_some() {
            self.snapshot();
            return true;
        }
        false
    }

    /// Snapshot a pending edit immediately
    pub fn commit_edit(&mut self) -> bool {
        if self.edits.flush().is_some() {
            self.snapshot();
            return true;
        }
        false
    }

    fn snapshot(&mut self) {
        if self.history.current() != Some(self.buffer.as_str()) {
            self.history.push(self.buffer.clone());
        }
    }

    /// Find every line matching `options`
    pub fn search(&self, options: &SearchOptions, notifier: &mut dyn Notifier) -> Result<SearchOutcome> {
        let started = Instant::now();
        self.require_buffer(notifier)?;
        let pattern = compile(options).map_err(|e| report(notifier, e.into()))?;

        let matches = find_line_matches(&self.buffer, &pattern);
        if matches.is_empty() {
            notifier.notify(
                &format!("No matches found for \"{}\".", options.term()),
                NotificationKind::Info,
            );
        }

        let stats = SearchStats::new(&self.buffer, matches.len(), started.elapsed());
        tracing::debug!(term = options.term(), %stats, "search");
        Ok(SearchOutcome { matches, stats })
    }

    /// Find `term2` within `distance` tokens after `term1`
    pub fn proximity(
        &self,
        term1: &str,
        term2: &str,
        distance: usize,
        case_sensitive: bool,
        notifier: &mut dyn Notifier,
    ) -> Result<ProximityOutcome> {
        let started = Instant::now();
        let matches = find_proximity(&self.buffer, term1, term2, distance, case_sensitive)
            .map_err(|e| report(notifier, e))?;

        if matches.is_empty() {
            notifier.notify(
                &format!(
                    "No proximity matches found for \"{}\" and \"{}\" within {} words.",
                    term1.trim(),
                    term2.trim(),
                    distance
                ),
                NotificationKind::Info,
            );
        }

        let stats = SearchStats::new(&self.buffer, matches.len(), started.elapsed());
        Ok(ProximityOutcome { matches, stats })
    }

    /// Replace every occurrence; the new buffer is snapshotted if it changed
    pub fn replace_all(
        &mut self,
        options: &SearchOptions,
        replacement: &str,
        notifier: &mut dyn Notifier,
    ) -> Result<ReplacementResult> {
        self.require_buffer(notifier)?;
        let pattern = compile(options).map_err(|e| report(notifier, e.into()))?;

        self.commit_edit();
        let result = replace_all(&self.buffer, &pattern, replacement);
        if !result.found {
            notifier.notify(
                &format!("No matches found for \"{}\".", options.term()),
                NotificationKind::Info,
            );
        } else {
            notifier.notify(
                &format!("Replaced {} occurrence(s).", result.occurrences_replaced),
                NotificationKind::Info,
            );
            self.apply(&result.new_buffer);
        }
        Ok(result)
    }

    /// Replace the next occurrence after the previous replace-next.
    ///
    /// The position carries over only while the buffer, options and
    /// replacement stay the same; otherwise the scan restarts at the top.
    /// Running off the end reports "No more occurrences found." and resets
    /// the position.
    pub fn replace_next(
        &mut self,
        options: &SearchOptions,
        replacement: &str,
        notifier: &mut dyn Notifier,
    ) -> Result<ReplacementResult> {
        self.require_buffer(notifier)?;
        let pattern = compile(options).map_err(|e| report(notifier, e.into()))?;

        self.commit_edit();
        let from = match &self.cursor {
            Some(c) if &c.options == options && c.replacement == replacement => c.offset,
            _ => 0,
        };

        let result = replace_next(&self.buffer, &pattern, replacement, from);
        if result.found {
            self.apply(&result.new_buffer);
            self.cursor = Some(ReplaceCursor {
                options: options.clone(),
                replacement: replacement.to_string(),
                offset: result.next_offset,
            });
        } else {
            notifier.notify("No more occurrences found.", NotificationKind::Info);
            self.cursor = None;
        }
        Ok(result)
    }

    /// Restore the previous snapshot
    pub fn undo(&mut self) -> Result<&str> {
        self.commit_edit();
        let snapshot = self.history.undo().ok_or(EditError::UndoStackEmpty)?.to_string();
        self.buffer = snapshot;
        self.cursor = None;
        Ok(&self.buffer)
    }

    /// Re-apply the next snapshot
    pub fn redo(&mut self) -> Result<&str> {
        self.commit_edit();
        let snapshot = self.history.redo().ok_or(EditError::RedoStackEmpty)?.to_string();
        self.buffer = snapshot;
        self.cursor = None;
        Ok(&self.buffer)
    }

    pub fn can_undo(&self) -> bool {
        self.edits.is_pending() || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.edits.is_pending() && self.history.can_redo()
    }

    /// Most frequent words of the buffer
    pub fn word_frequency(&self, limit: usize) -> Vec<WordFrequency> {
        word_frequency(&self.buffer, limit)
    }

    fn apply(&mut self, new_buffer: &str) {
        if new_buffer != self.buffer {
            self.buffer = new_buffer.to_string();
            self.history.push(self.buffer.clone());
        }
    }

    fn require_buffer(&self, notifier: &mut dyn Notifier) -> Result<()> {
        if self.buffer.is_empty() {
            return Err(report(notifier, EmptyInput::Buffer.into()));
        }
        Ok(())
    }
}

fn report(notifier: &mut dyn Notifier, err: SearchError) -> EditError {
    notifier.notify(&err.to_string(), NotificationKind::Error);
    EditError::Search(err)
}
