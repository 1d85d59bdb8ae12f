//! Undo/redo history of buffer snapshots

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_DEPTH: usize = 20;

/// Bounded list of buffer snapshots with a movable current position.
///
/// Pushing after an undo drops the redo branch; pushing past capacity
/// evicts the oldest snapshot.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    /// Snapshots, oldest first
    entries: Vec<String>,
    /// Index of the snapshot the buffer currently reflects
    current: Option<usize>,
    /// Maximum number of snapshots
    capacity: usize,
}

impl HistoryStore {
    /// Create a history with the default depth
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_DEPTH)
    }

    /// Create a history holding at most `capacity` snapshots (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            capacity: capacity.max(1),
        }
    }

    /// Record a snapshot as the new current state
    pub fn push(&mut self, snapshot: impl Into<String>) {
        let keep = self.current.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot.into());

        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            self.entries.drain(..overflow);
        }
        self.current = Some(self.entries.len() - 1);
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> Option<&str> {
        match self.current {
            Some(i) if i > 0 => {
                self.current = Some(i - 1);
                Some(&self.entries[i - 1])
            }
            _ => None,
        }
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> Option<&str> {
        match self.current {
            Some(i) if i + 1 < self.entries.len() => {
                self.current = Some(i + 1);
                Some(&self.entries[i + 1])
            }
            _ => None,
        }
    }

    /// The snapshot at the current position
    pub fn current(&self) -> Option<&str> {
        self.current.map(|i| self.entries[i].as_str())
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.current, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.current, Some(i) if i + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots oldest first
    pub fn snapshots(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
