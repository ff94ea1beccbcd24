use super::{LocationChange, LocationProvider};
use crate::error::LocationError;

/// One entry in a [`MemoryHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub href: String,
    /// The state stored with the entry; `None` for the starting entry.
    pub state: Option<String>,
}

/// An in-memory location and history stack, for tests and non-browser hosts.
///
/// Pushing drops any entries ahead of the cursor, the same way a browser
/// discards forward history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
    pushes: usize,
}

impl MemoryHistory {
    /// Creates a history whose only entry is `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                href: href.into(),
                state: None,
            }],
            index: 0,
            pushes: 0,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_entry(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    /// How many entries have been pushed since creation.
    pub fn push_count(&self) -> usize {
        self.pushes
    }

    /// Moves one entry back. Returns `false` at the first entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves one entry forward. Returns `false` at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl LocationProvider for MemoryHistory {
    fn current(&self) -> Result<String, LocationError> {
        Ok(self.current_entry().href.clone())
    }

    fn complete_navigation(
        &mut self,
        loc: &LocationChange,
    ) -> Result<(), LocationError> {
        let entry = HistoryEntry {
            href: loc.value.clone(),
            state: Some(loc.state.clone()),
        };
        if loc.replace {
            self.entries[self.index] = entry;
        } else {
            self.entries.truncate(self.index + 1);
            self.entries.push(entry);
            self.index += 1;
            self.pushes += 1;
        }
        Ok(())
    }
}
