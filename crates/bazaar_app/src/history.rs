/// In-process stand-in for the browser address bar and its history stack.
///
/// The discipline matches the page: the initial load and clamp corrections
/// replace the current entry, user-driven changes push a new one, and a push
/// discards anything ahead of the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBar {
    entries: Vec<String>,
    index: usize,
}

impl Default for AddressBar {
    fn default() -> Self {
        Self {
            entries: vec![String::new()],
            index: 0,
        }
    }
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The query string of the current entry (empty for the default view).
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Rewrite the current entry without growing the history.
    pub fn replace(&mut self, query: String) {
        self.entries[self.index] = query;
    }

    /// Append a new entry, discarding any forward entries.
    pub fn push(&mut self, query: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(query);
        self.index += 1;
    }

    /// Step back one entry; returns the query string to restore.
    pub fn back(&mut self) -> Option<String> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    /// Step forward one entry; returns the query string to restore.
    pub fn forward(&mut self) -> Option<String> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].clone())
    }
}
