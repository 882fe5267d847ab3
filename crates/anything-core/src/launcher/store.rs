//! Ordered results plus a wraparound selection index.

use crate::SearchResult;

/// Results in the order the search collaborator returned them.
///
/// `selected < results.len()` whenever the store is non-empty and
/// `selected == 0` when it is empty.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Vec<SearchResult>,
    selected: usize,
}

impl ResultStore {
    /// Replace the whole result set and select the first row.
    pub fn replace(&mut self, results: Vec<SearchResult>) {
        self.results = results;
        self.selected = 0;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Move the selection by `delta` rows, wrapping at both ends.
    /// Returns `false` (and does nothing) when the store is empty.
    // Lengths are far below isize::MAX and rem_euclid is non-negative
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn move_selection(&mut self, delta: isize) -> bool {
        let n = self.results.len();
        if n == 0 {
            return false;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(n as isize) as usize;
        true
    }

    /// Select row `index` directly. Out-of-range indices are ignored.
    pub fn set_selection(&mut self, index: usize) -> bool {
        if index >= self.results.len() {
            return false;
        }
        self.selected = index;
        true
    }

    #[must_use]
    pub fn current(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
