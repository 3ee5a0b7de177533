//! Search palette session: ephemeral state for one open search interaction.

use fnv::FnvHashSet;
use navindex::{filter, SearchIndexEntry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::time::now_secs;

/// Why an open session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    Escape,
    Confirmed,
    OutsideClick,
    Teardown,
}

/// Direction of an arrow-key selection move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMove {
    Up,
    Down,
}

/// State for one open search interaction.
///
/// Created when the surface opens, dropped when it closes. The selection
/// index is re-clamped whenever the result set changes: any query mutation
/// resets it to the top synchronously, before the next key event is
/// processed, so the highlighted row is always valid for the current
/// results. Mouse hover and arrow keys share the one selection slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteSession {
    session_id: String,
    opened_at: u64,
    query: String,
    selected: usize,
    results: Vec<SearchIndexEntry>,
}

impl PaletteSession {
    /// Open a session over the given index. The initial result set is the
    /// preloaded list (blank query).
    pub fn open(index: &[SearchIndexEntry], preloaded_labels: &FnvHashSet<String>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            opened_at: now_secs(),
            query: String::new(),
            selected: 0,
            results: filter(index, "", preloaded_labels),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn opened_at(&self) -> u64 {
        self.opened_at
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn results(&self) -> &[SearchIndexEntry] {
        &self.results
    }

    /// Replace the query and recompute results. Selection resets to 0.
    pub fn set_query(
        &mut self,
        text: &str,
        index: &[SearchIndexEntry],
        preloaded_labels: &FnvHashSet<String>,
    ) {
        self.query = text.to_string();
        self.results = filter(index, text, preloaded_labels);
        self.selected = 0;
    }

    /// Move the selection with wraparound. No-op on an empty result set.
    pub fn move_selection(&mut self, direction: SelectionMove) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.selected = match direction {
            SelectionMove::Down => (self.selected + 1) % len,
            SelectionMove::Up => (self.selected + len - 1) % len,
        };
    }

    /// Hover over a result row. Out-of-range rows are ignored.
    pub fn hover(&mut self, row: usize) {
        if row < self.results.len() {
            self.selected = row;
        }
    }

    /// The entry a confirm would navigate to, if any.
    pub fn current(&self) -> Option<&SearchIndexEntry> {
        self.results.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navindex::{flatten, NavNode, NavSection};

    fn index() -> Vec<SearchIndexEntry> {
        flatten(&[NavSection::new(
            "Docs",
            vec![
                NavNode::link("Intro", "/intro"),
                NavNode::link("Setup", "/setup"),
                NavNode::link("Internals", "/internals"),
                NavNode::link("Caching", "/caching"),
            ],
        )])
    }

    fn preloaded() -> FnvHashSet<String> {
        ["Intro".to_string(), "Caching".to_string()].into_iter().collect()
    }

    #[test]
    fn opens_with_preloaded_results_and_top_selection() {
        let session = PaletteSession::open(&index(), &preloaded());
        assert_eq!(session.query(), "");
        assert_eq!(session.selected(), 0);
        let labels: Vec<&str> = session.results().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Intro", "Caching"]);
        assert!(!session.session_id().is_empty());
        assert!(session.opened_at() > 0);
    }

    #[test]
    fn full_arrow_down_cycle_returns_to_start() {
        let idx = index();
        let pre = FnvHashSet::default();
        let mut session = PaletteSession::open(&idx, &pre);
        session.set_query("in", &idx, &pre);
        let count = session.results().len();
        assert!(count > 1);

        session.hover(1);
        for _ in 0..count {
            session.move_selection(SelectionMove::Down);
        }
        assert_eq!(session.selected(), 1);
    }

    #[test]
    fn arrow_up_wraps_to_last() {
        let idx = index();
        let pre = FnvHashSet::default();
        let mut session = PaletteSession::open(&idx, &pre);
        session.set_query("s", &idx, &pre);
        assert_eq!(session.selected(), 0);

        session.move_selection(SelectionMove::Up);
        assert_eq!(session.selected(), session.results().len() - 1);
    }

    #[test]
    fn arrows_are_noops_on_empty_results() {
        let idx = index();
        let pre = FnvHashSet::default();
        let mut session = PaletteSession::open(&idx, &pre);
        session.set_query("zzz", &idx, &pre);
        assert!(session.results().is_empty());

        session.move_selection(SelectionMove::Down);
        session.move_selection(SelectionMove::Up);
        assert_eq!(session.selected(), 0);
        assert!(session.current().is_none());
    }

    #[test]
    fn query_change_resets_selection_before_next_event() {
        let idx = index();
        let pre = FnvHashSet::default();
        let mut session = PaletteSession::open(&idx, &pre);
        session.set_query("in", &idx, &pre);
        session.hover(2);
        assert_eq!(session.selected(), 2);

        // Narrowing the filter shrinks results below the old selection.
        session.set_query("intro", &idx, &pre);
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.selected(), 0);
        assert!(session.current().is_some());
    }

    #[test]
    fn hover_out_of_range_is_ignored() {
        let mut session = PaletteSession::open(&index(), &preloaded());
        session.hover(99);
        assert_eq!(session.selected(), 0);
    }

    #[test]
    fn current_follows_selection() {
        let idx = index();
        let pre = FnvHashSet::default();
        let mut session = PaletteSession::open(&idx, &pre);
        session.set_query("in", &idx, &pre);

        session.move_selection(SelectionMove::Down);
        let current = session.current().expect("selection");
        assert_eq!(current.label, session.results()[session.selected()].label);
    }

    #[test]
    fn session_snapshot_roundtrips_through_serde() {
        let idx = index();
        let pre = preloaded();
        let mut session = PaletteSession::open(&idx, &pre);
        session.set_query("cach", &idx, &pre);

        let json = serde_json::to_string(&session).expect("serialize");
        let back: PaletteSession = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.query(), "cach");
        assert_eq!(back.selected(), session.selected());
        assert_eq!(back.results().len(), session.results().len());
    }
}
