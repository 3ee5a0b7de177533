//! Scroll-spy: maps the scroll position to the active page anchor.

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

/// Default lookahead margin, in scroll units. Compensates for a sticky
/// header so a section reads as active slightly before it reaches the very
/// top of the viewport.
pub const DEFAULT_LOOKAHEAD_MARGIN: f64 = 88.0;

/// A scroll target on the page: a heading id with its measured vertical
/// offset and heading level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: String,
    pub level: u8,
    pub offset: f64,
}

impl Anchor {
    pub fn new(id: &str, level: u8, offset: f64) -> Self {
        Self {
            id: id.to_string(),
            level,
            offset,
        }
    }
}

/// An active-anchor transition produced by a recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChange {
    pub previous: Option<String>,
    pub current: Option<String>,
}

/// Tracks which anchor is currently active for one page.
///
/// The computation is O(anchors) and writes nothing but the final active
/// id, so it is safe to run on every scroll event; a dropped intermediate
/// event only costs an intermediate value nobody observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollSpy {
    anchors: Vec<Anchor>,
    lookahead_margin: f64,
    active: Option<String>,
}

impl ScrollSpy {
    pub fn new(lookahead_margin: f64) -> Self {
        Self {
            anchors: Vec::new(),
            lookahead_margin,
            active: None,
        }
    }

    /// Install the page's anchors and compute the initial active anchor, so
    /// the first render reflects the current scroll position rather than
    /// defaulting to none. Duplicate ids keep the first occurrence.
    pub fn attach(&mut self, anchors: Vec<Anchor>, scroll_y: f64) -> Option<ActiveChange> {
        let mut seen: FnvHashSet<String> = FnvHashSet::default();
        let mut installed = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            if seen.insert(anchor.id.clone()) {
                installed.push(anchor);
            } else {
                tracing::warn!("duplicate anchor id '{}' ignored", anchor.id);
            }
        }
        self.anchors = installed;
        self.recompute(scroll_y)
    }

    /// Remove all anchors. The next page attaches its own set.
    pub fn detach(&mut self) -> Option<ActiveChange> {
        self.anchors.clear();
        self.set_active(None)
    }

    /// Recompute the active anchor for a scroll position.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<ActiveChange> {
        self.recompute(scroll_y)
    }

    /// Optimistically mark a clicked anchor active, ahead of the
    /// scroll-derived recomputation that follows the scroll animation.
    /// Unknown ids are a no-op.
    pub fn activate(&mut self, anchor_id: &str) -> Option<ActiveChange> {
        if self.anchor(anchor_id).is_none() {
            return None;
        }
        self.set_active(Some(anchor_id.to_string()))
    }

    pub fn anchor(&self, anchor_id: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|anchor| anchor.id == anchor_id)
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn lookahead_margin(&self) -> f64 {
        self.lookahead_margin
    }

    /// The active anchor is the last one (in document order) whose offset
    /// does not exceed `scroll_y + lookahead_margin`; scanning in reverse
    /// finds it first. Above the first anchor nothing is active.
    fn recompute(&mut self, scroll_y: f64) -> Option<ActiveChange> {
        let effective_position = scroll_y + self.lookahead_margin;
        let current = self
            .anchors
            .iter()
            .rev()
            .find(|anchor| anchor.offset <= effective_position)
            .map(|anchor| anchor.id.clone());
        self.set_active(current)
    }

    fn set_active(&mut self, current: Option<String>) -> Option<ActiveChange> {
        if current == self.active {
            return None;
        }
        let previous = self.active.take();
        self.active = current.clone();
        Some(ActiveChange { previous, current })
    }
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD_MARGIN)
    }
}
