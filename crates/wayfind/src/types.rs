use serde::{Deserialize, Serialize};

/// A host-facing side effect, produced only at state-transition boundaries.
///
/// The engine never performs navigation, scrolling, or history mutation
/// itself; it hands the host at most one navigation per confirmed selection
/// or TOC click and lets the host's router/scroller act.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Navigate to a routable target.
    Navigate { href: String },
    /// Smooth-scroll the page to an anchor's vertical offset.
    ScrollTo { anchor_id: String, offset: f64 },
    /// Replace the location fragment with `#<anchor_id>`, without a
    /// history-stack push.
    ReplaceFragment { anchor_id: String },
}
