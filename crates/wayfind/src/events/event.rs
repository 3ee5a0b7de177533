//! Canonical event types for the engine's event stream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gesture::Corner;
use crate::palette::CloseReason;
use crate::util::time::now_secs;

/// A canonical event in the engine's stream.
///
/// Each event carries a unique ID and a unix-seconds timestamp. Events mark
/// state-transition boundaries only; intermediate keystrokes and scroll
/// samples that change nothing never produce one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// The search surface opened.
    PaletteOpened {
        id: Uuid,
        timestamp: u64,
        session_id: String,
    },
    /// The search surface closed.
    PaletteClosed {
        id: Uuid,
        timestamp: u64,
        session_id: String,
        reason: CloseReason,
    },
    /// A selection was confirmed and the host should navigate.
    NavigationRequested {
        id: Uuid,
        timestamp: u64,
        href: String,
    },
    /// The scroll-spy's active anchor changed.
    ActiveAnchorChanged {
        id: Uuid,
        timestamp: u64,
        previous: Option<String>,
        current: Option<String>,
    },
    /// The location fragment was replaced after a TOC click.
    FragmentReplaced {
        id: Uuid,
        timestamp: u64,
        anchor_id: String,
    },
    /// The dock button snapped to a corner at gesture end.
    DockSnapped {
        id: Uuid,
        timestamp: u64,
        corner: Corner,
    },
}

impl Event {
    pub fn palette_opened(session_id: &str) -> Self {
        Event::PaletteOpened {
            id: Uuid::new_v4(),
            timestamp: now_secs(),
            session_id: session_id.to_string(),
        }
    }

    pub fn palette_closed(session_id: &str, reason: CloseReason) -> Self {
        Event::PaletteClosed {
            id: Uuid::new_v4(),
            timestamp: now_secs(),
            session_id: session_id.to_string(),
            reason,
        }
    }

    pub fn navigation_requested(href: &str) -> Self {
        Event::NavigationRequested {
            id: Uuid::new_v4(),
            timestamp: now_secs(),
            href: href.to_string(),
        }
    }

    pub fn active_anchor_changed(previous: Option<String>, current: Option<String>) -> Self {
        Event::ActiveAnchorChanged {
            id: Uuid::new_v4(),
            timestamp: now_secs(),
            previous,
            current,
        }
    }

    pub fn fragment_replaced(anchor_id: &str) -> Self {
        Event::FragmentReplaced {
            id: Uuid::new_v4(),
            timestamp: now_secs(),
            anchor_id: anchor_id.to_string(),
        }
    }

    pub fn dock_snapped(corner: Corner) -> Self {
        Event::DockSnapped {
            id: Uuid::new_v4(),
            timestamp: now_secs(),
            corner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_stamped() {
        let event = Event::palette_opened("sess-1");
        match event {
            Event::PaletteOpened {
                id,
                timestamp,
                session_id,
            } => {
                assert!(!id.is_nil());
                assert!(timestamp > 0);
                assert_eq!(session_id, "sess-1");
            }
            _ => panic!("expected PaletteOpened"),
        }
    }

    #[test]
    fn event_roundtrips_through_serde() {
        let event = Event::active_anchor_changed(Some("intro".to_string()), None);
        let json = serde_json::to_string(&event).expect("serialize");
        let back: Event = serde_json::from_str(&json).expect("deserialize");
        match back {
            Event::ActiveAnchorChanged {
                previous, current, ..
            } => {
                assert_eq!(previous.as_deref(), Some("intro"));
                assert_eq!(current, None);
            }
            _ => panic!("expected ActiveAnchorChanged"),
        }
    }
}
