use fnv::FnvHashSet;

use navindex::{flatten, sanitize, SearchIndexEntry};

use crate::bus::Bus;
use crate::config::NavigationConfig;
use crate::events::{Event, EventLog};
use crate::gesture::{Corner, DockState, DragGesture, DragOutcome, Point, Viewport};
use crate::keys::{Key, Modifiers, Shortcut};
use crate::listeners::{ListenerKind, ListenerRegistry, ListenerSet};
use crate::palette::{CloseReason, PaletteSession, SelectionMove};
use crate::scrollspy::{ActiveChange, Anchor, ScrollSpy};
use crate::types::Effect;

const EVENT_BUS_CAPACITY: usize = 64;

/// Viewport assumed until the host reports a real one via [`Engine::resize`].
const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

/// Primary facade for the navigation engine.
///
/// Owns the flattened index, the palette session slot, the scroll-spy, the
/// dock state, the event log, and the bus. Hosts interact only through this
/// struct; side effects come back as [`Effect`] values at state-transition
/// boundaries, never from intermediate keystrokes or scroll samples.
pub struct Engine {
    index: Vec<SearchIndexEntry>,
    preloaded: FnvHashSet<String>,
    shortcut: Shortcut,
    palette: Option<PaletteSession>,
    palette_guards: ListenerSet,
    spy: ScrollSpy,
    spy_guards: ListenerSet,
    dock: DockState,
    drag: Option<DragGesture>,
    viewport: Viewport,
    listeners: ListenerRegistry,
    log: EventLog,
    bus: Bus,
}

impl Engine {
    /// Build an engine from a navigation configuration.
    ///
    /// The tree is sanitized and flattened once; it is read-only for the
    /// life of the engine. Preloaded labels that match no index entry are
    /// reported here, since they would otherwise silently vanish from the
    /// empty-query list.
    pub fn build(config: NavigationConfig) -> Self {
        let tree = sanitize(config.tree);
        let index = flatten(&tree);

        let known: FnvHashSet<&str> = index.iter().map(|entry| entry.label.as_str()).collect();
        for label in &config.palette.preloaded_labels {
            if !known.contains(label.as_str()) {
                tracing::warn!("preloaded label '{label}' matches no index entry");
            }
        }
        let preloaded: FnvHashSet<String> =
            config.palette.preloaded_labels.into_iter().collect();

        tracing::info!("engine built with {} index entries", index.len());
        Engine {
            index,
            preloaded,
            shortcut: config.palette.shortcut,
            palette: None,
            palette_guards: ListenerSet::new(),
            spy: ScrollSpy::new(config.scrollspy.lookahead_margin),
            spy_guards: ListenerSet::new(),
            dock: DockState::new(config.dock.corner, config.dock.snap_margin, DEFAULT_VIEWPORT),
            drag: None,
            viewport: DEFAULT_VIEWPORT,
            listeners: ListenerRegistry::new(),
            log: EventLog::new(),
            bus: Bus::new(EVENT_BUS_CAPACITY),
        }
    }

    // -----------------------------------------------------------------
    // Search palette
    // -----------------------------------------------------------------

    /// Route a keydown. While closed, only the open shortcut does anything.
    /// While open, Escape closes, Enter confirms, arrows move the selection;
    /// printable keys are the host input field's business and are ignored
    /// here. Enter with no results does nothing; there is nothing to
    /// confirm, and the surface stays open showing its empty state.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Option<Effect> {
        if self.palette.is_none() {
            if self.shortcut.matches(key, modifiers) {
                self.open_palette();
            }
            return None;
        }
        match key {
            Key::Escape => {
                self.close_palette(CloseReason::Escape);
                None
            }
            Key::Enter => self.confirm_selection(),
            Key::ArrowDown => {
                if let Some(session) = self.palette.as_mut() {
                    session.move_selection(SelectionMove::Down);
                }
                None
            }
            Key::ArrowUp => {
                if let Some(session) = self.palette.as_mut() {
                    session.move_selection(SelectionMove::Up);
                }
                None
            }
            Key::Char(_) => None,
        }
    }

    /// Open the search surface. No-op if already open.
    pub fn open_palette(&mut self) {
        if self.palette.is_some() {
            return;
        }
        let session = PaletteSession::open(&self.index, &self.preloaded);
        tracing::info!("palette opened (session {})", session.session_id());
        self.record(Event::palette_opened(session.session_id()));
        self.palette_guards
            .acquire(&self.listeners, ListenerKind::Keydown);
        self.palette_guards
            .acquire(&self.listeners, ListenerKind::OutsideClick);
        self.palette = Some(session);
    }

    /// Close the search surface, releasing its listeners. No-op if closed.
    pub fn close_palette(&mut self, reason: CloseReason) {
        let Some(session) = self.palette.take() else {
            return;
        };
        self.palette_guards.release_all();
        tracing::info!(
            "palette closed (session {}, {reason:?})",
            session.session_id()
        );
        self.record(Event::palette_closed(session.session_id(), reason));
    }

    /// Replace the palette query with the input field's current text.
    pub fn palette_input(&mut self, text: &str) {
        if let Some(session) = self.palette.as_mut() {
            session.set_query(text, &self.index, &self.preloaded);
        }
    }

    /// Hover over a result row.
    pub fn palette_hover(&mut self, row: usize) {
        if let Some(session) = self.palette.as_mut() {
            session.hover(row);
        }
    }

    /// A click landed outside both the trigger and the results panel.
    pub fn outside_click(&mut self) {
        self.close_palette(CloseReason::OutsideClick);
    }

    fn confirm_selection(&mut self) -> Option<Effect> {
        let href = self
            .palette
            .as_ref()
            .and_then(|session| session.current())
            .map(|entry| entry.href.clone())?;
        self.record(Event::navigation_requested(&href));
        self.close_palette(CloseReason::Confirmed);
        Some(Effect::Navigate { href })
    }

    // -----------------------------------------------------------------
    // Scroll-spy
    // -----------------------------------------------------------------

    /// Install the current page's anchors and compute the initial active
    /// anchor from the current scroll position.
    pub fn attach_anchors(&mut self, anchors: Vec<Anchor>, scroll_y: f64) {
        self.spy_guards.acquire(&self.listeners, ListenerKind::Scroll);
        self.spy_guards.acquire(&self.listeners, ListenerKind::Resize);
        let change = self.spy.attach(anchors, scroll_y);
        self.record_anchor_change(change);
    }

    /// Tear down the page's anchors and release the scroll listeners.
    pub fn detach_anchors(&mut self) {
        self.spy_guards.release_all();
        let change = self.spy.detach();
        self.record_anchor_change(change);
    }

    /// Feed a scroll sample. Safe to call on every event.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        let change = self.spy.on_scroll(scroll_y);
        self.record_anchor_change(change);
    }

    /// A table-of-contents entry was clicked. The clicked anchor becomes
    /// active immediately, ahead of the scroll animation, and the host gets
    /// a scroll plus a fragment replacement. Unknown ids are a no-op.
    pub fn toc_click(&mut self, anchor_id: &str) -> Vec<Effect> {
        let Some((id, offset)) = self
            .spy
            .anchor(anchor_id)
            .map(|anchor| (anchor.id.clone(), anchor.offset))
        else {
            tracing::debug!("toc click on unknown anchor '{anchor_id}'");
            return Vec::new();
        };
        let change = self.spy.activate(&id);
        self.record_anchor_change(change);
        self.record(Event::fragment_replaced(&id));
        vec![
            Effect::ScrollTo {
                anchor_id: id.clone(),
                offset,
            },
            Effect::ReplaceFragment { anchor_id: id },
        ]
    }

    fn record_anchor_change(&mut self, change: Option<ActiveChange>) {
        if let Some(change) = change {
            self.record(Event::active_anchor_changed(change.previous, change.current));
        }
    }

    // -----------------------------------------------------------------
    // Viewport and dock
    // -----------------------------------------------------------------

    /// The host viewport changed. The dock re-clamps to its corner.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.dock.resize(viewport);
    }

    /// Begin a dock drag. A second pointer-down during a gesture is ignored.
    pub fn dock_drag_begin(&mut self, pointer: Point) {
        if self.drag.is_some() {
            return;
        }
        self.drag = Some(DragGesture::begin(self.dock.resting(), pointer));
    }

    /// Fast-path transient position for the host to render mid-drag.
    /// Canonical dock state is untouched until the gesture finishes.
    pub fn dock_drag_update(&mut self, pointer: Point) -> Option<Point> {
        self.drag.as_mut().map(|gesture| gesture.update(pointer))
    }

    /// End the gesture: snap to the nearest corner and reconcile, or treat
    /// the release as a tap when the pointer barely moved.
    pub fn dock_drag_finish(&mut self) -> Option<Corner> {
        let gesture = self.drag.take()?;
        match gesture.finish(&mut self.dock, self.viewport) {
            DragOutcome::Snapped(corner) => {
                self.record(Event::dock_snapped(corner));
                Some(corner)
            }
            DragOutcome::Tap => None,
        }
    }

    // -----------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------

    pub fn index(&self) -> &[SearchIndexEntry] {
        &self.index
    }

    pub fn palette(&self) -> Option<&PaletteSession> {
        self.palette.as_ref()
    }

    pub fn is_palette_open(&self) -> bool {
        self.palette.is_some()
    }

    pub fn palette_listeners(&self) -> &ListenerSet {
        &self.palette_guards
    }

    pub fn spy(&self) -> &ScrollSpy {
        &self.spy
    }

    pub fn dock(&self) -> &DockState {
        &self.dock
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// Subscribe to the live event stream.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    fn record(&mut self, event: Event) {
        let _ = self.bus.publish(event.clone());
        self.log.append(event);
    }
}
