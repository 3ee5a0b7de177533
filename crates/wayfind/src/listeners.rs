//! Scoped acquisition of host-side global listeners.
//!
//! Global handlers (keydown, scroll, resize, outside-click) may only exist
//! while their owning surface is mounted or open. Registration returns an
//! RAII guard; the guard's drop deregisters on every exit path, including
//! unwinding, so a closed surface can never leak a handler.

use std::sync::Arc;

use fnv::FnvHashMap;
use parking_lot::Mutex;

/// Kinds of global listeners a surface may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Keydown,
    Scroll,
    Resize,
    OutsideClick,
}

type Counts = Arc<Mutex<FnvHashMap<ListenerKind, usize>>>;

/// Tracks active global listener registrations by kind.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    counts: Counts,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener of the given kind.
    pub fn register(&self, kind: ListenerKind) -> ListenerGuard {
        let mut counts = self.counts.lock();
        *counts.entry(kind).or_insert(0) += 1;
        tracing::debug!("listener registered: {kind:?}");
        ListenerGuard {
            counts: Arc::clone(&self.counts),
            kind,
        }
    }

    /// Number of live registrations of a kind.
    pub fn active(&self, kind: ListenerKind) -> usize {
        self.counts.lock().get(&kind).copied().unwrap_or(0)
    }

    /// Live registrations across all kinds.
    pub fn total_active(&self) -> usize {
        self.counts.lock().values().sum()
    }
}

/// A live registration. Dropping it deregisters.
#[derive(Debug)]
pub struct ListenerGuard {
    counts: Counts,
    kind: ListenerKind,
}

impl ListenerGuard {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let mut counts = self.counts.lock();
        if let Some(count) = counts.get_mut(&self.kind) {
            *count = count.saturating_sub(1);
        }
        tracing::debug!("listener released: {:?}", self.kind);
    }
}

/// The guards one surface holds. Re-acquiring a kind replaces the previous
/// guard, keeping a single registration per (owner, kind).
#[derive(Debug, Default)]
pub struct ListenerSet {
    guards: FnvHashMap<ListenerKind, ListenerGuard>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, registry: &ListenerRegistry, kind: ListenerKind) {
        self.guards.insert(kind, registry.register(kind));
    }

    pub fn release_all(&mut self) {
        self.guards.clear();
    }

    pub fn holds(&self, kind: ListenerKind) -> bool {
        self.guards.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_drop_deregisters() {
        let registry = ListenerRegistry::new();
        {
            let _guard = registry.register(ListenerKind::Keydown);
            assert_eq!(registry.active(ListenerKind::Keydown), 1);
        }
        assert_eq!(registry.active(ListenerKind::Keydown), 0);
    }

    #[test]
    fn counts_are_per_kind() {
        let registry = ListenerRegistry::new();
        let _keydown = registry.register(ListenerKind::Keydown);
        let _scroll = registry.register(ListenerKind::Scroll);
        let _scroll2 = registry.register(ListenerKind::Scroll);

        assert_eq!(registry.active(ListenerKind::Keydown), 1);
        assert_eq!(registry.active(ListenerKind::Scroll), 2);
        assert_eq!(registry.total_active(), 3);
    }

    #[test]
    fn reacquiring_a_kind_keeps_one_registration() {
        let registry = ListenerRegistry::new();
        let mut set = ListenerSet::new();
        set.acquire(&registry, ListenerKind::OutsideClick);
        set.acquire(&registry, ListenerKind::OutsideClick);

        assert_eq!(set.len(), 1);
        assert_eq!(registry.active(ListenerKind::OutsideClick), 1);
    }

    #[test]
    fn release_all_frees_every_guard() {
        let registry = ListenerRegistry::new();
        let mut set = ListenerSet::new();
        set.acquire(&registry, ListenerKind::Keydown);
        set.acquire(&registry, ListenerKind::OutsideClick);
        assert_eq!(registry.total_active(), 2);

        set.release_all();
        assert!(set.is_empty());
        assert_eq!(registry.total_active(), 0);
    }

    #[test]
    fn guards_release_during_unwind() {
        let registry = ListenerRegistry::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = registry.register(ListenerKind::Scroll);
            panic!("handler failed");
        }));
        assert!(result.is_err());
        assert_eq!(registry.active(ListenerKind::Scroll), 0);
    }
}
