// ── Reactive resource cell ──
//
// Whole-slice storage with push-based change notification via `watch`
// channels. Unlike a keyed collection, a cell replaces its value wholesale:
// the server's insertion order is the display order, so there is no
// client-side keying or reordering.

use std::sync::Arc;

use tokio::sync::watch;

/// A reactive cell holding one resource slice.
///
/// Every mutation bumps a version counter and broadcasts the new value to
/// subscribers. Reads are cheap `Arc` clones.
pub(crate) struct ResourceCell<T: Clone + Send + Sync + 'static> {
    value: watch::Sender<Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,
}

impl<T: Clone + Default + Send + Sync + 'static> ResourceCell<T> {
    pub(crate) fn new() -> Self {
        let (value, _) = watch::channel(Arc::new(T::default()));
        let (version, _) = watch::channel(0u64);
        Self { value, version }
    }

    /// Replace the slice with a fresh server payload.
    pub(crate) fn replace(&self, new_value: T) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.value.send_modify(|v| *v = Arc::new(new_value));
        self.bump_version();
    }

    /// Reset the slice to its empty/default value.
    pub(crate) fn reset(&self) {
        self.replace(T::default());
    }

    /// Mutate the slice in place (clone-on-write).
    ///
    /// The closure returns `true` if it changed anything; when it returns
    /// `false` no notification is sent and the version is untouched, so a
    /// no-op mutation is invisible to subscribers.
    pub(crate) fn modify(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = self.value.send_if_modified(|current| {
            let mut inner = (**current).clone();
            if f(&mut inner) {
                *current = Arc::new(inner);
                true
            } else {
                false
            }
        });
        if changed {
            self.bump_version();
        }
        changed
    }

    /// Get the current value (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<T> {
        self.value.borrow().clone()
    }

    /// Subscribe to value changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<T>> {
        self.value.subscribe()
    }

    /// Current version (number of mutations applied).
    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_default() {
        let cell: ResourceCell<Vec<u32>> = ResourceCell::new();
        assert!(cell.snapshot().is_empty());
        assert_eq!(cell.version(), 0);
    }

    #[test]
    fn replace_preserves_order() {
        let cell: ResourceCell<Vec<u32>> = ResourceCell::new();
        cell.replace(vec![3, 1, 2]);
        assert_eq!(*cell.snapshot(), vec![3, 1, 2]);
    }

    #[test]
    fn replace_bumps_version() {
        let cell: ResourceCell<Vec<u32>> = ResourceCell::new();
        cell.replace(vec![1]);
        cell.replace(vec![1]);
        assert_eq!(cell.version(), 2);
    }

    #[test]
    fn reset_returns_to_default() {
        let cell: ResourceCell<Vec<u32>> = ResourceCell::new();
        cell.replace(vec![1, 2]);
        cell.reset();
        assert!(cell.snapshot().is_empty());
    }

    #[test]
    fn modify_applies_change_and_reports_it() {
        let cell: ResourceCell<Vec<u32>> = ResourceCell::new();
        cell.replace(vec![1, 2, 3]);

        let changed = cell.modify(|v| {
            if let Some(first) = v.first_mut() {
                *first = 9;
                true
            } else {
                false
            }
        });

        assert!(changed);
        assert_eq!(*cell.snapshot(), vec![9, 2, 3]);
    }

    #[test]
    fn noop_modify_is_invisible() {
        let cell: ResourceCell<Vec<u32>> = ResourceCell::new();
        cell.replace(vec![1]);
        let version_before = cell.version();

        let changed = cell.modify(|_| false);

        assert!(!changed);
        assert_eq!(cell.version(), version_before);
        assert_eq!(*cell.snapshot(), vec![1]);
    }

    #[tokio::test]
    async fn subscribers_observe_replacements() {
        let cell: ResourceCell<Vec<u32>> = ResourceCell::new();
        let mut rx = cell.subscribe();

        cell.replace(vec![5]);
        rx.changed().await.unwrap();
        assert_eq!(**rx.borrow(), vec![5]);
    }
}
