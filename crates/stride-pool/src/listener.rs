//! Change and lifecycle listeners.
//!
//! Each pool keeps one list of [`ChangeListener`]s and one list of
//! [`LifecycleListener`]s. Listeners are per pool (per record type), not per
//! field: any notifying write to any field of a record fires the same
//! before/after pair.

use stride_core::{ListenerId, RecordView};

/// Observes notifying writes.
///
/// `before_change` sees the record's bytes as they were; `after_change`
/// sees them with the write applied. Composite operations fire one pair
/// per logical change.
pub trait ChangeListener: Send + Sync {
    /// A record is about to be modified.
    fn before_change(&mut self, record: RecordView<'_>);

    /// A record has been modified.
    fn after_change(&mut self, record: RecordView<'_>);
}

/// Observes record creation and deletion.
pub trait LifecycleListener: Send + Sync {
    /// A record was allocated and initialized.
    fn created(&mut self, record: RecordView<'_>) {
        let _ = record;
    }

    /// A record is about to be freed. Its bytes are still readable.
    fn before_delete(&mut self, record: RecordView<'_>);
}

/// Ordered list of subscribed listeners.
pub(crate) struct Listeners<L: ?Sized> {
    entries: Vec<(ListenerId, Box<L>)>,
}

impl<L: ?Sized> Listeners<L> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, id: ListenerId, listener: Box<L>) {
        self.entries.push((id, listener));
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call `f` on every listener in subscription order.
    pub(crate) fn for_each(&mut self, mut f: impl FnMut(&mut L)) {
        for (_, listener) in &mut self.entries {
            f(&mut **listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Tally {
        tag: u32,
        log: Arc<Mutex<Vec<u32>>>,
    }

    impl LifecycleListener for Tally {
        fn before_delete(&mut self, _record: RecordView<'_>) {
            self.log.lock().unwrap().push(self.tag);
        }
    }

    fn tally(tag: u32, log: &Arc<Mutex<Vec<u32>>>) -> Box<dyn LifecycleListener> {
        Box::new(Tally {
            tag,
            log: Arc::clone(log),
        })
    }

    #[test]
    fn remove_by_id() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut list: Listeners<dyn LifecycleListener> = Listeners::new();
        list.push(ListenerId(0), tally(0, &log));
        list.push(ListenerId(1), tally(1, &log));
        assert_eq!(list.len(), 2);
        assert!(list.remove(ListenerId(0)));
        assert!(!list.remove(ListenerId(0)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn for_each_visits_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut list: Listeners<dyn LifecycleListener> = Listeners::new();
        list.push(ListenerId(4), tally(4, &log));
        list.push(ListenerId(2), tally(2, &log));
        let bytes = [0u8; 4];
        list.for_each(|l| l.before_delete(RecordView::new(0, &bytes)));
        // `created` has a no-op default.
        list.for_each(|l| l.created(RecordView::new(0, &bytes)));
        assert_eq!(*log.lock().unwrap(), vec![4, 2]);
    }
}
