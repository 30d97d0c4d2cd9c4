//! Test utilities and recording listeners for stride development.
//!
//! Provides standard record layouts ([`fixtures`]) and listener
//! implementations that record what they observe, so tests can assert on
//! notification counts and order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stride_core::RecordView;
use stride_pool::{ChangeListener, LifecycleListener};

/// Shared counters behind a [`CountingListener`].
#[derive(Debug, Default)]
pub struct ChangeCounts {
    before: AtomicUsize,
    after: AtomicUsize,
}

impl ChangeCounts {
    pub fn before(&self) -> usize {
        self.before.load(Ordering::SeqCst)
    }

    pub fn after(&self) -> usize {
        self.after.load(Ordering::SeqCst)
    }

    /// `(before, after)`.
    pub fn pair(&self) -> (usize, usize) {
        (self.before(), self.after())
    }
}

/// Change listener that counts before/after notifications.
///
/// The pool takes ownership of the listener; keep the [`ChangeCounts`]
/// returned by [`CountingListener::new`] to read the tallies.
pub struct CountingListener {
    counts: Arc<ChangeCounts>,
}

impl CountingListener {
    pub fn new() -> (Self, Arc<ChangeCounts>) {
        let counts = Arc::new(ChangeCounts::default());
        (
            Self {
                counts: Arc::clone(&counts),
            },
            counts,
        )
    }
}

impl ChangeListener for CountingListener {
    fn before_change(&mut self, _record: RecordView<'_>) {
        self.counts.before.fetch_add(1, Ordering::SeqCst);
    }

    fn after_change(&mut self, _record: RecordView<'_>) {
        self.counts.after.fetch_add(1, Ordering::SeqCst);
    }
}

/// One observed change notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    /// `before_change` with the record's bytes at that moment.
    Before { id: u64, bytes: Vec<u8> },
    /// `after_change` with the record's bytes at that moment.
    After { id: u64, bytes: Vec<u8> },
}

/// Change listener that snapshots the record bytes on every notification.
pub struct RecordingListener {
    events: Arc<Mutex<Vec<ChangeEvent>>>,
}

impl RecordingListener {
    pub fn new() -> (Self, Arc<Mutex<Vec<ChangeEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: Arc::clone(&events),
            },
            events,
        )
    }
}

impl ChangeListener for RecordingListener {
    fn before_change(&mut self, record: RecordView<'_>) {
        self.events.lock().unwrap().push(ChangeEvent::Before {
            id: record.id(),
            bytes: record.bytes().to_vec(),
        });
    }

    fn after_change(&mut self, record: RecordView<'_>) {
        self.events.lock().unwrap().push(ChangeEvent::After {
            id: record.id(),
            bytes: record.bytes().to_vec(),
        });
    }
}

/// Lifecycle listener that logs created and deleted ids in order.
pub struct LifecycleRecorder {
    created: Arc<Mutex<Vec<u64>>>,
    deleted: Arc<Mutex<Vec<u64>>>,
}

/// Handles onto a [`LifecycleRecorder`]'s logs.
#[derive(Clone)]
pub struct LifecycleLog {
    created: Arc<Mutex<Vec<u64>>>,
    deleted: Arc<Mutex<Vec<u64>>>,
}

impl LifecycleLog {
    pub fn created(&self) -> Vec<u64> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.deleted.lock().unwrap().clone()
    }
}

impl LifecycleRecorder {
    pub fn new() -> (Self, LifecycleLog) {
        let created = Arc::new(Mutex::new(Vec::new()));
        let deleted = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                created: Arc::clone(&created),
                deleted: Arc::clone(&deleted),
            },
            LifecycleLog { created, deleted },
        )
    }
}

impl LifecycleListener for LifecycleRecorder {
    fn created(&mut self, record: RecordView<'_>) {
        self.created.lock().unwrap().push(record.id());
    }

    fn before_delete(&mut self, record: RecordView<'_>) {
        self.deleted.lock().unwrap().push(record.id());
    }
}
