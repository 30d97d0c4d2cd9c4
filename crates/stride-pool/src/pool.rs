//! Record pools: lifecycle, lookup, proxy recycling and notification.
//!
//! A [`Pool`] owns one [`ElementPool`] over a storage backend and layers on
//! top of it everything a record type needs:
//!
//! ```text
//! Pool<S>
//! ├── Layout                 (record size, field lookup)
//! ├── ElementPool<S>         (indices, free list, live set, backend)
//! ├── initializer            (runs quietly on every create)
//! ├── change listeners       (before/after every notifying write)
//! ├── lifecycle listeners    (created / before_delete)
//! └── recycling queue        (bounded crossbeam channel of spare proxies)
//! ```
//!
//! Mutation goes through `&mut Pool`. Proxy recycling goes through `&Pool`
//! and is safe from many threads at once.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender};
use stride_core::{Layout, ListenerId, PoolId, RecordMut, RecordView};
use stride_storage::{
    DynStorage, ElementPool, HeapStorage, MultiArrayStorage, Storage, StorageKind,
};

use crate::config::PoolConfig;
use crate::error::{PoolError, RejectedProxy};
use crate::iter::{LiveCursor, LiveIds};
use crate::listener::{ChangeListener, LifecycleListener, Listeners};
use crate::proxy::Proxy;
use crate::stats::PoolStats;
use crate::traits::RecordStore;

/// Runs on every newly created record before lifecycle listeners see it.
pub type Initializer = Box<dyn Fn(&mut RecordMut<'_>) + Send + Sync>;

/// Pool whose records are spread across chained heap arrays, for element
/// counts beyond a single array's limit.
pub type BigPool = Pool<MultiArrayStorage<HeapStorage>>;

/// Growable collection of fixed-layout records addressed through proxies.
pub struct Pool<S: Storage = DynStorage> {
    id: PoolId,
    layout: Layout,
    elements: ElementPool<S>,
    change: Listeners<dyn ChangeListener>,
    lifecycle: Listeners<dyn LifecycleListener>,
    next_listener: u32,
    initializer: Option<Initializer>,
    validation: bool,
    recycle_tx: Sender<Proxy>,
    recycle_rx: Receiver<Proxy>,
    proxies_allocated: AtomicU64,
    proxies_recycled: AtomicU64,
}

impl Pool<DynStorage> {
    /// Pool for `layout` with the default configuration.
    pub fn new(layout: Layout) -> Result<Self, PoolError> {
        Self::with_config(layout, PoolConfig::default())
    }

    /// Pool for `layout` with the backend and policies named in `config`.
    pub fn with_config(layout: Layout, config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let storage = DynStorage::from_kind(
            &config.storage,
            layout.record_size(),
            config.initial_capacity,
        )?;
        Self::from_storage(layout, storage, &config)
    }
}

impl Pool<MultiArrayStorage<HeapStorage>> {
    /// Big pool with room for `capacity` records up front, split into
    /// sub-arrays of `elements_per_array` records.
    pub fn big(layout: Layout, capacity: u64, elements_per_array: u64) -> Result<Self, PoolError> {
        let config = PoolConfig::new()
            .with_initial_capacity(capacity)
            .with_storage(StorageKind::MultiArray { elements_per_array });
        config.validate()?;
        let storage = MultiArrayStorage::new(layout.record_size(), elements_per_array, capacity)?;
        Self::from_storage(layout, storage, &config)
    }
}

impl<S: Storage> Pool<S> {
    /// Pool over a caller-supplied backend.
    ///
    /// `config.storage` and `config.initial_capacity` are ignored; the
    /// backend is used as given. Its element size must equal the layout's
    /// record size.
    pub fn from_storage(layout: Layout, storage: S, config: &PoolConfig) -> Result<Self, PoolError> {
        if storage.element_size() != layout.record_size() {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "backend element size {} does not match record size {}",
                    storage.element_size(),
                    layout.record_size()
                ),
            });
        }
        let id = PoolId::next();
        let (recycle_tx, recycle_rx) = crossbeam_channel::bounded(config.proxy_cache);
        tracing::debug!(
            pool = %id,
            record_size = layout.record_size(),
            capacity = storage.len(),
            validation = config.validation,
            "pool created"
        );
        Ok(Self {
            id,
            layout,
            elements: ElementPool::new(storage, config.free_list),
            change: Listeners::new(),
            lifecycle: Listeners::new(),
            next_listener: 0,
            initializer: None,
            validation: config.validation,
            recycle_tx,
            recycle_rx,
            proxies_allocated: AtomicU64::new(0),
            proxies_recycled: AtomicU64::new(0),
        })
    }

    /// Unique id of this pool.
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Record layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn check_owner(&self, proxy: &Proxy) -> Result<(), PoolError> {
        if proxy.owner() == self.id {
            Ok(())
        } else {
            Err(PoolError::ForeignProxy {
                proxy_owner: proxy.owner(),
                pool: self.id,
            })
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Allocate a record and point `proxy` at it.
    ///
    /// Reuses the most recently freed index when the free-list policy
    /// allows, otherwise appends (growing the backend if needed). The
    /// initializer, if any, runs quietly; lifecycle listeners then see
    /// `created`.
    pub fn create<'p>(&mut self, proxy: &'p mut Proxy) -> Result<&'p mut Proxy, PoolError> {
        self.check_owner(proxy)?;
        let index = self.elements.create()?;
        if let Some(init) = &self.initializer {
            let bytes = self.elements.storage_mut().element_mut(index);
            init(&mut RecordMut::new(index, bytes));
        }
        if !self.lifecycle.is_empty() {
            let view = RecordView::new(index, self.elements.storage().element(index));
            self.lifecycle.for_each(|l| l.created(view));
        }
        proxy.point_at(index);
        tracing::trace!(pool = %self.id, index, "record created");
        Ok(proxy)
    }

    /// Free the record `proxy` addresses.
    ///
    /// Lifecycle listeners see `before_delete` while the bytes are still
    /// intact. The proxy stays pointed at the freed index.
    pub fn delete(&mut self, proxy: &Proxy) -> Result<(), PoolError> {
        self.check_owner(proxy)?;
        self.delete_id(proxy.index())
    }

    /// Free record `id`.
    pub fn delete_id(&mut self, id: u64) -> Result<(), PoolError> {
        if !self.elements.is_live(id) {
            return Err(PoolError::NoSuchElement { id });
        }
        if !self.lifecycle.is_empty() {
            let view = RecordView::new(id, self.elements.storage().element(id));
            self.lifecycle.for_each(|l| l.before_delete(view));
        }
        self.elements.free_element(id)?;
        tracing::trace!(pool = %self.id, index = id, "record deleted");
        Ok(())
    }

    /// Install the routine run on every newly created record.
    pub fn set_initializer(&mut self, init: impl Fn(&mut RecordMut<'_>) + Send + Sync + 'static) {
        self.initializer = Some(Box::new(init));
    }

    /// Remove the initializer; new records keep whatever bytes their slot held.
    pub fn clear_initializer(&mut self) {
        self.initializer = None;
    }

    // ── Lookup ─────────────────────────────────────────────────

    /// Point `proxy` at record `id`.
    ///
    /// With validation on, fails with [`PoolError::NoSuchElement`] unless
    /// `id` is live. With validation off the id is trusted: a freed id
    /// yields stale bytes and an id outside the backend panics on access.
    pub fn get_object<'p>(&self, id: u64, proxy: &'p mut Proxy) -> Result<&'p mut Proxy, PoolError> {
        self.check_owner(proxy)?;
        if self.validation && !self.elements.is_live(id) {
            return Err(PoolError::NoSuchElement { id });
        }
        proxy.point_at(id);
        Ok(proxy)
    }

    /// Point `proxy` at record `id` if it is live. Always checked.
    ///
    /// Returns `None` (leaving the proxy untouched) if `id` is not live or
    /// the proxy belongs to another pool.
    pub fn get_object_if_exists<'p>(&self, id: u64, proxy: &'p mut Proxy) -> Option<&'p mut Proxy> {
        if proxy.owner() != self.id || !self.elements.is_live(id) {
            return None;
        }
        proxy.point_at(id);
        Some(proxy)
    }

    /// Record id `proxy` addresses.
    pub fn get_id(&self, proxy: &Proxy) -> u64 {
        debug_assert_eq!(proxy.owner(), self.id);
        proxy.index()
    }

    /// Whether record `id` is live.
    pub fn is_live(&self, id: u64) -> bool {
        self.elements.is_live(id)
    }

    /// Read-only view of the record `proxy` addresses.
    pub fn record_view(&self, proxy: &Proxy) -> RecordView<'_> {
        RecordView::new(proxy.index(), self.record(proxy.index()))
    }

    /// Whether [`get_object`](Self::get_object) checks liveness.
    pub fn validation(&self) -> bool {
        self.validation
    }

    /// Turn lookup validation on or off.
    pub fn set_validation(&mut self, validation: bool) {
        self.validation = validation;
    }

    // ── Proxies ────────────────────────────────────────────────

    /// Mint a new unbound proxy owned by this pool.
    pub fn proxy(&self) -> Proxy {
        self.proxies_allocated.fetch_add(1, Ordering::Relaxed);
        Proxy::unbound(self.id)
    }

    /// Take a proxy from the recycling queue, or mint one if it is empty.
    ///
    /// Never blocks. The returned proxy is unbound.
    pub fn create_ref(&self) -> Proxy {
        match self.recycle_rx.try_recv() {
            Ok(proxy) => {
                self.proxies_recycled.fetch_add(1, Ordering::Relaxed);
                proxy
            }
            Err(_) => self.proxy(),
        }
    }

    /// Return a proxy to the recycling queue.
    ///
    /// A proxy minted by another pool is refused and handed back inside the
    /// error. When the queue is full the proxy is dropped.
    pub fn release_ref(&self, mut proxy: Proxy) -> Result<(), RejectedProxy> {
        if let Err(error) = self.check_owner(&proxy) {
            tracing::warn!(
                pool = %self.id,
                owner = %proxy.owner(),
                "refused release of a proxy owned by another pool"
            );
            return Err(RejectedProxy::new(proxy, error));
        }
        proxy.unbind();
        if self.recycle_tx.try_send(proxy).is_err() {
            tracing::trace!(pool = %self.id, "recycling queue full, dropping proxy");
        }
        Ok(())
    }

    // ── Iteration ──────────────────────────────────────────────

    /// Live record ids in ascending order.
    ///
    /// Each call starts over from the lowest id.
    pub fn iter(&self) -> LiveIds<'_, S> {
        LiveIds::new(&self.elements)
    }

    /// Detached cursor over live ids that detects structural changes.
    pub fn cursor(&self) -> LiveCursor {
        LiveCursor::new(self.elements.version())
    }

    /// Structural version; changes on every create, delete and clear.
    pub fn structural_version(&self) -> u64 {
        self.elements.version()
    }

    pub(crate) fn elements(&self) -> &ElementPool<S> {
        &self.elements
    }

    // ── Size and capacity ──────────────────────────────────────

    /// Number of live records.
    pub fn len(&self) -> u64 {
        self.elements.live_count()
    }

    /// Whether no record is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One past the largest id ever handed out.
    pub fn high_water_mark(&self) -> u64 {
        self.elements.size()
    }

    /// Records the backend can hold without growing.
    pub fn capacity(&self) -> u64 {
        self.elements.capacity()
    }

    /// Grow the backend to hold at least `capacity` records.
    pub fn reserve(&mut self, capacity: u64) -> Result<(), PoolError> {
        self.elements.reserve(capacity)?;
        Ok(())
    }

    /// Delete every record at once. Every outstanding id becomes invalid.
    ///
    /// Lifecycle listeners are not told about individual records.
    pub fn clear(&mut self) {
        tracing::debug!(pool = %self.id, live = self.len(), "clearing pool");
        self.elements.clear();
    }

    /// Exchange the bytes of records `a` and `b`, quietly.
    ///
    /// Liveness stays with the index. Meant for compaction by collaborators
    /// that rewrite their own id references afterwards.
    pub fn swap(&mut self, a: u64, b: u64) -> Result<(), PoolError> {
        self.elements.swap(a, b)?;
        Ok(())
    }

    /// Occupancy and memory snapshot.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            live: self.elements.live_count(),
            free: self.elements.free_count(),
            high_water_mark: self.elements.size(),
            capacity: self.elements.capacity(),
            record_size: self.layout.record_size(),
            memory_bytes: self.elements.storage().memory_bytes(),
            proxies_allocated: self.proxies_allocated.load(Ordering::Relaxed),
            proxies_recycled: self.proxies_recycled.load(Ordering::Relaxed),
            listeners: self.change.len() + self.lifecycle.len(),
        }
    }

    /// Bytes held by the backend.
    pub fn memory_bytes(&self) -> usize {
        self.elements.storage().memory_bytes()
    }

    // ── Listeners ──────────────────────────────────────────────

    fn next_listener_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }

    /// Subscribe to before/after notifications of every notifying write.
    pub fn subscribe_changes(&mut self, listener: impl ChangeListener + 'static) -> ListenerId {
        let id = self.next_listener_id();
        self.change.push(id, Box::new(listener));
        id
    }

    /// Subscribe to record creation and deletion.
    pub fn subscribe_lifecycle(&mut self, listener: impl LifecycleListener + 'static) -> ListenerId {
        let id = self.next_listener_id();
        self.lifecycle.push(id, Box::new(listener));
        id
    }

    /// Drop a subscription. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.change.remove(id) || self.lifecycle.remove(id)
    }
}

impl<S: Storage> RecordStore for Pool<S> {
    fn pool_id(&self) -> PoolId {
        self.id
    }

    #[inline]
    fn record(&self, index: u64) -> &[u8] {
        self.elements.storage().element(index)
    }

    #[inline]
    fn record_mut(&mut self, index: u64) -> &mut [u8] {
        self.elements.storage_mut().element_mut(index)
    }

    fn notify_before(&mut self, index: u64) {
        if self.change.is_empty() {
            return;
        }
        let view = RecordView::new(index, self.elements.storage().element(index));
        self.change.for_each(|l| l.before_change(view));
    }

    fn notify_after(&mut self, index: u64) {
        if self.change.is_empty() {
            return;
        }
        let view = RecordView::new(index, self.elements.storage().element(index));
        self.change.for_each(|l| l.after_change(view));
    }
}

impl<S: Storage> fmt::Debug for Pool<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("id", &self.id)
            .field("record_size", &self.layout.record_size())
            .field("live", &self.elements.live_count())
            .field("high_water_mark", &self.elements.size())
            .field("capacity", &self.elements.capacity())
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}
