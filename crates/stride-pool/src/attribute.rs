//! Typed field accessors.
//!
//! An accessor is built once per field from the typed location the layout
//! handed out, then used with any proxy of any pool sharing that layout.
//! Every write comes in two flavours:
//!
//! - `set_quiet`: writes the bytes, no notification,
//! - `set`: `before_change`, write, `after_change`.
//!
//! `read`/`write` operate on a bare record ([`RecordView`](stride_core::RecordView),
//! [`RecordMut`](stride_core::RecordMut)) and are meant for initializers and
//! listeners.

use std::marker::PhantomData;

use stride_core::{ArrayField, Layout, LayoutError, Primitive, ReadAccess, ScalarField, WriteAccess};

use crate::proxy::Proxy;
use crate::traits::RecordStore;

#[inline]
pub(crate) fn check_owner<R: RecordStore>(store: &R, proxy: &Proxy) {
    debug_assert_eq!(
        proxy.owner(),
        store.pool_id(),
        "proxy used with a pool that did not create it"
    );
}

/// Accessor for a single-valued field.
pub struct Attribute<P: Primitive> {
    offset: usize,
    _marker: PhantomData<P>,
}

impl<P: Primitive> Attribute<P> {
    /// Accessor for `field`.
    pub fn new(field: ScalarField<P>) -> Self {
        Self {
            offset: field.offset(),
            _marker: PhantomData,
        }
    }

    /// Accessor for the scalar field `name` of `layout`.
    pub fn from_layout(layout: &Layout, name: &str) -> Result<Self, LayoutError> {
        layout.scalar::<P>(name).map(Self::new)
    }

    /// Byte offset of the field within a record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Value in the record `proxy` addresses.
    #[inline]
    pub fn get<R: RecordStore>(&self, store: &R, proxy: &Proxy) -> P {
        check_owner(store, proxy);
        P::from_le_slice(&store.record(proxy.index())[self.offset..self.offset + P::SIZE])
    }

    /// Write without notification.
    #[inline]
    pub fn set_quiet<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, value: P) {
        check_owner(store, proxy);
        value.write_le_slice(&mut store.record_mut(proxy.index())[self.offset..self.offset + P::SIZE]);
    }

    /// Write with one before/after notification pair.
    pub fn set<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, value: P) {
        check_owner(store, proxy);
        let range = self.offset..self.offset + P::SIZE;
        store.modify(proxy.index(), |bytes| value.write_le_slice(&mut bytes[range]));
    }

    /// Value in a bare record.
    #[inline]
    pub fn read(&self, record: &impl ReadAccess) -> P {
        record.get::<P>(self.offset)
    }

    /// Write into a bare record.
    #[inline]
    pub fn write(&self, record: &mut impl WriteAccess, value: P) {
        record.put::<P>(self.offset, value);
    }

    /// The field's little-endian byte image.
    pub fn bytes<'a, R: RecordStore>(&self, store: &'a R, proxy: &Proxy) -> &'a [u8] {
        check_owner(store, proxy);
        &store.record(proxy.index())[self.offset..self.offset + P::SIZE]
    }

    /// Overwrite the field from its little-endian byte image, quietly.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` is not the field size.
    pub fn set_bytes<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, bytes: &[u8]) {
        check_owner(store, proxy);
        store.record_mut(proxy.index())[self.offset..self.offset + P::SIZE].copy_from_slice(bytes);
    }
}

impl<P: Primitive> Clone for Attribute<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Primitive> Copy for Attribute<P> {}

impl<P: Primitive> std::fmt::Debug for Attribute<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("kind", &P::KIND)
            .field("offset", &self.offset)
            .finish()
    }
}

/// Accessor for a fixed-length array field.
pub struct ArrayAttribute<P: Primitive> {
    offset: usize,
    len: usize,
    _marker: PhantomData<P>,
}

impl<P: Primitive> ArrayAttribute<P> {
    /// Accessor for `field`.
    pub fn new(field: ArrayField<P>) -> Self {
        Self {
            offset: field.offset(),
            len: field.len(),
            _marker: PhantomData,
        }
    }

    /// Accessor for the array field `name` of `layout`.
    pub fn from_layout(layout: &Layout, name: &str) -> Result<Self, LayoutError> {
        layout.array::<P>(name).map(Self::new)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: layouts reject empty arrays.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset of the field within a record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    fn element_range(&self, i: usize) -> std::ops::Range<usize> {
        assert!(i < self.len, "array index {i} out of bounds (len {})", self.len);
        let start = self.offset + i * P::SIZE;
        start..start + P::SIZE
    }

    fn byte_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len * P::SIZE
    }

    /// Element `i` of the record `proxy` addresses.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[inline]
    pub fn get<R: RecordStore>(&self, store: &R, proxy: &Proxy, i: usize) -> P {
        check_owner(store, proxy);
        P::from_le_slice(&store.record(proxy.index())[self.element_range(i)])
    }

    /// Write element `i` without notification.
    #[inline]
    pub fn set_quiet<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, i: usize, value: P) {
        check_owner(store, proxy);
        let range = self.element_range(i);
        value.write_le_slice(&mut store.record_mut(proxy.index())[range]);
    }

    /// Write element `i` with one before/after notification pair.
    pub fn set<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, i: usize, value: P) {
        check_owner(store, proxy);
        let range = self.element_range(i);
        store.modify(proxy.index(), |bytes| value.write_le_slice(&mut bytes[range]));
    }

    /// Copy every element into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != len()`.
    pub fn copy_to<R: RecordStore>(&self, store: &R, proxy: &Proxy, out: &mut [P]) {
        check_owner(store, proxy);
        assert_eq!(out.len(), self.len, "destination length mismatch");
        let bytes = &store.record(proxy.index())[self.byte_range()];
        for (slot, chunk) in out.iter_mut().zip(bytes.chunks_exact(P::SIZE)) {
            *slot = P::from_le_slice(chunk);
        }
    }

    /// Overwrite every element quietly.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != len()`.
    pub fn set_all_quiet<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, values: &[P]) {
        check_owner(store, proxy);
        assert_eq!(values.len(), self.len, "source length mismatch");
        let range = self.byte_range();
        write_all(&mut store.record_mut(proxy.index())[range], values);
    }

    /// Overwrite every element with a single notification pair.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != len()`.
    pub fn set_all<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, values: &[P]) {
        check_owner(store, proxy);
        assert_eq!(values.len(), self.len, "source length mismatch");
        let range = self.byte_range();
        store.modify(proxy.index(), |bytes| write_all(&mut bytes[range], values));
    }

    /// Element `i` of a bare record.
    pub fn read(&self, record: &impl ReadAccess, i: usize) -> P {
        P::from_le_slice(&record.record_bytes()[self.element_range(i)])
    }

    /// Write element `i` of a bare record.
    pub fn write(&self, record: &mut impl WriteAccess, i: usize, value: P) {
        let range = self.element_range(i);
        value.write_le_slice(&mut record.record_bytes_mut()[range]);
    }

    /// The whole array's little-endian byte image.
    pub fn bytes<'a, R: RecordStore>(&self, store: &'a R, proxy: &Proxy) -> &'a [u8] {
        check_owner(store, proxy);
        &store.record(proxy.index())[self.byte_range()]
    }

    /// Overwrite the whole array from its byte image, quietly.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` is not the field size.
    pub fn set_bytes<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, bytes: &[u8]) {
        check_owner(store, proxy);
        let range = self.byte_range();
        store.record_mut(proxy.index())[range].copy_from_slice(bytes);
    }
}

fn write_all<P: Primitive>(bytes: &mut [u8], values: &[P]) {
    for (chunk, &value) in bytes.chunks_exact_mut(P::SIZE).zip(values) {
        value.write_le_slice(chunk);
    }
}

impl<P: Primitive> Clone for ArrayAttribute<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Primitive> Copy for ArrayAttribute<P> {}

impl<P: Primitive> std::fmt::Debug for ArrayAttribute<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayAttribute")
            .field("kind", &P::KIND)
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}
