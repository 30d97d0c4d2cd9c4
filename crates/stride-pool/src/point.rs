//! Composite n-dimensional point accessor.
//!
//! [`PointAttribute`] views an `f64` array field as a position vector.
//! Every mutating operation is one logical change and fires exactly one
//! before/after pair, however many coordinates it touches.

use smallvec::SmallVec;
use stride_core::{ArrayField, Layout, LayoutError, Primitive, ReadAccess};

use crate::attribute::{check_owner, ArrayAttribute};
use crate::proxy::Proxy;
use crate::traits::RecordStore;

/// Coordinates of one point; up to four dimensions stay inline.
pub type Coords = SmallVec<[f64; 4]>;

/// Position accessor over a fixed-length `f64` array field.
#[derive(Clone, Copy, Debug)]
pub struct PointAttribute {
    coords: ArrayAttribute<f64>,
}

impl PointAttribute {
    /// Accessor for `field`; its length is the dimension count.
    pub fn new(field: ArrayField<f64>) -> Self {
        Self {
            coords: ArrayAttribute::new(field),
        }
    }

    /// Accessor for the `f64` array field `name` of `layout`.
    pub fn from_layout(layout: &Layout, name: &str) -> Result<Self, LayoutError> {
        ArrayAttribute::from_layout(layout, name).map(|coords| Self { coords })
    }

    /// Number of dimensions.
    pub fn dims(&self) -> usize {
        self.coords.len()
    }

    /// Underlying per-coordinate accessor.
    pub fn coordinates(&self) -> &ArrayAttribute<f64> {
        &self.coords
    }

    /// All coordinates of the record `proxy` addresses.
    pub fn position<R: RecordStore>(&self, store: &R, proxy: &Proxy) -> Coords {
        let mut out: Coords = SmallVec::from_elem(0.0, self.dims());
        self.coords.copy_to(store, proxy, &mut out);
        out
    }

    /// Coordinates of a bare record.
    pub fn read_position(&self, record: &impl ReadAccess) -> Coords {
        (0..self.dims()).map(|axis| self.coords.read(record, axis)).collect()
    }

    /// One coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= dims()`.
    pub fn coordinate<R: RecordStore>(&self, store: &R, proxy: &Proxy, axis: usize) -> f64 {
        self.coords.get(store, proxy, axis)
    }

    /// Replace all coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `position.len() != dims()`.
    pub fn set_position<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, position: &[f64]) {
        self.coords.set_all(store, proxy, position);
    }

    /// Replace all coordinates without notification.
    pub fn set_position_quiet<R: RecordStore>(
        &self,
        store: &mut R,
        proxy: &Proxy,
        position: &[f64],
    ) {
        self.coords.set_all_quiet(store, proxy, position);
    }

    /// Replace one coordinate.
    pub fn set_coordinate<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, axis: usize, value: f64) {
        self.coords.set(store, proxy, axis, value);
    }

    /// Translate by `delta`, one component per dimension.
    ///
    /// # Panics
    ///
    /// Panics if `delta.len() != dims()`.
    pub fn move_by<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, delta: &[f64]) {
        check_owner(store, proxy);
        assert_eq!(delta.len(), self.dims(), "delta dimension mismatch");
        let offset = self.coords.offset();
        store.modify(proxy.index(), |bytes| {
            for (axis, d) in delta.iter().enumerate() {
                let start = offset + axis * f64::SIZE;
                let slot = &mut bytes[start..start + f64::SIZE];
                (f64::from_le_slice(slot) + d).write_le_slice(slot);
            }
        });
    }

    /// Step one unit forward along `axis`.
    pub fn fwd<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, axis: usize) {
        self.step(store, proxy, axis, 1.0);
    }

    /// Step one unit backward along `axis`.
    pub fn bck<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, axis: usize) {
        self.step(store, proxy, axis, -1.0);
    }

    fn step<R: RecordStore>(&self, store: &mut R, proxy: &Proxy, axis: usize, by: f64) {
        let current = self.coords.get(store, proxy, axis);
        self.coords.set(store, proxy, axis, current + by);
    }

    /// Squared Euclidean distance between the records two proxies address.
    pub fn distance_squared<R: RecordStore>(&self, store: &R, a: &Proxy, b: &Proxy) -> f64 {
        (0..self.dims())
            .map(|axis| {
                let d = self.coords.get(store, a, axis) - self.coords.get(store, b, axis);
                d * d
            })
            .sum()
    }
}
