//! Byte-level access to a single record.
//!
//! [`ReadAccess`] and [`WriteAccess`] are the seam between storage backends
//! and typed field accessors: anything that can expose one record's bytes
//! gets offset-addressed primitive reads and writes for free.

use crate::primitive::Primitive;

/// Read access to the bytes of one record.
pub trait ReadAccess {
    /// The record's bytes (exactly one record, `record_size` long).
    fn record_bytes(&self) -> &[u8];

    /// Decode a primitive at `offset` within the record.
    ///
    /// # Panics
    ///
    /// Panics if `offset + P::SIZE` exceeds the record size.
    #[inline]
    fn get<P: Primitive>(&self, offset: usize) -> P
    where
        Self: Sized,
    {
        P::from_le_slice(&self.record_bytes()[offset..offset + P::SIZE])
    }
}

/// Write access to the bytes of one record.
pub trait WriteAccess: ReadAccess {
    /// The record's bytes, mutably.
    fn record_bytes_mut(&mut self) -> &mut [u8];

    /// Encode a primitive at `offset` within the record.
    ///
    /// # Panics
    ///
    /// Panics if `offset + P::SIZE` exceeds the record size.
    #[inline]
    fn put<P: Primitive>(&mut self, offset: usize, value: P)
    where
        Self: Sized,
    {
        value.write_le_slice(&mut self.record_bytes_mut()[offset..offset + P::SIZE]);
    }
}

/// Read-only view of one record, tagged with its index.
///
/// Handed to change and lifecycle listeners so they can inspect the record
/// that is about to change, has changed, or is about to be deleted.
#[derive(Clone, Copy, Debug)]
pub struct RecordView<'a> {
    id: u64,
    bytes: &'a [u8],
}

impl<'a> RecordView<'a> {
    /// Wrap a record's bytes.
    pub fn new(id: u64, bytes: &'a [u8]) -> Self {
        Self { id, bytes }
    }

    /// Index of the record within its pool.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The record's bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl ReadAccess for RecordView<'_> {
    fn record_bytes(&self) -> &[u8] {
        self.bytes
    }
}

/// Mutable view of one record, tagged with its index.
///
/// Handed to record initializers when a slot is (re)allocated.
#[derive(Debug)]
pub struct RecordMut<'a> {
    id: u64,
    bytes: &'a mut [u8],
}

impl<'a> RecordMut<'a> {
    /// Wrap a record's bytes.
    pub fn new(id: u64, bytes: &'a mut [u8]) -> Self {
        Self { id, bytes }
    }

    /// Index of the record within its pool.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Zero every byte of the record.
    pub fn zero(&mut self) {
        self.bytes.fill(0);
    }
}

impl ReadAccess for RecordMut<'_> {
    fn record_bytes(&self) -> &[u8] {
        &*self.bytes
    }
}

impl WriteAccess for RecordMut<'_> {
    fn record_bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let mut bytes = [0u8; 16];
        let mut rec = RecordMut::new(3, &mut bytes);
        rec.put::<i32>(0, -7);
        rec.put::<f64>(4, 2.5);
        rec.put::<bool>(12, true);
        assert_eq!(rec.get::<i32>(0), -7);
        assert_eq!(rec.get::<f64>(4), 2.5);
        assert!(rec.get::<bool>(12));
        assert_eq!(rec.id(), 3);
    }

    #[test]
    fn view_reads_written_bytes() {
        let mut bytes = [0u8; 4];
        RecordMut::new(0, &mut bytes).put::<u32>(0, 0xdead_beef);
        let view = RecordView::new(0, &bytes);
        assert_eq!(view.get::<u32>(0), 0xdead_beef);
    }

    #[test]
    fn zero_clears_record() {
        let mut bytes = [9u8; 8];
        RecordMut::new(0, &mut bytes).zero();
        assert_eq!(bytes, [0u8; 8]);
    }

    #[test]
    #[should_panic]
    fn out_of_record_read_panics() {
        let bytes = [0u8; 4];
        let _ = RecordView::new(0, &bytes).get::<u64>(0);
    }
}
