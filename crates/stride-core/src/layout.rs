//! Manual record layout: ordered fields with offsets fixed at build time.
//!
//! A [`Layout`] is the static description of one record type. It is built
//! once with a [`LayoutBuilder`], which assigns every field a byte offset
//! contiguously in declaration order. The resulting record size drives
//! backend sizing, and the typed [`ScalarField`] / [`ArrayField`] values
//! handed out by the builder are what attribute accessors are made from.
//!
//! ```
//! use stride_core::LayoutBuilder;
//!
//! let mut b = LayoutBuilder::new();
//! let id = b.scalar::<i32>("id");
//! let pos = b.array::<f64>("pos", 3);
//! let layout = b.build().unwrap();
//!
//! assert_eq!(id.offset(), 0);
//! assert_eq!(pos.offset(), 4);
//! assert_eq!(layout.record_size(), 4 + 3 * 8);
//! ```

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::error::LayoutError;
use crate::primitive::{Primitive, PrimitiveKind};

/// One field of a layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// Name, unique within the layout.
    pub name: String,
    /// Primitive kind of each element.
    pub kind: PrimitiveKind,
    /// Number of elements (1 for scalars).
    pub count: usize,
    /// Byte offset of the first element within the record.
    pub offset: usize,
}

impl FieldDef {
    /// Total size of the field in bytes.
    pub fn size(&self) -> usize {
        self.kind.size() * self.count
    }

    /// Byte range occupied by this field within a record.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size()
    }
}

/// Typed location of a single-valued field.
///
/// Produced by [`LayoutBuilder::scalar`] or [`Layout::scalar`]; the type
/// parameter ties the offset to the primitive stored there.
pub struct ScalarField<P: Primitive> {
    offset: usize,
    _kind: PhantomData<fn() -> P>,
}

impl<P: Primitive> ScalarField<P> {
    /// Bind a scalar to a raw byte offset.
    ///
    /// Prefer obtaining fields from a layout; this exists for callers that
    /// compute offsets themselves.
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            _kind: PhantomData,
        }
    }

    /// Byte offset within the record.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<P: Primitive> Clone for ScalarField<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Primitive> Copy for ScalarField<P> {}

impl<P: Primitive> fmt::Debug for ScalarField<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarField<{}>(@{})", P::KIND, self.offset)
    }
}

/// Typed location of a fixed-length array field.
pub struct ArrayField<P: Primitive> {
    offset: usize,
    len: usize,
    _kind: PhantomData<fn() -> P>,
}

impl<P: Primitive> ArrayField<P> {
    /// Bind an array to a raw byte offset and element count.
    pub fn at(offset: usize, len: usize) -> Self {
        Self {
            offset,
            len,
            _kind: PhantomData,
        }
    }

    /// Byte offset of element 0.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array has no elements. Never true for fields from a layout.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset of element `i`.
    pub fn element_offset(&self, i: usize) -> usize {
        self.offset + i * P::SIZE
    }
}

impl<P: Primitive> Clone for ArrayField<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Primitive> Copy for ArrayField<P> {}

impl<P: Primitive> fmt::Debug for ArrayField<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayField<{}; {}>(@{})", P::KIND, self.len, self.offset)
    }
}

/// Accumulates field declarations and assigns offsets.
///
/// Declaration methods never fail; problems (duplicate names, empty arrays,
/// overflow) are collected and reported by [`LayoutBuilder::build`], so a
/// schema can be written as a flat list of declarations.
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    fields: IndexMap<String, FieldDef>,
    cursor: usize,
    error: Option<LayoutError>,
}

impl LayoutBuilder {
    /// Start an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a single-valued field.
    pub fn scalar<P: Primitive>(&mut self, name: &str) -> ScalarField<P> {
        let offset = self.push(name, P::KIND, 1);
        ScalarField::at(offset)
    }

    /// Declare a fixed-length array field of `len` elements.
    pub fn array<P: Primitive>(&mut self, name: &str, len: usize) -> ArrayField<P> {
        let offset = self.push(name, P::KIND, len);
        ArrayField::at(offset, len)
    }

    fn push(&mut self, name: &str, kind: PrimitiveKind, count: usize) -> usize {
        let offset = self.cursor;
        if self.error.is_some() {
            return offset;
        }
        if count == 0 {
            self.error = Some(LayoutError::EmptyArray { name: name.into() });
            return offset;
        }
        if self.fields.contains_key(name) {
            self.error = Some(LayoutError::DuplicateField { name: name.into() });
            return offset;
        }
        let end = kind
            .size()
            .checked_mul(count)
            .and_then(|size| offset.checked_add(size));
        let Some(end) = end else {
            self.error = Some(LayoutError::SizeOverflow { name: name.into() });
            return offset;
        };
        self.fields.insert(
            name.to_owned(),
            FieldDef {
                name: name.to_owned(),
                kind,
                count,
                offset,
            },
        );
        self.cursor = end;
        offset
    }

    /// Seal the layout.
    pub fn build(self) -> Result<Layout, LayoutError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.fields.is_empty() {
            return Err(LayoutError::NoFields);
        }
        Ok(Layout {
            fields: self.fields,
            record_size: self.cursor,
        })
    }
}

/// Sealed description of one record type.
///
/// Fields are stored in declaration order; offsets are contiguous and never
/// overlap. The record size is fixed for the lifetime of the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    fields: IndexMap<String, FieldDef>,
    record_size: usize,
}

impl Layout {
    /// Size of one record in bytes.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Number of declared fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    /// Typed lookup of a scalar field.
    pub fn scalar<P: Primitive>(&self, name: &str) -> Result<ScalarField<P>, LayoutError> {
        let def = self.checked(name, P::KIND)?;
        if def.count != 1 {
            return Err(LayoutError::ShapeMismatch {
                name: name.into(),
                count: def.count,
            });
        }
        Ok(ScalarField::at(def.offset))
    }

    /// Typed lookup of an array field.
    ///
    /// A scalar is accepted and viewed as an array of one element.
    pub fn array<P: Primitive>(&self, name: &str) -> Result<ArrayField<P>, LayoutError> {
        let def = self.checked(name, P::KIND)?;
        Ok(ArrayField::at(def.offset, def.count))
    }

    fn checked(&self, name: &str, requested: PrimitiveKind) -> Result<&FieldDef, LayoutError> {
        let def = self
            .fields
            .get(name)
            .ok_or_else(|| LayoutError::UnknownField { name: name.into() })?;
        if def.kind != requested {
            return Err(LayoutError::KindMismatch {
                name: name.into(),
                declared: def.kind,
                requested,
            });
        }
        Ok(def)
    }
}
