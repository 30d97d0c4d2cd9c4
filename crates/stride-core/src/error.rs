//! Layout construction and lookup errors.

use std::error::Error;
use std::fmt;

use crate::primitive::PrimitiveKind;

/// Errors raised while building or querying a [`Layout`](crate::Layout).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Two fields were declared with the same name.
    DuplicateField {
        /// The repeated name.
        name: String,
    },
    /// An array field was declared with zero elements.
    EmptyArray {
        /// The offending field.
        name: String,
    },
    /// The layout has no fields, so records would have zero size.
    NoFields,
    /// The accumulated record size does not fit in `usize`.
    SizeOverflow {
        /// The field whose offset overflowed.
        name: String,
    },
    /// A lookup named a field that is not in the layout.
    UnknownField {
        /// The requested name.
        name: String,
    },
    /// A typed lookup disagreed with the declared kind or shape.
    KindMismatch {
        /// The field that was looked up.
        name: String,
        /// Kind recorded in the layout.
        declared: PrimitiveKind,
        /// Kind requested by the caller.
        requested: PrimitiveKind,
    },
    /// A scalar was requested for an array field.
    ShapeMismatch {
        /// The field that was looked up.
        name: String,
        /// Element count recorded in the layout.
        count: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField { name } => write!(f, "duplicate field '{name}'"),
            Self::EmptyArray { name } => write!(f, "array field '{name}' has zero elements"),
            Self::NoFields => write!(f, "layout has no fields"),
            Self::SizeOverflow { name } => {
                write!(f, "record size overflows usize at field '{name}'")
            }
            Self::UnknownField { name } => write!(f, "unknown field '{name}'"),
            Self::KindMismatch {
                name,
                declared,
                requested,
            } => write!(
                f,
                "field '{name}' is declared as {declared}, requested as {requested}"
            ),
            Self::ShapeMismatch { name, count } => {
                write!(f, "field '{name}' has {count} elements; wrong shape requested")
            }
        }
    }
}

impl Error for LayoutError {}
