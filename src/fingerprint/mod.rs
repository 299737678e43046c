//! Canonical geometry keys.
//!
//! This module provides functionality for:
//! - Quantizing coordinates to a fixed decimal precision
//! - Fingerprinting simple outlines (point order matters)
//! - Fingerprinting compound shapes (sub-path order does not)
//!
//! Equal keys mean "duplicate" at the configured precision. The empty key is
//! the "no geometry" sentinel and never takes part in grouping.
//!
//! # Example
//!
//! ```
//! use pathdedup::document::SimpleShape;
//! use pathdedup::fingerprint::{fingerprint_simple, Precision};
//!
//! let a = SimpleShape::rect(0.0, 0.0, 10.0, 10.0);
//! let b = SimpleShape::rect(0.01, 0.0, 10.0, 10.0);
//!
//! let precision = Precision::default();
//! assert_eq!(fingerprint_simple(&a, precision), fingerprint_simple(&b, precision));
//! ```

pub mod compound;
pub mod precision;
pub mod simple;

use serde::{Deserialize, Serialize};

pub use compound::fingerprint_compound;
pub use precision::{Precision, PrecisionError, DEFAULT_PRECISION, MAX_PRECISION};
pub use simple::fingerprint_simple;

use crate::document::{PageItem, ShapeKind};

/// Canonical key for a shape's geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The "no geometry" sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether this is the "no geometry" sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key for a page item of the given kind.
    ///
    /// Items that are not of `kind` get the empty sentinel.
    #[must_use]
    pub fn of_item(item: &PageItem, kind: ShapeKind, precision: Precision) -> Self {
        match (kind, item.shape_kind()) {
            (ShapeKind::Simple, Some(ShapeKind::Simple)) => item
                .as_simple()
                .map_or_else(Self::empty, |shape| fingerprint_simple(shape, precision)),
            (ShapeKind::Compound, Some(ShapeKind::Compound)) => {
                fingerprint_compound(item.sub_shapes(), precision)
            }
            _ => Self::empty(),
        }
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
