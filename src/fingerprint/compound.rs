//! Fingerprints for compound shapes.
//!
//! Sub-path draw order does not change how a compound shape fills, so the
//! sub-keys are sorted before joining. Point order inside each sub-path still
//! matters, exactly as for simple shapes.

use super::precision::Precision;
use super::simple::fingerprint_simple;
use super::Fingerprint;
use crate::document::SimpleShape;

/// Separates sorted sub-path keys.
pub const SUBPATH_SEPARATOR: char = '#';

/// Canonical key of a compound shape made of `sub_shapes`.
///
/// Returns the empty sentinel when there are no sub-shapes. Sub-shapes without
/// control points still contribute an (empty) sub-key.
#[must_use]
pub fn fingerprint_compound<'a>(
    sub_shapes: impl IntoIterator<Item = &'a SimpleShape>,
    precision: Precision,
) -> Fingerprint {
    let mut keys: Vec<Fingerprint> = sub_shapes
        .into_iter()
        .map(|shape| fingerprint_simple(shape, precision))
        .collect();

    if keys.is_empty() {
        return Fingerprint::empty();
    }

    keys.sort_unstable();

    let mut joined = String::with_capacity(keys.iter().map(|k| k.as_str().len() + 1).sum());
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            joined.push(SUBPATH_SEPARATOR);
        }
        joined.push_str(key.as_str());
    }
    Fingerprint::from(joined)
}
