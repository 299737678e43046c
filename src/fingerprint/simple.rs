//! Fingerprints for single outlines.
//!
//! Key layout, one token per control point in stored order:
//!
//! ```text
//! ax,ay,ix,iy,ox,oy,kind;ax,ay,...,kind|closed
//! ```

use super::precision::{write_quantized, Precision};
use super::Fingerprint;
use crate::document::SimpleShape;

/// Separates the seven fields of one control point.
pub const FIELD_SEPARATOR: char = ',';
/// Separates control point tokens.
pub const POINT_SEPARATOR: char = ';';
/// Separates the point list from the closed/open marker.
pub const CLOSURE_SEPARATOR: char = '|';

/// Canonical key of an outline at `precision`.
///
/// Returns the empty sentinel for an outline without control points.
#[must_use]
pub fn fingerprint_simple(shape: &SimpleShape, precision: Precision) -> Fingerprint {
    if shape.points.is_empty() {
        return Fingerprint::empty();
    }

    let mut key = String::with_capacity(shape.points.len() * 48);
    for (i, point) in shape.points.iter().enumerate() {
        if i > 0 {
            key.push(POINT_SEPARATOR);
        }
        let coords = [
            point.anchor.x,
            point.anchor.y,
            point.in_handle.x,
            point.in_handle.y,
            point.out_handle.x,
            point.out_handle.y,
        ];
        for value in coords {
            write_quantized(&mut key, value, precision);
            key.push(FIELD_SEPARATOR);
        }
        key.push_str(point.kind.tag());
    }

    key.push(CLOSURE_SEPARATOR);
    key.push_str(if shape.closed { "closed" } else { "open" });

    Fingerprint::from(key)
}
