//! Geometric predicates shared by the packer and the interactive editor.
//!
//! Every piece reserves `kerf` millimetres of blade clearance along its
//! trailing edges (right and top). Two pieces are in conflict when these
//! grown footprints intersect. The same rule applies whether a piece is
//! placed automatically or moved by hand.

use crate::model::{Rect, Sheet};

/// Check that a rectangle lies fully within `[0, sheet_w] x [0, sheet_h]`.
pub fn bounds_check(sheet: &Sheet, x: i64, y: i64, w: i64, h: i64) -> bool {
    within_bounds(sheet.sheet_w(), sheet.sheet_h(), x, y, w, h)
}

/// Bounds test against explicit sheet dimensions.
pub fn within_bounds(sheet_w: i64, sheet_h: i64, x: i64, y: i64, w: i64, h: i64) -> bool {
    x >= 0 && y >= 0 && w > 0 && h > 0 && x + w <= sheet_w && y + h <= sheet_h
}

/// Grow a rectangle by `kerf` on its trailing edges.
pub fn inflate(rect: &Rect, kerf: i64) -> Rect {
    Rect::new(rect.x, rect.y, rect.width + kerf, rect.height + kerf)
}

/// Kerf-grown footprint of an in-bounds rectangle, clipped at the stock edge.
///
/// Clipping never changes the outcome of [`overlaps`] for in-bounds pieces,
/// since both rectangles start inside the sheet.
pub fn kerf_footprint(sheet_w: i64, sheet_h: i64, kerf: i64, rect: &Rect) -> Rect {
    let width = (rect.width + kerf).min((sheet_w - rect.x).max(rect.width));
    let height = (rect.height + kerf).min((sheet_h - rect.y).max(rect.height));
    Rect::new(rect.x, rect.y, width, height)
}

/// Check whether two pieces conflict once both are grown by `kerf`.
///
/// Pieces that merely touch after inflation do not overlap.
pub fn overlaps(a: &Rect, b: &Rect, kerf: i64) -> bool {
    inflate(a, kerf).intersects(&inflate(b, kerf))
}

/// Check a candidate footprint against the sheet bounds and every placed
/// piece except `exclude` (the piece being moved, if any).
pub fn is_valid_placement(
    sheet: &Sheet,
    exclude: Option<usize>,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
) -> bool {
    if !bounds_check(sheet, x, y, w, h) {
        return false;
    }

    let candidate = Rect::new(x, y, w, h);
    sheet
        .pieces()
        .iter()
        .enumerate()
        .filter(|(idx, _)| Some(*idx) != exclude)
        .all(|(_, other)| !overlaps(&candidate, &other.rect(), sheet.kerf()))
}

/// Round `value` to the nearest multiple of `step`, halves away from zero.
///
/// A step of 1 or less leaves the value unchanged.
pub fn snap(value: i64, step: i64) -> i64 {
    if step <= 1 {
        return value;
    }
    let mut quotient = value / step;
    let remainder = value % step;
    if remainder.abs() >= step - remainder.abs() {
        quotient += value.signum();
    }
    quotient.saturating_mul(step)
}
