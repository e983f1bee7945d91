//! Manual adjustment of pieces on a finished sheet.
//!
//! These operations model direct manipulation: an edit that would break the
//! layout is ignored rather than reported, and the piece keeps its last
//! valid state. Each returns whether the edit was applied.

use tracing::trace;

use crate::model::Sheet;
use crate::validation::geometry::{is_valid_placement, snap};

/// Move a piece towards `(target_x, target_y)`.
///
/// The target is clamped into the sheet, snapped to `snap_step` when given,
/// and clamped again. The move is applied only if the piece does not collide
/// with any other piece at the new position.
pub fn move_piece(
    sheet: &mut Sheet,
    index: usize,
    target_x: i64,
    target_y: i64,
    snap_step: Option<i64>,
) -> bool {
    let Some(placed) = sheet.piece(index) else {
        return false;
    };
    let (w, h) = (placed.width, placed.height);
    let max_x = sheet.sheet_w() - w;
    let max_y = sheet.sheet_h() - h;

    let mut x = target_x.clamp(0, max_x.max(0));
    let mut y = target_y.clamp(0, max_y.max(0));

    if let Some(step) = snap_step {
        x = snap(x, step).clamp(0, max_x.max(0));
        y = snap(y, step).clamp(0, max_y.max(0));
    }

    if !is_valid_placement(sheet, Some(index), x, y, w, h) {
        trace!("Move of piece {} to ({}, {}) rejected", index, x, y);
        return false;
    }

    if let Some(placed) = sheet.piece_mut(index) {
        placed.x = x;
        placed.y = y;
    }
    true
}

/// Turn a piece by 90 degrees in place.
///
/// The anchor is pulled back so the turned footprint stays on the sheet
/// where possible. Nothing changes if the result is out of bounds or
/// collides with another piece.
pub fn rotate_piece(sheet: &mut Sheet, index: usize) -> bool {
    let Some(placed) = sheet.piece(index) else {
        return false;
    };
    let (new_w, new_h) = (placed.height, placed.width);
    let x = placed.x.min(sheet.sheet_w() - new_w);
    let y = placed.y.min(sheet.sheet_h() - new_h);

    if !is_valid_placement(sheet, Some(index), x, y, new_w, new_h) {
        trace!("Rotation of piece {} rejected", index);
        return false;
    }

    if let Some(placed) = sheet.piece_mut(index) {
        placed.x = x;
        placed.y = y;
        placed.width = new_w;
        placed.height = new_h;
        placed.rotated = !placed.rotated;
    }
    true
}

/// Index of the topmost piece containing the point, borders included.
///
/// Later pieces are considered on top of earlier ones.
pub fn piece_at(sheet: &Sheet, x: i64, y: i64) -> Option<usize> {
    sheet
        .pieces()
        .iter()
        .rposition(|placed| placed.rect().contains_point(x, y))
}
