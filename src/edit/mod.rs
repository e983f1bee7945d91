//! Interactive edits on produced sheets.

mod reposition;

pub use reposition::{move_piece, piece_at, rotate_piece};
