//! Data model types for panel cutting.

mod piece;
mod placed;
mod rect;
mod sheet;

pub use piece::{expand_requests, Piece, PieceRequest};
pub use placed::PlacedPiece;
pub use rect::Rect;
pub use sheet::{Sheet, SheetSummary};
