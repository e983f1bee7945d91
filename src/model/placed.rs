//! A piece positioned on a sheet.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{Piece, Rect};

/// A piece positioned on a sheet, in sheet-local millimetres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedPiece {
    /// The piece being cut.
    pub piece: Piece,
    /// X origin position on sheet.
    pub x: i64,
    /// Y origin position on sheet.
    pub y: i64,
    /// Effective width (the piece height when rotated).
    pub width: i64,
    /// Effective height (the piece width when rotated).
    pub height: i64,
    /// Whether the piece is turned by 90 degrees.
    pub rotated: bool,
}

impl PlacedPiece {
    /// Place a piece at the given position, turned if `rotated`.
    pub fn new(piece: Piece, x: i64, y: i64, rotated: bool) -> Self {
        let (width, height) = if rotated {
            (piece.height, piece.width)
        } else {
            (piece.width, piece.height)
        };
        Self {
            piece,
            x,
            y,
            width,
            height,
            rotated,
        }
    }

    pub fn name(&self) -> &str {
        &self.piece.name
    }

    /// Footprint without kerf.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Get the right edge X coordinate.
    pub fn x_max(&self) -> i64 {
        self.x + self.width
    }

    /// Get the top edge Y coordinate.
    pub fn y_max(&self) -> i64 {
        self.y + self.height
    }
}

/// Flat layout record: piece identity next to its position and effective size.
impl Serialize for PlacedPiece {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PlacedPiece", 8)?;
        state.serialize_field("id", &self.piece.id)?;
        state.serialize_field("request", &self.piece.request)?;
        state.serialize_field("name", &self.piece.name)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("rotated", &self.rotated)?;
        state.end()
    }
}
