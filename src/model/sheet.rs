//! Sheet - one stock panel and the pieces cut from it.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{PlacedPiece, Rect};
use crate::validation::geometry;

/// One stock sheet with its placed pieces in insertion order.
///
/// Pieces never overlap once their trailing edges are grown by `kerf`, and
/// every piece lies inside the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    sheet_w: i64,
    sheet_h: i64,
    kerf: i64,
    pieces: Vec<PlacedPiece>,
}

/// Per-sheet figures for reports.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SheetSummary {
    /// 1-based sheet number.
    pub index: usize,
    pub sheet_w: i64,
    pub sheet_h: i64,
    pub piece_count: usize,
    pub used_area: i64,
    /// Stock area not covered by pieces.
    pub scrap: i64,
    /// Used area as a percentage of the stock area.
    pub utilization_percent: f64,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(sheet_w: i64, sheet_h: i64, kerf: i64) -> Self {
        Self {
            sheet_w,
            sheet_h,
            kerf,
            pieces: Vec::new(),
        }
    }

    pub fn sheet_w(&self) -> i64 {
        self.sheet_w
    }

    pub fn sheet_h(&self) -> i64 {
        self.sheet_h
    }

    pub fn kerf(&self) -> i64 {
        self.kerf
    }

    /// Placed pieces in insertion order.
    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    pub fn piece(&self, index: usize) -> Option<&PlacedPiece> {
        self.pieces.get(index)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The whole sheet as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.sheet_w, self.sheet_h)
    }

    pub fn total_area(&self) -> i64 {
        self.sheet_w * self.sheet_h
    }

    /// Area covered by pieces, kerf excluded.
    pub fn used_area(&self) -> i64 {
        self.pieces.iter().map(PlacedPiece::area).sum()
    }

    pub fn scrap(&self) -> i64 {
        self.total_area() - self.used_area()
    }

    /// Used area divided by stock area, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        let total = self.total_area();
        if total == 0 {
            return 0.0;
        }
        self.used_area() as f64 / total as f64
    }

    /// Summary figures for this sheet, numbered `index` (1-based).
    pub fn summary(&self, index: usize) -> SheetSummary {
        SheetSummary {
            index,
            sheet_w: self.sheet_w,
            sheet_h: self.sheet_h,
            piece_count: self.pieces.len(),
            used_area: self.used_area(),
            scrap: self.scrap(),
            utilization_percent: self.utilization() * 100.0,
        }
    }

    /// Add a piece if the placement is valid; returns whether it was added.
    pub fn insert(&mut self, placed: PlacedPiece) -> bool {
        if !geometry::is_valid_placement(
            self,
            None,
            placed.x,
            placed.y,
            placed.width,
            placed.height,
        ) {
            return false;
        }
        self.pieces.push(placed);
        true
    }

    /// Add a piece whose placement the caller already checked.
    pub(crate) fn push_unchecked(&mut self, placed: PlacedPiece) {
        self.pieces.push(placed);
    }

    pub(crate) fn piece_mut(&mut self, index: usize) -> Option<&mut PlacedPiece> {
        self.pieces.get_mut(index)
    }
}

impl Serialize for Sheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Sheet", 5)?;
        state.serialize_field("sheet_w", &self.sheet_w)?;
        state.serialize_field("sheet_h", &self.sheet_h)?;
        state.serialize_field("kerf", &self.kerf)?;
        state.serialize_field("used_area", &self.used_area())?;
        state.serialize_field("pieces", &self.pieces)?;
        state.end()
    }
}
