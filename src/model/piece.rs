//! Requested pieces and their expansion into individual units.

use serde::{Deserialize, Serialize};

use crate::config::{check_dimension, MAX_PIECES};
use crate::error::{CutError, Result};

/// One input line: a rectangle size and how many copies to cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRequest {
    pub width: i64,
    pub height: i64,
    pub quantity: i64,
}

impl PieceRequest {
    /// Create a new request.
    pub fn new(width: i64, height: i64, quantity: i64) -> Self {
        Self {
            width,
            height,
            quantity,
        }
    }
}

impl From<(i64, i64, i64)> for PieceRequest {
    fn from((width, height, quantity): (i64, i64, i64)) -> Self {
        Self::new(width, height, quantity)
    }
}

/// A single rectangle to be cut, expanded from a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Expansion ordinal, unique within one optimization run.
    pub id: usize,
    /// Index of the request this piece came from.
    pub request: usize,
    /// Display label.
    pub name: String,
    /// Requested width.
    pub width: i64,
    /// Requested height.
    pub height: i64,
}

impl Piece {
    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Check if the piece fits a sheet, optionally turned by 90 degrees.
    pub fn fits_sheet(&self, sheet_w: i64, sheet_h: i64, allow_rotation: bool) -> bool {
        (self.width <= sheet_w && self.height <= sheet_h)
            || (allow_rotation && self.height <= sheet_w && self.width <= sheet_h)
    }

    /// Whether turning the piece changes its footprint.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// Validate requests and expand them into individual pieces.
///
/// Pieces are numbered in request order, copies in order.
pub fn expand_requests(requests: &[PieceRequest]) -> Result<Vec<Piece>> {
    if requests.is_empty() {
        return Err(CutError::EmptyRequest);
    }

    let mut total: i64 = 0;
    for (idx, request) in requests.iter().enumerate() {
        check_dimension(&format!("pieces[{}].width", idx), request.width)?;
        check_dimension(&format!("pieces[{}].height", idx), request.height)?;
        if request.quantity <= 0 {
            return Err(CutError::invalid(
                format!("pieces[{}].quantity", idx),
                format!("must be positive, got {}", request.quantity),
            ));
        }
        total = total.saturating_add(request.quantity);
        if total > MAX_PIECES {
            return Err(CutError::invalid(
                "pieces",
                format!("more than {} pieces requested", MAX_PIECES),
            ));
        }
    }

    let mut pieces = Vec::with_capacity(total as usize);
    for (request_idx, request) in requests.iter().enumerate() {
        for _ in 0..request.quantity {
            pieces.push(Piece {
                id: pieces.len(),
                request: request_idx,
                name: format!("{}x{}", request.width, request.height),
                width: request.width,
                height: request.height,
            });
        }
    }

    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_requests_numbers_pieces_in_order() {
        let pieces = expand_requests(&[
            PieceRequest::new(600, 400, 2),
            PieceRequest::new(300, 300, 1),
        ])
        .unwrap();

        assert_eq!(pieces.len(), 3);
        assert_eq!(
            pieces.iter().map(|p| (p.id, p.request)).collect::<Vec<_>>(),
            vec![(0, 0), (1, 0), (2, 1)]
        );
        assert_eq!(pieces[0].name, "600x400");
        assert_eq!(pieces[2].name, "300x300");
    }

    #[test]
    fn test_expand_requests_empty() {
        match expand_requests(&[]) {
            Err(CutError::EmptyRequest) => {}
            other => panic!("Expected EmptyRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_expand_requests_rejects_zero_quantity() {
        let err = expand_requests(&[PieceRequest::new(100, 100, 0)]).unwrap_err();
        match err {
            CutError::InvalidInput { parameter, .. } => {
                assert_eq!(parameter, "pieces[0].quantity")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_expand_requests_rejects_negative_size() {
        assert!(expand_requests(&[PieceRequest::new(-100, 100, 1)]).is_err());
        assert!(expand_requests(&[PieceRequest::new(100, 0, 1)]).is_err());
    }

    #[test]
    fn test_expand_requests_rejects_too_many_pieces() {
        let err = expand_requests(&[PieceRequest::new(10, 10, MAX_PIECES + 1)]).unwrap_err();
        assert!(err.to_string().contains("pieces"));
    }

    #[test]
    fn test_fits_sheet() {
        let piece = expand_requests(&[(3000, 100, 1).into()]).unwrap().remove(0);
        assert!(!piece.fits_sheet(2800, 2070, false));
        assert!(!piece.fits_sheet(2800, 2070, true));
        assert!(piece.fits_sheet(3100, 2070, false));
        assert!(piece.fits_sheet(2070, 3100, true));

        let tall = expand_requests(&[(100, 2500, 1).into()]).unwrap().remove(0);
        assert!(!tall.fits_sheet(2800, 2070, false));
        assert!(tall.fits_sheet(2800, 2070, true));
    }
}
