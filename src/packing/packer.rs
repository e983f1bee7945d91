//! Single greedy packing pass.

use tracing::{debug, trace};

use super::free_space::FreeSpace;
use super::result::OptimizationResult;
use super::strategy::{Candidate, Strategy};
use crate::config::CutConfig;
use crate::error::{CutError, Result};
use crate::model::{Piece, PlacedPiece, Rect, Sheet};

/// Assigns an ordered piece sequence to as many sheets as needed.
#[derive(Debug, Clone)]
pub struct Packer {
    sheet_w: i64,
    sheet_h: i64,
    kerf: i64,
    allow_rotation: bool,
    strategy: Strategy,
}

/// A sheet being filled, with its free-space bookkeeping.
struct OpenSheet {
    sheet: Sheet,
    space: FreeSpace,
}

impl OpenSheet {
    fn new(sheet_w: i64, sheet_h: i64, kerf: i64) -> Self {
        Self {
            sheet: Sheet::new(sheet_w, sheet_h, kerf),
            space: FreeSpace::new(sheet_w, sheet_h, kerf),
        }
    }

    fn place(&mut self, piece: &Piece, candidate: &Candidate) {
        let used: Rect =
            self.space
                .reserved(candidate.x, candidate.y, candidate.width, candidate.height);
        self.space.occupy(&used);
        self.sheet.push_unchecked(PlacedPiece::new(
            piece.clone(),
            candidate.x,
            candidate.y,
            candidate.rotated,
        ));
    }
}

impl Packer {
    /// Create a packer from a validated configuration.
    pub fn new(config: &CutConfig) -> Self {
        Self {
            sheet_w: config.sheet_w,
            sheet_h: config.sheet_h,
            kerf: config.kerf,
            allow_rotation: config.allow_rotation,
            strategy: config.strategy,
        }
    }

    /// Pack pieces in the given order.
    ///
    /// Each piece goes to the first open sheet, in creation order, that has
    /// room for it; otherwise a new sheet is opened. A piece that cannot fit
    /// an empty sheet aborts the pass with `OversizedPiece`.
    pub fn pack(&self, sequence: &[&Piece]) -> Result<OptimizationResult> {
        let mut open: Vec<OpenSheet> = Vec::new();

        for piece in sequence {
            if !piece.fits_sheet(self.sheet_w, self.sheet_h, self.allow_rotation) {
                return Err(CutError::OversizedPiece {
                    piece: piece.name.clone(),
                    width: piece.width,
                    height: piece.height,
                    sheet_w: self.sheet_w,
                    sheet_h: self.sheet_h,
                });
            }

            let mut placed = false;
            for (sheet_idx, target) in open.iter_mut().enumerate() {
                if let Some(candidate) =
                    self.strategy
                        .find_position(&target.space, piece, self.allow_rotation)
                {
                    trace!(
                        "Piece {} ({}) -> sheet {} at ({}, {}){}",
                        piece.id,
                        piece.name,
                        sheet_idx + 1,
                        candidate.x,
                        candidate.y,
                        if candidate.rotated { " rotated" } else { "" }
                    );
                    target.place(piece, &candidate);
                    placed = true;
                    break;
                }
            }

            if !placed {
                let mut fresh = OpenSheet::new(self.sheet_w, self.sheet_h, self.kerf);
                let candidate = self
                    .strategy
                    .find_position(&fresh.space, piece, self.allow_rotation)
                    .ok_or_else(|| CutError::InternalInconsistency {
                        sheet: open.len() + 1,
                        message: format!("piece {} does not fit an empty sheet", piece.name),
                    })?;
                trace!(
                    "Opening sheet {} for piece {} ({})",
                    open.len() + 1,
                    piece.id,
                    piece.name
                );
                fresh.place(piece, &candidate);
                open.push(fresh);
            }
        }

        debug!(
            "Packed {} pieces on {} sheet(s) with {}",
            sequence.len(),
            open.len(),
            self.strategy
        );

        Ok(OptimizationResult::new(
            open.into_iter().map(|o| o.sheet).collect(),
            0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{expand_requests, PieceRequest};
    use crate::validation::validate_sheet;

    fn create_config() -> CutConfig {
        CutConfig::new(1000, 500).with_kerf(0)
    }

    fn pack(config: &CutConfig, requests: &[PieceRequest]) -> Result<OptimizationResult> {
        let pieces = expand_requests(requests).unwrap();
        let sequence: Vec<&Piece> = pieces.iter().collect();
        Packer::new(config).pack(&sequence)
    }

    #[test]
    fn test_pack_single_piece_at_origin() {
        let result = pack(&create_config(), &[PieceRequest::new(300, 200, 1)]).unwrap();
        assert_eq!(result.sheet_count(), 1);
        let placed = &result.sheets[0].pieces()[0];
        assert_eq!((placed.x, placed.y, placed.rotated), (0, 0, false));
    }

    #[test]
    fn test_pack_exact_tiling_without_kerf() {
        let result = pack(&create_config(), &[PieceRequest::new(250, 250, 8)]).unwrap();
        assert_eq!(result.sheet_count(), 1);
        assert_eq!(result.sheets[0].used_area(), 500_000);
        assert!(validate_sheet(&result.sheets[0], 1).passed);
    }

    #[test]
    fn test_pack_kerf_forces_second_sheet() {
        // Two 500 x 500 pieces fill 1000 x 500 exactly, but kerf leaves no room
        // for the second one.
        let config = create_config().with_kerf(3).with_rotation(false);
        let result = pack(&config, &[PieceRequest::new(500, 500, 2)]).unwrap();
        assert_eq!(result.sheet_count(), 2);

        let config = create_config().with_kerf(3);
        let result = pack(&config, &[PieceRequest::new(497, 500, 2)]).unwrap();
        assert_eq!(result.sheet_count(), 1);
        assert_eq!(result.sheets[0].pieces()[1].x, 500);
    }

    #[test]
    fn test_pack_opens_new_sheet_when_full() {
        let result = pack(&create_config(), &[PieceRequest::new(1000, 500, 3)]).unwrap();
        assert_eq!(result.sheet_count(), 3);
        for sheet in &result.sheets {
            assert_eq!(sheet.len(), 1);
        }
    }

    #[test]
    fn test_pack_fills_earlier_sheet_first() {
        let pieces = expand_requests(&[
            PieceRequest::new(800, 500, 2),
            PieceRequest::new(200, 500, 1),
        ])
        .unwrap();
        let sequence: Vec<&Piece> = pieces.iter().collect();
        let result = Packer::new(&create_config().with_rotation(false))
            .pack(&sequence)
            .unwrap();
        assert_eq!(result.sheet_count(), 2);
        assert_eq!(result.sheets[0].len(), 2);
        assert_eq!(result.sheets[0].pieces()[1].piece.id, 2);
    }

    #[test]
    fn test_pack_rotates_when_needed() {
        let result = pack(&create_config(), &[PieceRequest::new(400, 900, 1)]).unwrap();
        let placed = &result.sheets[0].pieces()[0];
        assert!(placed.rotated);
        assert_eq!((placed.width, placed.height), (900, 400));
    }

    #[test]
    fn test_pack_oversized_piece() {
        let config = create_config().with_rotation(false);
        match pack(&config, &[PieceRequest::new(400, 900, 1)]) {
            Err(CutError::OversizedPiece { piece, .. }) => assert_eq!(piece, "400x900"),
            other => panic!("Expected OversizedPiece, got {:?}", other),
        }
    }

    #[test]
    fn test_pack_oversized_piece_aborts_after_others() {
        let result = pack(
            &create_config(),
            &[PieceRequest::new(100, 100, 2), PieceRequest::new(1200, 100, 1)],
        );
        assert!(matches!(result, Err(CutError::OversizedPiece { .. })));
    }
}
