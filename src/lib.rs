//! panel-cut - Cutting-stock optimizer for rectangular panels.
//!
//! Given a stock sheet size, a saw kerf and a list of requested rectangles,
//! the optimizer decides how many sheets are needed and where every piece
//! goes. Produced sheets can then be adjusted by hand through the [`edit`]
//! module, which enforces the same bounds and kerf clearance rules.
//!
//! # Example
//!
//! ```
//! use panel_cut::{optimize, CutConfig, PieceRequest, Strategy};
//!
//! let config = CutConfig::new(2800, 2070)
//!     .with_kerf(3)
//!     .with_strategy(Strategy::Bssf)
//!     .with_attempts(10);
//! let result = optimize(&config, &[PieceRequest::new(600, 400, 4)]).unwrap();
//! assert_eq!(result.sheet_count(), 1);
//! assert_eq!(result.used_area(), 960_000);
//! ```

use std::sync::atomic::AtomicBool;

pub mod config;
pub mod edit;
pub mod error;
pub mod model;
pub mod packing;
pub mod validation;

// Re-exports for convenience
pub use config::CutConfig;
pub use edit::{move_piece, piece_at, rotate_piece};
pub use error::{CutError, ErrorCode, Result};
pub use model::{expand_requests, Piece, PieceRequest, PlacedPiece, Rect, Sheet, SheetSummary};
pub use packing::{AttemptSeed, MultiStartOptimizer, OptimizationResult, SeedSource, Strategy};

/// Lay out the requested pieces on as few sheets as possible.
///
/// Attempt `i` shuffles the pieces with seed `i`, so the result is fully
/// determined by the inputs.
pub fn optimize(config: &CutConfig, requests: &[PieceRequest]) -> Result<OptimizationResult> {
    optimize_with(config, requests, &AttemptSeed::default(), None)
}

/// Like [`optimize`], with an explicit seed source and an optional cancel
/// flag checked between attempts.
///
/// Once cancelled, the best layout found so far is returned; if no attempt
/// has finished yet the call fails with [`CutError::Cancelled`].
pub fn optimize_with<S: SeedSource + Clone>(
    config: &CutConfig,
    requests: &[PieceRequest],
    seeds: &S,
    cancel: Option<&AtomicBool>,
) -> Result<OptimizationResult> {
    config.validate()?;
    let pieces = expand_requests(requests)?;

    let optimizer = MultiStartOptimizer::new(config).with_seeds(seeds.clone());
    match cancel {
        Some(flag) => optimizer.with_cancel(flag).run(&pieces),
        None => optimizer.run(&pieces),
    }
}
