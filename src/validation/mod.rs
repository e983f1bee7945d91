//! Geometric validity rules and layout audits.

pub mod geometry;
mod validate;

pub use geometry::{bounds_check, is_valid_placement, overlaps, snap};
pub use validate::{
    ensure_consistent, validate_conservation, validate_piece_layout, validate_sheet,
    ValidationResult,
};
