//! Consistency audit for produced layouts.

use std::collections::HashMap;

use tracing::{error, warn};

use super::geometry::{overlaps, within_bounds};
use crate::error::{CutError, Result};
use crate::model::{Piece, Sheet};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }
}

/// Validate a single sheet: bounds containment and kerf clearance.
pub fn validate_sheet(sheet: &Sheet, sheet_num: usize) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if sheet.sheet_w() <= 0 || sheet.sheet_h() <= 0 {
        result.add_error(format!(
            "Sheet {}: Invalid sheet dimensions ({}x{})",
            sheet_num,
            sheet.sheet_w(),
            sheet.sheet_h()
        ));
    }

    if sheet.is_empty() {
        result.add_warning(format!("Sheet {}: No pieces placed", sheet_num));
    }

    for (piece_idx, placed) in sheet.pieces().iter().enumerate() {
        if !within_bounds(
            sheet.sheet_w(),
            sheet.sheet_h(),
            placed.x,
            placed.y,
            placed.width,
            placed.height,
        ) {
            result.add_error(format!(
                "Sheet {}, Piece {} ({}): {}x{} at ({}, {}) extends beyond sheet bounds",
                sheet_num,
                piece_idx + 1,
                placed.name(),
                placed.width,
                placed.height,
                placed.x,
                placed.y
            ));
        }
    }

    for (i, j) in validate_piece_layout(sheet) {
        result.add_error(format!(
            "Sheet {}: Pieces {} and {} overlap (kerf {})",
            sheet_num,
            i + 1,
            j + 1,
            sheet.kerf()
        ));
    }

    result
}

/// Find every pair of pieces whose kerf-grown footprints overlap.
pub fn validate_piece_layout(sheet: &Sheet) -> Vec<(usize, usize)> {
    let mut conflicts = Vec::new();
    let pieces = sheet.pieces();

    for i in 0..pieces.len() {
        for j in i + 1..pieces.len() {
            if overlaps(&pieces[i].rect(), &pieces[j].rect(), sheet.kerf()) {
                conflicts.push((i, j));
            }
        }
    }

    conflicts
}

/// Check that every requested piece was placed exactly once, at its own size.
pub fn validate_conservation(sheets: &[Sheet], pieces: &[Piece]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let expected: HashMap<usize, &Piece> = pieces.iter().map(|p| (p.id, p)).collect();
    let mut seen: HashMap<usize, usize> = HashMap::new();

    for (sheet_idx, sheet) in sheets.iter().enumerate() {
        for placed in sheet.pieces() {
            let id = placed.piece.id;
            *seen.entry(id).or_default() += 1;

            let Some(requested) = expected.get(&id) else {
                result.add_error(format!(
                    "Sheet {}: Piece id {} was never requested",
                    sheet_idx + 1,
                    id
                ));
                continue;
            };

            let (w, h) = if placed.rotated {
                (requested.height, requested.width)
            } else {
                (requested.width, requested.height)
            };
            if placed.width != w || placed.height != h {
                result.add_error(format!(
                    "Sheet {}: Piece {} placed as {}x{}, requested {}x{}",
                    sheet_idx + 1,
                    requested.name,
                    placed.width,
                    placed.height,
                    requested.width,
                    requested.height
                ));
            }
        }
    }

    for piece in pieces {
        match seen.get(&piece.id).copied().unwrap_or(0) {
            1 => {}
            0 => result.add_error(format!("Piece {} ({}) was not placed", piece.id, piece.name)),
            n => result.add_error(format!(
                "Piece {} ({}) was placed {} times",
                piece.id, piece.name, n
            )),
        }
    }

    result
}

/// Audit a finished layout, failing with `InternalInconsistency` on any
/// bounds, overlap, or conservation violation.
pub fn ensure_consistent(sheets: &[Sheet], pieces: &[Piece]) -> Result<()> {
    for (idx, sheet) in sheets.iter().enumerate() {
        let result = validate_sheet(sheet, idx + 1);
        for warning in &result.warnings {
            warn!("{}", warning);
        }
        if !result.passed {
            let message = result.errors.join("; ");
            error!("{}", message);
            return Err(CutError::InternalInconsistency {
                sheet: idx + 1,
                message,
            });
        }
    }

    let result = validate_conservation(sheets, pieces);
    if !result.passed {
        let message = result.errors.join("; ");
        error!("{}", message);
        return Err(CutError::InternalInconsistency { sheet: 0, message });
    }

    Ok(())
}
