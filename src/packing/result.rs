//! Outcome of one packing attempt.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::{Sheet, SheetSummary};

/// The sheets produced by one attempt.
///
/// Results are ranked by sheet count (fewer is better), then by overall
/// utilization (higher is better).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationResult {
    /// Sheets in creation order.
    pub sheets: Vec<Sheet>,
    /// Index of the attempt that produced this layout.
    pub attempt: usize,
}

impl OptimizationResult {
    /// Create a result from the sheets of an attempt.
    pub fn new(sheets: Vec<Sheet>, attempt: usize) -> Self {
        Self { sheets, attempt }
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Number of placed pieces across all sheets.
    pub fn piece_count(&self) -> usize {
        self.sheets.iter().map(Sheet::len).sum()
    }

    pub fn used_area(&self) -> i64 {
        self.sheets.iter().map(Sheet::used_area).sum()
    }

    pub fn total_area(&self) -> i64 {
        self.sheets.iter().map(Sheet::total_area).sum()
    }

    pub fn scrap(&self) -> i64 {
        self.total_area() - self.used_area()
    }

    /// Overall utilization `Σused / Σtotal`, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        let total = self.total_area();
        if total == 0 {
            return 0.0;
        }
        self.used_area() as f64 / total as f64
    }

    /// Per-sheet report lines, numbered from 1.
    pub fn summaries(&self) -> Vec<SheetSummary> {
        self.sheets
            .iter()
            .enumerate()
            .map(|(idx, sheet)| sheet.summary(idx + 1))
            .collect()
    }

    /// Rank two results; `Ordering::Less` means `self` is better.
    ///
    /// Utilization is compared exactly by cross-multiplying areas.
    pub fn rank(&self, other: &OptimizationResult) -> Ordering {
        self.sheet_count()
            .cmp(&other.sheet_count())
            .then_with(|| {
                let mine = self.used_area() as i128 * other.total_area() as i128;
                let theirs = other.used_area() as i128 * self.total_area() as i128;
                theirs.cmp(&mine)
            })
    }

    /// Whether `self` ranks strictly ahead of `other`.
    pub fn is_better_than(&self, other: &OptimizationResult) -> bool {
        self.rank(other) == Ordering::Less
    }
}
