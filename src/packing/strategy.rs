//! Placement scoring heuristics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::free_space::FreeSpace;
use crate::error::CutError;
use crate::model::{Piece, Rect};

/// How a free rectangle is scored for a candidate piece. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    /// Best Short Side Fit: minimize the shorter leftover side.
    #[default]
    Bssf,
    /// Best Long Side Fit: minimize the longer leftover side.
    Blsf,
    /// Best Area Fit: minimize the leftover area.
    Baf,
}

/// Where a piece would go on one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Index of the free rectangle the piece is anchored in.
    pub free_index: usize,
    pub x: i64,
    pub y: i64,
    /// Effective width.
    pub width: i64,
    /// Effective height.
    pub height: i64,
    pub rotated: bool,
    /// Strategy score; lower is better.
    pub score: i64,
}

impl Candidate {
    fn key(&self) -> (i64, i64, i64, usize) {
        (self.score, self.y, self.x, self.free_index)
    }
}

impl Strategy {
    /// All strategies, in canonical order.
    pub const ALL: [Strategy; 3] = [Strategy::Bssf, Strategy::Blsf, Strategy::Baf];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Bssf => "BSSF",
            Strategy::Blsf => "BLSF",
            Strategy::Baf => "BAF",
        }
    }

    /// Score a reserved footprint of `used_w x used_h` corner-placed in `free`.
    pub fn score(&self, free: &Rect, used_w: i64, used_h: i64) -> i64 {
        let leftover_w = free.width - used_w;
        let leftover_h = free.height - used_h;
        match self {
            Strategy::Bssf => leftover_w.min(leftover_h),
            Strategy::Blsf => leftover_w.max(leftover_h),
            Strategy::Baf => free.area() - used_w * used_h,
        }
    }

    /// Find the best position for `piece` in the given free space.
    ///
    /// Within one orientation the lowest `(score, y, x, free index)` wins.
    /// When both orientations fit they are compared by score alone, and a
    /// tie keeps the piece unrotated.
    pub fn find_position(
        &self,
        space: &FreeSpace,
        piece: &Piece,
        allow_rotation: bool,
    ) -> Option<Candidate> {
        let upright = self.best_in_orientation(space, piece.width, piece.height, false);
        if !allow_rotation || piece.is_square() {
            return upright;
        }

        let turned = self.best_in_orientation(space, piece.height, piece.width, true);
        match (upright, turned) {
            (Some(u), Some(t)) if t.score < u.score => Some(t),
            (Some(u), _) => Some(u),
            (None, t) => t,
        }
    }

    fn best_in_orientation(
        &self,
        space: &FreeSpace,
        width: i64,
        height: i64,
        rotated: bool,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (free_index, free) in space.rects().iter().enumerate() {
            let used = space.reserved(free.x, free.y, width, height);
            if used.width > free.width || used.height > free.height {
                continue;
            }

            let candidate = Candidate {
                free_index,
                x: free.x,
                y: free.y,
                width,
                height,
                rotated,
                score: self.score(free, used.width, used.height),
            };

            if best.map_or(true, |b| candidate.key() < b.key()) {
                best = Some(candidate);
            }
        }

        best
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = CutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BSSF" => Ok(Strategy::Bssf),
            "BLSF" => Ok(Strategy::Blsf),
            "BAF" => Ok(Strategy::Baf),
            _ => Err(CutError::invalid(
                "strategy",
                format!("unknown strategy '{}', expected BSSF, BLSF or BAF", s),
            )),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = CutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.name().to_string()
    }
}
