//! Configuration constants and settings for the optimizer.

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::error::{CutError, Result};
use crate::packing::Strategy;

/// Default stock sheet width in mm.
pub const DEFAULT_SHEET_WIDTH: i64 = 2800;

/// Default stock sheet height in mm.
pub const DEFAULT_SHEET_HEIGHT: i64 = 2070;

/// Default saw blade kerf in mm.
pub const DEFAULT_KERF: i64 = 3;

/// Default number of multi-start attempts.
pub const DEFAULT_ATTEMPTS: i64 = 50;

/// Largest accepted sheet or piece dimension in mm.
pub const MAX_DIMENSION: i64 = 1_000_000;

/// Largest accepted number of expanded pieces.
pub const MAX_PIECES: i64 = 100_000;

/// Optimizer configuration.
///
/// Deserializes from the settings of a job file. Missing keys take their
/// defaults, and the numeric settings may be written as numbers or as
/// numeric text (`"sheet_w": "2800"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CutConfig {
    /// Stock sheet width.
    #[serde(deserialize_with = "number_or_text")]
    pub sheet_w: i64,
    /// Stock sheet height.
    #[serde(deserialize_with = "number_or_text")]
    pub sheet_h: i64,
    /// Blade kerf reserved on the trailing edges of each piece.
    #[serde(deserialize_with = "number_or_text")]
    pub kerf: i64,
    /// Whether pieces may be turned by 90 degrees.
    #[serde(alias = "rot_allowed")]
    pub allow_rotation: bool,
    /// Placement scoring heuristic.
    pub strategy: Strategy,
    /// Number of shuffled orderings to try.
    #[serde(deserialize_with = "number_or_text")]
    pub attempts: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JobNumber {
    Int(i64),
    Text(String),
}

fn number_or_text<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match JobNumber::deserialize(deserializer)? {
        JobNumber::Int(value) => Ok(value),
        JobNumber::Text(text) => text.trim().parse().map_err(|_| {
            de::Error::custom(format!("expected a whole number, got \"{}\"", text))
        }),
    }
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            sheet_w: DEFAULT_SHEET_WIDTH,
            sheet_h: DEFAULT_SHEET_HEIGHT,
            kerf: DEFAULT_KERF,
            allow_rotation: true,
            strategy: Strategy::default(),
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl CutConfig {
    /// Create a configuration for the given sheet size with default settings.
    pub fn new(sheet_w: i64, sheet_h: i64) -> Self {
        Self {
            sheet_w,
            sheet_h,
            ..Default::default()
        }
    }

    /// Set the kerf.
    pub fn with_kerf(mut self, kerf: i64) -> Self {
        self.kerf = kerf;
        self
    }

    /// Allow or forbid rotation.
    pub fn with_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    /// Set the placement strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the number of attempts.
    pub fn with_attempts(mut self, attempts: i64) -> Self {
        self.attempts = attempts;
        self
    }

    /// Check every parameter, reporting the first offending one.
    pub fn validate(&self) -> Result<()> {
        check_dimension("sheet_w", self.sheet_w)?;
        check_dimension("sheet_h", self.sheet_h)?;

        if self.kerf < 0 {
            return Err(CutError::invalid(
                "kerf",
                format!("must not be negative, got {}", self.kerf),
            ));
        }
        if self.kerf > MAX_DIMENSION {
            return Err(CutError::invalid(
                "kerf",
                format!("exceeds {} mm, got {}", MAX_DIMENSION, self.kerf),
            ));
        }

        if self.attempts <= 0 {
            return Err(CutError::invalid(
                "attempts",
                format!("must be positive, got {}", self.attempts),
            ));
        }

        Ok(())
    }
}

/// Check that a dimension is positive and within `MAX_DIMENSION`.
pub(crate) fn check_dimension(parameter: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(CutError::invalid(
            parameter,
            format!("must be positive, got {}", value),
        ));
    }
    if value > MAX_DIMENSION {
        return Err(CutError::invalid(
            parameter,
            format!("exceeds {} mm, got {}", MAX_DIMENSION, value),
        ));
    }
    Ok(())
}
