//! Multi-start search over shuffled piece orderings.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::packer::Packer;
use super::result::OptimizationResult;
use crate::config::CutConfig;
use crate::error::{CutError, Result};
use crate::model::Piece;
use crate::validation::ensure_consistent;

/// Supplies an independent random source for each attempt.
pub trait SeedSource {
    type Rng: Rng;

    /// Random source for the attempt with the given index.
    fn rng_for_attempt(&self, attempt: usize) -> Self::Rng;
}

/// Seeds `StdRng` with `base + attempt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptSeed {
    pub base: u64,
}

impl AttemptSeed {
    pub fn new(base: u64) -> Self {
        Self { base }
    }
}

impl SeedSource for AttemptSeed {
    type Rng = StdRng;

    fn rng_for_attempt(&self, attempt: usize) -> StdRng {
        StdRng::seed_from_u64(self.base.wrapping_add(attempt as u64))
    }
}

/// Runs the packer over many shuffled orderings and keeps the best layout.
pub struct MultiStartOptimizer<'a, S: SeedSource = AttemptSeed> {
    config: &'a CutConfig,
    seeds: S,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> MultiStartOptimizer<'a, AttemptSeed> {
    /// Create an optimizer seeding attempt `i` with `i`.
    pub fn new(config: &'a CutConfig) -> Self {
        Self {
            config,
            seeds: AttemptSeed::default(),
            cancel: None,
        }
    }
}

impl<'a, S: SeedSource> MultiStartOptimizer<'a, S> {
    /// Replace the seed source.
    pub fn with_seeds<T: SeedSource>(self, seeds: T) -> MultiStartOptimizer<'a, T> {
        MultiStartOptimizer {
            config: self.config,
            seeds,
            cancel: self.cancel,
        }
    }

    /// Stop between attempts once `flag` is set.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Search for the layout using the fewest sheets.
    ///
    /// Ties go to higher utilization, then to the earlier attempt. The
    /// winning layout is audited before it is returned.
    pub fn run(&self, pieces: &[Piece]) -> Result<OptimizationResult> {
        self.config.validate()?;
        if pieces.is_empty() {
            return Err(CutError::EmptyRequest);
        }

        let packer = Packer::new(self.config);
        let attempts = self.config.attempts as usize;
        let mut best: Option<OptimizationResult> = None;

        for attempt in 0..attempts {
            if self.cancelled() {
                info!("Optimization cancelled after {} attempt(s)", attempt);
                break;
            }

            let mut order: Vec<&Piece> = pieces.iter().collect();
            let mut rng = self.seeds.rng_for_attempt(attempt);
            order.shuffle(&mut rng);

            let mut result = packer.pack(&order)?;
            result.attempt = attempt;
            debug!(
                "Attempt {}: {} sheet(s), utilization {:.1}%",
                attempt,
                result.sheet_count(),
                result.utilization() * 100.0
            );

            if best.as_ref().map_or(true, |b| result.is_better_than(b)) {
                best = Some(result);
            }
        }

        let best = best.ok_or(CutError::Cancelled)?;
        ensure_consistent(&best.sheets, pieces)?;

        info!(
            "Best layout from attempt {}: {} sheet(s), utilization {:.1}%",
            best.attempt,
            best.sheet_count(),
            best.utilization() * 100.0
        );

        Ok(best)
    }
}
