//! Sheet packing: strategies, free-space bookkeeping, and the search.

mod free_space;
mod optimizer;
mod packer;
mod result;
mod strategy;

pub use free_space::{FreeRectangle, FreeSpace};
pub use optimizer::{AttemptSeed, MultiStartOptimizer, SeedSource};
pub use packer::Packer;
pub use result::OptimizationResult;
pub use strategy::{Candidate, Strategy};
