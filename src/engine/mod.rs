//! Matching engine: deferred acceptance plus verification.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: doctors are queued in id order and worst
//!    assignees are resolved by preference-list position, so the same
//!    instance always produces the same matching
//! 2. **Synchronous execution**: the run loop, validity check and
//!    stability check are sequential passes over the instance; there
//!    is exactly one writer at a time
//! 3. **Reports, not printing**: every check returns structured
//!    diagnostics and leaves rendering to the caller
//!
//! ## Pieces
//!
//! - [`MatchingEngine`]: resident-oriented Gale-Shapley with
//!   worst-assignee eviction under ties
//! - [`check_validity`]: acceptability and capacity verification
//! - [`check_stability`]: exhaustive blocking-pair search
//!
//! The checks work on any assignment state, whether the engine
//! produced it or a matching file supplied it.

pub mod matcher;
pub mod stability;
pub mod validity;

pub use matcher::{MatchStats, MatchingEngine};
pub use stability::{check_stability, BlockingPair, StabilityReport};
pub use validity::{check_validity, ValidityReport, Violation};
