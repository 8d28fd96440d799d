//! # hrmatch
//!
//! Stable matching for the Hospitals/Residents problem (HR) with
//! hospital-side ties.
//!
//! ## Architecture
//!
//! - **Types**: the entity model (Doctor, Hospital, Instance)
//! - **Engine**: resident-oriented Gale-Shapley (deferred acceptance)
//!   plus validity and stability verification
//! - **Parse**: instance and matching file formats, including the
//!   tie-bracket grammar
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical instances always produce identical
//!    matchings; ties are broken by arrival order, never by iteration
//!    order of a hash container
//! 2. **Ids, not pointers**: entities live in slab arenas owned by
//!    the instance and refer to each other by dense 1-based id
//! 3. **Reports, not printing**: the engine and checks return
//!    structured diagnostics; only the binary talks to the console
//!
//! ## Example
//!
//! ```
//! use hrmatch::{check_stability, check_validity, parse_instance, MatchingEngine};
//!
//! let input = "\
//! 2
//! 2
//! 1: 1 2
//! 2: 1 2
//! 1: 1: 1 2
//! 2: 1: 1 2
//! ";
//! let mut instance = parse_instance(input).unwrap();
//!
//! let stats = MatchingEngine::new().run(&mut instance);
//!
//! assert_eq!(stats.matched, 2);
//! assert!(check_validity(&instance).is_valid());
//! assert!(check_stability(&instance).is_stable());
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Entity model: Doctor, Hospital, Instance
pub mod types;

/// Matching engine: deferred acceptance, validity, stability
pub mod engine;

/// File format parsers
pub mod parse;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::{
    check_stability, check_validity, BlockingPair, MatchStats, MatchingEngine, StabilityReport,
    ValidityReport, Violation,
};
pub use parse::{parse_instance, parse_matching, ParseError};
pub use types::{Doctor, Hospital, Instance};
