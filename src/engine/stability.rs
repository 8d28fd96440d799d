//! Blocking-pair search over a matched instance.
//!
//! A doctor `d` and hospital `h` form a blocking pair when `d`
//! strictly prefers `h` to its current outcome and `h` would take `d`:
//! either `h` has a free slot and finds `d` acceptable, or `h` is full
//! and ranks `d` strictly better than its current worst assignee.
//! Within a tie the hospital is indifferent, so an equal rank never
//! blocks; that is what lets deferred acceptance keep the earlier
//! arrival without sacrificing stability.
//!
//! The search is exhaustive by design: every blocking pair is
//! reported, not just the first, so the report is usable as a
//! diagnostic for externally supplied matchings.

use std::fmt;

use crate::types::Instance;

/// A doctor/hospital pair that would defect together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingPair {
    /// The doctor that prefers the hospital to its current outcome
    pub doctor: u32,

    /// The hospital that would admit the doctor
    pub hospital: u32,
}

impl fmt::Display for BlockingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Blocking pair between doctor {} and hospital {}.",
            self.doctor, self.hospital
        )
    }
}

/// Outcome of a stability check: every blocking pair found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StabilityReport {
    blocking_pairs: Vec<BlockingPair>,
}

impl StabilityReport {
    /// Whether no blocking pair exists.
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.blocking_pairs.is_empty()
    }

    /// All blocking pairs, in doctor-then-preference order.
    #[inline]
    pub fn blocking_pairs(&self) -> &[BlockingPair] {
        &self.blocking_pairs
    }
}

/// Search the instance's current assignment state for blocking pairs.
///
/// For each doctor, every hospital strictly preferred to the doctor's
/// outcome is examined (the whole list when the doctor is unmatched).
/// The hospital's worst assignee is recomputed on the spot, never
/// taken from the cache, and the instance is not mutated.
///
/// # Example
///
/// ```
/// use hrmatch::{check_stability, Instance, MatchingEngine};
///
/// let mut instance = Instance::new(1, 1);
/// instance.set_hospital_capacity(1, 1);
/// instance.add_doctor_pref(1, 1);
/// instance.add_hospital_pref(1, 1, 1);
///
/// MatchingEngine::new().run(&mut instance);
/// assert!(check_stability(&instance).is_stable());
/// ```
pub fn check_stability(instance: &Instance) -> StabilityReport {
    let mut report = StabilityReport::default();

    for doctor in instance.doctors() {
        for &hospital_id in doctor.preference_list() {
            // Hospitals from the assignment onward are not preferred
            if doctor.assignment() == Some(hospital_id) {
                break;
            }
            let Some(hospital) = instance.hospital(hospital_id) else {
                continue;
            };
            let Some(rank) = hospital.rank_of(doctor.id()) else {
                continue;
            };

            let blocking = if hospital.num_assignees() < hospital.capacity() {
                // A free slot plus acceptability is enough to defect
                true
            } else {
                match hospital.worst_assignee() {
                    Some((_, worst_rank)) => rank < worst_rank,
                    None => false,
                }
            };

            if blocking {
                report.blocking_pairs.push(BlockingPair {
                    doctor: doctor.id(),
                    hospital: hospital_id,
                });
            }
        }
    }

    report
}

// ============================================================================
// Unit Tests
// ============================================================================
