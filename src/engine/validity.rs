//! Matching validity check.
//!
//! A matching is valid when every assigned doctor is acceptable to
//! its hospital and no hospital holds more assignees than its
//! capacity. The check is a read-only scan over the instance and is
//! fail-fast per violation category: the first unacceptable pair
//! stops the acceptability scan, and the first overloaded hospital
//! stops the capacity scan.

use thiserror::Error;

use crate::types::Instance;

/// A single way a matching can be invalid.
///
/// Violations are diagnostics, not control-flow errors: the checks
/// collect them into a [`ValidityReport`] and the caller decides how
/// to render them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// A doctor is assigned to a hospital whose preference list does
    /// not contain it.
    #[error("Hospital {hospital} does not find doctor {doctor} acceptable!")]
    UnacceptablePair {
        /// The assigned doctor
        doctor: u32,
        /// The hospital that does not list it
        hospital: u32,
    },

    /// A hospital ended up with more assignees than its capacity.
    #[error("Hospital {hospital} is oversubscribed ({assigned} assigned, capacity {capacity})!")]
    Oversubscribed {
        /// The overloaded hospital
        hospital: u32,
        /// Number of doctors assigned to it
        assigned: usize,
        /// Its capacity
        capacity: usize,
    },

    /// A supplied matching assigned the same doctor more than once.
    #[error("Doctor {doctor} is multiply assigned!")]
    DuplicateAssignment {
        /// The doctor appearing in more than one pair
        doctor: u32,
    },
}

/// Outcome of a validity check: zero or more violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityReport {
    violations: Vec<Violation>,
}

impl ValidityReport {
    /// Whether the matching passed every check.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The recorded violations, in detection order.
    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Check the instance's current assignment state for validity.
///
/// Hospital loads are derived from the doctors' assignment fields, so
/// the verdict does not depend on assignee-set bookkeeping and
/// re-running the check on unchanged state always yields the same
/// report.
///
/// # Example
///
/// ```
/// use hrmatch::{check_validity, Instance, MatchingEngine};
///
/// let mut instance = Instance::new(1, 1);
/// instance.set_hospital_capacity(1, 1);
/// instance.add_doctor_pref(1, 1);
/// instance.add_hospital_pref(1, 1, 1);
///
/// MatchingEngine::new().run(&mut instance);
/// assert!(check_validity(&instance).is_valid());
/// ```
pub fn check_validity(instance: &Instance) -> ValidityReport {
    let mut report = ValidityReport::default();
    let mut load = vec![0usize; instance.num_hospitals()];

    for doctor in instance.doctors() {
        let Some(hospital_id) = doctor.assignment() else {
            continue;
        };
        let Some(hospital) = instance.hospital(hospital_id) else {
            continue;
        };
        if hospital.rank_of(doctor.id()).is_none() {
            report.push(Violation::UnacceptablePair {
                doctor: doctor.id(),
                hospital: hospital_id,
            });
            // An illegal assignee makes load accounting meaningless
            return report;
        }
        load[(hospital_id - 1) as usize] += 1;
    }

    for hospital in instance.hospitals() {
        let assigned = load[(hospital.id() - 1) as usize];
        if assigned > hospital.capacity() {
            report.push(Violation::Oversubscribed {
                hospital: hospital.id(),
                assigned,
                capacity: hospital.capacity(),
            });
            break;
        }
    }

    report
}

// ============================================================================
// Unit Tests
// ============================================================================
