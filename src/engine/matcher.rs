//! Resident-oriented Gale-Shapley (deferred acceptance) for HR with
//! hospital-side ties.
//!
//! ## Algorithm
//!
//! A work queue holds exactly the doctors that are unassigned and
//! still have hospitals left to apply to. Each round pops one doctor
//! and walks its preference list from its application cursor:
//!
//! - hospital under capacity: the doctor is admitted;
//! - hospital full: the doctor is admitted only if it ranks strictly
//!   better than the hospital's current worst assignee, which is then
//!   evicted and requeued;
//! - otherwise the rejection is permanent, the cursor moves on.
//!
//! Equal rank never displaces: a hospital is indifferent within a
//! tie, so the earlier arrival is retained.
//!
//! ## Termination
//!
//! The cursor only advances, so every doctor applies to each hospital
//! on its list at most once and total work is bounded by the sum of
//! preference-list lengths.

use std::collections::VecDeque;

use crate::types::Instance;

/// Counters describing one run of the algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Applications considered, one per doctor/hospital pairing tried
    pub proposals: usize,

    /// Assignees displaced by a strictly better-ranked applicant
    pub evictions: usize,

    /// Doctors holding an assignment when the queue drained
    pub matched: usize,
}

/// Deferred-acceptance matching engine.
///
/// Produces the doctor-optimal stable matching for the instance's
/// preference data, mutating assignment state in place.
///
/// ## Example
///
/// ```
/// use hrmatch::{Instance, MatchingEngine};
///
/// let mut instance = Instance::new(2, 2);
/// instance.set_hospital_capacity(1, 1);
/// instance.set_hospital_capacity(2, 1);
/// for doctor in [1, 2] {
///     instance.add_doctor_pref(doctor, 1);
///     instance.add_doctor_pref(doctor, 2);
///     instance.add_hospital_pref(1, doctor, doctor);
///     instance.add_hospital_pref(2, doctor, doctor);
/// }
///
/// let stats = MatchingEngine::new().run(&mut instance);
///
/// assert_eq!(stats.matched, 2);
/// assert_eq!(instance.doctor(1).unwrap().assignment(), Some(1));
/// assert_eq!(instance.doctor(2).unwrap().assignment(), Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingEngine;

impl MatchingEngine {
    /// Create a new matching engine.
    pub fn new() -> Self {
        Self
    }

    /// Run deferred acceptance to completion on the given instance.
    ///
    /// Doctors enter the queue in id order; the queue order decides
    /// which member of a tie arrives first but never whether the
    /// result is stable.
    ///
    /// # Returns
    ///
    /// The run's [`MatchStats`].
    pub fn run(self, instance: &mut Instance) -> MatchStats {
        let mut stats = MatchStats::default();
        let (doctors, hospitals) = instance.parts_mut();

        // Seed the queue with every unassigned doctor, in id order
        let mut queue: VecDeque<u32> = doctors
            .iter()
            .filter(|(_, doctor)| !doctor.is_assigned())
            .map(|(_, doctor)| doctor.id())
            .collect();

        while let Some(doctor_id) = queue.pop_front() {
            let doctor_key = (doctor_id - 1) as usize;

            // Walk the preference list from the application cursor; a
            // doctor that exhausts its list stays unassigned for good
            while let Some(hospital_id) = doctors[doctor_key].peek_choice() {
                doctors[doctor_key].advance_choice();
                stats.proposals += 1;

                let hospital = &mut hospitals[(hospital_id - 1) as usize];

                // A hospital that does not list the doctor can never
                // admit it; skip without creating an invalid pair
                let Some(rank) = hospital.rank_of(doctor_id) else {
                    continue;
                };

                if !hospital.at_capacity() {
                    hospital.assign(doctor_id);
                    doctors[doctor_key].assign_to(hospital_id);
                    break;
                }

                // Full: admit only on a strictly better rank than the
                // current worst assignee. Equal rank means the
                // hospital is indifferent and the incumbent stays.
                let Some((worst_id, worst_rank)) = hospital.refresh_worst() else {
                    continue;
                };
                if rank < worst_rank {
                    hospital.evict(worst_id);
                    hospital.assign(doctor_id);
                    doctors[(worst_id - 1) as usize].clear_assignment();
                    doctors[doctor_key].assign_to(hospital_id);
                    queue.push_back(worst_id);
                    stats.evictions += 1;
                    break;
                }
            }
        }

        stats.matched = doctors
            .iter()
            .filter(|(_, doctor)| doctor.is_assigned())
            .count();
        stats
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 doctors, 2 hospitals of capacity 1; everyone agrees doctor 1
    /// and hospital 1 come first.
    fn two_by_two() -> Instance {
        let mut instance = Instance::new(2, 2);
        instance.set_hospital_capacity(1, 1);
        instance.set_hospital_capacity(2, 1);
        for doctor in [1, 2] {
            instance.add_doctor_pref(doctor, 1);
            instance.add_doctor_pref(doctor, 2);
            instance.add_hospital_pref(1, doctor, doctor);
            instance.add_hospital_pref(2, doctor, doctor);
        }
        instance
    }

    #[test]
    fn test_run_two_by_two() {
        let mut instance = two_by_two();
        let stats = MatchingEngine::new().run(&mut instance);

        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(1));
        assert_eq!(instance.doctor(2).unwrap().assignment(), Some(2));
        assert_eq!(stats.matched, 2);
        // Doctor 1 applies once, doctor 2 is turned away by hospital 1
        assert_eq!(stats.proposals, 3);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_run_eviction_chain() {
        // Hospital 1 prefers doctor 2; doctor 1 is displaced and
        // falls through to hospital 2
        let mut instance = Instance::new(2, 2);
        instance.set_hospital_capacity(1, 1);
        instance.set_hospital_capacity(2, 1);
        for doctor in [1, 2] {
            instance.add_doctor_pref(doctor, 1);
            instance.add_doctor_pref(doctor, 2);
        }
        instance.add_hospital_pref(1, 2, 1);
        instance.add_hospital_pref(1, 1, 2);
        instance.add_hospital_pref(2, 1, 1);
        instance.add_hospital_pref(2, 2, 2);

        let stats = MatchingEngine::new().run(&mut instance);

        assert_eq!(instance.doctor(2).unwrap().assignment(), Some(1));
        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(2));
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.matched, 2);
    }

    #[test]
    fn test_run_tie_first_come_retained() {
        // Capacity 1, doctors 1 and 2 tied at rank 1: the earlier
        // arrival keeps the slot, the tied latecomer is not admitted
        let mut instance = Instance::new(2, 1);
        instance.set_hospital_capacity(1, 1);
        instance.add_doctor_pref(1, 1);
        instance.add_doctor_pref(2, 1);
        instance.add_hospital_pref(1, 1, 1);
        instance.add_hospital_pref(1, 2, 1);

        let stats = MatchingEngine::new().run(&mut instance);

        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(1));
        assert!(instance.doctor(2).unwrap().assignment().is_none());
        assert_eq!(stats.matched, 1);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_run_exhausted_list_stays_unmatched() {
        // Doctor 2 only lists a hospital that never admits it
        let mut instance = Instance::new(2, 2);
        instance.set_hospital_capacity(1, 1);
        instance.set_hospital_capacity(2, 1);
        instance.add_doctor_pref(1, 1);
        instance.add_doctor_pref(2, 1);
        instance.add_hospital_pref(1, 1, 1);
        instance.add_hospital_pref(1, 2, 2);
        instance.add_hospital_pref(2, 2, 1);

        let stats = MatchingEngine::new().run(&mut instance);

        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(1));
        assert!(instance.doctor(2).unwrap().assignment().is_none());
        assert_eq!(stats.matched, 1);
    }

    #[test]
    fn test_run_zero_capacity_hospital() {
        let mut instance = Instance::new(1, 2);
        instance.set_hospital_capacity(1, 0);
        instance.set_hospital_capacity(2, 1);
        instance.add_doctor_pref(1, 1);
        instance.add_doctor_pref(1, 2);
        instance.add_hospital_pref(1, 1, 1);
        instance.add_hospital_pref(2, 1, 1);

        let stats = MatchingEngine::new().run(&mut instance);

        // The zero-capacity hospital rejects without evicting anyone
        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(2));
        assert_eq!(instance.hospital(1).unwrap().num_assignees(), 0);
        assert_eq!(stats.matched, 1);
    }

    #[test]
    fn test_run_skips_hospital_not_listing_doctor() {
        // Hospital 1 does not list doctor 1 at all; the doctor must
        // fall through to hospital 2 instead of being admitted where
        // it is unacceptable
        let mut instance = Instance::new(1, 2);
        instance.set_hospital_capacity(1, 1);
        instance.set_hospital_capacity(2, 1);
        instance.add_doctor_pref(1, 1);
        instance.add_doctor_pref(1, 2);
        instance.add_hospital_pref(2, 1, 1);

        MatchingEngine::new().run(&mut instance);

        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(2));
        assert_eq!(instance.hospital(1).unwrap().num_assignees(), 0);
    }

    #[test]
    fn test_run_tie_eviction_threshold() {
        // Hospital prefs: (1 2) then 3. Doctor 3 arrives last and
        // cannot displace a rank-1 incumbent; doctor 2 tied with the
        // incumbent cannot displace it either.
        let mut instance = Instance::new(3, 1);
        instance.set_hospital_capacity(1, 1);
        for doctor in [1, 2, 3] {
            instance.add_doctor_pref(doctor, 1);
        }
        instance.add_hospital_pref(1, 1, 1);
        instance.add_hospital_pref(1, 2, 1);
        instance.add_hospital_pref(1, 3, 2);

        let stats = MatchingEngine::new().run(&mut instance);

        assert_eq!(instance.doctor(1).unwrap().assignment(), Some(1));
        assert!(instance.doctor(2).unwrap().assignment().is_none());
        assert!(instance.doctor(3).unwrap().assignment().is_none());
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_run_better_rank_displaces_tied_worst() {
        // Doctors 1 and 2 are tied at rank 2 and fill the hospital
        // first; doctor 3 at rank 1 arrives last and displaces
        // exactly one of the tied incumbents
        let mut instance = Instance::new(3, 1);
        instance.set_hospital_capacity(1, 2);
        for doctor in [1, 2, 3] {
            instance.add_doctor_pref(doctor, 1);
        }
        instance.add_hospital_pref(1, 3, 1);
        instance.add_hospital_pref(1, 1, 2);
        instance.add_hospital_pref(1, 2, 2);

        let stats = MatchingEngine::new().run(&mut instance);

        assert_eq!(instance.doctor(3).unwrap().assignment(), Some(1));
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.evictions, 1);
        // Exactly one of the tied doctors survives
        let survivors = [1, 2]
            .iter()
            .filter(|&&d| instance.doctor(d).unwrap().is_assigned())
            .count();
        assert_eq!(survivors, 1);
    }

    #[test]
    fn test_run_proposals_bounded_by_list_lengths() {
        let mut instance = two_by_two();
        let total_prefs: usize = instance
            .doctors()
            .map(|doctor| doctor.preference_list().len())
            .sum();

        let stats = MatchingEngine::new().run(&mut instance);

        assert!(stats.proposals <= total_prefs);
        assert!(stats.evictions <= stats.proposals);
    }
}
