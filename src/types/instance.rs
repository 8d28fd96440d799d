//! The HR problem instance: owner of every doctor and hospital.
//!
//! ## Ownership model
//!
//! The instance exclusively owns all entities, stored in pre-allocated
//! slabs. Doctors and hospitals never hold references to each other,
//! only ids; every link is resolved through the instance. Ids are
//! dense and 1-based, so an entity with id `i` lives at slab key
//! `i - 1`.
//!
//! ## Construction
//!
//! An instance is created empty-listed by [`Instance::new`] and then
//! populated through the preference and capacity mutators, normally by
//! the parser. After that only assignment state changes, driven by the
//! matching engine or by an externally supplied matching.

use slab::Slab;

use crate::types::{Doctor, Hospital};

/// A Hospitals/Residents problem instance.
///
/// ## Example
///
/// ```
/// use hrmatch::Instance;
///
/// let mut instance = Instance::new(2, 1);
/// instance.set_hospital_capacity(1, 1);
/// instance.add_doctor_pref(1, 1);
/// instance.add_doctor_pref(2, 1);
/// instance.add_hospital_pref(1, 1, 1);
/// instance.add_hospital_pref(1, 2, 2);
///
/// assert_eq!(instance.num_doctors(), 2);
/// assert_eq!(instance.hospital(1).unwrap().rank_of(2), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    /// Pre-allocated doctor storage; key = id - 1
    doctors: Slab<Doctor>,

    /// Pre-allocated hospital storage; key = id - 1
    hospitals: Slab<Hospital>,
}

impl Instance {
    /// Create an instance with the given numbers of doctors and
    /// hospitals, ids `1..=num_doctors` and `1..=num_hospitals`.
    ///
    /// All preference lists start empty and all capacities start at 0.
    pub fn new(num_doctors: usize, num_hospitals: usize) -> Self {
        let mut doctors = Slab::with_capacity(num_doctors);
        for id in 1..=num_doctors {
            doctors.insert(Doctor::new(id as u32));
        }

        let mut hospitals = Slab::with_capacity(num_hospitals);
        for id in 1..=num_hospitals {
            hospitals.insert(Hospital::new(id as u32, num_doctors));
        }

        Self { doctors, hospitals }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Number of doctors in the instance.
    #[inline]
    pub fn num_doctors(&self) -> usize {
        self.doctors.len()
    }

    /// Number of hospitals in the instance.
    #[inline]
    pub fn num_hospitals(&self) -> usize {
        self.hospitals.len()
    }

    /// The doctor with the given 1-based id, or `None` if out of
    /// range.
    #[inline]
    pub fn doctor(&self, id: u32) -> Option<&Doctor> {
        self.doctors.get(id.checked_sub(1)? as usize)
    }

    /// The hospital with the given 1-based id, or `None` if out of
    /// range.
    #[inline]
    pub fn hospital(&self, id: u32) -> Option<&Hospital> {
        self.hospitals.get(id.checked_sub(1)? as usize)
    }

    /// All doctors, in id order.
    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.iter().map(|(_, doctor)| doctor)
    }

    /// All hospitals, in id order.
    pub fn hospitals(&self) -> impl Iterator<Item = &Hospital> {
        self.hospitals.iter().map(|(_, hospital)| hospital)
    }

    // ========================================================================
    // Construction-phase mutation (used by the parser)
    // ========================================================================

    /// Append a hospital to a doctor's preference list. The doctor
    /// side is a strict order, so no rank is needed.
    ///
    /// # Returns
    ///
    /// `false` if either id is out of range.
    pub fn add_doctor_pref(&mut self, doctor_id: u32, hospital_id: u32) -> bool {
        if self.hospital(hospital_id).is_none() {
            return false;
        }
        match self.doctor_mut(doctor_id) {
            Some(doctor) => {
                doctor.add_pref(hospital_id);
                true
            }
            None => false,
        }
    }

    /// Append a doctor with the given rank to a hospital's preference
    /// list and record the rank in the hospital's rank table.
    ///
    /// # Returns
    ///
    /// `false` if either id is out of range.
    pub fn add_hospital_pref(&mut self, hospital_id: u32, doctor_id: u32, rank: u32) -> bool {
        if self.doctor(doctor_id).is_none() {
            return false;
        }
        match self.hospital_mut(hospital_id) {
            Some(hospital) => {
                hospital.add_pref(doctor_id, rank);
                true
            }
            None => false,
        }
    }

    /// Set a hospital's capacity.
    ///
    /// # Returns
    ///
    /// `false` if the id is out of range.
    pub fn set_hospital_capacity(&mut self, hospital_id: u32, capacity: usize) -> bool {
        match self.hospital_mut(hospital_id) {
            Some(hospital) => {
                hospital.set_capacity(capacity);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Assignment state
    // ========================================================================

    /// Install an assignment pair, updating both the doctor's
    /// assignment and the hospital's assignee set.
    ///
    /// Used when loading an externally supplied matching; no
    /// acceptability or capacity checks are applied here, those are
    /// the verification routines' job.
    ///
    /// # Returns
    ///
    /// `false` if either id is out of range.
    pub fn assign(&mut self, doctor_id: u32, hospital_id: u32) -> bool {
        if self.doctor(doctor_id).is_none() || self.hospital(hospital_id).is_none() {
            return false;
        }
        if let Some(doctor) = self.doctor_mut(doctor_id) {
            doctor.assign_to(hospital_id);
        }
        if let Some(hospital) = self.hospital_mut(hospital_id) {
            hospital.assign(doctor_id);
        }
        true
    }

    // ========================================================================
    // Crate-internal access (for the matching engine)
    // ========================================================================

    #[inline]
    pub(crate) fn doctor_mut(&mut self, id: u32) -> Option<&mut Doctor> {
        self.doctors.get_mut(id.checked_sub(1)? as usize)
    }

    #[inline]
    pub(crate) fn hospital_mut(&mut self, id: u32) -> Option<&mut Hospital> {
        self.hospitals.get_mut(id.checked_sub(1)? as usize)
    }

    /// Split borrow of both slabs, so the engine can mutate a doctor
    /// and a hospital in the same step.
    #[inline]
    pub(crate) fn parts_mut(&mut self) -> (&mut Slab<Doctor>, &mut Slab<Hospital>) {
        (&mut self.doctors, &mut self.hospitals)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
