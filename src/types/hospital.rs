//! Hospital entity: capacity, tied preference list and assignee set.
//!
//! ## Rank model
//!
//! A hospital ranks doctors with 1-based ranks, lower is more
//! preferred. Ties are allowed: consecutive doctors in the preference
//! list may share a rank. A doctor absent from the list is
//! unacceptable and has no rank at all.
//!
//! ## Worst-assignee cache
//!
//! `worst_rank` caches an upper bound on the worst rank among the
//! current assignees. The bound is raised when a doctor is assigned
//! and corrected downward by [`Hospital::refresh_worst`] before each
//! eviction decision. Evictions only ever replace an assignee with a
//! better-ranked one, so the true worst rank never climbs past the
//! bound between refreshes.

use std::collections::HashSet;

/// A single hospital in the instance.
///
/// ## Invariants
///
/// - `preference_list` holds doctor ids in non-decreasing rank order,
///   so scanning it from the back visits worst-ranked doctors first.
/// - `ranks` and `preference_list` are built together: a doctor has a
///   rank if and only if it appears in the list.
/// - `assignees.len() <= capacity` at every terminal state of the
///   matching algorithm; the engine evicts before it assigns, so the
///   bound also holds between engine steps.
#[derive(Debug, Clone)]
pub struct Hospital {
    /// Unique 1-based id
    id: u32,

    /// Number of doctors the hospital can take
    capacity: usize,

    /// Doctor ids in non-decreasing rank order; ties share a rank
    preference_list: Vec<u32>,

    /// Rank lookup indexed by doctor key (`id - 1`); `None` means the
    /// doctor is unacceptable to this hospital
    ranks: Vec<Option<u32>>,

    /// Ids of the doctors currently assigned here
    assignees: HashSet<u32>,

    /// Cached upper bound on the worst rank among current assignees;
    /// `None` only when no ranked assignee has been admitted yet
    worst_rank: Option<u32>,
}

impl Hospital {
    /// Create a new hospital with capacity 0 and an empty preference
    /// list.
    ///
    /// # Arguments
    ///
    /// * `id` - The hospital's 1-based id
    /// * `num_doctors` - Total number of doctors in the instance,
    ///   used to size the rank table
    pub fn new(id: u32, num_doctors: usize) -> Self {
        debug_assert!(id >= 1, "hospital ids are 1-based");
        Self {
            id,
            capacity: 0,
            preference_list: Vec::new(),
            ranks: vec![None; num_doctors],
            assignees: HashSet::new(),
            worst_rank: None,
        }
    }

    /// The hospital's id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The hospital's capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The hospital's preference list, best-ranked doctors first.
    #[inline]
    pub fn preference_list(&self) -> &[u32] {
        &self.preference_list
    }

    /// Number of doctors currently assigned to this hospital.
    #[inline]
    pub fn num_assignees(&self) -> usize {
        self.assignees.len()
    }

    /// Whether the given doctor is currently assigned here.
    #[inline]
    pub fn has_assignee(&self, doctor_id: u32) -> bool {
        self.assignees.contains(&doctor_id)
    }

    /// The doctor's rank at this hospital, or `None` if the hospital
    /// does not find the doctor acceptable.
    #[inline]
    pub fn rank_of(&self, doctor_id: u32) -> Option<u32> {
        let key = doctor_id.checked_sub(1)? as usize;
        self.ranks.get(key).copied().flatten()
    }

    /// Whether the hospital is at (or over) capacity.
    #[inline]
    pub fn at_capacity(&self) -> bool {
        self.assignees.len() >= self.capacity
    }

    /// Whether the hospital holds more assignees than its capacity.
    #[inline]
    pub fn is_oversubscribed(&self) -> bool {
        self.assignees.len() > self.capacity
    }

    /// Set the hospital's capacity. Called once, at parse time.
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Append a doctor with the given rank to the preference list.
    ///
    /// Ranks must arrive in non-decreasing order; the parser
    /// guarantees this because a rank only ever increments as the
    /// preference line is scanned.
    pub(crate) fn add_pref(&mut self, doctor_id: u32, rank: u32) {
        debug_assert!(rank >= 1, "ranks are 1-based");
        debug_assert!(
            self.preference_list
                .last()
                .and_then(|&prev| self.rank_of(prev))
                .map_or(true, |prev_rank| prev_rank <= rank),
            "preference list must stay sorted by rank"
        );
        self.preference_list.push(doctor_id);
        self.ranks[(doctor_id - 1) as usize] = Some(rank);
    }

    /// Add a doctor to the assignee set.
    ///
    /// Raises the cached worst-rank bound so it stays an upper bound
    /// for the new assignee population. An unranked doctor (possible
    /// only in an externally supplied matching) is tracked in the set
    /// but invisible to rank bookkeeping; the validity check reports
    /// such pairs.
    pub(crate) fn assign(&mut self, doctor_id: u32) {
        if self.assignees.insert(doctor_id) {
            if let Some(rank) = self.rank_of(doctor_id) {
                self.worst_rank = Some(match self.worst_rank {
                    Some(bound) => bound.max(rank),
                    None => rank,
                });
            }
        }
    }

    /// Remove a doctor from the assignee set.
    ///
    /// The cached worst-rank bound is left alone: removing an
    /// assignee can only move the true worst rank down, so the cache
    /// remains a valid upper bound until the next refresh.
    pub(crate) fn evict(&mut self, doctor_id: u32) -> bool {
        self.assignees.remove(&doctor_id)
    }

    /// Find the worst-ranked doctor currently assigned here, without
    /// touching the cache.
    ///
    /// Scans the preference list from the back; the list is sorted by
    /// rank, so the first assignee found is a worst-ranked one. With
    /// ties among the worst, the last-listed tied assignee is
    /// returned, which keeps the result deterministic.
    ///
    /// # Returns
    ///
    /// `Some((doctor_id, rank))`, or `None` when no ranked doctor is
    /// assigned.
    pub fn worst_assignee(&self) -> Option<(u32, u32)> {
        for &doctor_id in self.preference_list.iter().rev() {
            if !self.assignees.contains(&doctor_id) {
                continue;
            }
            let rank = self.rank_of(doctor_id)?;
            return Some((doctor_id, rank));
        }
        None
    }

    /// Refresh the cached worst-assignee rank and return the worst
    /// assignee, for the engine's eviction decision.
    ///
    /// Works like [`Hospital::worst_assignee`] but uses the cached
    /// bound to skip list entries that already rank worse than any
    /// possible assignee, then lowers the cache to the true value.
    /// The worst assignee is identified by membership in the assignee
    /// set, never by indexing the list at `rank - 1`: under ties the
    /// list position for a rank is not unique.
    pub(crate) fn refresh_worst(&mut self) -> Option<(u32, u32)> {
        if self.assignees.is_empty() {
            self.worst_rank = None;
            return None;
        }
        let bound = self.worst_rank.unwrap_or(u32::MAX);
        for &doctor_id in self.preference_list.iter().rev() {
            match self.rank_of(doctor_id) {
                Some(rank) if rank <= bound => {
                    if self.assignees.contains(&doctor_id) {
                        self.worst_rank = Some(rank);
                        return Some((doctor_id, rank));
                    }
                }
                _ => {}
            }
        }
        self.worst_rank = None;
        None
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
