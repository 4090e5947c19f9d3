//! Quadrant locks with same-direction sharing.
//!
//! A quadrant is either free or owned by one direction.  Any number of cars
//! from the owning direction may hold it at once; a car from another
//! direction waits until the holder count drops back to zero.

use fw_core::{Direction, Quadrant, RegionSet};
use parking_lot::{Condvar, Mutex};

#[derive(Default)]
struct RegionState {
    /// `None` exactly when `holders == 0`.
    owner:   Option<Direction>,
    holders: usize,
}

#[derive(Default)]
struct Region {
    state: Mutex<RegionState>,
    freed: Condvar,
}

/// Point-in-time view of one quadrant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionSnapshot {
    pub owner:   Option<Direction>,
    pub holders: usize,
}

/// The four quadrant locks of the intersection.
#[derive(Default)]
pub struct RegionLocks {
    regions: [Region; Quadrant::COUNT],
}

impl RegionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `quadrant` is free or already owned by `direction`, then
    /// join its holders.
    pub fn acquire(&self, quadrant: Quadrant, direction: Direction) {
        let region = &self.regions[quadrant.index()];
        let mut state = region.state.lock();
        while matches!(state.owner, Some(owner) if owner != direction) {
            tracing::trace!(%quadrant, %direction, "quadrant busy, waiting");
            region.freed.wait(&mut state);
        }
        state.owner = Some(direction);
        state.holders += 1;
        tracing::trace!(%quadrant, %direction, holders = state.holders, "quadrant acquired");
    }

    /// Leave `quadrant`.  The last holder out frees it and wakes every waiter.
    pub fn release(&self, quadrant: Quadrant) {
        let region = &self.regions[quadrant.index()];
        let mut state = region.state.lock();
        if state.holders == 0 {
            tracing::error!(%quadrant, "release on a free quadrant");
            debug_assert!(false, "release on a free quadrant: {quadrant}");
            return;
        }
        state.holders -= 1;
        if state.holders == 0 {
            state.owner = None;
            region.freed.notify_all();
            tracing::trace!(%quadrant, "quadrant freed");
        }
    }

    /// Acquire every quadrant in `set` in ascending order.
    ///
    /// The returned claim releases them in descending order when dropped.
    pub fn acquire_set(&self, set: RegionSet, direction: Direction) -> RegionClaim<'_> {
        for quadrant in set.iter() {
            self.acquire(quadrant, direction);
        }
        RegionClaim { locks: self, set }
    }

    pub fn snapshot(&self, quadrant: Quadrant) -> RegionSnapshot {
        let state = self.regions[quadrant.index()].state.lock();
        RegionSnapshot {
            owner:   state.owner,
            holders: state.holders,
        }
    }

    /// `true` if no quadrant has a holder.
    pub fn is_idle(&self) -> bool {
        Quadrant::ALL
            .iter()
            .all(|&q| self.snapshot(q).holders == 0)
    }
}

/// A held set of quadrants.  Released in reverse lock order on drop.
#[must_use = "dropping a RegionClaim releases its quadrants immediately"]
pub struct RegionClaim<'a> {
    locks: &'a RegionLocks,
    set:   RegionSet,
}

impl RegionClaim<'_> {
    pub fn regions(&self) -> RegionSet {
        self.set
    }

    /// Release explicitly.  Equivalent to dropping the claim.
    pub fn release(self) {}
}

impl Drop for RegionClaim<'_> {
    fn drop(&mut self) {
        for quadrant in self.set.iter().rev() {
            self.locks.release(quadrant);
        }
    }
}
