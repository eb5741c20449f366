//! Dominance and frontier culling.
//!
//! Two states in the same bin are comparable: one is dominated when it took
//! at least as long and is no better on any resource or project axis. The
//! pool is partitioned by bin and each bin culled independently -- bins are
//! incomparable by construction, which is also what makes the cull phase
//! embarrassingly parallel.

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;

use crate::game::state::{Bin, State};

/// Comparison tolerance for the continuous resources.
pub const EPS: f64 = 1e-9;

impl State {
    /// Inclusive dominance: true when `other` is at least as good on every
    /// axis, including when the two states are indistinguishable. Culling
    /// uses this form so exact duplicates collapse to one representative.
    pub fn is_dominated_by(&self, other: &State) -> bool {
        if self.bin() != other.bin() {
            return false;
        }
        // A winning state is never dominated by a non-winning one; a state
        // that arrives after another has already won is always dominated.
        if self.win() && !other.win() {
            return false;
        }
        if other.win() && self.time > other.time + EPS {
            return true;
        }
        if self.time + EPS < other.time
            || self.ops > other.ops + EPS
            || self.creat > other.creat + EPS
            || self.clips > other.clips + EPS
            || self.dollars > other.dollars + EPS
            || !self.projects.is_subset_of(other.projects)
        {
            return false;
        }
        true
    }

    /// Strict dominance: dominated by `other` and not merely tied with it.
    pub fn is_strictly_worse_than(&self, other: &State) -> bool {
        self.is_dominated_by(other) && !other.is_dominated_by(self)
    }
}

/// Removes every state in the slice that is dominated by another state in
/// the same slice. All entries must share one bin.
pub fn cull_in_bin(states: &mut Vec<State>) {
    states.sort_by(|a, b| a.time().partial_cmp(&b.time()).unwrap_or(Ordering::Equal));
    // Sorted by time, only later entries can normally be dominated by
    // earlier ones; the exception is near-ties on time, handled by the
    // backward scan.
    let mut i = 0;
    while i < states.len() {
        let mut j = i;
        while j > 0 {
            j -= 1;
            if states[j].time() + EPS < states[i].time() {
                break;
            }
            if states[j].is_dominated_by(&states[i]) {
                states.remove(j);
                i -= 1; // the current entry shifted left
            }
        }
        let mut j = i + 1;
        while j < states.len() {
            if states[j].is_dominated_by(&states[i]) {
                states.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }
}

/// Groups the pool by bin, consuming it.
pub fn partition_by_bin(pool: Vec<State>) -> Vec<Vec<State>> {
    let mut bins: HashMap<Bin, Vec<State>> = HashMap::new();
    for state in pool {
        bins.entry(state.bin()).or_default().push(state);
    }
    bins.into_values().collect()
}

/// Culls the whole pool, one bin at a time.
pub fn cull(pool: &mut Vec<State>) {
    let bins = partition_by_bin(std::mem::take(pool));
    for mut bin in bins {
        cull_in_bin(&mut bin);
        pool.append(&mut bin);
    }
}

/// Culls the whole pool with one parallel task per bin.
pub fn cull_sharded(pool: &mut Vec<State>) {
    let mut bins = partition_by_bin(std::mem::take(pool));
    bins.par_iter_mut().for_each(cull_in_bin);
    for bin in &mut bins {
        pool.append(bin);
    }
}
