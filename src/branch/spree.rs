//! Same-instant purchase cascades.
//!
//! A trust grant (or a purchase that frees banked ops) can make further
//! purchases affordable at the very same simulated instant. Each spree
//! purchase appends a new successor carrying a marker for where the scan
//! should resume, and the expansion loop in `branch` keeps expanding until
//! every marker is exhausted. The scan cursor only ever moves forward
//! through the ops catalog, so the generated chains form a DAG.

use crate::game::project::OPS_PURCHASES;
use crate::game::state::{Spree, State};
use crate::game::tables::{MAX_MEMORY, MAX_PROCESSORS};

/// Appends every spree purchase possible from `state` to `list`.
pub(crate) fn add_spree_purchases(state: &State, list: &mut Vec<State>) {
    let surplus_trust = state.trust() > state.trust_committed();
    let scan_from = match state.spree {
        Spree::None => return,
        Spree::Processor | Spree::Memory => {
            if state.spree == Spree::Processor
                && surplus_trust
                && state.processors() < MAX_PROCESSORS
            {
                let mut next = state.clone();
                next.processors += 1;
                next.log_processor();
                next.spree = Spree::Memory;
                list.push(next);
            }
            // Memory can stop creativity collection by reopening the ops bank.
            if surplus_trust && state.memory() < MAX_MEMORY {
                let mut next = state.clone();
                next.memory += 1;
                next.log_memory();
                next.spree = Spree::Resume(0);
                list.push(next);
            }
            0
        }
        Spree::Resume(index) => index as usize,
    };
    for (index, item) in OPS_PURCHASES.iter().enumerate().skip(scan_from) {
        if state.ops() >= item.cost && state.projects().meets_prereqs(item.project) {
            let mut next = state.clone();
            next.award_project(item.project);
            next.ops -= item.cost;
            next.spree = if index + 1 < OPS_PURCHASES.len() {
                Spree::Resume(index as u8 + 1)
            } else {
                Spree::None
            };
            list.push(next);
        }
    }
}
