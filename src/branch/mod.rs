//! Branch generation.
//!
//! From a given state, enumerates the minimal set of rational successors:
//! simulated time is advanced to the nearest decision-triggering threshold
//! (dollars, clips, ops, or creativity) and each mutually exclusive choice
//! at that instant becomes one successor. Irrational branches -- idling
//! while losing money, accumulating creativity with nothing to buy -- are
//! pruned by returning no successors at all.

pub mod spree;

use crate::game::project::{ProjectSet, CREAT_PURCHASES, OPS_PURCHASES};
use crate::game::state::{Spree, State};
use crate::game::tables::{CLIPS_MILESTONES, CREAT_CAP, MAX_MEMORY, MAX_PROCESSORS};

/// Horizon for one advance phase: states stop branching once they reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Goal {
    /// A simulated-time ceiling, in seconds.
    Time(f64),
    /// A paperclip-count ceiling.
    Clips(f64),
}

impl Goal {
    pub fn reached(self, state: &State) -> bool {
        match self {
            Goal::Time(value) => state.time() >= value,
            Goal::Clips(value) => state.clips() >= value,
        }
    }
}

/// Returns the successor states from the next decision point, with spree
/// cascades expanded in place.
pub fn branches(state: &State, goal: Goal) -> Vec<State> {
    let mut list = decision_branches(state, goal);
    // Spree-marked successors are expanded by appending to the same list,
    // so chains of same-instant purchases are themselves expanded. The
    // cursor carried in the marker keeps the chains acyclic.
    let mut i = 0;
    while i < list.len() {
        if list[i].spree != Spree::None {
            let current = list[i].clone();
            spree::add_spree_purchases(&current, &mut list);
            list[i].spree = Spree::None;
        }
        i += 1;
    }
    list
}

fn decision_branches(state: &State, goal: Goal) -> Vec<State> {
    let mut list: Vec<State> = Vec::new();

    // Abandon the trajectory if it is losing money, capped on creativity,
    // earning creativity it can never spend, or already won.
    let dollars_per_second = state.dollars_per_second();
    if dollars_per_second <= 0.0 || state.creat() >= CREAT_CAP || state.win() {
        return list;
    }
    if state.projects().contains(ProjectSet::ALL_CREAT_SINKS) && state.creat() > 0.0 {
        return list;
    }

    // Next dollars threshold: the cheaper of the next autoclipper and the
    // next marketing level, as cumulative earnings.
    let dollars_spent = state.dollars_spent();
    let next_autoclipper_thresh = if state.auto_clippers() > 0 {
        dollars_spent + 5.0 + 1.1f64.powi(state.auto_clippers())
    } else {
        dollars_spent + 5.0
    };
    let next_mlvl_thresh = dollars_spent + 50.0 * 2.0f64.powi(state.mlvl());
    let lower_cost = next_autoclipper_thresh.min(next_mlvl_thresh);
    let higher_cost = next_autoclipper_thresh.max(next_mlvl_thresh);
    let optional_dollar_purchase = state.dollars() < lower_cost;
    let dollars_thresh = if optional_dollar_purchase { lower_cost } else { higher_cost };
    let dollars_thresh_time = (dollars_thresh - state.dollars()) / dollars_per_second;

    // Next clips threshold, clamped by the horizon.
    let clips_per_second = state.clips_per_second();
    let mut clips_thresh = CLIPS_MILESTONES
        .iter()
        .copied()
        .find(|&milestone| milestone > state.clips())
        .unwrap_or(f64::INFINITY);
    let mut clips_thresh_time = (clips_thresh - state.clips()) / clips_per_second;
    let mut halt = false;
    match goal {
        Goal::Clips(limit) if clips_thresh > limit => {
            clips_thresh = limit;
            clips_thresh_time = (clips_thresh - state.clips()) / clips_per_second;
            halt = true;
        }
        Goal::Time(limit) => {
            let remaining = (limit - state.time()).max(0.0);
            if remaining < clips_thresh_time {
                clips_thresh_time = remaining;
                clips_thresh = state.clips() + clips_per_second * remaining;
                halt = true;
            }
        }
        _ => {}
    }

    // Next ops threshold.
    let ops_thresh = state.next_ops_limit();
    let ops_thresh_time = if ops_thresh.is_finite() {
        (ops_thresh - state.ops()) / state.ops_per_second()
    } else {
        f64::INFINITY
    };

    // Next creativity threshold.
    let (creat_thresh, creat_must_buy) = state.next_creat_limit();
    let creat_thresh_time = if creat_thresh.is_finite() {
        (creat_thresh - state.creat()) / state.creat_per_second()
    } else {
        f64::INFINITY
    };

    // The creativity-rate epsilon exists precisely to keep these apart; a
    // tie means the decision order is undefined and the search is invalid.
    if creat_thresh_time.is_finite() && creat_thresh_time == ops_thresh_time {
        panic!(
            "ops and creat thresholds coincide after {creat_thresh_time}s\n{state}\n{}",
            state.detail()
        );
    }

    // Dollars decision point?
    if dollars_thresh_time < clips_thresh_time
        && dollars_thresh_time < ops_thresh_time
        && dollars_thresh_time < creat_thresh_time
    {
        if dollars_thresh == next_autoclipper_thresh {
            let mut next = state.pass_time(dollars_thresh_time);
            next.dollars = dollars_thresh;
            next.auto_clippers += 1;
            list.push(next);
        } else {
            debug_assert_eq!(dollars_thresh, next_mlvl_thresh);
            let mut next = state.pass_time(dollars_thresh_time);
            next.dollars = dollars_thresh;
            next.mlvl += 1;
            next.log_mlvl();
            list.push(next);
        }
        if optional_dollar_purchase {
            // Skip the cheap item and save for the dearer one instead.
            let mut next = state.pass_time(dollars_thresh_time);
            next.dollars = dollars_thresh;
            list.push(next);
        }
        return list;
    }

    // Clips decision point?
    if clips_thresh_time < dollars_thresh_time
        && clips_thresh_time < ops_thresh_time
        && clips_thresh_time < creat_thresh_time
    {
        if halt {
            // Forced stopping point at the horizon.
            let mut next = state.pass_time(clips_thresh_time);
            next.clips = clips_thresh;
            if let Goal::Time(limit) = goal {
                next.time = limit;
            }
            list.push(next);
            return list;
        }
        if clips_thresh == 2000.0 {
            // Operations come online. No trust is granted at this milestone.
            let mut next = state.pass_time(clips_thresh_time);
            next.clips = clips_thresh;
            list.push(next);
            return list;
        }
        if state.trust() < state.trust_committed() {
            // Trust arrives but is already owed to prior commitments (this
            // happens after spending a slot on hypno-harmonics).
            let mut next = state.pass_time(clips_thresh_time);
            next.clips = clips_thresh;
            next.trust += 1;
            list.push(next);
            return list;
        }
        // Spend the new trust on a processor.
        if state.processors() < MAX_PROCESSORS {
            let mut next = state.pass_time(clips_thresh_time);
            next.clips = clips_thresh;
            next.trust += 1;
            next.processors += 1;
            next.log_processor();
            // The sixth processor at a full 10000-op bank ends the game.
            if state.processors() == 5 && state.ops() == 10_000.0 {
                next.projects.insert(ProjectSet::WIN);
                list.push(next);
                return list;
            }
            list.push(next);
        }
        // Hold the trust for memory or hypno-harmonics later. Once enough
        // is banked for max memory plus harmonics there is nothing left to
        // save for.
        if state.trust() < state.processors() + 11 {
            let mut next = state.pass_time(clips_thresh_time);
            next.clips = clips_thresh;
            next.trust += 1;
            list.push(next);
        }
        // Convert the trust to memory immediately; only sensible when the
        // ops bank is at capacity.
        if state.memory() < MAX_MEMORY && state.ops() == state.ops_cap() {
            let mut next = state.pass_time(clips_thresh_time);
            next.clips = clips_thresh;
            next.trust += 1;
            next.memory += 1;
            next.log_memory();
            list.push(next);
        }
        return list;
    }

    // Ops decision point?
    if ops_thresh_time < dollars_thresh_time
        && ops_thresh_time < clips_thresh_time
        && ops_thresh_time < creat_thresh_time
    {
        // Filling the 10000-op bank with five processors online wins: the
        // sixth processor purchase is forced.
        if ops_thresh == 10_000.0 && state.processors() >= 5 {
            let mut next = state.pass_time(ops_thresh_time);
            next.ops = 10_000.0;
            next.projects.insert(ProjectSet::WIN);
            list.push(next);
            return list;
        }
        push_ops_purchases(state, &mut list, ops_thresh, ops_thresh_time);
        // Keep banking ops, unless the bank is capped and there is no
        // creativity accrual to switch over to.
        if ops_thresh != state.ops_cap() || state.projects().intersects(ProjectSet::CREATIVITY) {
            let mut next = state.pass_time(ops_thresh_time);
            next.ops = ops_thresh;
            list.push(next);
        }
        // Buy memory with banked trust; only possible at the cap.
        if ops_thresh == state.ops_cap()
            && state.memory() < MAX_MEMORY
            && state.trust() > state.trust_committed()
        {
            let mut next = state.pass_time(ops_thresh_time);
            next.ops = ops_thresh;
            next.memory += 1;
            next.log_memory();
            list.push(next);
        }
        return list;
    }

    // Creat decision point?
    if creat_thresh_time < dollars_thresh_time
        && creat_thresh_time < clips_thresh_time
        && creat_thresh_time < ops_thresh_time
    {
        push_creat_purchase(state, &mut list, creat_thresh, creat_thresh_time);
        if !creat_must_buy {
            // Save for the next creativity project.
            let mut next = state.pass_time(creat_thresh_time);
            next.creat = creat_thresh;
            list.push(next);
        }
        return list;
    }

    panic!(
        "no decision resource was earliest: dollars={dollars_thresh_time} \
         clips={clips_thresh_time} ops={ops_thresh_time} creat={creat_thresh_time}\n{state}\n{}",
        state.detail()
    );
}

/// Appends a branch for every ops project purchasable at this threshold.
/// An ops purchase empties the whole bank.
fn push_ops_purchases(state: &State, list: &mut Vec<State>, ops_thresh: f64, ops_thresh_time: f64) {
    for item in &OPS_PURCHASES {
        if ops_thresh == item.cost && state.projects().meets_prereqs(item.project) {
            let mut next = state.pass_time(ops_thresh_time);
            next.ops = 0.0;
            next.award_project(item.project);
            list.push(next);
        }
    }
}

/// Appends a branch for the creativity project priced at this threshold.
/// Trust-earning projects grant a slot and open a processor spree; the
/// others open a memory spree.
fn push_creat_purchase(
    state: &State,
    list: &mut Vec<State>,
    creat_thresh: f64,
    creat_thresh_time: f64,
) {
    for item in &CREAT_PURCHASES {
        if creat_thresh == item.cost && state.projects().meets_prereqs(item.project) {
            let mut next = state.pass_time(creat_thresh_time);
            next.creat = 0.0;
            next.award_project(item.project);
            if item.earns_trust {
                next.trust += 1;
                next.spree = Spree::Processor;
            } else {
                next.spree = Spree::Memory;
            }
            list.push(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tables::BASE_CLIP_RATE;

    const FAR: Goal = Goal::Time(1e9);

    #[test]
    fn initial_state_has_two_dollar_branches() {
        let state = State::new();
        let list = branches(&state, FAR);
        assert_eq!(list.len(), 2);

        // Buy the first autoclipper at $5...
        assert_eq!(list[0].auto_clippers(), 1);
        assert_eq!(list[0].dollars(), 5.0);
        // ...or save toward the first marketing level.
        assert_eq!(list[1].auto_clippers(), 0);
        assert_eq!(list[1].dollars(), 5.0);
        assert_eq!(list[0].time(), list[1].time());
        assert!(list[0].time() > 0.0);
    }

    #[test]
    fn dollars_event_buys_the_dearer_item_once_committed() {
        let mut state = State::new();
        state.clips = 2200.0;
        state.dollars = 99.0; // past the $5 clipper, saving for marketing
        let list = branches(&state, FAR);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].mlvl(), 2);
        assert_eq!(list[0].dollars(), 100.0);
        assert_eq!(list[0].history().bytes(), &[0]);
    }

    #[test]
    fn losing_money_abandons_the_trajectory() {
        let mut state = State::new();
        // Hundreds of unboosted clippers: wire expense swamps sales.
        state.auto_clippers = 500;
        assert!(state.dollars_per_second() < 0.0);
        assert!(branches(&state, FAR).is_empty());
    }

    #[test]
    fn terminal_and_capped_states_do_not_branch() {
        let mut won = State::new();
        won.projects.insert(ProjectSet::WIN);
        assert!(branches(&won, FAR).is_empty());

        let mut capped = State::new();
        capped.creat = 250.0;
        assert!(branches(&capped, FAR).is_empty());

        let mut hoarder = State::new();
        hoarder.projects.insert(ProjectSet::ALL_CREAT_SINKS);
        hoarder.creat = 1.0;
        assert!(branches(&hoarder, FAR).is_empty());
    }

    #[test]
    fn ops_event_awards_project_and_keeps_banking() {
        let mut state = State::new();
        state.clips = 2200.0;
        state.ops = 740.0;
        state.dollars = 5.0; // next dollars event is the $100 marketing level
        let list = branches(&state, FAR);
        assert_eq!(list.len(), 2);

        assert!(list[0].projects().intersects(ProjectSet::IMPROVED_AUTOCLIPPERS));
        assert_eq!(list[0].ops(), 0.0);
        // Not at the memory cap, so banking on is allowed.
        assert_eq!(list[1].ops(), 750.0);
        assert!(list[1].projects().is_empty());
    }

    #[test]
    fn ops_event_at_cap_without_creativity_has_no_continue_branch() {
        let mut state = State::new();
        state.clips = 2200.0;
        state.ops = 750.0; // exactly on the rung: the next stop is the cap
        state.dollars = 5.0;
        let list = branches(&state, FAR);
        assert_eq!(list.len(), 1);
        assert!(list[0].projects().intersects(ProjectSet::CREATIVITY));
        assert_eq!(list[0].ops(), 0.0);
    }

    #[test]
    fn ops_event_win_with_five_processors() {
        let mut state = State::new();
        state.memory = 10;
        state.processors = 5;
        state.trust = 15;
        state.ops = 9990.0;
        state.clips = 150_000.0;
        let list = branches(&state, FAR);
        assert_eq!(list.len(), 1);
        assert!(list[0].win());
        assert_eq!(list[0].ops(), 10_000.0);
    }

    #[test]
    fn trust_grant_offers_processor_hold_and_memory() {
        let mut state = State::new();
        state.clips = 2999.0;
        state.memory = 2;
        state.ops = 2000.0; // at the cap, so immediate memory is sensible
        state.trust = 3;
        state.dollars = 4.0;
        let list = branches(&state, FAR);
        assert_eq!(list.len(), 3);

        assert_eq!(list[0].processors(), 2);
        assert_eq!(list[0].trust(), 4);
        assert_eq!(list[1].processors(), 1);
        assert_eq!(list[1].memory(), 2);
        assert_eq!(list[1].trust(), 4);
        assert_eq!(list[2].memory(), 3);
        assert_eq!(list[2].trust(), 4);
        for branch in &list {
            assert_eq!(branch.clips(), 3000.0);
        }
    }

    #[test]
    fn owed_trust_is_recorded_without_spending() {
        let mut state = State::new();
        state.clips = 2999.5;
        state.memory = 10;
        state.processors = 1;
        state.projects.insert(
            ProjectSet::LEXICAL_PROCESSING
                | ProjectSet::SLOGAN_CREAT
                | ProjectSet::CATCHY_JINGLE
                | ProjectSet::HYPNO_HARMONICS,
        );
        state.trust = 10; // committed = 10 memory + 1 processor + 1 hypno
        state.dollars = 4.0;
        let list = branches(&state, FAR);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].trust(), 11);
        assert_eq!(list[0].processors(), 1);
        assert_eq!(list[0].memory(), 10);
    }

    #[test]
    fn saturated_trust_suppresses_the_hold_branch() {
        let mut state = State::new();
        state.clips = 2999.0;
        state.memory = 10;
        state.ops = 10_000.0;
        state.trust = 12; // processors + 11: nothing left to save for
        state.dollars = 4.0;
        let list = branches(&state, FAR);
        // Only the processor purchase remains: memory is maxed and holding
        // is pointless.
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].processors(), 2);
    }

    #[test]
    fn sixth_processor_at_full_bank_wins() {
        let mut state = State::new();
        state.processors = 5;
        state.memory = 10;
        state.ops = 10_000.0;
        state.trust = 15;
        state.clips = 2995.0;
        let list = branches(&state, FAR);
        assert_eq!(list.len(), 1);
        assert!(list[0].win());
        assert_eq!(list[0].processors(), 6);
    }

    #[test]
    fn clips_halt_lands_exactly_on_a_time_horizon() {
        let state = State::new();
        let list = branches(&state, Goal::Time(0.05));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].time(), 0.05);
        assert!((list[0].clips() - BASE_CLIP_RATE * 0.05).abs() < 1e-9);
    }

    #[test]
    fn clips_halt_lands_exactly_on_a_clips_horizon() {
        let mut state = State::new();
        state.dollars = 5.0; // committed to saving for the $100 marketing level
        let list = branches(&state, Goal::Clips(500.0));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].clips(), 500.0);
        assert!(!list[0].win());
    }

    #[test]
    fn creat_purchase_opens_a_spree_cascade() {
        let mut state = State::new();
        state.clips = 9000.0;
        state.ops = 1000.0; // bank full at memory 1
        state.creat = 9.9;
        state.dollars = 5.0;
        state.projects.insert(ProjectSet::CREATIVITY);
        let list = branches(&state, FAR);

        // Buy the limerick (trust grant) or save; the trust grant cascades:
        // processor, memory, and the banked-ops autoclipper upgrade, then
        // the follow-on chains from each of those.
        assert_eq!(list.len(), 7);

        let buy = &list[0];
        assert!(buy.projects().intersects(ProjectSet::LIMERICK));
        assert_eq!(buy.creat(), 0.0);
        assert_eq!(buy.trust(), 3);
        assert_eq!(buy.spree, Spree::None);

        let save = &list[1];
        assert_eq!(save.creat(), 10.0);
        assert!(!save.projects().intersects(ProjectSet::LIMERICK));

        // All successors share the same simulated instant.
        for branch in &list {
            assert_eq!(branch.time(), list[0].time());
        }
        assert!(list.iter().any(|s| s.processors() == 2
            && s.projects().intersects(ProjectSet::IMPROVED_AUTOCLIPPERS)));
        assert!(list.iter().any(|s| s.memory() == 2));
        // Spree ops purchases pay their cost out of the bank.
        let chained = list
            .iter()
            .find(|s| s.processors() == 1
                && s.memory() == 1
                && s.projects().intersects(ProjectSet::IMPROVED_AUTOCLIPPERS))
            .unwrap();
        assert_eq!(chained.ops(), 250.0);
    }

    #[test]
    fn must_buy_creat_threshold_has_no_save_branch() {
        let mut state = State::new();
        state.clips = 9000.0;
        state.ops = 1000.0;
        state.creat = 249.0;
        state.dollars = 5.0;
        state.projects.insert(
            ProjectSet::CREATIVITY
                | ProjectSet::LIMERICK
                | ProjectSet::SLOGAN_CREAT
                | ProjectSet::JINGLE_CREAT
                | ProjectSet::LEXICAL_PROCESSING
                | ProjectSet::COMBINATORY_HARMONICS
                | ProjectSet::HADWIGER_PROBLEM
                | ProjectSet::TOTH_SAUSAGE_CONJECTURE,
        );
        state.trust = 7; // all seven prior trust grants spent elsewhere
        let list = branches(&state, FAR);
        assert!(!list.is_empty());
        assert!(list.iter().all(|s| s.projects().intersects(ProjectSet::DONKEY_SPACE)));
        assert!(list.iter().all(|s| s.creat() == 0.0));
    }

    #[test]
    fn successor_time_is_monotone() {
        let state = State::new();
        for branch in branches(&state, FAR) {
            assert!(branch.time() >= state.time());
        }
    }
}
