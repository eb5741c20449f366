//! Library-level laws over reachable states.
//!
//! Drives the search the way the milestone driver does and checks the
//! invariants and dominance laws that every reachable pool must satisfy,
//! plus end-to-end reproducibility of the frontier.

use cliptimizer::branch::{self, Goal};
use cliptimizer::frontier;
use cliptimizer::game::state::State;
use cliptimizer::game::{prerequisites, AWARD_ORDER, CREAT_CAP, MAX_MEMORY, MAX_PROCESSORS};
use cliptimizer::search;

const OPT_TIME: f64 = 1026.0;
const EPS: f64 = 1e-9;

/// Advances the initial state to `horizon` sim-seconds in 25 s strides,
/// culling every 100 s, exactly as the driver's timed loop does.
fn reachable_pool(horizon: u32) -> Vec<State> {
    let mut pool = vec![State::new()];
    let mut milestone = 25;
    while milestone <= horizon {
        search::advance_sharded(&mut pool, Goal::Time(milestone as f64), OPT_TIME);
        if milestone % 100 == 0 {
            frontier::cull_sharded(&mut pool);
        }
        milestone += 25;
    }
    pool
}

/// A sortable fingerprint that is stable across pool orderings. Continuous
/// resources are rounded far coarser than the comparison epsilon so that
/// whichever member of a near-tie survives culling, the fingerprint agrees.
fn fingerprint(pool: &[State]) -> Vec<(i64, i64, i64, i64, u32, i32, i32, i32, i32)> {
    let round = |x: f64| (x * 1e6).round() as i64;
    let mut keys: Vec<_> = pool
        .iter()
        .map(|s| {
            (
                round(s.time()),
                round(s.clips()),
                round(s.ops()),
                round(s.dollars()),
                s.projects().bits(),
                s.processors(),
                s.memory(),
                s.auto_clippers(),
                s.mlvl(),
            )
        })
        .collect();
    keys.sort_unstable();
    keys
}

#[test]
fn reachable_states_respect_the_hard_caps() {
    let pool = reachable_pool(300);
    assert!(!pool.is_empty());
    for state in &pool {
        assert!(state.ops() <= state.ops_cap() + EPS, "ops over cap: {}", state);
        assert!(state.creat() <= CREAT_CAP + EPS, "creat over cap: {}", state);
        assert!(state.processors() >= 1 && state.processors() <= MAX_PROCESSORS);
        assert!(state.memory() >= 1 && state.memory() <= MAX_MEMORY);
        assert!(state.mlvl() >= 1);
        assert!(state.trust() >= 2);
        assert!(state.dollars() >= 0.0, "negative earnings: {}", state);
    }
}

#[test]
fn reachable_states_have_closed_prerequisites() {
    let pool = reachable_pool(300);
    for state in &pool {
        for &project in &AWARD_ORDER {
            if state.projects().contains(project) {
                assert!(
                    state.projects().contains(prerequisites(project)),
                    "prerequisite missing for {:?} in {}",
                    project,
                    state
                );
            }
        }
    }
}

#[test]
fn branching_never_moves_time_backward() {
    let pool = reachable_pool(200);
    for state in pool.iter().take(200) {
        for successor in branch::branches(state, Goal::Time(1e9)) {
            assert!(successor.time() >= state.time() - EPS);
        }
    }
}

#[test]
fn won_states_never_branch() {
    let pool = reachable_pool(200);
    for state in &pool {
        if state.win() {
            assert!(branch::branches(state, Goal::Time(1e9)).is_empty());
        }
    }
}

#[test]
fn culling_a_culled_pool_changes_nothing() {
    let mut pool = reachable_pool(300);
    frontier::cull(&mut pool);
    let once = fingerprint(&pool);
    frontier::cull(&mut pool);
    assert_eq!(fingerprint(&pool), once);
}

#[test]
fn no_state_in_a_culled_pool_dominates_another() {
    let mut pool = reachable_pool(300);
    frontier::cull(&mut pool);
    // Quadratic check on a bounded sample.
    let sample: Vec<&State> = pool.iter().take(150).collect();
    for a in &sample {
        for b in &sample {
            if !std::ptr::eq(*a, *b) {
                assert!(!a.is_strictly_worse_than(b), "dominated survivor:\n{}\n{}", a, b);
            }
        }
    }
}

#[test]
fn search_to_500s_is_reproducible() {
    let first = reachable_pool(500);
    let second = reachable_pool(500);
    assert!(!first.is_empty());
    assert_eq!(fingerprint(&first), fingerprint(&second));

    // If any trajectory has already won, the earliest win is stable too.
    let earliest_win = |pool: &[State]| {
        pool.iter()
            .filter(|s| s.win())
            .map(|s| (s.time() * 1e6).round() as i64)
            .min()
    };
    assert_eq!(earliest_win(&first), earliest_win(&second));
}
