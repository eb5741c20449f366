//! Milestone search driver.
//!
//! Maintains a pool of live states and advances all of them in lock-step
//! strides: each state branches repeatedly until it reaches the current
//! milestone (or wins, or blows past the opt-time bound and is dropped).
//! Every few milestones the pool is partitioned by bin and dominated states
//! are culled. Both phases shard across threads with no shared mutable
//! state: each worker owns a disjoint slice of the pool.

use rayon::prelude::*;

use crate::branch;
pub use crate::branch::Goal;
use crate::frontier;
use crate::game::state::State;

/// Pool size below which the advance phase stays single-threaded.
const SHARD_THRESHOLD: usize = 240;

/// Number of round-robin shards in a parallel advance.
const SHARD_COUNT: usize = 24;

/// Driver configuration. The defaults reproduce the reference search: 25 s
/// strides to an 1100 s horizon, culling every 100 s, dropping branches
/// past 1026 s, then one final push to 15000 clips.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Milestone stride in simulated seconds.
    pub stride: u32,
    /// Exclusive upper bound on timed milestones.
    pub horizon: u32,
    /// Cull whenever the milestone is a multiple of this; 0 disables.
    pub cull_interval: u32,
    /// Branches whose time exceeds this are unconditionally dropped.
    pub opt_time: f64,
    /// Clips ceiling for the final advance stage.
    pub final_clips: f64,
    /// Worker threads; 0 uses the default rayon pool.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            stride: 25,
            horizon: 1100,
            cull_interval: 100,
            opt_time: 1026.0,
            final_clips: 15000.0,
            threads: 0,
        }
    }
}

/// One progress report per completed milestone.
#[derive(Debug, Clone, Copy)]
pub struct MilestoneReport {
    pub milestone: f64,
    /// Pool size after advancing, before any cull.
    pub advanced: usize,
    /// Pool size after the (possible) cull.
    pub pool_size: usize,
    pub culled: bool,
}

/// Branches every state in the pool until it reaches the goal or wins.
///
/// Won states are terminal and carry through untouched, as does anything
/// already past the goal. Branches that would pass `opt_time` are dropped;
/// branches that reach the goal (or win) move to the next pool; everything
/// else is reinserted for further branching.
pub fn advance(pool: &mut Vec<State>, goal: Goal, opt_time: f64) {
    let mut done = Vec::new();
    while let Some(state) = pool.pop() {
        if state.win() || goal.reached(&state) {
            done.push(state);
            continue;
        }
        for successor in branch::branches(&state, goal) {
            if goal.reached(&successor) || successor.win() {
                done.push(successor);
            } else if successor.time() < opt_time {
                pool.push(successor);
            }
        }
    }
    *pool = done;
}

/// Advances the pool, splitting it round-robin across parallel shards once
/// it is large enough to be worth the fan-out.
pub fn advance_sharded(pool: &mut Vec<State>, goal: Goal, opt_time: f64) {
    if pool.len() < SHARD_THRESHOLD {
        advance(pool, goal, opt_time);
        return;
    }
    let mut shards: Vec<Vec<State>> = (0..SHARD_COUNT).map(|_| Vec::new()).collect();
    for (i, state) in pool.drain(..).enumerate() {
        shards[i % SHARD_COUNT].push(state);
    }
    shards
        .par_iter_mut()
        .for_each(|shard| advance(shard, goal, opt_time));
    for shard in &mut shards {
        pool.append(shard);
    }
}

/// Runs the full milestone search from the initial state.
pub fn run(config: &SearchConfig) -> Vec<State> {
    run_with_progress(config, |_| {})
}

/// Runs the full milestone search, reporting after every milestone.
///
/// When `config.threads` is nonzero, a dedicated rayon pool of that size is
/// used for the sharded phases.
pub fn run_with_progress<F>(config: &SearchConfig, mut progress: F) -> Vec<State>
where
    F: FnMut(MilestoneReport) + Send,
{
    if config.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .expect("failed to build rayon thread pool");
        pool.install(|| drive(config, &mut progress))
    } else {
        drive(config, &mut progress)
    }
}

fn drive<F>(config: &SearchConfig, progress: &mut F) -> Vec<State>
where
    F: FnMut(MilestoneReport),
{
    let mut pool = vec![State::new()];
    let mut milestone = config.stride;
    while milestone < config.horizon {
        advance_sharded(&mut pool, Goal::Time(milestone as f64), config.opt_time);
        let advanced = pool.len();
        let cull_now = config.cull_interval > 0 && milestone % config.cull_interval == 0;
        if cull_now {
            frontier::cull_sharded(&mut pool);
        }
        progress(MilestoneReport {
            milestone: milestone as f64,
            advanced,
            pool_size: pool.len(),
            culled: cull_now,
        });
        milestone += config.stride;
    }
    advance_sharded(&mut pool, Goal::Clips(config.final_clips), config.opt_time);
    let advanced = pool.len();
    frontier::cull_sharded(&mut pool);
    progress(MilestoneReport {
        milestone: config.final_clips,
        advanced,
        pool_size: pool.len(),
        culled: true,
    });
    pool
}
