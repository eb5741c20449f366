//! Cliptimizer -- a Pareto-frontier search engine for optimal
//! paperclip-factory play.
//!
//! Explores the tree of rational purchase-or-wait decisions in a
//! deterministic resource game, advancing a pool of candidate states in
//! lock-step time strides and keeping, per equivalence bin, only the
//! states no other state dominates.

pub mod branch;
pub mod frontier;
pub mod game;
pub mod record;
pub mod render;
pub mod search;
