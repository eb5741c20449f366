//! Game model: projects, parameter tables, action history, and state.
//!
//! Contains the core data structures describing one reachable game
//! configuration and the fixed pricing/production parameters of the game.

pub mod history;
pub mod project;
pub mod state;
pub mod tables;

pub use history::{Action, History, HistoryError, HISTORY_CAPACITY};
pub use project::{
    prerequisites, CreatPurchase, OpsPurchase, ProjectSet, AWARD_ORDER, CREAT_PURCHASES,
    OPS_PURCHASES,
};
pub use state::{Bin, Spree, State};
pub use tables::{BASE_CLIP_RATE, CREAT_CAP, MAX_MEMORY, MAX_PROCESSORS, OPS_PER_MEMORY};
