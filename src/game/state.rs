//! Game state and continuous-resource dynamics.
//!
//! `State` is one reachable game configuration: five continuous resources,
//! the discrete purchase counters, and the project mask. All production
//! rates are pure functions of the state, so advancing time is a single
//! closed-form step; the branch generator only ever advances to the exact
//! instant of the next decision threshold.

use crate::game::history::History;
use crate::game::project::{ProjectSet, AWARD_ORDER, CREAT_PURCHASES};
use crate::game::tables::{
    one_point_one_to_nth, BASE_CLIP_RATE, CLIP_BOOST, CREAT_CAP, CREAT_RATE_EPSILON, MARKET_BOOST,
    OPS_PER_MEMORY, SECONDS_PER_CREAT, WIRE_SUPPLY,
};

/// Pending same-instant purchase-cascade marker (see `branch::spree`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spree {
    #[default]
    None,
    /// Consider a processor, then memory, then the whole ops catalog.
    Processor,
    /// Consider memory, then the whole ops catalog.
    Memory,
    /// Resume the ops-catalog scan at this index.
    Resume(u8),
}

/// Equivalence-class key. States in different bins affect future production
/// in ways that cannot be ordered a priori, so they are never compared.
pub type Bin = (i32, i32, i32, i32);

/// One reachable game configuration.
///
/// Value semantics throughout: branching clones the parent and mutates the
/// copy, and the search pool holds the only reference to each state.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub(crate) time: f64,
    pub(crate) ops: f64,
    pub(crate) creat: f64,
    pub(crate) clips: f64,
    /// Cumulative gross earnings. Purchases are never deducted; prices are
    /// expressed as cumulative thresholds via `dollars_spent`.
    pub(crate) dollars: f64,
    pub(crate) trust: i32,
    pub(crate) processors: i32,
    pub(crate) memory: i32,
    pub(crate) auto_clippers: i32,
    pub(crate) mlvl: i32,
    pub(crate) projects: ProjectSet,
    pub(crate) spree: Spree,
    pub(crate) history: History,
}

impl State {
    /// The initial configuration: no resources, two trust slots, one
    /// processor, one memory, marketing level one.
    pub fn new() -> State {
        State {
            time: 0.0,
            ops: 0.0,
            creat: 0.0,
            clips: 0.0,
            dollars: 0.0,
            trust: 2,
            processors: 1,
            memory: 1,
            auto_clippers: 0,
            mlvl: 1,
            projects: ProjectSet::EMPTY,
            spree: Spree::None,
            history: History::new(),
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ops(&self) -> f64 {
        self.ops
    }

    pub fn creat(&self) -> f64 {
        self.creat
    }

    pub fn clips(&self) -> f64 {
        self.clips
    }

    pub fn dollars(&self) -> f64 {
        self.dollars
    }

    pub fn trust(&self) -> i32 {
        self.trust
    }

    pub fn processors(&self) -> i32 {
        self.processors
    }

    pub fn memory(&self) -> i32 {
        self.memory
    }

    pub fn auto_clippers(&self) -> i32 {
        self.auto_clippers
    }

    pub fn mlvl(&self) -> i32 {
        self.mlvl
    }

    pub fn projects(&self) -> ProjectSet {
        self.projects
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn win(&self) -> bool {
        self.projects.intersects(ProjectSet::WIN)
    }

    /// The bin key: (processors, memory, autoclippers, marketing level).
    pub fn bin(&self) -> Bin {
        (self.processors, self.memory, self.auto_clippers, self.mlvl)
    }

    /// Operations bank capacity.
    pub fn ops_cap(&self) -> f64 {
        self.memory as f64 * OPS_PER_MEMORY
    }

    /// Trust already committed to purchases. Hypno-harmonics permanently
    /// occupies one slot.
    pub(crate) fn trust_committed(&self) -> i32 {
        let hypno = i32::from(self.projects.intersects(ProjectSet::HYPNO_HARMONICS));
        self.memory + self.processors + hypno
    }

    fn clip_boost(&self) -> f64 {
        CLIP_BOOST[self.projects.clip_boost_tier()]
    }

    fn wire_supply(&self) -> f64 {
        WIRE_SUPPLY[self.projects.wire_supply_tier()]
    }

    fn market_boost(&self) -> f64 {
        MARKET_BOOST[self.projects.market_boost_tier()] * one_point_one_to_nth(self.mlvl - 1)
    }

    /// Clips produced per second.
    pub fn clips_per_second(&self) -> f64 {
        BASE_CLIP_RATE + self.clip_boost() * self.auto_clippers as f64
    }

    fn earnings_per_second(&self) -> f64 {
        let cps = self.clips_per_second();
        f64::min(
            0.232_234_257_819_579_8 * cps.powf(0.534_883_720_930_232_6),
            4.344_680_531_523_482 * cps.powf(0.130_434_782_608_695_57),
        ) * self.market_boost()
    }

    /// Net dollars earned per second: sales minus wire expense.
    pub fn dollars_per_second(&self) -> f64 {
        let base_cost = 20.0;
        let cps = self.clips_per_second();
        let wire_expense_per_second = base_cost * cps / self.wire_supply();
        self.earnings_per_second() - wire_expense_per_second
    }

    /// Closed-form cumulative dollars spent on autoclippers and marketing.
    pub fn dollars_spent(&self) -> f64 {
        let mut spent_on_clippers = 0.0;
        if self.auto_clippers > 0 {
            spent_on_clippers = self.auto_clippers as f64 * 5.0 - 1.0
                + (1.0 - 1.1f64.powi(self.auto_clippers)) / (-0.1);
        }
        let spent_on_marketing = 100.0 * 2.0f64.powi(self.mlvl - 1) - 100.0;
        spent_on_clippers + spent_on_marketing
    }

    /// Operations earned per second. Zero until 2000 clips exist and while
    /// the bank is at capacity.
    pub fn ops_per_second(&self) -> f64 {
        if self.clips < 2000.0 || self.ops >= self.ops_cap() {
            return 0.0;
        }
        self.processors as f64 * 10.0
    }

    /// Creativity earned per second. Zero unless the ops bank is full and
    /// the Creativity project is owned.
    pub fn creat_per_second(&self) -> f64 {
        if self.ops < self.ops_cap() || !self.projects.intersects(ProjectSet::CREATIVITY) {
            return 0.0;
        }
        1.0 / SECONDS_PER_CREAT[self.processors as usize] + CREAT_RATE_EPSILON
    }

    /// A copy of this state after `seconds` pass with no decisions taken.
    ///
    /// The ops bank is not re-clamped here: callers only ever advance to the
    /// exact instant a threshold is reached, so it cannot overshoot.
    pub fn pass_time(&self, seconds: f64) -> State {
        let mut next = self.clone();
        next.time += seconds;
        next.clips += self.clips_per_second() * seconds;
        next.dollars += self.dollars_per_second() * seconds;
        next.ops += self.ops_per_second() * seconds;
        next.creat = (next.creat + self.creat_per_second() * seconds).min(CREAT_CAP);
        next
    }

    /// The next ops level at which a decision unlocks: the cheapest
    /// prerequisite-satisfied ops purchase, or the memory cap. Infinite when
    /// no ops are being earned.
    pub fn next_ops_limit(&self) -> f64 {
        let ops_limit = self.ops_cap();
        let p = self.projects;
        if self.ops == ops_limit || self.clips < 2000.0 {
            f64::INFINITY // not earning ops, nothing to save for
        } else if self.ops < 750.0 && p.meets_prereqs(ProjectSet::IMPROVED_AUTOCLIPPERS) {
            750.0
        } else if self.ops < 1000.0 && (self.memory == 1 || p.meets_prereqs(ProjectSet::CREATIVITY))
        {
            1000.0
        } else if self.ops < 1750.0 && p.meets_prereqs(ProjectSet::IMPROVED_WIRE_EXTRUSION) {
            1750.0
        } else if self.ops < 2000.0 && self.memory == 2 {
            2000.0
        } else if self.ops < 2500.0
            && (p.meets_prereqs(ProjectSet::EVEN_BETTER_AUTOCLIPPERS)
                || p.meets_prereqs(ProjectSet::NEW_SLOGAN))
        {
            2500.0
        } else if self.ops < 3000.0 && self.memory == 3 {
            3000.0
        } else if self.ops < 3500.0 && p.meets_prereqs(ProjectSet::OPTIMIZED_WIRE_EXTRUSION) {
            3500.0
        } else if self.ops < 4000.0 && self.memory == 4 {
            4000.0
        } else if self.ops < 5000.0
            && (self.memory == 5 || p.meets_prereqs(ProjectSet::OPTIMIZED_AUTOCLIPPERS))
        {
            5000.0
        } else if self.ops < 6000.0
            && (self.memory == 6 || p.meets_prereqs(ProjectSet::HADWIGER_CLIP_DIAGRAMS))
        {
            6000.0
        } else if self.ops < 7000.0 && self.memory == 7 {
            7000.0
        } else if self.ops < 7500.0
            && (p.meets_prereqs(ProjectSet::MICROLATTICE_SHAPECASTING)
                || p.meets_prereqs(ProjectSet::HYPNO_HARMONICS))
        {
            7500.0
        } else {
            ops_limit
        }
    }

    /// The next creativity level worth stopping at, plus a must-buy flag:
    /// true when every dearer creativity project is already owned, so there
    /// is nothing left to save for.
    pub fn next_creat_limit(&self) -> (f64, bool) {
        if self.ops < self.ops_cap()
            || !self.projects.intersects(ProjectSet::CREATIVITY)
            || self.creat > CREAT_CAP
        {
            return (f64::INFINITY, false);
        }
        for item in &CREAT_PURCHASES {
            if self.creat < item.cost && self.projects.meets_prereqs(item.project) {
                let must_buy = CREAT_PURCHASES
                    .iter()
                    .filter(|dearer| dearer.cost > item.cost)
                    .all(|dearer| self.projects.intersects(dearer.project));
                return (item.cost, must_buy);
            }
        }
        (f64::INFINITY, false)
    }

    /// Sets the project bit and logs the award. Aborts on a bit outside the
    /// known catalog.
    pub(crate) fn award_project(&mut self, project: ProjectSet) {
        self.projects.insert(project);
        let index = AWARD_ORDER
            .iter()
            .position(|&known| known == project)
            .unwrap_or_else(|| {
                panic!("awarded unknown project bit {:#x}", project.bits());
            });
        self.log_purchase(index as u8);
    }

    fn log(&mut self, value: u8) {
        self.history.push(value);
    }

    pub(crate) fn log_mlvl(&mut self) {
        self.log(self.auto_clippers.min(127) as u8);
    }

    pub(crate) fn log_processor(&mut self) {
        self.log(128);
    }

    pub(crate) fn log_memory(&mut self) {
        self.log(129);
    }

    fn log_purchase(&mut self, index: u8) {
        self.log(130 + index);
    }

    /// True if `project` is available for purchase from this state.
    pub fn project_available(&self, project: ProjectSet) -> bool {
        self.projects.meets_prereqs(project)
    }
}

impl Default for State {
    fn default() -> State {
        State::new()
    }
}
