//! Project upgrades and their purchase rules.
//!
//! Each project is one bit in a 22-bit mask. The low bits double as indexes
//! into the production-rate tables (see `tables`), so their positions are
//! load-bearing: bits 0-3 select the clip boost, bits 4-6 the wire supply,
//! bits 7-9 the marketing boost.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of project flags, stored as a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProjectSet(u32);

impl ProjectSet {
    pub const EMPTY: ProjectSet = ProjectSet(0);

    // Clip-rate boosts.
    pub const IMPROVED_AUTOCLIPPERS: ProjectSet = ProjectSet(0x00_0001);
    pub const EVEN_BETTER_AUTOCLIPPERS: ProjectSet = ProjectSet(0x00_0002);
    pub const OPTIMIZED_AUTOCLIPPERS: ProjectSet = ProjectSet(0x00_0004);
    pub const HADWIGER_CLIP_DIAGRAMS: ProjectSet = ProjectSet(0x00_0008);
    // Wire-supply boosts.
    pub const IMPROVED_WIRE_EXTRUSION: ProjectSet = ProjectSet(0x00_0010);
    pub const OPTIMIZED_WIRE_EXTRUSION: ProjectSet = ProjectSet(0x00_0020);
    pub const MICROLATTICE_SHAPECASTING: ProjectSet = ProjectSet(0x00_0040);
    // Marketing boosts.
    pub const NEW_SLOGAN: ProjectSet = ProjectSet(0x00_0080);
    pub const CATCHY_JINGLE: ProjectSet = ProjectSet(0x00_0100);
    pub const HYPNO_HARMONICS: ProjectSet = ProjectSet(0x00_0200);
    // Creativity accrual.
    pub const CREATIVITY: ProjectSet = ProjectSet(0x00_0400);
    // Creativity-funded projects.
    pub const LIMERICK: ProjectSet = ProjectSet(0x00_0800);
    pub const LEXICAL_PROCESSING: ProjectSet = ProjectSet(0x00_1000);
    pub const COMBINATORY_HARMONICS: ProjectSet = ProjectSet(0x00_2000);
    pub const HADWIGER_PROBLEM: ProjectSet = ProjectSet(0x00_4000);
    pub const TOTH_SAUSAGE_CONJECTURE: ProjectSet = ProjectSet(0x00_8000);
    pub const DONKEY_SPACE: ProjectSet = ProjectSet(0x01_0000);
    pub const SLOGAN_CREAT: ProjectSet = ProjectSet(0x02_0000);
    pub const JINGLE_CREAT: ProjectSet = ProjectSet(0x04_0000);
    // Terminal flag, set when the sixth processor is bought at a full
    // 10000-op bank.
    pub const WIN: ProjectSet = ProjectSet(0x20_0000);

    /// Every creativity-funded project. A state that owns all of these has
    /// nothing left to spend creativity on.
    pub const ALL_CREAT_SINKS: ProjectSet = ProjectSet(
        Self::LIMERICK.0
            | Self::LEXICAL_PROCESSING.0
            | Self::COMBINATORY_HARMONICS.0
            | Self::HADWIGER_PROBLEM.0
            | Self::TOTH_SAUSAGE_CONJECTURE.0
            | Self::DONKEY_SPACE.0
            | Self::SLOGAN_CREAT.0
            | Self::JINGLE_CREAT.0,
    );

    pub const fn from_bits(bits: u32) -> ProjectSet {
        ProjectSet(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `other` is set.
    pub const fn contains(self, other: ProjectSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any flag in `other` is set.
    pub const fn intersects(self, other: ProjectSet) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_subset_of(self, other: ProjectSet) -> bool {
        self.0 & other.0 == self.0
    }

    pub fn insert(&mut self, other: ProjectSet) {
        self.0 |= other.0;
    }

    /// Index into `tables::CLIP_BOOST`.
    pub const fn clip_boost_tier(self) -> usize {
        (self.0 & 0xf) as usize
    }

    /// Index into `tables::WIRE_SUPPLY`.
    pub const fn wire_supply_tier(self) -> usize {
        ((self.0 >> 4) & 0x7) as usize
    }

    /// Index into `tables::MARKET_BOOST`.
    pub const fn market_boost_tier(self) -> usize {
        ((self.0 >> 7) & 0x7) as usize
    }

    /// True if `project` is not yet owned and all its prerequisites are.
    /// Does not check whether the cost can be paid.
    pub fn meets_prereqs(self, project: ProjectSet) -> bool {
        !self.intersects(project) && self.contains(prerequisites(project))
    }
}

impl BitOr for ProjectSet {
    type Output = ProjectSet;
    fn bitor(self, rhs: ProjectSet) -> ProjectSet {
        ProjectSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for ProjectSet {
    fn bitor_assign(&mut self, rhs: ProjectSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ProjectSet {
    type Output = ProjectSet;
    fn bitand(self, rhs: ProjectSet) -> ProjectSet {
        ProjectSet(self.0 & rhs.0)
    }
}

impl fmt::Debug for ProjectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProjectSet({:#08x})", self.0)
    }
}

/// The project bits that must be owned before `project` becomes available.
pub fn prerequisites(project: ProjectSet) -> ProjectSet {
    if project == ProjectSet::EVEN_BETTER_AUTOCLIPPERS {
        ProjectSet::IMPROVED_AUTOCLIPPERS
    } else if project == ProjectSet::OPTIMIZED_AUTOCLIPPERS {
        ProjectSet::EVEN_BETTER_AUTOCLIPPERS
    } else if project == ProjectSet::HADWIGER_CLIP_DIAGRAMS {
        ProjectSet::HADWIGER_PROBLEM
    } else if project == ProjectSet::OPTIMIZED_WIRE_EXTRUSION {
        ProjectSet::IMPROVED_WIRE_EXTRUSION
    } else if project == ProjectSet::MICROLATTICE_SHAPECASTING {
        ProjectSet::OPTIMIZED_WIRE_EXTRUSION
    } else if project == ProjectSet::NEW_SLOGAN || project == ProjectSet::CATCHY_JINGLE {
        ProjectSet::LEXICAL_PROCESSING | ProjectSet::SLOGAN_CREAT
    } else if project == ProjectSet::HYPNO_HARMONICS {
        ProjectSet::CATCHY_JINGLE
    } else {
        ProjectSet::EMPTY
    }
}

/// An operations-funded purchase. The catalog is ordered by descending
/// cost; spree expansion resumes its scan from a catalog index and never
/// revisits earlier entries, so purchase chains form a DAG.
#[derive(Debug, Clone, Copy)]
pub struct OpsPurchase {
    pub cost: f64,
    pub project: ProjectSet,
}

pub const OPS_PURCHASES: [OpsPurchase; 11] = [
    OpsPurchase { cost: 7500.0, project: ProjectSet::HYPNO_HARMONICS },
    OpsPurchase { cost: 7500.0, project: ProjectSet::MICROLATTICE_SHAPECASTING },
    OpsPurchase { cost: 6000.0, project: ProjectSet::HADWIGER_CLIP_DIAGRAMS },
    OpsPurchase { cost: 5000.0, project: ProjectSet::OPTIMIZED_AUTOCLIPPERS },
    OpsPurchase { cost: 4500.0, project: ProjectSet::CATCHY_JINGLE },
    OpsPurchase { cost: 3500.0, project: ProjectSet::OPTIMIZED_WIRE_EXTRUSION },
    OpsPurchase { cost: 2500.0, project: ProjectSet::NEW_SLOGAN },
    OpsPurchase { cost: 2500.0, project: ProjectSet::EVEN_BETTER_AUTOCLIPPERS },
    OpsPurchase { cost: 1750.0, project: ProjectSet::IMPROVED_WIRE_EXTRUSION },
    OpsPurchase { cost: 1000.0, project: ProjectSet::CREATIVITY },
    OpsPurchase { cost: 750.0, project: ProjectSet::IMPROVED_AUTOCLIPPERS },
];

/// A creativity-funded purchase, in ascending cost order. The trust-earning
/// projects also grant a trust slot on award.
#[derive(Debug, Clone, Copy)]
pub struct CreatPurchase {
    pub cost: f64,
    pub project: ProjectSet,
    pub earns_trust: bool,
}

pub const CREAT_PURCHASES: [CreatPurchase; 8] = [
    CreatPurchase { cost: 10.0, project: ProjectSet::LIMERICK, earns_trust: true },
    CreatPurchase { cost: 25.0, project: ProjectSet::SLOGAN_CREAT, earns_trust: false },
    CreatPurchase { cost: 45.0, project: ProjectSet::JINGLE_CREAT, earns_trust: false },
    CreatPurchase { cost: 50.0, project: ProjectSet::LEXICAL_PROCESSING, earns_trust: true },
    CreatPurchase { cost: 100.0, project: ProjectSet::COMBINATORY_HARMONICS, earns_trust: true },
    CreatPurchase { cost: 150.0, project: ProjectSet::HADWIGER_PROBLEM, earns_trust: true },
    CreatPurchase { cost: 200.0, project: ProjectSet::TOTH_SAUSAGE_CONJECTURE, earns_trust: true },
    CreatPurchase { cost: 250.0, project: ProjectSet::DONKEY_SPACE, earns_trust: true },
];

/// History-log award order: a project's log byte is 130 plus its index here.
pub const AWARD_ORDER: [ProjectSet; 19] = [
    ProjectSet::IMPROVED_AUTOCLIPPERS,
    ProjectSet::CREATIVITY,
    ProjectSet::IMPROVED_WIRE_EXTRUSION,
    ProjectSet::EVEN_BETTER_AUTOCLIPPERS,
    ProjectSet::NEW_SLOGAN,
    ProjectSet::OPTIMIZED_WIRE_EXTRUSION,
    ProjectSet::CATCHY_JINGLE,
    ProjectSet::OPTIMIZED_AUTOCLIPPERS,
    ProjectSet::HADWIGER_CLIP_DIAGRAMS,
    ProjectSet::MICROLATTICE_SHAPECASTING,
    ProjectSet::HYPNO_HARMONICS,
    ProjectSet::LIMERICK,
    ProjectSet::SLOGAN_CREAT,
    ProjectSet::JINGLE_CREAT,
    ProjectSet::LEXICAL_PROCESSING,
    ProjectSet::COMBINATORY_HARMONICS,
    ProjectSet::HADWIGER_PROBLEM,
    ProjectSet::TOTH_SAUSAGE_CONJECTURE,
    ProjectSet::DONKEY_SPACE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_and_contains_algebra() {
        let owned = ProjectSet::IMPROVED_AUTOCLIPPERS | ProjectSet::CREATIVITY;
        assert!(owned.contains(ProjectSet::CREATIVITY));
        assert!(!owned.contains(ProjectSet::CREATIVITY | ProjectSet::LIMERICK));
        assert!(owned.intersects(ProjectSet::CREATIVITY | ProjectSet::LIMERICK));
        assert!(ProjectSet::CREATIVITY.is_subset_of(owned));
        assert!(!owned.is_subset_of(ProjectSet::CREATIVITY));
        assert!(ProjectSet::EMPTY.is_subset_of(owned));
    }

    #[test]
    fn prereq_chain_for_autoclipper_upgrades() {
        let none = ProjectSet::EMPTY;
        assert!(none.meets_prereqs(ProjectSet::IMPROVED_AUTOCLIPPERS));
        assert!(!none.meets_prereqs(ProjectSet::EVEN_BETTER_AUTOCLIPPERS));

        let improved = ProjectSet::IMPROVED_AUTOCLIPPERS;
        assert!(improved.meets_prereqs(ProjectSet::EVEN_BETTER_AUTOCLIPPERS));
        assert!(!improved.meets_prereqs(ProjectSet::OPTIMIZED_AUTOCLIPPERS));
    }

    #[test]
    fn slogan_needs_both_lexical_and_slogan_creat() {
        let lexical_only = ProjectSet::LEXICAL_PROCESSING;
        assert!(!lexical_only.meets_prereqs(ProjectSet::NEW_SLOGAN));
        let both = ProjectSet::LEXICAL_PROCESSING | ProjectSet::SLOGAN_CREAT;
        assert!(both.meets_prereqs(ProjectSet::NEW_SLOGAN));
        assert!(both.meets_prereqs(ProjectSet::CATCHY_JINGLE));
        assert!(!both.meets_prereqs(ProjectSet::HYPNO_HARMONICS));
    }

    #[test]
    fn purchased_projects_are_not_available() {
        let owned = ProjectSet::CREATIVITY;
        assert!(!owned.meets_prereqs(ProjectSet::CREATIVITY));
    }

    #[test]
    fn award_order_is_distinct_single_bits() {
        for (i, a) in AWARD_ORDER.iter().enumerate() {
            assert_eq!(a.bits().count_ones(), 1);
            for b in &AWARD_ORDER[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn catalogs_cover_the_award_order() {
        for item in &OPS_PURCHASES {
            assert!(AWARD_ORDER.contains(&item.project));
        }
        for item in &CREAT_PURCHASES {
            assert!(AWARD_ORDER.contains(&item.project));
        }
    }

    #[test]
    fn ops_catalog_costs_descend_and_creat_costs_ascend() {
        for pair in OPS_PURCHASES.windows(2) {
            assert!(pair[0].cost >= pair[1].cost);
        }
        for pair in CREAT_PURCHASES.windows(2) {
            assert!(pair[0].cost < pair[1].cost);
        }
    }

    #[test]
    fn rate_tier_extraction() {
        let p = ProjectSet::IMPROVED_AUTOCLIPPERS | ProjectSet::HADWIGER_CLIP_DIAGRAMS;
        assert_eq!(p.clip_boost_tier(), 0b1001);
        let w = ProjectSet::IMPROVED_WIRE_EXTRUSION | ProjectSet::MICROLATTICE_SHAPECASTING;
        assert_eq!(w.wire_supply_tier(), 0b101);
        let m = ProjectSet::NEW_SLOGAN | ProjectSet::HYPNO_HARMONICS;
        assert_eq!(m.market_boost_tier(), 0b101);
    }
}
