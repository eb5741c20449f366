//! Read-only game-parameter tables.
//!
//! Pricing curves and production multipliers for the paperclip game,
//! treated as fixed parameters of the search. All data is compile-time
//! constant; nothing here is mutated after program start.

/// Baseline clip production with no autoclippers, in clips per second.
pub const BASE_CLIP_RATE: f64 = 25.000_000_7;

/// Operations bank capacity per memory unit.
pub const OPS_PER_MEMORY: f64 = 1000.0;

/// Creativity bank capacity.
pub const CREAT_CAP: f64 = 250.0;

/// Additive fudge on the creativity rate so creat and ops thresholds never
/// arrive at exactly the same instant.
pub const CREAT_RATE_EPSILON: f64 = 3e-8;

/// Processor count ceiling. The creativity-rate table below must be widened
/// before raising this past 7.
pub const MAX_PROCESSORS: i32 = 6;

/// Memory count ceiling.
pub const MAX_MEMORY: i32 = 10;

/// Clip-rate multiplier per autoclipper, indexed by the low four project
/// bits (the autoclipper and Hadwiger-diagram upgrades compose
/// multiplicatively; the products are precomputed).
pub const CLIP_BOOST: [f64; 16] = [
    1.0, 1.25, 1.5, 1.75, 1.75, 2.0, 2.25, 2.5, 6.0, 6.25, 6.5, 6.75, 6.75, 7.0, 7.25, 7.5,
];

/// Clips of wire per dollar-20 purchase, indexed by the wire project bits.
pub const WIRE_SUPPLY: [f64; 8] = [1000.0, 1500.0, 1750.0, 2625.0, 2000.0, 3000.0, 3500.0, 5250.0];

/// Sales-price multiplier, indexed by the marketing project bits.
pub const MARKET_BOOST: [f64; 8] = [1.0, 1.5, 2.0, 3.0, 5.0, 7.5, 10.0, 15.0];

/// Seconds to earn one creativity point, indexed by processor count.
pub const SECONDS_PER_CREAT: [f64; 8] = [4.0, 4.0, 2.44, 1.12, 0.7, 0.5, 0.38, 0.31];

/// Clip-count milestones. Crossing one past 2000 grants a trust slot;
/// 2000 itself only brings operations online.
pub const CLIPS_MILESTONES: [f64; 11] = [
    2000.0,
    3000.0,
    5000.0,
    8000.0,
    13000.0,
    21000.0,
    34000.0,
    55000.0,
    89000.0,
    144000.0,
    f64::INFINITY,
];

const fn pow_table<const N: usize>(base: f64) -> [f64; N] {
    let mut table = [1.0; N];
    let mut i = 1;
    while i < N {
        table[i] = table[i - 1] * base;
        i += 1;
    }
    table
}

/// 1.1^n for n in 0..40, built by repeated multiplication so every call
/// site sees identical rounding.
pub const ONE_POINT_ONE_TO_NTH: [f64; 40] = pow_table(1.1);

/// Looks up 1.1^n from the precomputed table.
pub fn one_point_one_to_nth(n: i32) -> f64 {
    ONE_POINT_ONE_TO_NTH[n as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_table_matches_repeated_multiplication() {
        assert_eq!(one_point_one_to_nth(0), 1.0);
        assert_eq!(one_point_one_to_nth(1), 1.1);
        assert_eq!(one_point_one_to_nth(3), 1.1 * 1.1 * 1.1);
        assert!((one_point_one_to_nth(10) - 1.1f64.powi(10)).abs() < 1e-12);
    }

    #[test]
    fn milestone_ladder_is_sorted() {
        for pair in CLIPS_MILESTONES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
