//! Progressive slab incentive calculation
//!
//! The scheme is a proper progressive ladder, like tax brackets: every
//! fully crossed bracket contributes its full span's blocks at that
//! bracket's rate, and the bracket containing the net revenue
//! contributes only the blocks earned above its lower boundary.
//! Partial ₹10,000 blocks are truncated, never rounded.

use crate::config::SlabProfile;

/// Bracket reached by a person's net revenue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    NotReached,
    First,
    Second,
    Third,
    Fourth,
}

impl Bracket {
    pub fn label(&self) -> &'static str {
        match self {
            Bracket::NotReached => "Not Reached",
            Bracket::First => "First Slab",
            Bracket::Second => "Second Slab",
            Bracket::Third => "Third Slab",
            Bracket::Fourth => "Fourth Slab",
        }
    }
}

/// One bracket's audited contribution to the incentive
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BracketLine {
    /// Net revenue eligible within this bracket's span
    pub eligible: f64,
    /// Whole blocks earned in this bracket
    pub blocks: u64,
    /// `blocks * rate`
    pub incentive: f64,
}

/// Full per-bracket breakdown plus the first-pass total
#[derive(Debug, Clone, PartialEq)]
pub struct IncentiveResult {
    pub bracket: Bracket,
    pub lines: [BracketLine; 4],
    /// First-pass incentive: sum of the four bracket incentives
    pub total: f64,
}

impl IncentiveResult {
    /// Zero result for someone below their eligibility floor
    pub fn not_reached() -> Self {
        Self {
            bracket: Bracket::NotReached,
            lines: [BracketLine::default(); 4],
            total: 0.0,
        }
    }
}

/// Compute the bracketed incentive for one person.
///
/// A degenerate profile (the all-zero fallback for people absent from
/// the slab table) is permanently "Not Reached".
pub fn calculate(
    net_revenue: f64,
    profile: &SlabProfile,
    block_size: f64,
    rates: &[f64; 4],
) -> IncentiveResult {
    if !profile.is_valid() {
        return IncentiveResult::not_reached();
    }

    let [s1, s2, s3, s4] = profile.boundaries();
    if net_revenue < s1 {
        return IncentiveResult::not_reached();
    }

    let lowers = [s1, s2, s3, s4];
    let uppers = [s2, s3, s4, f64::INFINITY];

    let mut lines = [BracketLine::default(); 4];
    for i in 0..4 {
        if net_revenue < lowers[i] {
            break;
        }
        let eligible = net_revenue.min(uppers[i]) - lowers[i];
        let blocks = (eligible / block_size).floor();
        lines[i] = BracketLine {
            eligible,
            blocks: blocks as u64,
            incentive: blocks * rates[i],
        };
    }

    let bracket = if net_revenue >= s4 {
        Bracket::Fourth
    } else if net_revenue >= s3 {
        Bracket::Third
    } else if net_revenue >= s2 {
        Bracket::Second
    } else {
        Bracket::First
    };

    let total = lines.iter().map(|line| line.incentive).sum();

    IncentiveResult { bracket, lines, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BLOCK_SIZE, SLAB_RATES};

    fn profile() -> SlabProfile {
        SlabProfile::new(90_000.0, 300_000.0, 500_000.0, 700_000.0)
    }

    fn incentive(net: f64) -> f64 {
        calculate(net, &profile(), BLOCK_SIZE, &SLAB_RATES).total
    }

    #[test]
    fn test_below_floor_not_reached() {
        let result = calculate(89_999.0, &profile(), BLOCK_SIZE, &SLAB_RATES);
        assert_eq!(result.bracket, Bracket::NotReached);
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_worked_example_at_second_boundary() {
        // slab1=90000, net exactly at slab2=300000:
        // floor((300000-90000)/10000) * 100 = 21 * 100 = 2100
        let result = calculate(300_000.0, &profile(), BLOCK_SIZE, &SLAB_RATES);
        assert_eq!(result.bracket, Bracket::Second);
        assert_eq!(result.lines[0].blocks, 21);
        assert_eq!(result.lines[0].incentive, 2_100.0);
        assert_eq!(result.lines[1].blocks, 0);
        assert_eq!(result.total, 2_100.0);
    }

    #[test]
    fn test_partial_blocks_truncate() {
        // 19999 above the floor is only one whole block
        assert_eq!(incentive(90_000.0 + 19_999.0), 100.0);
        assert_eq!(incentive(90_000.0 + 20_000.0), 200.0);
    }

    #[test]
    fn test_full_ladder_in_fourth_bracket() {
        // net = 750000: first 21 blocks, second 20 blocks, third 20
        // blocks, fourth 5 blocks
        let result = calculate(750_000.0, &profile(), BLOCK_SIZE, &SLAB_RATES);
        assert_eq!(result.bracket, Bracket::Fourth);
        assert_eq!(result.lines[0].incentive, 21.0 * 100.0);
        assert_eq!(result.lines[1].incentive, 20.0 * 110.0);
        assert_eq!(result.lines[2].incentive, 20.0 * 120.0);
        assert_eq!(result.lines[3].incentive, 5.0 * 130.0);
        assert_eq!(result.total, 2_100.0 + 2_200.0 + 2_400.0 + 650.0);
    }

    #[test]
    fn test_monotonic_in_net_revenue() {
        let mut last = 0.0;
        let mut net = 0.0;
        while net <= 900_000.0 {
            let total = incentive(net);
            assert!(
                total >= last,
                "incentive decreased at net={}: {} -> {}",
                net,
                last,
                total
            );
            last = total;
            net += 2_500.0;
        }
    }

    #[test]
    fn test_bracket_continuity_across_boundary() {
        // Crossing slab2 by exactly one block adds exactly one block at
        // the second rate, nothing more
        let at_boundary = incentive(300_000.0);
        let one_block_above = incentive(300_000.0 + BLOCK_SIZE);
        assert_eq!(one_block_above - at_boundary, SLAB_RATES[1]);
        // the 21st first-bracket block completes exactly at the boundary
        let just_below = incentive(300_000.0 - 1.0);
        assert_eq!(at_boundary - just_below, SLAB_RATES[0]);
    }

    #[test]
    fn test_zero_profile_always_not_reached() {
        let result = calculate(1_000_000.0, &SlabProfile::ZERO, BLOCK_SIZE, &SLAB_RATES);
        assert_eq!(result.bracket, Bracket::NotReached);
        assert_eq!(result.total, 0.0);
    }
}
