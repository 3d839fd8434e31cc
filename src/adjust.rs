//! Course-level penalty pooling and reward redistribution
//!
//! Evaluated once per category, independently. Participants (at least
//! one closed admission) below the target are charged a fixed fraction
//! of their first-pass incentive into the category's pool; the pool is
//! then split equally among the category's top performers. People with
//! no closed admissions in a category are exempt — absence is not
//! failure. Penalties are always computed from the first-pass
//! incentive, so categories never compound on each other.
//!
//! Top performers are exempt from the penalty even when the whole
//! category is below target; this keeps every pool fully redistributed
//! and every (person, category) pair at penalty-xor-reward.

use crate::course::AdmissionCounts;
use log::debug;
use std::collections::BTreeMap;

/// Outcome for one (person, category) pair; at most one of `penalty`
/// and `reward` is non-zero
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Adjustment {
    /// Closed admissions in the category
    pub count: u32,
    /// Charged when below target and not a top performer
    pub penalty: f64,
    /// Equal share of the category's penalty pool, for top performers
    pub reward: f64,
}

/// All per-category adjustments for a run
#[derive(Debug, Clone, Default)]
pub struct AdjustmentSet {
    /// category -> person -> adjustment (participants only)
    per_category: BTreeMap<String, BTreeMap<String, Adjustment>>,
}

impl AdjustmentSet {
    /// Adjustment for a (person, category) pair; zero for non-participants
    pub fn get(&self, category: &str, person: &str) -> Adjustment {
        self.per_category
            .get(category)
            .and_then(|entries| entries.get(person))
            .copied()
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Adjustment>)> {
        self.per_category
            .iter()
            .map(|(category, entries)| (category.as_str(), entries))
    }

    /// Sum of a person's penalties across all categories
    pub fn total_penalty(&self, person: &str) -> f64 {
        self.per_category
            .values()
            .filter_map(|entries| entries.get(person))
            .map(|adjustment| adjustment.penalty)
            .sum()
    }

    /// Sum of a person's rewards across all categories
    pub fn total_reward(&self, person: &str) -> f64 {
        self.per_category
            .values()
            .filter_map(|entries| entries.get(person))
            .map(|adjustment| adjustment.reward)
            .sum()
    }
}

/// Apply the penalty/reward pass over all categories.
///
/// `first_pass` maps each person to their first-pass (slab) incentive.
pub fn apply(
    counts: &AdmissionCounts,
    first_pass: &BTreeMap<String, f64>,
    target: u32,
    penalty_rate: f64,
) -> AdjustmentSet {
    let mut set = AdjustmentSet::default();

    for (category, tally) in counts.iter() {
        let top_performers = tally.top_performers();

        let mut entries: BTreeMap<String, Adjustment> = BTreeMap::new();
        let mut pool = 0.0;

        for (person, count) in tally.iter() {
            let mut adjustment = Adjustment { count, ..Adjustment::default() };

            if count < target && !top_performers.contains(&person) {
                let first = first_pass.get(person).copied().unwrap_or(0.0);
                adjustment.penalty = first * penalty_rate;
                pool += adjustment.penalty;
            }

            entries.insert(person.to_string(), adjustment);
        }

        if pool > 0.0 {
            // Non-empty pool implies at least one participant, hence a
            // non-empty top-performer set
            let share = pool / top_performers.len() as f64;
            for person in &top_performers {
                if let Some(entry) = entries.get_mut(*person) {
                    entry.reward = share;
                }
            }
            debug!(
                "category '{}': pool {:.2} split {} ways",
                category,
                pool,
                top_performers.len()
            );
        }

        set.per_category.insert(category.to_string(), entries);
    }

    set
}
