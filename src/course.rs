//! Per-course closed-admission counting and top-performer detection
//!
//! Only closed deals count toward admissions. A deal may match several
//! categories; each match counts independently. Ties at a category's
//! maximum count are preserved as a set, never broken arbitrarily.

use crate::config::CourseClassifier;
use crate::deal::Deal;
use log::debug;
use std::collections::BTreeMap;

/// Closed-deal counts for one course category
#[derive(Debug, Clone, Default)]
pub struct CategoryTally {
    counts: BTreeMap<String, u32>,
}

impl CategoryTally {
    /// Closed admissions for a person in this category (zero if none)
    pub fn count(&self, person: &str) -> u32 {
        self.counts.get(person).copied().unwrap_or(0)
    }

    /// Participants: everyone with at least one closed admission
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(person, &count)| (person.as_str(), count))
    }

    /// Maximum count among participants; zero when the category is unused
    pub fn max_count(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Everyone tied at the maximum count. Empty iff the category has no
    /// participants at all.
    pub fn top_performers(&self) -> Vec<&str> {
        let max = self.max_count();
        if max == 0 {
            return Vec::new();
        }
        self.counts
            .iter()
            .filter(|(_, &count)| count == max)
            .map(|(person, _)| person.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Per-category tallies across the whole cohort
#[derive(Debug, Clone, Default)]
pub struct AdmissionCounts {
    categories: BTreeMap<String, CategoryTally>,
}

impl AdmissionCounts {
    pub fn category(&self, name: &str) -> Option<&CategoryTally> {
        self.categories.get(name)
    }

    pub fn count(&self, category: &str, person: &str) -> u32 {
        self.categories
            .get(category)
            .map(|tally| tally.count(person))
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryTally)> {
        self.categories.iter().map(|(name, tally)| (name.as_str(), tally))
    }
}

/// Count closed admissions per person per category.
///
/// Every taxonomy category appears in the result, including unused ones
/// (an unused category is a neutral no-op downstream, not an error).
pub fn count_admissions<C: CourseClassifier + ?Sized>(
    deals: &[Deal],
    classifier: &C,
) -> AdmissionCounts {
    let mut categories: BTreeMap<String, CategoryTally> = classifier
        .categories()
        .into_iter()
        .map(|name| (name, CategoryTally::default()))
        .collect();

    let mut closed_deals = 0usize;
    for deal in deals {
        if !deal.is_closed() || deal.owner.is_empty() {
            continue;
        }
        closed_deals += 1;
        for tag in classifier.classify(&deal.course_label) {
            if let Some(tally) = categories.get_mut(&tag) {
                *tally.counts.entry(deal.owner.clone()).or_insert(0) += 1;
            }
        }
    }

    debug!(
        "counted {} closed deals across {} categories",
        closed_deals,
        categories.len()
    );

    AdmissionCounts { categories }
}
