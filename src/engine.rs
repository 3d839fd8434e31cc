//! Full payout pipeline orchestration
//!
//! One batch run: summarize revenue, compute the first-pass slab
//! incentive per person (parallel over the person dimension), count
//! closed admissions per course, apply the penalty/reward pass, and
//! assemble the report. The penalty/reward pass needs the complete
//! cohort's counts before any redistribution decision, so it runs after
//! the parallel pass as a reduction.

use crate::adjust;
use crate::config::{CourseClassifier, EngineParams, SlabTable};
use crate::course;
use crate::deal::Deal;
use crate::report::{self, PayoutReport};
use crate::revenue;
use crate::slab::{self, IncentiveResult};
use log::info;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// The payout engine: static configuration plus the run parameters.
/// Each [`run`](PayoutEngine::run) is a pure function of the deal rows.
pub struct PayoutEngine {
    slab_table: SlabTable,
    classifier: Box<dyn CourseClassifier + Send + Sync>,
    params: EngineParams,
}

impl PayoutEngine {
    pub fn new(
        slab_table: SlabTable,
        classifier: Box<dyn CourseClassifier + Send + Sync>,
        params: EngineParams,
    ) -> Self {
        Self { slab_table, classifier, params }
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Run the full batch computation over one set of deal rows
    pub fn run(&self, deals: &[Deal]) -> PayoutReport {
        info!("running payout over {} deal rows", deals.len());

        let summaries = revenue::summarize(deals, self.params.gst_divisor);

        // Union of everyone with deals and everyone with a profile
        let mut names: BTreeSet<String> = summaries.keys().cloned().collect();
        names.extend(self.slab_table.names().map(String::from));

        // First pass: slab incentive per person
        let incentives: BTreeMap<String, IncentiveResult> = names
            .par_iter()
            .map(|name| {
                let net = summaries.get(name).map(|s| s.net).unwrap_or(0.0);
                let profile = self.slab_table.get(name);
                let result =
                    slab::calculate(net, &profile, self.params.block_size, &self.params.rates);
                (name.clone(), result)
            })
            .collect();

        let first_pass: BTreeMap<String, f64> = incentives
            .iter()
            .map(|(name, result)| (name.clone(), result.total))
            .collect();

        // Second pass: course counts, then the penalty/reward reduction
        let counts = course::count_admissions(deals, self.classifier.as_ref());
        let adjustments = adjust::apply(
            &counts,
            &first_pass,
            self.params.course_target,
            self.params.penalty_rate,
        );

        let report = report::assemble(
            &summaries,
            &incentives,
            &adjustments,
            names.into_iter(),
            self.classifier.categories(),
        );

        info!("assembled {} report rows", report.rows.len());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CourseTaxonomy, PatternClassifier, SlabProfile};
    use approx::assert_relative_eq;

    fn engine() -> PayoutEngine {
        let mut profiles = std::collections::BTreeMap::new();
        profiles.insert(
            "Asha".to_string(),
            SlabProfile::new(90_000.0, 300_000.0, 500_000.0, 700_000.0),
        );
        profiles.insert(
            "Beena".to_string(),
            SlabProfile::new(100_000.0, 310_000.0, 510_000.0, 710_000.0),
        );
        let slab_table = SlabTable::new(profiles).unwrap();
        let classifier = PatternClassifier::new(&CourseTaxonomy::default_catalog());
        PayoutEngine::new(slab_table, Box::new(classifier), EngineParams::default())
    }

    fn sample_deals() -> Vec<Deal> {
        let mut deals = Vec::new();
        // Asha: gross 354000 -> net 300000, exactly at slab2
        deals.push(Deal::closed("Asha", 118_000.0, "Data Science Bootcamp"));
        deals.push(Deal::closed("Asha", 118_000.0, "Data Science Bootcamp"));
        deals.push(Deal::closed("Asha", 118_000.0, "Data Science Bootcamp"));
        // Beena: gross 236000 -> net 200000, first bracket, below course target
        deals.push(Deal::closed("Beena", 118_000.0, "Data Science Bootcamp"));
        deals.push(Deal::open("Beena", 118_000.0));
        // A walk-in with no profile
        deals.push(Deal::closed("Chitra", 118_000.0, "Digital Marketing 101"));
        deals
    }

    #[test]
    fn test_end_to_end() {
        let report = engine().run(&sample_deals());

        assert_eq!(report.rows.len(), 3);
        let row = |name: &str| report.rows.iter().find(|r| r.name == name).unwrap();

        // Asha: net 300000 at slab2 -> 21 blocks * 100 = 2100; top
        // performer in Data Science, collects Beena's penalty
        let asha = row("Asha");
        assert_eq!(asha.revenue.net, 300_000.0);
        assert_relative_eq!(asha.first_incentive(), 2_100.0);
        let beena_penalty = 1_000.0 * 0.11;
        assert_relative_eq!(asha.final_incentive, 2_100.0 + beena_penalty);

        // Beena: net 200000 -> 10 blocks * 100 = 1000... floor((200000-100000)/10000)=10
        let beena = row("Beena");
        assert_relative_eq!(beena.first_incentive(), 1_000.0);
        assert_relative_eq!(beena.total_penalty, 1_000.0 * 0.11);
        assert_relative_eq!(beena.final_incentive, 1_000.0 * (1.0 - 0.11));

        // Chitra: no profile -> never eligible, and sole participant in
        // Digital Marketing -> top performer of an empty pool
        let chitra = row("Chitra");
        assert!(!chitra.eligible());
        assert_eq!(chitra.final_incentive, 0.0);
    }

    #[test]
    fn test_idempotent_over_identical_input() {
        let deals = sample_deals();
        let eng = engine();
        let first = eng.run(&deals);
        let second = eng.run(&deals);
        assert_eq!(first, second);
        assert_eq!(
            first.to_csv_string().unwrap(),
            second.to_csv_string().unwrap()
        );
    }

    #[test]
    fn test_gst_round_trip_per_person() {
        let report = engine().run(&sample_deals());
        for row in &report.rows {
            assert_eq!(row.revenue.net + row.revenue.gst, row.revenue.gross);
        }
    }

    #[test]
    fn test_configured_person_with_no_deals_appears() {
        let report = engine().run(&[Deal::open("Asha", 118_000.0)]);
        let beena = report.rows.iter().find(|r| r.name == "Beena").unwrap();
        assert_eq!(beena.revenue, Default::default());
        assert!(!beena.eligible());
        assert_eq!(beena.final_incentive, 0.0);
    }

    #[test]
    fn test_kpis() {
        let report = engine().run(&sample_deals());
        let kpis = report.kpis();
        assert_eq!(kpis.eligible_people, 2);
        assert_relative_eq!(kpis.total_net_revenue, 300_000.0 + 200_000.0 + 100_000.0);
        assert_relative_eq!(kpis.total_first_incentive, 3_100.0);
        // pools are conserved, so the final total matches the first pass
        assert_relative_eq!(kpis.total_final_incentive, 3_100.0);
    }
}
