//! Final report assembly and CSV export
//!
//! Pure projection: joins the revenue, slab, course, and adjustment
//! results into one row per person. Rows cover the union of everyone
//! appearing in the deals or the slab profile table, sorted by name so
//! repeated runs export byte-identical output.

use crate::adjust::{Adjustment, AdjustmentSet};
use crate::error::EngineError;
use crate::revenue::RevenueSummary;
use crate::slab::{Bracket, IncentiveResult};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// One row of the final payout report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub revenue: RevenueSummary,
    pub incentive: IncentiveResult,
    /// Per-category count/penalty/reward, keyed by category name
    pub courses: BTreeMap<String, Adjustment>,
    pub total_penalty: f64,
    pub total_reward: f64,
    pub final_incentive: f64,
}

impl ReportRow {
    /// First-pass incentive before the course adjustments
    pub fn first_incentive(&self) -> f64 {
        self.incentive.total
    }

    pub fn net_adjustment(&self) -> f64 {
        self.total_reward - self.total_penalty
    }

    pub fn eligible(&self) -> bool {
        self.incentive.bracket != Bracket::NotReached
    }
}

/// Run-level aggregates (the dashboard KPI cards)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kpis {
    pub total_net_revenue: f64,
    pub total_first_incentive: f64,
    pub total_final_incentive: f64,
    pub eligible_people: usize,
}

/// The assembled result of one payout run
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutReport {
    pub rows: Vec<ReportRow>,
    /// Category column order, fixed by the taxonomy
    pub categories: Vec<String>,
}

impl PayoutReport {
    pub fn kpis(&self) -> Kpis {
        Kpis {
            total_net_revenue: self.rows.iter().map(|r| r.revenue.net).sum(),
            total_first_incentive: self.rows.iter().map(|r| r.first_incentive()).sum(),
            total_final_incentive: self.rows.iter().map(|r| r.final_incentive).sum(),
            eligible_people: self.rows.iter().filter(|r| r.eligible()).count(),
        }
    }

    /// Export the report as delimited text, one row per person
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), EngineError> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec![
            "Name".to_string(),
            "Gross Revenue".to_string(),
            "Net Revenue".to_string(),
            "GST".to_string(),
            "Bracket".to_string(),
        ];
        for slab in 1..=4 {
            header.push(format!("Slab{} Blocks", slab));
            header.push(format!("Slab{} Incentive", slab));
        }
        for category in &self.categories {
            header.push(format!("{} Closed", category));
            header.push(format!("{} Penalty", category));
            header.push(format!("{} Reward", category));
        }
        header.extend(
            [
                "First Incentive",
                "Total Penalty",
                "Total Reward",
                "Net Adjustment",
                "Final Incentive",
                "Status",
            ]
            .map(String::from),
        );
        wtr.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![
                row.name.clone(),
                format!("{:.2}", row.revenue.gross),
                format!("{:.0}", row.revenue.net),
                format!("{:.2}", row.revenue.gst),
                row.incentive.bracket.label().to_string(),
            ];
            for line in &row.incentive.lines {
                record.push(line.blocks.to_string());
                record.push(format!("{:.2}", line.incentive));
            }
            for category in &self.categories {
                let adjustment = row.courses.get(category).copied().unwrap_or_default();
                record.push(adjustment.count.to_string());
                record.push(format!("{:.2}", adjustment.penalty));
                record.push(format!("{:.2}", adjustment.reward));
            }
            record.push(format!("{:.2}", row.first_incentive()));
            record.push(format!("{:.2}", row.total_penalty));
            record.push(format!("{:.2}", row.total_reward));
            record.push(format!("{:.2}", row.net_adjustment()));
            record.push(format!("{:.2}", row.final_incentive));
            record.push(if row.eligible() { "Eligible" } else { "Not Eligible" }.to_string());
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String, EngineError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| EngineError::Config(format!("report not valid UTF-8: {}", e)))
    }
}

/// Join all computed fields into one row per person
pub fn assemble(
    summaries: &BTreeMap<String, RevenueSummary>,
    incentives: &BTreeMap<String, IncentiveResult>,
    adjustments: &AdjustmentSet,
    configured_names: impl Iterator<Item = String>,
    categories: Vec<String>,
) -> PayoutReport {
    // Union of everyone in the deals and in the profile table; BTreeSet
    // gives the sorted, deterministic row order
    let mut names: BTreeSet<String> = summaries.keys().cloned().collect();
    names.extend(configured_names);

    let rows = names
        .into_iter()
        .map(|name| {
            let revenue = summaries.get(&name).copied().unwrap_or_default();
            let incentive = incentives
                .get(&name)
                .cloned()
                .unwrap_or_else(IncentiveResult::not_reached);

            let courses: BTreeMap<String, Adjustment> = categories
                .iter()
                .map(|category| (category.clone(), adjustments.get(category, &name)))
                .collect();

            let total_penalty = adjustments.total_penalty(&name);
            let total_reward = adjustments.total_reward(&name);
            let final_incentive = incentive.total - total_penalty + total_reward;

            ReportRow {
                name,
                revenue,
                incentive,
                courses,
                total_penalty,
                total_reward,
                final_incentive,
            }
        })
        .collect();

    PayoutReport { rows, categories }
}
