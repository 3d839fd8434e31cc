//! GST-exclusive revenue normalization and per-person summarization
//!
//! Gross deal amounts include an assumed 18% GST component. Net revenue
//! is `floor(gross / 1.18)` — truncation matters because it can shift a
//! person just below a slab boundary.

use crate::deal::Deal;
use std::collections::BTreeMap;

/// Net revenue after stripping the GST component
pub fn net_revenue(gross: f64, gst_divisor: f64) -> f64 {
    (gross / gst_divisor).floor()
}

/// GST portion of a gross amount: `gross - net`
pub fn gst_portion(gross: f64, gst_divisor: f64) -> f64 {
    gross - net_revenue(gross, gst_divisor)
}

/// Per-person revenue totals
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RevenueSummary {
    /// Sum of the person's deal amounts across all deals
    pub gross: f64,
    /// `floor(gross / gst_divisor)`
    pub net: f64,
    /// `gross - net`
    pub gst: f64,
}

impl RevenueSummary {
    pub fn from_gross(gross: f64, gst_divisor: f64) -> Self {
        let net = net_revenue(gross, gst_divisor);
        Self { gross, net, gst: gross - net }
    }
}

/// Sum gross amounts per owner across all deals and normalize to net.
/// Missing amounts contribute nothing; an owner whose amounts are all
/// missing still appears, with zero revenue.
pub fn summarize(deals: &[Deal], gst_divisor: f64) -> BTreeMap<String, RevenueSummary> {
    let mut gross_by_owner: BTreeMap<String, f64> = BTreeMap::new();

    for deal in deals {
        if deal.owner.is_empty() {
            continue;
        }
        let entry = gross_by_owner.entry(deal.owner.clone()).or_insert(0.0);
        if let Some(amount) = deal.gross_amount {
            *entry += amount;
        }
    }

    gross_by_owner
        .into_iter()
        .map(|(owner, gross)| (owner, RevenueSummary::from_gross(gross, gst_divisor)))
        .collect()
}
