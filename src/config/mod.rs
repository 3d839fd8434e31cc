//! Static configuration: slab profile tables, course taxonomy, and the
//! global numeric parameters of a payout run

pub mod profiles;
pub mod taxonomy;

pub use profiles::{SlabProfile, SlabTable};
pub use taxonomy::{CourseCategory, CourseClassifier, CourseTaxonomy, PatternClassifier};

use serde::{Deserialize, Serialize};

// ============================================================================
// Scheme Constants
// ============================================================================
// The incentive scheme's global constants. Rates are fixed across the
// whole team; only the slab boundaries are negotiated per person.

/// GST divisor: net revenue = floor(gross / 1.18)
pub const GST_DIVISOR: f64 = 1.18;

/// Incentive block size — only whole ₹10,000 increments earn incentive
pub const BLOCK_SIZE: f64 = 10_000.0;

/// Per-block incentive rates above slab 1 through slab 4
pub const SLAB_RATES: [f64; 4] = [100.0, 110.0, 120.0, 130.0];

/// Closed admissions required per course category to avoid the penalty
pub const COURSE_TARGET: u32 = 3;

/// Penalty charged on the first-pass incentive when below target (11%)
pub const PENALTY_RATE: f64 = 0.11;

/// Numeric parameters for a payout run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineParams {
    /// Divisor applied to gross revenue to strip the GST component
    #[serde(default = "default_gst_divisor")]
    pub gst_divisor: f64,

    /// Size of one incentive block in rupees
    #[serde(default = "default_block_size")]
    pub block_size: f64,

    /// Per-block rates for the four slab brackets
    #[serde(default = "default_rates")]
    pub rates: [f64; 4],

    /// Closed admissions required per course category
    #[serde(default = "default_course_target")]
    pub course_target: u32,

    /// Penalty fraction of the first-pass incentive
    #[serde(default = "default_penalty_rate")]
    pub penalty_rate: f64,
}

fn default_gst_divisor() -> f64 { GST_DIVISOR }
fn default_block_size() -> f64 { BLOCK_SIZE }
fn default_rates() -> [f64; 4] { SLAB_RATES }
fn default_course_target() -> u32 { COURSE_TARGET }
fn default_penalty_rate() -> f64 { PENALTY_RATE }

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            gst_divisor: GST_DIVISOR,
            block_size: BLOCK_SIZE,
            rates: SLAB_RATES,
            course_target: COURSE_TARGET,
            penalty_rate: PENALTY_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: EngineParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.gst_divisor, 1.18);
        assert_eq!(params.block_size, 10_000.0);
        assert_eq!(params.rates, [100.0, 110.0, 120.0, 130.0]);
        assert_eq!(params.course_target, 3);
        assert_eq!(params.penalty_rate, 0.11);
    }

    #[test]
    fn test_params_partial_override() {
        let params: EngineParams = serde_json::from_str(r#"{"course_target": 5}"#).unwrap();
        assert_eq!(params.course_target, 5);
        assert_eq!(params.penalty_rate, 0.11);
    }
}
