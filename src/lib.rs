//! Sales incentive payout engine
//!
//! Computes per-person incentive payouts from raw deal records in three
//! stages:
//! 1. GST-exclusive revenue normalization and per-person summarization
//! 2. Progressive slab-bracket incentive calculation against each
//!    person's individually negotiated revenue boundaries
//! 3. A course-level penalty/reward pass: people below the closed-deal
//!    target in a course forfeit a fixed share of their incentive, and
//!    the pooled forfeits are split equally among that course's top
//!    performers (ties share)
//!
//! Every run is a pure function of the deal rows and the static
//! configuration tables; nothing is persisted between runs.

pub mod adjust;
pub mod config;
pub mod course;
pub mod deal;
pub mod engine;
pub mod error;
pub mod report;
pub mod revenue;
pub mod slab;

pub use config::{
    CourseClassifier, CourseTaxonomy, EngineParams, PatternClassifier, SlabProfile, SlabTable,
};
pub use engine::PayoutEngine;
pub use error::EngineError;
pub use report::{Kpis, PayoutReport, ReportRow};
