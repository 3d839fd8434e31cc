//! Deal record type

use chrono::NaiveDate;

/// One raw deal row, normalized to the four fields the engine consumes
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    /// Salesperson the deal belongs to
    pub owner: String,

    /// Gross (GST-inclusive) amount; `None` when the source cell was
    /// blank or non-numeric. Missing amounts are excluded from revenue
    /// sums, never an error.
    pub gross_amount: Option<f64>,

    /// A deal is closed iff its close-date cell was non-blank,
    /// regardless of whether the cell parsed as a date
    pub closed: bool,

    /// Parsed close date, when the cell was a recognizable date
    pub close_date: Option<NaiveDate>,

    /// Free-form course label, classified by the course taxonomy
    pub course_label: String,
}

impl Deal {
    /// Open deal with just an owner and amount
    pub fn open(owner: &str, gross_amount: f64) -> Self {
        Self {
            owner: owner.to_string(),
            gross_amount: Some(gross_amount),
            closed: false,
            close_date: None,
            course_label: String::new(),
        }
    }

    /// Closed deal with an owner, amount, and course label
    pub fn closed(owner: &str, gross_amount: f64, course_label: &str) -> Self {
        Self {
            owner: owner.to_string(),
            gross_amount: Some(gross_amount),
            closed: true,
            close_date: None,
            course_label: course_label.to_string(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
