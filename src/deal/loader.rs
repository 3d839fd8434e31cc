//! Deal loading from tabular (CSV) sources
//!
//! The upstream export is a spreadsheet dump with arbitrary columns and
//! a header row first. Columns are located by fuzzy case-insensitive
//! name matching, falling back to fixed positions when a name cannot be
//! matched. Only the four normalized fields are retained.

use super::Deal;
use crate::error::EngineError;
use chrono::NaiveDate;
use csv::StringRecord;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Date formats accepted for close-date cells
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y"];

/// Resolved column indices for the four fields the engine consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub owner: usize,
    pub amount: usize,
    pub close_date: usize,
    pub course: usize,
}

impl ColumnMap {
    /// Locate columns by case-insensitive substring match:
    /// "deal"+"owner", "amount"/"value", "close"+"date",
    /// "course"/"product". Unmatched fields fall back to positions 0-3.
    pub fn detect(headers: &StringRecord) -> Self {
        let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        let find = |matches: &dyn Fn(&str) -> bool, fallback: usize| {
            lower.iter().position(|h| matches(h)).unwrap_or(fallback)
        };

        Self {
            owner: find(&|h| h.contains("deal") && h.contains("owner"), 0),
            amount: find(&|h| h.contains("amount") || h.contains("value"), 1),
            close_date: find(&|h| h.contains("close") && h.contains("date"), 2),
            course: find(&|h| h.contains("course") || h.contains("product"), 3),
        }
    }
}

/// Load deals from a CSV file. A missing or unreadable file is surfaced
/// as `DataUnavailable`, never silently treated as zero revenue.
pub fn load_deals<P: AsRef<Path>>(path: P) -> Result<Vec<Deal>, EngineError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| EngineError::DataUnavailable(format!("{}: {}", path.display(), e)))?;
    load_deals_from_reader(file)
}

/// Load deals from any reader producing CSV with a header row first
pub fn load_deals_from_reader<R: Read>(reader: R) -> Result<Vec<Deal>, EngineError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::detect(&headers);
    debug!("detected columns: {:?}", columns);

    let mut deals = Vec::new();
    for record in rdr.records() {
        let record = record?;
        deals.push(deal_from_record(&record, columns));
    }

    info!("loaded {} deal rows", deals.len());
    Ok(deals)
}

fn deal_from_record(record: &StringRecord, columns: ColumnMap) -> Deal {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let close_raw = field(columns.close_date);

    Deal {
        owner: field(columns.owner).to_string(),
        gross_amount: parse_amount(field(columns.amount)),
        closed: !close_raw.is_empty(),
        close_date: parse_close_date(close_raw),
        course_label: field(columns.course).to_string(),
    }
}

/// Coerce an amount cell to a number; blank or non-numeric cells become
/// `None` and are excluded from revenue sums
fn parse_amount(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '₹' | '$'))
        .collect();
    cleaned.trim().parse::<f64>().ok()
}

fn parse_close_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
