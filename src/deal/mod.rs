//! Deal data structures and tabular loading

mod data;
pub mod loader;

pub use data::Deal;
pub use loader::{load_deals, load_deals_from_reader, ColumnMap};
