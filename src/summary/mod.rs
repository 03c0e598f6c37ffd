//! Category summaries of solver strategies.
//!
//! ## Modules
//!
//! - `aggregate`: classify every row and average per category
//! - `config`: row policy, parallelism and node selection
//! - `report`: JSON and text-table output

pub mod aggregate;
pub mod config;
pub mod report;

pub use aggregate::{
    aggregate, aggregate_with, CategoryAccumulator, CategoryStats, CategorySummary, GroupStats,
    Tally,
};
pub use config::{RowPolicy, SummaryConfig};
pub use report::SummaryReport;
