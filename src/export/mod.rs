//! Export functionality for experiment results
//!
//! Results tables are written as CSV with the `csv` crate, and whole suites
//! as pretty-printed JSON.

mod results_csv;

pub use results_csv::{ResultRecord, ResultsCsvExporter};
