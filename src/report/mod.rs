//! Run outputs: the translation CSV, the metrics table and the JSON report.

mod csv;
mod json;
mod table;

pub use csv::{CSV_HEADER, to_csv, write_csv};
pub use json::{RunReport, write_json_report};
pub use table::metrics_table;
