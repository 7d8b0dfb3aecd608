//! Export module for BudgetWise
//!
//! Turns a snapshot of expenses and deposits into a portable artifact:
//! - `filter`: expense/deposit toggles and date window
//! - `summary`: totals and balance
//! - `csv` / `json`: the two artifact formats
//! - `naming`: artifact file names
//! - `pipeline`: the [`Exporter`] that runs all stages and delivers the result
//!
//! Every stage except the pipeline's delivery step is a pure function.

pub mod csv;
pub mod date_style;
pub mod filter;
pub mod json;
pub mod naming;
pub mod options;
pub mod pipeline;
pub mod summary;

pub use csv::{render_csv, write_csv};
pub use date_style::{DateStyle, DEFAULT_DATE_FORMAT};
pub use filter::{filter_records, DateWindow};
pub use json::{render_json, write_json, JsonExport};
pub use naming::artifact_name;
pub use options::{DateRange, ExportFormat, ExportOptions};
pub use pipeline::{
    ExportPreview, ExportResult, ExportStats, Exporter, FailureKind, RenderedArtifact,
    GENERIC_FAILURE_MESSAGE,
};
pub use summary::{summarize, Summary};
