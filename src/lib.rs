//! BudgetWise - data export pipeline
//!
//! This library turns a snapshot of BudgetWise expenses and deposits into a
//! downloadable artifact. Records are filtered by date range and type,
//! summarized, serialized as CSV or JSON, written under a dated file name
//! and optionally handed to a share or email facility.
//!
//! # Architecture
//!
//! - `models`: Money, categories and the expense/deposit records
//! - `export`: Options, filtering, summary, CSV/JSON writers and the pipeline
//! - `delivery`: Artifact writer plus share and email facilities
//! - `storage`: JSON record snapshot and atomic file writes
//! - `config`: Configuration and path management
//! - `cli` / `display`: Command handlers and terminal formatting
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetwise::delivery::ArtifactWriter;
//! use budgetwise::export::{ExportFormat, ExportOptions, Exporter};
//! use budgetwise::storage::JsonRecordStore;
//!
//! let exporter = Exporter::new(JsonRecordStore::new(records), ArtifactWriter::new(out_dir));
//! let result = exporter.export(&ExportOptions::new(ExportFormat::Csv));
//! ```

pub mod cli;
pub mod config;
pub mod delivery;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;

pub use error::{BudgetWiseError, BudgetWiseResult};
