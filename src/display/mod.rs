//! Display formatting for terminal output

pub mod report;

pub use report::{format_money_colored, format_preview, format_stats};
