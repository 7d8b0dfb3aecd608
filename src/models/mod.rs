//! Core data models for BudgetWise export
//!
//! This module contains the record types the exporter consumes: expenses,
//! deposits, the fixed category table and the decimal money type.

pub mod category;
pub mod money;
pub mod transaction;

pub use category::{category_label, Category, UNKNOWN_CATEGORY};
pub use money::{Money, MoneyParseError};
pub use transaction::{parse_instant, Deposit, Expense, RawRecord, Record, RecordSet, Transaction};
