//! Storage layer for BudgetWise export
//!
//! The exporter never owns the transaction store. It asks a [`RecordSource`]
//! for one immutable snapshot per export and works on that copy.

pub mod file_io;
pub mod records;

pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use records::JsonRecordStore;

use crate::error::BudgetWiseResult;
use crate::models::RecordSet;

/// Supplies all expenses and deposits as a single snapshot
pub trait RecordSource {
    fn snapshot(&self) -> BudgetWiseResult<RecordSet>;
}

/// An in-memory record set is its own source
impl RecordSource for RecordSet {
    fn snapshot(&self) -> BudgetWiseResult<RecordSet> {
        Ok(self.clone())
    }
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn snapshot(&self) -> BudgetWiseResult<RecordSet> {
        (**self).snapshot()
    }
}
