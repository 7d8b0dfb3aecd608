//! JSON snapshot of the offline record store

use std::path::{Path, PathBuf};

use super::file_io::read_json;
use super::RecordSource;
use crate::error::BudgetWiseResult;
use crate::models::RecordSet;

/// Reads `{ "expenses": [...], "deposits": [...] }` from a file
///
/// A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonRecordStore {
    fn snapshot(&self) -> BudgetWiseResult<RecordSet> {
        read_json(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonRecordStore::new(temp_dir.path().join("records.json"));
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_reads_legacy_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        fs::write(
            &path,
            r#"{
                "expenses": [
                    { "id": 1, "title": "Lunch", "amount": 100, "categoryId": 1, "createdAt": "2024-05-01T12:00:00Z" },
                    { "_id": "2", "name": "Bus", "amount": "2.5", "category": 7, "date": "2024-05-03" }
                ],
                "deposits": [
                    { "id": 3, "title": "Salary", "amount": 500, "dateTime": "2024-05-02T09:00:00" }
                ]
            }"#,
        )
        .unwrap();

        let records = JsonRecordStore::new(&path).snapshot().unwrap();
        assert_eq!(records.expenses.len(), 2);
        assert_eq!(records.expenses[1].transaction.id, 2);
        assert_eq!(records.expenses[1].transaction.title, "Bus");
        assert_eq!(records.expenses[1].category_label(), "Transport");
        assert_eq!(records.deposits[0].transaction.title, "Salary");
        assert!(records.deposits[0].transaction.occurred_at.is_some());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(JsonRecordStore::new(&path).snapshot().is_err());
    }
}
