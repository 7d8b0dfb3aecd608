//! User-selected export options

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BudgetWiseError, BudgetWiseResult};

/// Artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Sectioned CSV (expenses, deposits, summary)
    #[default]
    Csv,
    /// Pretty-printed JSON with metadata and summary
    Json,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// MIME type handed to the share surface
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Which records to include by date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum DateRange {
    #[default]
    #[serde(rename = "all")]
    #[value(name = "all")]
    All,
    #[serde(rename = "last30days")]
    #[value(name = "last30days")]
    Last30Days,
    #[serde(rename = "last90days")]
    #[value(name = "last90days")]
    Last90Days,
    #[serde(rename = "last365days")]
    #[value(name = "last365days")]
    Last365Days,
    #[serde(rename = "custom")]
    #[value(name = "custom")]
    Custom,
}

impl DateRange {
    /// Window length for the rolling ranges
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
            Self::Last365Days => Some(365),
            Self::All | Self::Custom => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Last30Days => "last30days",
            Self::Last90Days => "last90days",
            Self::Last365Days => "last365days",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for a single export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub date_range: DateRange,

    /// Only read when `date_range` is `Custom`
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    pub include_expenses: bool,
    pub include_deposits: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            date_range: DateRange::default(),
            start_date: None,
            end_date: None,
            include_expenses: true,
            include_deposits: true,
        }
    }
}

impl ExportOptions {
    /// Everything, in the given format
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Switch to a custom range; either bound may be open
    pub fn with_custom_range(
        mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_range = DateRange::Custom;
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn with_expenses(mut self, include: bool) -> Self {
        self.include_expenses = include;
        self
    }

    pub fn with_deposits(mut self, include: bool) -> Self {
        self.include_deposits = include;
        self
    }

    /// Reject a request that selects neither expenses nor deposits
    pub fn validate(&self) -> BudgetWiseResult<()> {
        if !self.include_expenses && !self.include_deposits {
            return Err(BudgetWiseError::Validation(
                "Select at least one of expenses or deposits to export".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Json.mime_type(), "application/json");
    }

    #[test]
    fn test_date_range_serialization() {
        assert_eq!(
            serde_json::to_string(&DateRange::Last30Days).unwrap(),
            "\"last30days\""
        );
        assert_eq!(serde_json::to_string(&DateRange::All).unwrap(), "\"all\"");
        assert_eq!(DateRange::Last365Days.to_string(), "last365days");
        assert_eq!(DateRange::Last90Days.days(), Some(90));
        assert_eq!(DateRange::Custom.days(), None);
    }

    #[test]
    fn test_validate() {
        assert!(ExportOptions::default().validate().is_ok());
        assert!(ExportOptions::default().with_expenses(false).validate().is_ok());

        let err = ExportOptions::default()
            .with_expenses(false)
            .with_deposits(false)
            .validate()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_custom_range_builder() {
        let options = ExportOptions::new(ExportFormat::Json).with_custom_range(None, None);
        assert_eq!(options.date_range, DateRange::Custom);
        assert_eq!(options.format, ExportFormat::Json);
        assert!(options.include_expenses && options.include_deposits);
    }
}
