//! Localized date rendering for CSV artifacts

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::error::{BudgetWiseError, BudgetWiseResult};

/// US-English short date, e.g. `5/1/2024`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A validated strftime pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
    pattern: String,
}

impl DateStyle {
    /// Validate a strftime pattern
    pub fn new(pattern: impl Into<String>) -> BudgetWiseResult<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(BudgetWiseError::Config(format!(
                "Invalid date format: '{}'",
                pattern
            )));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render an instant, falling back to an ISO date if the pattern
    /// cannot be applied
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        let mut out = String::new();
        match write!(out, "{}", instant.format(&self.pattern)) {
            Ok(()) => out,
            Err(_) => instant.format("%Y-%m-%d").to_string(),
        }
    }
}

impl Default for DateStyle {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_style() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        assert_eq!(DateStyle::default().format(instant), "5/1/2024");
    }

    #[test]
    fn test_custom_pattern() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 25, 9, 0, 0).unwrap();
        let style = DateStyle::new("%d.%m.%Y").unwrap();
        assert_eq!(style.format(instant), "25.12.2024");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(DateStyle::new("%Q").is_err());
    }
}
