//! Artifact file naming

use chrono::NaiveDate;

use super::options::ExportFormat;

/// Prefix shared by every export artifact
pub const ARTIFACT_PREFIX: &str = "BudgetWise_Export_";

/// `BudgetWise_Export_<YYYY-MM-DD>.<ext>`
///
/// Exports on the same day in the same format share a name; the writer
/// replaces the earlier file.
pub fn artifact_name(format: ExportFormat, today: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        ARTIFACT_PREFIX,
        today.format("%Y-%m-%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            artifact_name(ExportFormat::Csv, day),
            "BudgetWise_Export_2024-05-01.csv"
        );
        assert_eq!(
            artifact_name(ExportFormat::Json, day),
            "BudgetWise_Export_2024-05-01.json"
        );
    }

    #[test]
    fn test_same_day_same_name() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            artifact_name(ExportFormat::Csv, day),
            artifact_name(ExportFormat::Csv, day)
        );
    }
}
