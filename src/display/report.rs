//! Report formatting utilities for terminal output

use crate::export::{ExportPreview, ExportStats};
use crate::models::Money;

const WIDTH: usize = 40;

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money) -> String {
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", amount) // Red for negative
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", amount) // Green for positive
    } else {
        amount.to_string()
    }
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let padding = if title.len() >= width {
        0
    } else {
        (width - title.len()) / 2
    };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Right-align text in a field of given width
pub fn right_align(s: &str, width: usize) -> String {
    if s.len() >= width {
        s.to_string()
    } else {
        format!("{:>width$}", s, width = width)
    }
}

/// Label/value row with the value right-aligned
fn row(label: &str, value: &str) -> String {
    let value_width = WIDTH.saturating_sub(label.len());
    format!("{}{}", label, right_align(value, value_width))
}

/// Counts and totals block shared by `preview` and `export`
pub fn format_stats(stats: &ExportStats) -> String {
    let summary = &stats.summary;
    [
        row("Expenses:", &stats.expense_count.to_string()),
        row("Deposits:", &stats.deposit_count.to_string()),
        separator(WIDTH),
        row("Total Expenses:", &summary.total_expenses.to_string()),
        row("Total Deposits:", &summary.total_deposits.to_string()),
        row("Balance:", &summary.balance.to_string()),
    ]
    .join("\n")
}

/// Full preview listing
pub fn format_preview(preview: &ExportPreview) -> String {
    let options = &preview.options;
    let mut lines = vec![
        format_header("Export Preview", WIDTH),
        separator(WIDTH),
        row("Format:", options.format.extension()),
        row("Date range:", options.date_range.as_str()),
    ];

    if let Some(window) = &preview.window {
        lines.push(row("From:", &window.start.format("%Y-%m-%d %H:%M").to_string()));
        lines.push(row("To:", &window.end.format("%Y-%m-%d %H:%M").to_string()));
    }

    lines.push(row("File:", &preview.file_name));
    lines.push(separator(WIDTH));
    lines.push(format_stats(&preview.stats));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ExportOptions, Summary};

    fn stats() -> ExportStats {
        ExportStats {
            expense_count: 1,
            deposit_count: 1,
            summary: Summary::from_totals(Money::from_units(100), Money::from_units(500)).unwrap(),
        }
    }

    #[test]
    fn test_right_align() {
        assert_eq!(right_align("7", 3), "  7");
        assert_eq!(right_align("1234", 3), "1234");
    }

    #[test]
    fn test_format_stats() {
        let text = format_stats(&stats());
        assert!(text.contains("Total Expenses:"));
        assert!(text.lines().any(|l| l.starts_with("Balance:") && l.ends_with("400")));
    }

    #[test]
    fn test_format_preview_all_range_has_no_window() {
        let preview = ExportPreview {
            options: ExportOptions::default(),
            window: None,
            file_name: "BudgetWise_Export_2024-05-01.csv".into(),
            stats: stats(),
        };
        let text = format_preview(&preview);
        assert!(text.contains("BudgetWise_Export_2024-05-01.csv"));
        assert!(!text.contains("From:"));
    }

    #[test]
    fn test_colored_money() {
        assert!(format_money_colored(Money::from_units(-1)).starts_with("\x1b[31m"));
        assert_eq!(format_money_colored(Money::zero()), "0");
    }
}
