//! CSV Export functionality
//!
//! Renders a filtered record set as a sectioned CSV document:
//! `EXPENSES`, `DEPOSITS` and a trailing `SUMMARY`. Text columns are always
//! quoted, with commas in free text replaced by semicolons so rows keep a
//! fixed column count.

use chrono::{DateTime, Utc};
use std::io::Write;

use super::date_style::DateStyle;
use super::options::ExportOptions;
use super::summary::summarize;
use crate::error::{BudgetWiseError, BudgetWiseResult};
use crate::models::{Record, RecordSet};

/// Write the CSV document for an already filtered record set
pub fn write_csv<W: Write>(
    writer: &mut W,
    filtered: &RecordSet,
    options: &ExportOptions,
    style: &DateStyle,
    exported_at: DateTime<Utc>,
) -> BudgetWiseResult<()> {
    if options.include_expenses && !filtered.expenses.is_empty() {
        line(writer, "EXPENSES")?;
        line(writer, "Date,Title,Amount,Category,Description")?;
        for expense in &filtered.expenses {
            let txn = &expense.transaction;
            writeln!(
                writer,
                "{},\"{}\",\"{}\",\"{}\",\"{}\"",
                localized(style, expense),
                sanitize(&txn.title),
                txn.amount,
                expense.category_label(),
                sanitize(txn.description.as_deref().unwrap_or_default())
            )
            .map_err(export_err)?;
        }
        line(writer, "")?;
    }

    if options.include_deposits && !filtered.deposits.is_empty() {
        line(writer, "DEPOSITS")?;
        line(writer, "Date,Title,Amount,Description")?;
        for deposit in &filtered.deposits {
            let txn = &deposit.transaction;
            writeln!(
                writer,
                "{},\"{}\",\"{}\",\"{}\"",
                localized(style, deposit),
                sanitize(&txn.title),
                txn.amount,
                sanitize(txn.description.as_deref().unwrap_or_default())
            )
            .map_err(export_err)?;
        }
        line(writer, "")?;
    }

    let summary = summarize(filtered)?;
    line(writer, "SUMMARY")?;
    writeln!(writer, "Total Expenses,{}", summary.total_expenses).map_err(export_err)?;
    writeln!(writer, "Total Deposits,{}", summary.total_deposits).map_err(export_err)?;
    writeln!(writer, "Balance,{}", summary.balance).map_err(export_err)?;
    writeln!(writer, "Export Date,{}", style.format(exported_at)).map_err(export_err)?;

    Ok(())
}

/// Render the CSV document to a string
pub fn render_csv(
    filtered: &RecordSet,
    options: &ExportOptions,
    style: &DateStyle,
    exported_at: DateTime<Utc>,
) -> BudgetWiseResult<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, filtered, options, style, exported_at)?;
    String::from_utf8(buffer).map_err(|e| BudgetWiseError::Export(e.to_string()))
}

/// Keep free text inside one quoted field on one line
///
/// Commas become semicolons, quotes are doubled and line breaks become spaces.
fn sanitize(s: &str) -> String {
    s.replace(',', ";")
        .replace('"', "\"\"")
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

fn localized<R: Record>(style: &DateStyle, record: &R) -> String {
    record
        .occurred_at()
        .map(|instant| style.format(instant))
        .unwrap_or_default()
}

fn line<W: Write>(writer: &mut W, text: &str) -> BudgetWiseResult<()> {
    writeln!(writer, "{}", text).map_err(export_err)
}

fn export_err(e: std::io::Error) -> BudgetWiseError {
    BudgetWiseError::Export(e.to_string())
}
