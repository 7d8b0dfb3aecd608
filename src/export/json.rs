//! JSON Export functionality
//!
//! Renders a filtered record set as a single pretty-printed object with
//! `metadata`, `summary` and `data` keys. Field order is fixed by the struct
//! definitions below so successive exports diff cleanly.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use super::options::{DateRange, ExportOptions};
use super::summary::total;
use crate::error::{BudgetWiseError, BudgetWiseResult};
use crate::models::{Deposit, Expense, Money, RecordSet};

/// Top-level JSON document
#[derive(Debug, Clone, Serialize)]
pub struct JsonExport {
    pub metadata: JsonMetadata,
    pub summary: JsonSummary,
    pub data: JsonData,
}

/// Describes the export request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMetadata {
    /// Export instant, full precision
    pub export_date: DateTime<Utc>,

    /// Always `"json"`
    pub format: &'static str,

    pub date_range: DateRange,
    pub include_expenses: bool,
    pub include_deposits: bool,

    /// Number of expense entries in `data.expenses`
    pub total_expenses: usize,

    /// Number of deposit entries in `data.deposits`
    pub total_deposits: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSummary {
    pub total_expense_amount: Money,
    pub total_deposit_amount: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonData {
    pub expenses: Vec<ExpenseEntry>,
    pub deposits: Vec<DepositEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub id: i64,
    pub date: Option<DateTime<Utc>>,
    pub title: String,
    pub amount: Money,
    pub category: &'static str,
    pub category_id: i64,
    pub description: Option<String>,
}

impl From<&Expense> for ExpenseEntry {
    fn from(expense: &Expense) -> Self {
        let txn = &expense.transaction;
        Self {
            id: txn.id,
            date: txn.occurred_at,
            title: txn.title.clone(),
            amount: txn.amount,
            category: expense.category_label(),
            category_id: expense.category_id,
            description: txn.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositEntry {
    pub id: i64,
    pub date: Option<DateTime<Utc>>,
    pub title: String,
    pub amount: Money,
    pub description: Option<String>,
}

impl From<&Deposit> for DepositEntry {
    fn from(deposit: &Deposit) -> Self {
        let txn = &deposit.transaction;
        Self {
            id: txn.id,
            date: txn.occurred_at,
            title: txn.title.clone(),
            amount: txn.amount,
            description: txn.description.clone(),
        }
    }
}

impl JsonExport {
    /// Build the document for an already filtered record set
    ///
    /// The summary is summed from the entries themselves rather than taken
    /// from the aggregation stage. Fails only if a total overflows.
    pub fn build(
        filtered: &RecordSet,
        options: &ExportOptions,
        exported_at: DateTime<Utc>,
    ) -> BudgetWiseResult<Self> {
        let expenses: Vec<ExpenseEntry> = if options.include_expenses {
            filtered.expenses.iter().map(ExpenseEntry::from).collect()
        } else {
            Vec::new()
        };
        let deposits: Vec<DepositEntry> = if options.include_deposits {
            filtered.deposits.iter().map(DepositEntry::from).collect()
        } else {
            Vec::new()
        };

        let total_expense_amount = total(expenses.iter().map(|e| e.amount), "expenses")?;
        let total_deposit_amount = total(deposits.iter().map(|d| d.amount), "deposits")?;
        let balance = total_deposit_amount
            .checked_sub(total_expense_amount)
            .ok_or_else(|| BudgetWiseError::Export("Balance overflowed".into()))?;

        Ok(Self {
            metadata: JsonMetadata {
                export_date: exported_at,
                format: "json",
                date_range: options.date_range,
                include_expenses: options.include_expenses,
                include_deposits: options.include_deposits,
                total_expenses: expenses.len(),
                total_deposits: deposits.len(),
            },
            summary: JsonSummary {
                total_expense_amount,
                total_deposit_amount,
                balance,
            },
            data: JsonData { expenses, deposits },
        })
    }
}

/// Write the pretty-printed JSON document
pub fn write_json<W: Write>(
    writer: &mut W,
    filtered: &RecordSet,
    options: &ExportOptions,
    exported_at: DateTime<Utc>,
) -> BudgetWiseResult<()> {
    let export = JsonExport::build(filtered, options, exported_at)?;
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| BudgetWiseError::Export(e.to_string()))?;
    Ok(())
}

/// Render the pretty-printed JSON document to a string
pub fn render_json(
    filtered: &RecordSet,
    options: &ExportOptions,
    exported_at: DateTime<Utc>,
) -> BudgetWiseResult<String> {
    let mut buffer = Vec::new();
    write_json(&mut buffer, filtered, options, exported_at)?;
    String::from_utf8(buffer).map_err(|e| BudgetWiseError::Export(e.to_string()))
}
