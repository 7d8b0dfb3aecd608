//! Expense and deposit records
//!
//! Records reach the exporter from several generations of writers that used
//! different field names for the same data. [`RawRecord`] accepts every known
//! spelling and the `From<RawRecord>` conversions collapse them into the
//! normalized [`Transaction`] shape; nothing downstream looks at legacy names.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::category::category_label;
use super::money::Money;

/// A record as stored, with every legacy field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub id: Option<Value>,
    #[serde(rename = "_id")]
    pub legacy_id: Option<Value>,

    /// Creation timestamp, preferred date source
    pub created_at: Option<Value>,
    pub date_time: Option<Value>,
    pub date: Option<Value>,

    pub title: Option<Value>,
    pub name: Option<Value>,

    pub amount: Option<Value>,
    pub description: Option<Value>,

    pub category_id: Option<Value>,
    pub category: Option<Value>,
}

/// Fields shared by expenses and deposits
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,

    /// `None` when no date field could be parsed
    pub occurred_at: Option<DateTime<Utc>>,

    pub title: String,

    /// Missing amounts are zero
    pub amount: Money,

    pub description: Option<String>,
}

impl Transaction {
    /// Create a transaction with a known date
    pub fn new(id: i64, occurred_at: DateTime<Utc>, title: impl Into<String>, amount: Money) -> Self {
        Self {
            id,
            occurred_at: Some(occurred_at),
            title: title.into(),
            amount,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Normalize a raw record
    ///
    /// Date precedence is `createdAt`, `dateTime`, `date`; a field that is
    /// present but unparseable falls through to the next one.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let occurred_at = [&raw.created_at, &raw.date_time, &raw.date]
            .into_iter()
            .flatten()
            .find_map(parse_instant);

        let id = [&raw.id, &raw.legacy_id]
            .into_iter()
            .flatten()
            .find_map(parse_integer)
            .unwrap_or_default();

        let title = [&raw.title, &raw.name]
            .into_iter()
            .flatten()
            .find_map(parse_text)
            .unwrap_or_default();

        Self {
            id,
            occurred_at,
            title,
            amount: raw
                .amount
                .as_ref()
                .and_then(Money::from_json)
                .unwrap_or_default(),
            description: raw.description.as_ref().and_then(parse_text),
        }
    }
}

/// Common access to the shared transaction fields
pub trait Record {
    fn transaction(&self) -> &Transaction;

    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.transaction().occurred_at
    }

    fn amount(&self) -> Money {
        self.transaction().amount
    }
}

/// Money spent, tagged with a category id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Expense {
    pub transaction: Transaction,
    pub category_id: i64,
}

impl Expense {
    pub fn new(transaction: Transaction, category_id: i64) -> Self {
        Self {
            transaction,
            category_id,
        }
    }

    /// Category label, "Unknown" for ids outside the table
    pub fn category_label(&self) -> &'static str {
        category_label(self.category_id)
    }
}

impl From<RawRecord> for Expense {
    fn from(raw: RawRecord) -> Self {
        let category_id = [&raw.category_id, &raw.category]
            .into_iter()
            .flatten()
            .find_map(parse_integer)
            .unwrap_or_default();

        Self {
            transaction: Transaction::from_raw(&raw),
            category_id,
        }
    }
}

impl Record for Expense {
    fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}

/// Money received
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Deposit {
    pub transaction: Transaction,
}

impl Deposit {
    pub fn new(transaction: Transaction) -> Self {
        Self { transaction }
    }
}

impl From<RawRecord> for Deposit {
    fn from(raw: RawRecord) -> Self {
        Self {
            transaction: Transaction::from_raw(&raw),
        }
    }
}

impl Record for Deposit {
    fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}

/// A snapshot of all expenses and deposits
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecordSet {
    pub expenses: Vec<Expense>,
    pub deposits: Vec<Deposit>,
}

impl RecordSet {
    pub fn new(expenses: Vec<Expense>, deposits: Vec<Deposit>) -> Self {
        Self { expenses, deposits }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.deposits.is_empty()
    }
}

/// Parse a date field written by any known writer
///
/// Accepts RFC 3339, naive ISO date-times (taken as UTC), plain dates
/// (midnight UTC) and epoch milliseconds.
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                    return Some(naive.and_utc());
                }
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
