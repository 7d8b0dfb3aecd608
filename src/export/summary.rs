//! Aggregation stage

use crate::error::{BudgetWiseError, BudgetWiseResult};
use crate::models::{Money, Record, RecordSet};

/// Totals over a filtered record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_expenses: Money,
    pub total_deposits: Money,
    /// Always `total_deposits - total_expenses`
    pub balance: Money,
}

impl Summary {
    /// Fails only if the balance does not fit in a decimal
    pub fn from_totals(total_expenses: Money, total_deposits: Money) -> BudgetWiseResult<Self> {
        let balance = total_deposits
            .checked_sub(total_expenses)
            .ok_or_else(|| overflow("balance"))?;
        Ok(Self {
            total_expenses,
            total_deposits,
            balance,
        })
    }
}

/// Sum expenses and deposits; empty input yields zeros
///
/// Amounts are exact decimals, so the only failure is a total too large to
/// represent.
pub fn summarize(filtered: &RecordSet) -> BudgetWiseResult<Summary> {
    Summary::from_totals(
        total(filtered.expenses.iter().map(Record::amount), "expenses")?,
        total(filtered.deposits.iter().map(Record::amount), "deposits")?,
    )
}

/// Checked sum of `amounts`, naming `what` in the overflow error
pub(crate) fn total<I: IntoIterator<Item = Money>>(amounts: I, what: &str) -> BudgetWiseResult<Money> {
    Money::checked_sum(amounts).ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> BudgetWiseError {
    BudgetWiseError::Export(format!("Total {} overflowed", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Deposit, Expense, Transaction};
    use chrono::Utc;

    #[test]
    fn test_empty_is_zero() {
        let summary = summarize(&RecordSet::default()).unwrap();
        assert_eq!(summary, Summary::default());
        assert!(summary.balance.is_zero());
    }

    #[test]
    fn test_totals_and_balance() {
        let now = Utc::now();
        let records = RecordSet::new(
            vec![
                Expense::new(Transaction::new(1, now, "a", Money::parse("10.25").unwrap()), 1),
                Expense::new(Transaction::new(2, now, "b", Money::parse("4.75").unwrap()), 2),
            ],
            vec![Deposit::new(Transaction::new(3, now, "c", Money::from_units(5)))],
        );

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.total_expenses, Money::from_units(15));
        assert_eq!(summary.total_deposits, Money::from_units(5));
        assert_eq!(summary.balance, Money::from_units(-10));
        assert_eq!(summary.total_deposits - summary.total_expenses, summary.balance);
    }

    #[test]
    fn test_overflowing_total_is_error() {
        let huge = Money::parse("79228162514264337593543950335").unwrap();
        let now = Utc::now();
        let records = RecordSet::new(
            vec![
                Expense::new(Transaction::new(1, now, "a", huge), 1),
                Expense::new(Transaction::new(2, now, "b", huge), 1),
            ],
            Vec::new(),
        );

        let err = summarize(&records).unwrap_err();
        assert!(matches!(err, BudgetWiseError::Export(_)));
    }

    #[test]
    fn test_overflowing_balance_is_error() {
        let huge = Money::parse("79228162514264337593543950335").unwrap();
        assert!(Summary::from_totals(-huge, huge).is_err());
        assert_eq!(
            Summary::from_totals(huge, huge).unwrap().balance,
            Money::zero()
        );
    }
}
