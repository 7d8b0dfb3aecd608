//! Filter stage
//!
//! Narrows a record snapshot by the expense/deposit toggles and the
//! requested date window.

use chrono::{DateTime, Duration, Utc};
use log::debug;

use super::options::{DateRange, ExportOptions};
use crate::models::{Record, RecordSet};

/// Inclusive date window `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Resolve the window for the given options; `None` means unbounded
    pub fn resolve(options: &ExportOptions, now: DateTime<Utc>) -> Option<Self> {
        match options.date_range {
            DateRange::All => None,
            DateRange::Custom => Some(Self {
                start: options.start_date.unwrap_or(DateTime::<Utc>::MIN_UTC),
                end: options.end_date.unwrap_or(now),
            }),
            rolling => {
                let days = rolling.days()?;
                Some(Self {
                    start: now - Duration::days(days),
                    end: now,
                })
            }
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Records without a resolvable date are never inside a window
    fn admits<R: Record>(&self, record: &R) -> bool {
        match record.occurred_at() {
            Some(instant) => self.contains(instant),
            None => {
                debug!(
                    "Dropping record {} with no parseable date",
                    record.transaction().id
                );
                false
            }
        }
    }
}

/// Select the records an export should contain
pub fn filter_records(records: &RecordSet, options: &ExportOptions, now: DateTime<Utc>) -> RecordSet {
    let window = DateWindow::resolve(options, now);
    if let Some(w) = &window {
        debug!("Export window {} .. {}", w.start, w.end);
    }

    let expenses = if options.include_expenses {
        select(&records.expenses, window.as_ref())
    } else {
        Vec::new()
    };

    let deposits = if options.include_deposits {
        select(&records.deposits, window.as_ref())
    } else {
        Vec::new()
    };

    RecordSet { expenses, deposits }
}

fn select<R: Record + Clone>(records: &[R], window: Option<&DateWindow>) -> Vec<R> {
    match window {
        None => records.to_vec(),
        Some(w) => records.iter().filter(|r| w.admits(*r)).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Deposit, Expense, Money, Transaction};
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn expense(id: i64, when: DateTime<Utc>) -> Expense {
        Expense::new(Transaction::new(id, when, "e", Money::from_units(10)), 1)
    }

    fn deposit(id: i64, when: DateTime<Utc>) -> Deposit {
        Deposit::new(Transaction::new(id, when, "d", Money::from_units(20)))
    }

    fn undated_expense(id: i64) -> Expense {
        let mut e = expense(id, at(2024, 1, 1));
        e.transaction.occurred_at = None;
        e
    }

    fn sample(now: DateTime<Utc>) -> RecordSet {
        RecordSet::new(
            vec![
                expense(1, now - Duration::days(5)),
                expense(2, now - Duration::days(60)),
                expense(3, now - Duration::days(200)),
                expense(4, now - Duration::days(400)),
                undated_expense(5),
            ],
            vec![
                deposit(10, now - Duration::days(1)),
                deposit(11, now - Duration::days(100)),
            ],
        )
    }

    #[test]
    fn test_all_keeps_everything_including_undated() {
        let now = at(2025, 6, 1);
        let filtered = filter_records(&sample(now), &ExportOptions::default(), now);
        assert_eq!(filtered.expenses.len(), 5);
        assert_eq!(filtered.deposits.len(), 2);
    }

    #[rstest]
    #[case(DateRange::Last30Days, 30, vec![1], vec![10])]
    #[case(DateRange::Last90Days, 90, vec![1, 2], vec![10])]
    #[case(DateRange::Last365Days, 365, vec![1, 2, 3], vec![10, 11])]
    fn test_rolling_windows(
        #[case] range: DateRange,
        #[case] days: i64,
        #[case] expense_ids: Vec<i64>,
        #[case] deposit_ids: Vec<i64>,
    ) {
        let now = at(2025, 6, 1);
        let options = ExportOptions::default().with_range(range);
        let filtered = filter_records(&sample(now), &options, now);

        let ids: Vec<i64> = filtered.expenses.iter().map(|e| e.transaction.id).collect();
        assert_eq!(ids, expense_ids);
        let ids: Vec<i64> = filtered.deposits.iter().map(|d| d.transaction.id).collect();
        assert_eq!(ids, deposit_ids);

        for e in &filtered.expenses {
            let when = e.occurred_at().unwrap();
            assert!(now - Duration::days(days) <= when && when <= now);
        }
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let now = at(2025, 6, 1);
        let window = DateWindow::resolve(&ExportOptions::default().with_range(DateRange::Last30Days), now)
            .unwrap();
        assert!(window.contains(now));
        assert!(window.contains(now - Duration::days(30)));
        assert!(!window.contains(now - Duration::days(30) - Duration::milliseconds(1)));
        assert!(!window.contains(now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_custom_range_open_bounds() {
        let now = at(2025, 6, 1);

        let window = DateWindow::resolve(&ExportOptions::default().with_custom_range(None, None), now)
            .unwrap();
        assert_eq!(window.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(window.end, now);

        let options = ExportOptions::default().with_custom_range(Some(at(2024, 1, 1)), None);
        let filtered = filter_records(&sample(now), &options, now);
        let ids: Vec<i64> = filtered.expenses.iter().map(|e| e.transaction.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_custom_range_closed() {
        let now = at(2025, 6, 1);
        let options = ExportOptions::default()
            .with_custom_range(Some(now - Duration::days(100)), Some(now - Duration::days(50)));
        let filtered = filter_records(&sample(now), &options, now);
        assert_eq!(filtered.expenses.len(), 1);
        assert_eq!(filtered.expenses[0].transaction.id, 2);
        assert_eq!(filtered.deposits.len(), 1);
        assert_eq!(filtered.deposits[0].transaction.id, 11);
    }

    #[test]
    fn test_undated_records_dropped_when_windowed() {
        let now = at(2025, 6, 1);
        let options = ExportOptions::default().with_custom_range(None, None);
        let filtered = filter_records(&sample(now), &options, now);
        assert!(filtered.expenses.iter().all(|e| e.transaction.id != 5));
    }

    #[test]
    fn test_include_flags() {
        let now = at(2025, 6, 1);
        let filtered = filter_records(&sample(now), &ExportOptions::default().with_expenses(false), now);
        assert!(filtered.expenses.is_empty());
        assert_eq!(filtered.deposits.len(), 2);

        let options = ExportOptions::default().with_expenses(false).with_deposits(false);
        assert!(filter_records(&sample(now), &options, now).is_empty());
    }

    #[test]
    fn test_old_records_outside_last_30_days() {
        let records = RecordSet::new(
            vec![expense(1, at(2024, 5, 1))],
            vec![deposit(2, at(2024, 5, 2))],
        );
        let options = ExportOptions::default().with_range(DateRange::Last30Days);
        let filtered = filter_records(&records, &options, at(2026, 1, 1));
        assert!(filtered.is_empty());
    }
}
