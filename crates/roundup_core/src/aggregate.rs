//! Window aggregation
//!
//! Each window is summed independently, so windows may overlap and a single
//! transaction can count toward several of them.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::model::{Transaction, Window, WindowSavings};
use crate::timestamp::{Calendar, DateRange, Moment};

/// Transactions whose date parsed, paired with the remanent to sum
fn dated_remanents(transactions: &[Transaction], calendar: &Calendar) -> Vec<(Moment, f64)> {
    transactions
        .iter()
        .filter_map(|t| calendar.parse(&t.date).ok().map(|m| (m, t.remanent)))
        .collect()
}

fn sum_within(dated: &[(Moment, f64)], range: DateRange) -> f64 {
    dated
        .iter()
        .filter(|(moment, _)| range.contains(*moment))
        .map(|(_, remanent)| remanent)
        .sum()
}

fn window_savings(dated: &[(Moment, f64)], window: &Window, calendar: &Calendar) -> WindowSavings {
    let amount = match calendar.parse_range(&window.start, &window.end) {
        Ok(range) => sum_within(dated, range),
        Err(err) => {
            trace!(start = %window.start, end = %window.end, "window bounds unreadable: {err}");
            0.0
        }
    };
    trace!(start = %window.start, end = %window.end, amount, "window total");
    WindowSavings {
        start: window.start.clone(),
        end: window.end.clone(),
        amount,
    }
}

/// Sum of remanents of transactions dated inside `[start, end]`.
///
/// Unreadable bounds give 0; transactions with unreadable dates are ignored.
pub fn sum_in_range(
    transactions: &[Transaction],
    start: &str,
    end: &str,
    calendar: &Calendar,
) -> f64 {
    match calendar.parse_range(start, end) {
        Ok(range) => sum_within(&dated_remanents(transactions, calendar), range),
        Err(_) => 0.0,
    }
}

/// One total per window, in window order
pub fn savings_by_windows(
    transactions: &[Transaction],
    windows: &[Window],
    calendar: &Calendar,
) -> Vec<WindowSavings> {
    let dated = dated_remanents(transactions, calendar);

    #[cfg(feature = "parallel")]
    let windows = windows.par_iter();
    #[cfg(not(feature = "parallel"))]
    let windows = windows.iter();

    windows
        .map(|window| window_savings(&dated, window, calendar))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, remanent: f64) -> Transaction {
        Transaction {
            date: date.to_string(),
            amount: 0.0,
            ceiling: 0.0,
            remanent,
        }
    }

    #[test]
    fn test_overlapping_windows_count_independently() {
        let cal = Calendar::utc();
        let transactions = [
            tx("2023-02-01 10:00:00", 10.0),
            tx("2023-03-01 10:00:00", 20.0),
            tx("2023-04-01 10:00:00", 40.0),
        ];
        let windows = [
            Window::new("2023-01-01 00:00:00", "2023-03-31 23:59:59"),
            Window::new("2023-03-01 00:00:00", "2023-04-30 23:59:59"),
        ];
        let savings = savings_by_windows(&transactions, &windows, &cal);
        assert_eq!(savings[0].amount, 30.0);
        assert_eq!(savings[1].amount, 60.0);
        assert_eq!(savings[1].start, "2023-03-01 00:00:00");
    }

    #[test]
    fn test_empty_and_unreadable_windows_are_zero() {
        let cal = Calendar::utc();
        let transactions = [tx("2023-02-01 10:00:00", 10.0)];
        let windows = [
            Window::new("2024-01-01 00:00:00", "2024-12-31 23:59:59"),
            Window::new("sometime", "2024-12-31 23:59:59"),
        ];
        let savings = savings_by_windows(&transactions, &windows, &cal);
        assert_eq!(savings.len(), 2);
        assert!(savings.iter().all(|s| s.amount == 0.0));
        assert_eq!(savings[1].start, "sometime");
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let cal = Calendar::utc();
        let transactions = [
            tx("2023-01-01 00:00:00", 1.0),
            tx("2023-01-31 23:59:00", 2.0),
            tx("bad", 4.0),
        ];
        let total = sum_in_range(&transactions, "2023-01-01 00:00", "2023-01-31 23:59", &cal);
        assert_eq!(total, 3.0);
    }

    #[test]
    fn test_no_windows() {
        let cal = Calendar::utc();
        assert!(savings_by_windows(&[tx("2023-01-01 00:00:00", 1.0)], &[], &cal).is_empty());
    }
}
