//! Best-effort expense ingestion
//!
//! Raw expenses are turned into [`Transaction`]s. Anything malformed is
//! dropped from the output without being reported; callers that need every
//! record accounted for use [`crate::validator`] instead.

use tracing::debug;

use crate::config::SavingsConfig;
use crate::model::{ParsedExpenses, RawExpense, Transaction};
use crate::rounding::{amount_in_range, round_up};
use crate::timestamp::Calendar;

/// Convert one expense, or `None` if it is malformed.
///
/// The resulting `date` is the canonical rendering of the parsed timestamp,
/// so `2023-10-12 20:15` comes out as `2023-10-12 20:15:00`.
pub fn parse_expense(
    expense: &RawExpense,
    config: &SavingsConfig,
    calendar: &Calendar,
) -> Option<Transaction> {
    if !amount_in_range(expense.amount, config.max_amount) {
        debug!(amount = expense.amount, "dropping expense: amount out of range");
        return None;
    }

    let text = expense.timestamp_text()?;
    let moment = match calendar.parse(text) {
        Ok(moment) => moment,
        Err(err) => {
            debug!(timestamp = text, "dropping expense: {err}");
            return None;
        }
    };

    let rounded = round_up(expense.amount, config.rounding_unit);
    Some(Transaction {
        date: calendar.format(moment),
        amount: expense.amount,
        ceiling: rounded.ceiling,
        remanent: rounded.remanent,
    })
}

/// Ingest a batch of expenses, keeping only well-formed ones
pub fn parse_expenses(
    expenses: &[RawExpense],
    config: &SavingsConfig,
    calendar: &Calendar,
) -> ParsedExpenses {
    let transactions: Vec<Transaction> = expenses
        .iter()
        .filter_map(|expense| parse_expense(expense, config, calendar))
        .collect();

    let total_expense: f64 = transactions.iter().map(|t| t.amount).sum();
    let total_remanent: f64 = transactions.iter().map(|t| t.remanent).sum();

    debug!(
        received = expenses.len(),
        kept = transactions.len(),
        "parsed expenses"
    );

    ParsedExpenses {
        transactions,
        total_invested: total_remanent,
        total_remanent,
        total_expense,
    }
}
