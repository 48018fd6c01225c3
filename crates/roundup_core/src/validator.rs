//! Transaction validation against integrity rules and the investment cap
//!
//! Unlike ingestion, validation accounts for every record: each one ends up
//! in exactly one of `valid`, `invalid` or `duplicate`.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::SavingsConfig;
use crate::error::RejectReason;
use crate::model::{RejectedTransaction, Transaction, ValidationOutcome};
use crate::rounding::{amount_in_range, round_up};
use crate::timestamp::Calendar;

/// Cap on the total remanent: the explicit value when it is a finite number,
/// otherwise derived from the monthly wage
pub fn investment_cap(
    monthly_wage: f64,
    max_amount_to_invest: Option<f64>,
    config: &SavingsConfig,
) -> f64 {
    max_amount_to_invest
        .filter(|cap| cap.is_finite())
        .unwrap_or_else(|| config.default_investment_cap(monthly_wage))
}

/// Per-record checks, in order: date, recomputed ceiling/remanent, amount range
fn check_transaction(
    transaction: &Transaction,
    config: &SavingsConfig,
    calendar: &Calendar,
) -> Result<(), RejectReason> {
    calendar.parse(&transaction.date)?;

    let expected = round_up(transaction.amount, config.rounding_unit);
    if transaction.ceiling != expected.ceiling || transaction.remanent != expected.remanent {
        return Err(RejectReason::Integrity {
            expected_ceiling: expected.ceiling,
            expected_remanent: expected.remanent,
        });
    }

    if !amount_in_range(transaction.amount, config.max_amount) {
        return Err(RejectReason::AmountRange {
            max: config.max_amount,
        });
    }

    Ok(())
}

/// Partition `transactions` into valid, invalid and duplicate records.
///
/// Duplicates are detected by exact date text before any other check; the
/// first occurrence is kept. If the valid remanents together exceed the cap,
/// every valid record is moved to `invalid` and `valid` comes back empty.
pub fn validate_transactions(
    monthly_wage: f64,
    max_amount_to_invest: Option<f64>,
    transactions: &[Transaction],
    config: &SavingsConfig,
    calendar: &Calendar,
) -> ValidationOutcome {
    let cap = investment_cap(monthly_wage, max_amount_to_invest, config);
    let mut outcome = ValidationOutcome::default();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for transaction in transactions {
        if !seen.insert(transaction.date.as_str()) {
            outcome.duplicate.push(RejectedTransaction::new(
                transaction.clone(),
                RejectReason::Duplicate,
            ));
            continue;
        }

        match check_transaction(transaction, config, calendar) {
            Ok(()) => outcome.valid.push(transaction.clone()),
            Err(reason) => outcome
                .invalid
                .push(RejectedTransaction::new(transaction.clone(), reason)),
        }
    }

    let total: f64 = outcome.valid.iter().map(|t| t.remanent).sum();
    if total > cap {
        debug!(total, cap, demoted = outcome.valid.len(), "investment cap exceeded");
        let reason = RejectReason::CapExceeded { total, cap };
        outcome.invalid.extend(
            outcome
                .valid
                .drain(..)
                .map(|t| RejectedTransaction::new(t, reason.clone())),
        );
    }

    outcome
}
