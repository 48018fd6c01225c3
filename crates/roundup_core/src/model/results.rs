//! Pipeline outputs
//!
//! Every output is a fresh value; the rejected-record types keep the original
//! record alongside the reason it was turned away.

use serde::Serialize;

use super::transaction::Transaction;
use crate::error::RejectReason;

/// Survivors of best-effort ingestion plus running totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedExpenses {
    pub transactions: Vec<Transaction>,
    /// Equal to `total_remanent`
    pub total_invested: f64,
    pub total_remanent: f64,
    /// Sum of the kept raw amounts
    pub total_expense: f64,
}

/// A transaction that was turned away, with a human-readable message
#[derive(Debug, Clone, Serialize)]
pub struct RejectedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub message: String,
    #[serde(skip)]
    pub reason: RejectReason,
}

impl RejectedTransaction {
    pub fn new(transaction: Transaction, reason: RejectReason) -> Self {
        Self {
            transaction,
            message: reason.to_string(),
            reason,
        }
    }
}

/// Result of applying period rules to a transaction list
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterOutcome {
    /// Transactions with their effective remanent
    pub valid: Vec<Transaction>,
    pub invalid: Vec<RejectedTransaction>,
}

/// Full partition of a validated transaction list
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationOutcome {
    pub valid: Vec<Transaction>,
    pub invalid: Vec<RejectedTransaction>,
    pub duplicate: Vec<RejectedTransaction>,
}

/// Sum of effective remanents inside one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSavings {
    pub start: String,
    pub end: String,
    pub amount: f64,
}

/// Pension projection for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionSavings {
    pub start: String,
    pub end: String,
    pub amount: f64,
    /// Inflation-adjusted growth over the principal, rounded to cents
    pub profits: f64,
    pub tax_benefit: f64,
}

/// Index-fund projection for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSavings {
    pub start: String,
    pub end: String,
    pub amount: f64,
    /// Inflation-adjusted future value, rounded to cents
    #[serde(rename = "return")]
    pub real_return: f64,
}

/// Totals over the filtered transactions plus one entry per window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsReport<T> {
    pub transactions_total_amount: f64,
    pub transactions_total_ceiling: f64,
    pub savings_by_dates: Vec<T>,
}
