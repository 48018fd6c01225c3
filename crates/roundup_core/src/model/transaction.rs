use serde::{Deserialize, Serialize};

use super::rules::{PeriodRules, Window};

/// One expense as submitted for ingestion.
///
/// The timestamp may arrive under `timestamp` or `date`; `timestamp` wins
/// when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExpense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub amount: f64,
}

impl RawExpense {
    pub fn new(timestamp: impl Into<String>, amount: f64) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            date: None,
            amount,
        }
    }

    pub fn timestamp_text(&self) -> Option<&str> {
        self.timestamp.as_deref().or(self.date.as_deref())
    }
}

/// A rounded-up expense.
///
/// Produced by ingestion with `ceiling = round_up(amount)` and
/// `remanent = ceiling - amount`; consumers that care recompute both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub amount: f64,
    pub ceiling: f64,
    pub remanent: f64,
}

impl Transaction {
    /// Copy with a replaced remanent
    pub fn with_remanent(&self, remanent: f64) -> Self {
        Self {
            remanent,
            ..self.clone()
        }
    }
}

/// Input to both return projections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub age: u32,
    /// Monthly wage; the index projection ignores it
    #[serde(default)]
    pub wage: f64,
    /// Annual inflation; `None` (or a non-finite value) uses the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation: Option<f64>,
    #[serde(flatten)]
    pub rules: PeriodRules,
    #[serde(default, rename = "k")]
    pub windows: Vec<Window>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}
