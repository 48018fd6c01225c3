//! Date-bounded rules and aggregation windows
//!
//! Bounds stay as submitted text; they are parsed against the active
//! calendar when rules are applied, and a rule whose bounds do not parse is
//! skipped rather than failing the request.

use serde::{Deserialize, Serialize};

/// "q" rule: inside `[start, end]` the remanent is replaced by `fixed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub fixed: f64,
    pub start: String,
    pub end: String,
}

/// "p" rule: inside `[start, end]` `extra` is added to the remanent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeRule {
    pub extra: f64,
    pub start: String,
    pub end: String,
}

/// "k" window: remanents inside `[start, end]` are summed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub start: String,
    pub end: String,
}

impl Window {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Both rule families, in submission order.
///
/// Order matters only for the override tie-break.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRules {
    #[serde(default, rename = "q")]
    pub overrides: Vec<OverrideRule>,
    #[serde(default, rename = "p")]
    pub surcharges: Vec<SurchargeRule>,
}
