//! Integration tests for the round-up savings pipeline
//!
//! Tests are organized by topic:
//! - `scenario` - Reference fixture run end to end
//! - `rules` - Override tie-break and surcharge stacking
//! - `validation` - Duplicate, integrity and investment-cap handling
//! - `projection` - Pension and index-fund projections


use crate::model::{OverrideRule, PeriodRules, RawExpense, SurchargeRule};

/// The four reference expenses (remanents 50, 25, 80, 20)
pub(crate) fn fixture_expenses() -> Vec<RawExpense> {
    vec![
        RawExpense::new("2023-10-12 20:15:00", 250.0),
        RawExpense::new("2023-02-28 15:49:00", 375.0),
        RawExpense::new("2023-07-01 21:59:00", 620.0),
        RawExpense::new("2023-12-17 08:09:00", 480.0),
    ]
}

/// July overridden to 0, +25 from October to year end
pub(crate) fn fixture_rules() -> PeriodRules {
    PeriodRules {
        overrides: vec![OverrideRule {
            fixed: 0.0,
            start: "2023-07-01 00:00:00".to_string(),
            end: "2023-07-31 23:59:00".to_string(),
        }],
        surcharges: vec![SurchargeRule {
            extra: 25.0,
            start: "2023-10-01 08:00:00".to_string(),
            end: "2023-12-31 19:59:00".to_string(),
        }],
    }
}
