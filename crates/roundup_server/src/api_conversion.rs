//! Lenient conversion from request JSON into core types
//!
//! Requests are decoded field by field instead of through strict serde
//! derives, so a badly typed field degrades into a value the core rejects
//! with a reason (or drops, for ingestion) instead of failing the whole
//! request:
//! - a list field that is missing or not an array is empty
//! - numbers may be sent as JSON numbers or numeric strings; anything else
//!   reads as NaN
//! - text fields that are missing or not strings read as empty text

use roundup_core::model::{
    OverrideRule, PeriodRules, ProjectionRequest, RawExpense, SurchargeRule, Transaction, Window,
};
use serde_json::{Map, Value};

/// Items of an array field, or nothing
pub fn list<'a>(body: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    body.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Numeric reading of a JSON value
pub fn number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Null) => 0.0,
        _ => f64::NAN,
    }
}

/// Numeric field that may be omitted
pub fn optional_number(body: &Map<String, Value>, key: &str) -> Option<f64> {
    body.get(key).map(|v| number(Some(v)))
}

fn text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn raw_expense(value: &Value) -> RawExpense {
    // A present-but-unusable `timestamp` still shadows `date`
    let field = |key: &str| value.get(key).map(|v| text(Some(v)));
    RawExpense {
        timestamp: field("timestamp"),
        date: field("date"),
        amount: number(value.get("amount")),
    }
}

pub fn transaction(value: &Value) -> Transaction {
    Transaction {
        date: text(value.get("date")),
        amount: number(value.get("amount")),
        ceiling: number(value.get("ceiling")),
        remanent: number(value.get("remanent")),
    }
}

pub fn override_rule(value: &Value) -> OverrideRule {
    OverrideRule {
        fixed: number(value.get("fixed")),
        start: text(value.get("start")),
        end: text(value.get("end")),
    }
}

pub fn surcharge_rule(value: &Value) -> SurchargeRule {
    SurchargeRule {
        extra: number(value.get("extra")),
        start: text(value.get("start")),
        end: text(value.get("end")),
    }
}

pub fn window(value: &Value) -> Window {
    Window::new(text(value.get("start")), text(value.get("end")))
}

pub fn expenses(body: &Map<String, Value>) -> Vec<RawExpense> {
    list(body, "expenses").iter().map(raw_expense).collect()
}

pub fn transactions(body: &Map<String, Value>) -> Vec<Transaction> {
    list(body, "transactions").iter().map(transaction).collect()
}

pub fn period_rules(body: &Map<String, Value>) -> PeriodRules {
    PeriodRules {
        overrides: list(body, "q").iter().map(override_rule).collect(),
        surcharges: list(body, "p").iter().map(surcharge_rule).collect(),
    }
}

pub fn windows(body: &Map<String, Value>) -> Vec<Window> {
    list(body, "k").iter().map(window).collect()
}

/// Everything a projection needs except the already-validated age and wage
pub fn projection_request(body: &Map<String, Value>, age: u32, wage: f64) -> ProjectionRequest {
    ProjectionRequest {
        age,
        wage,
        inflation: optional_number(body, "inflation"),
        rules: period_rules(body),
        windows: windows(body),
        transactions: transactions(body),
    }
}
