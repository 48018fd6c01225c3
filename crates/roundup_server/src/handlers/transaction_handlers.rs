use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;

use roundup_core::model::{FilterOutcome, ParsedExpenses, ValidationOutcome};
use roundup_core::{filter_by_periods, parse_expenses, validate_transactions};

use super::AppState;
use crate::api_conversion;
use crate::error::ApiResult;
use crate::validation;

// ============================================================================
// Transaction Handlers
// ============================================================================

/// Turn raw expenses into rounded-up transactions, dropping malformed ones
pub async fn parse_transactions(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ParsedExpenses>> {
    let body = validation::require_object(body?.0)?;
    let expenses = api_conversion::expenses(&body);

    let parsed = parse_expenses(&expenses, &state.config, &state.calendar);
    tracing::info!(
        received = expenses.len(),
        kept = parsed.transactions.len(),
        "parsed expenses"
    );

    Ok(Json(parsed))
}

/// Partition transactions into valid, invalid and duplicate
pub async fn validate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ValidationOutcome>> {
    let body = validation::require_object(body?.0)?;
    let wage = validation::validate_wage(&body)?;
    let max_amount_to_invest = api_conversion::optional_number(&body, "maxAmountToInvest");
    let transactions = api_conversion::transactions(&body);

    let outcome = validate_transactions(
        wage,
        max_amount_to_invest,
        &transactions,
        &state.config,
        &state.calendar,
    );
    tracing::info!(
        valid = outcome.valid.len(),
        invalid = outcome.invalid.len(),
        duplicate = outcome.duplicate.len(),
        "validated transactions"
    );

    Ok(Json(outcome))
}

/// Apply override and surcharge periods to each transaction's remanent
pub async fn filter(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<FilterOutcome>> {
    let body = validation::require_object(body?.0)?;
    let rules = api_conversion::period_rules(&body);
    let transactions = api_conversion::transactions(&body);

    let outcome = filter_by_periods(&transactions, &rules, &state.calendar);
    tracing::info!(
        valid = outcome.valid.len(),
        invalid = outcome.invalid.len(),
        overrides = rules.overrides.len(),
        surcharges = rules.surcharges.len(),
        "filtered transactions"
    );

    Ok(Json(outcome))
}
