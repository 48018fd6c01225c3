use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;

use roundup_core::model::{IndexSavings, PensionSavings, ReturnsReport};
use roundup_core::{project_index, project_pension};

use super::AppState;
use crate::api_conversion;
use crate::error::ApiResult;
use crate::validation;

// ============================================================================
// Returns Handlers
// ============================================================================

/// Pension projection with the tax benefit of each window's contribution
pub async fn pension_returns(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ReturnsReport<PensionSavings>>> {
    let body = validation::require_object(body?.0)?;
    let age = validation::validate_age(&body)?;
    let wage = validation::validate_wage(&body)?;
    let request = api_conversion::projection_request(&body, age, wage);

    let report = project_pension(&request, &state.config, &state.calendar);
    tracing::info!(
        age,
        windows = report.savings_by_dates.len(),
        total_amount = report.transactions_total_amount,
        "projected pension returns"
    );

    Ok(Json(report))
}

/// Index-fund projection; wage plays no part, so it is not required
pub async fn index_returns(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ReturnsReport<IndexSavings>>> {
    let body = validation::require_object(body?.0)?;
    let age = validation::validate_age(&body)?;
    let request = api_conversion::projection_request(&body, age, 0.0);

    let report = project_index(&request, &state.config, &state.calendar);
    tracing::info!(
        age,
        windows = report.savings_by_dates.len(),
        total_amount = report.transactions_total_amount,
        "projected index returns"
    );

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::handlers::test_state;
    use serde_json::json;

    fn fixture_body() -> Value {
        json!({
            "age": 29,
            "wage": 50000,
            "inflation": 0.055,
            "q": [{ "fixed": 0, "start": "2023-07-01 00:00:00", "end": "2023-07-31 23:59:59" }],
            "p": [{ "extra": 25, "start": "2023-10-01 08:00:00", "end": "2023-12-31 19:59:59" }],
            "k": [
                { "start": "2023-03-01 00:00:00", "end": "2023-11-30 23:59:59" },
                { "start": "2023-01-01 00:00:00", "end": "2023-12-31 23:59:59" }
            ],
            "transactions": [
                { "date": "2023-10-12 20:15:00", "amount": 250, "ceiling": 300, "remanent": 50 },
                { "date": "2023-02-28 15:49:00", "amount": 375, "ceiling": 400, "remanent": 25 },
                { "date": "2023-07-01 21:59:00", "amount": 620, "ceiling": 700, "remanent": 80 },
                { "date": "2023-12-17 08:09:00", "amount": 480, "ceiling": 500, "remanent": 20 }
            ]
        })
    }

    #[tokio::test]
    async fn test_pension_fixture() {
        let Json(report) = pension_returns(State(test_state()), Ok(Json(fixture_body())))
            .await
            .unwrap();

        assert_eq!(report.transactions_total_amount, 1_725.0);
        assert_eq!(report.transactions_total_ceiling, 1_900.0);
        assert_eq!(report.savings_by_dates.len(), 2);
        assert_eq!(report.savings_by_dates[0].amount, 75.0);

        let year = &report.savings_by_dates[1];
        assert_eq!(year.amount, 145.0);
        assert!((year.profits - 86.88).abs() < 0.011, "got {}", year.profits);
        assert_eq!(year.tax_benefit, 0.0);
    }

    #[tokio::test]
    async fn test_index_fixture_without_wage() {
        let mut body = fixture_body();
        body.as_object_mut().unwrap().remove("wage");

        let Json(report) = index_returns(State(test_state()), Ok(Json(body)))
            .await
            .unwrap();
        let year = &report.savings_by_dates[1];
        assert!((year.real_return - 1_829.5).abs() < 0.5, "got {}", year.real_return);
    }

    #[tokio::test]
    async fn test_returns_require_valid_age() {
        let mut body = fixture_body();
        body["age"] = json!(-3);
        let result = index_returns(State(test_state()), Ok(Json(body.clone()))).await;
        assert!(matches!(result, Err(ApiError::ValidationError { .. })));

        let result = pension_returns(State(test_state()), Ok(Json(body))).await;
        assert!(matches!(result, Err(ApiError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_pension_requires_wage() {
        let mut body = fixture_body();
        body["wage"] = json!("n/a");
        let result = pension_returns(State(test_state()), Ok(Json(body))).await;
        assert!(matches!(
            result,
            Err(ApiError::ValidationError { ref field, .. }) if field == "wage"
        ));
    }

    #[tokio::test]
    async fn test_report_json_shape() {
        let Json(report) = index_returns(State(test_state()), Ok(Json(fixture_body())))
            .await
            .unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert!(value["transactionsTotalAmount"].is_number());
        assert!(value["transactionsTotalCeiling"].is_number());
        assert!(value["savingsByDates"][0]["return"].is_number());
        assert_eq!(value["savingsByDates"][0]["start"], "2023-03-01 00:00:00");
    }
}
