use serde_json::{Map, Value};

use crate::api_conversion::optional_number;
use crate::error::{ApiError, ApiResult};

/// Upper bound on a plausible age, in years
const MAX_AGE: f64 = 150.0;

/// Unwrap the top-level JSON object of a request body
pub fn require_object(body: Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::BodyNotObject),
    }
}

/// `age` must be a non-negative whole number
pub fn validate_age(body: &Map<String, Value>) -> ApiResult<u32> {
    let age = optional_number(body, "age").unwrap_or(f64::NAN);
    if !age.is_finite() || age.fract() != 0.0 || age < 0.0 {
        return Err(ApiError::validation(
            "age",
            "Valid age (non-negative integer) is required",
        ));
    }

    if age > MAX_AGE {
        return Err(ApiError::validation("age", "Age cannot exceed 150 years"));
    }

    Ok(age as u32)
}

/// `wage` (monthly) must be a finite number >= 0
pub fn validate_wage(body: &Map<String, Value>) -> ApiResult<f64> {
    let wage = optional_number(body, "wage").unwrap_or(f64::NAN);
    if !wage.is_finite() || wage < 0.0 {
        return Err(ApiError::validation(
            "wage",
            "Valid wage (number >= 0) is required",
        ));
    }
    Ok(wage)
}
