//! Engine configuration
//!
//! `SavingsConfig` carries every tunable constant of the pipeline. All fields
//! have defaults, so an empty JSON object deserializes to the standard setup.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rounding::{DEFAULT_MAX_AMOUNT, DEFAULT_ROUNDING_UNIT};
use crate::taxes::{TaxBracket, default_brackets};
use crate::timestamp::Calendar;

fn default_rounding_unit() -> f64 {
    DEFAULT_ROUNDING_UNIT
}

fn default_max_amount() -> f64 {
    DEFAULT_MAX_AMOUNT
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_inflation() -> f64 {
    0.055
}

fn default_pension_rate() -> f64 {
    0.0711
}

fn default_index_rate() -> f64 {
    0.1449
}

fn default_deduction_rate() -> f64 {
    0.10
}

fn default_deduction_cap() -> f64 {
    200_000.0
}

fn default_retirement_age() -> u32 {
    60
}

fn default_minimum_horizon_years() -> u32 {
    5
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsConfig {
    /// Expenses are rounded up to a multiple of this
    #[serde(default = "default_rounding_unit")]
    pub rounding_unit: f64,
    /// Exclusive upper bound for a single expense
    #[serde(default = "default_max_amount")]
    pub max_amount: f64,
    /// IANA zone in which timestamp text is interpreted
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Annual inflation used when a request does not supply one
    #[serde(default = "default_inflation")]
    pub default_inflation: f64,
    /// Annual return of the pension fund
    #[serde(default = "default_pension_rate")]
    pub pension_rate: f64,
    /// Annual return of the equity index fund
    #[serde(default = "default_index_rate")]
    pub index_rate: f64,
    /// Share of annual income that is deductible (and the default investment cap)
    #[serde(default = "default_deduction_rate")]
    pub deduction_rate: f64,
    /// Absolute deduction / investment cap
    #[serde(default = "default_deduction_cap")]
    pub deduction_cap: f64,
    #[serde(default = "default_retirement_age")]
    pub retirement_age: u32,
    /// Horizon used once the investor has reached retirement age
    #[serde(default = "default_minimum_horizon_years")]
    pub minimum_horizon_years: u32,
    #[serde(default = "default_brackets")]
    pub tax_brackets: Vec<TaxBracket>,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            rounding_unit: default_rounding_unit(),
            max_amount: default_max_amount(),
            time_zone: default_time_zone(),
            default_inflation: default_inflation(),
            pension_rate: default_pension_rate(),
            index_rate: default_index_rate(),
            deduction_rate: default_deduction_rate(),
            deduction_cap: default_deduction_cap(),
            retirement_age: default_retirement_age(),
            minimum_horizon_years: default_minimum_horizon_years(),
            tax_brackets: default_brackets(),
        }
    }
}

impl SavingsConfig {
    /// Check invariants the pipeline relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rounding_unit.is_finite() && self.rounding_unit > 0.0) {
            return Err(ConfigError::InvalidRoundingUnit(self.rounding_unit));
        }
        if self.max_amount.is_nan() || self.max_amount <= 0.0 {
            return Err(ConfigError::InvalidMaxAmount(self.max_amount));
        }
        if self
            .tax_brackets
            .windows(2)
            .any(|pair| pair[0].threshold > pair[1].threshold)
        {
            return Err(ConfigError::UnsortedBrackets);
        }
        Ok(())
    }

    /// Resolve `time_zone` into a calendar
    pub fn calendar(&self) -> Result<Calendar, ConfigError> {
        Calendar::named(&self.time_zone)
    }

    /// Investment cap derived from a monthly wage:
    /// `min(12 * wage * deduction_rate, deduction_cap)`
    pub fn default_investment_cap(&self, monthly_wage: f64) -> f64 {
        (monthly_wage * 12.0 * self.deduction_rate).min(self.deduction_cap)
    }

    /// Builder-style override of the time zone
    pub fn with_time_zone(mut self, name: impl Into<String>) -> Self {
        self.time_zone = name.into();
        self
    }

    pub fn with_rounding_unit(mut self, unit: f64) -> Self {
        self.rounding_unit = unit;
        self
    }
}
