//! Return projections
//!
//! Both projections run the same pipeline (period filter, window totals) and
//! then compound each window's savings to retirement, deflating by inflation
//! over the same horizon. They differ only in the growth rate and in what is
//! reported per window, which is captured by [`ProjectionStrategy`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::aggregate::savings_by_windows;
use crate::config::SavingsConfig;
use crate::model::{
    IndexSavings, PensionSavings, ProjectionRequest, ReturnsReport, WindowSavings,
};
use crate::periods::filter_by_periods;
use crate::taxes::{pension_deduction, tax_benefit};
use crate::timestamp::Calendar;

/// Years of compounding: until retirement age, or the minimum horizon once
/// retirement age has been reached
pub fn years_to_retirement(age: u32, config: &SavingsConfig) -> u32 {
    if age < config.retirement_age {
        config.retirement_age - age
    } else {
        config.minimum_horizon_years
    }
}

/// `principal * (1 + rate)^years`, compounded annually
pub fn compound(principal: f64, rate: f64, years: u32) -> f64 {
    principal * (1.0 + rate).powf(f64::from(years))
}

/// Express a future value in today's money
pub fn deflate(value: f64, inflation: f64, years: u32) -> f64 {
    value / (1.0 + inflation).powf(f64::from(years))
}

/// Round to two decimals, halves toward positive infinity
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Horizon and investor data shared by every window of one request
#[derive(Debug, Clone, Copy)]
pub struct Horizon {
    pub years: u32,
    pub inflation: f64,
    pub annual_income: f64,
}

impl Horizon {
    pub fn for_request(request: &ProjectionRequest, config: &SavingsConfig) -> Self {
        Self {
            years: years_to_retirement(request.age, config),
            inflation: request
                .inflation
                .filter(|rate| rate.is_finite())
                .unwrap_or(config.default_inflation),
            annual_income: request.wage * 12.0,
        }
    }

    /// Inflation-adjusted value of `principal` grown at `rate`
    pub fn real_value(&self, principal: f64, rate: f64) -> f64 {
        deflate(compound(principal, rate, self.years), self.inflation, self.years)
    }
}

/// Per-window projection of one investment vehicle
pub trait ProjectionStrategy: Sync {
    type Output: Send;

    fn project(
        &self,
        savings: WindowSavings,
        horizon: &Horizon,
        config: &SavingsConfig,
    ) -> Self::Output;
}

/// Tax-advantaged pension fund
#[derive(Debug, Clone, Copy, Default)]
pub struct Pension;

impl ProjectionStrategy for Pension {
    type Output = PensionSavings;

    fn project(
        &self,
        savings: WindowSavings,
        horizon: &Horizon,
        config: &SavingsConfig,
    ) -> PensionSavings {
        let real = horizon.real_value(savings.amount, config.pension_rate);
        let deduction = pension_deduction(
            savings.amount,
            horizon.annual_income,
            config.deduction_rate,
            config.deduction_cap,
        );
        PensionSavings {
            profits: round_to_cents(real - savings.amount),
            tax_benefit: tax_benefit(horizon.annual_income, deduction, &config.tax_brackets),
            start: savings.start,
            end: savings.end,
            amount: savings.amount,
        }
    }
}

/// Equity index fund; no tax treatment
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexFund;

impl ProjectionStrategy for IndexFund {
    type Output = IndexSavings;

    fn project(
        &self,
        savings: WindowSavings,
        horizon: &Horizon,
        config: &SavingsConfig,
    ) -> IndexSavings {
        IndexSavings {
            real_return: round_to_cents(horizon.real_value(savings.amount, config.index_rate)),
            start: savings.start,
            end: savings.end,
            amount: savings.amount,
        }
    }
}

/// Run filter -> window totals -> per-window projection
pub fn project<S: ProjectionStrategy>(
    strategy: &S,
    request: &ProjectionRequest,
    config: &SavingsConfig,
    calendar: &Calendar,
) -> ReturnsReport<S::Output> {
    let filtered = filter_by_periods(&request.transactions, &request.rules, calendar);
    let horizon = Horizon::for_request(request, config);

    debug!(
        valid = filtered.valid.len(),
        invalid = filtered.invalid.len(),
        windows = request.windows.len(),
        years = horizon.years,
        "projecting savings"
    );

    let windows = savings_by_windows(&filtered.valid, &request.windows, calendar);

    #[cfg(feature = "parallel")]
    let windows = windows.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let windows = windows.into_iter();

    ReturnsReport {
        transactions_total_amount: filtered.valid.iter().map(|t| t.amount).sum(),
        transactions_total_ceiling: filtered.valid.iter().map(|t| t.ceiling).sum(),
        savings_by_dates: windows
            .map(|savings| strategy.project(savings, &horizon, config))
            .collect(),
    }
}

pub fn project_pension(
    request: &ProjectionRequest,
    config: &SavingsConfig,
    calendar: &Calendar,
) -> ReturnsReport<PensionSavings> {
    project(&Pension, request, config, calendar)
}

pub fn project_index(
    request: &ProjectionRequest,
    config: &SavingsConfig,
    calendar: &Calendar,
) -> ReturnsReport<IndexSavings> {
    project(&IndexFund, request, config, calendar)
}
