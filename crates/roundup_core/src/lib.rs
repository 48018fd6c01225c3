//! Round-up savings engine
//!
//! Every expense is rounded up to the next multiple of a currency unit and the
//! difference (the "remanent") is set aside as savings. This crate provides the
//! pure computation pipeline behind that:
//! - Timestamp normalization in an explicit time zone ([`timestamp`])
//! - Round-up arithmetic ([`rounding`])
//! - Best-effort expense ingestion ([`ingest`])
//! - Override and surcharge period rules ([`periods`])
//! - Windowed savings totals ([`aggregate`])
//! - Integrity and investment-cap validation ([`validator`])
//! - Pension and index-fund return projections ([`returns`])
//!
//! Nothing here performs I/O or keeps state between calls.
//!
//! ```ignore
//! use roundup_core::{Calendar, RawExpense, SavingsConfig, parse_expenses};
//!
//! let config = SavingsConfig::default();
//! let calendar = config.calendar()?;
//! let parsed = parse_expenses(
//!     &[RawExpense::new("2023-10-12 20:15:00", 250.0)],
//!     &config,
//!     &calendar,
//! );
//! assert_eq!(parsed.total_remanent, 50.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod config;
pub mod error;
pub mod ingest;
pub mod periods;
pub mod returns;
pub mod rounding;
pub mod taxes;
pub mod timestamp;
pub mod validator;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use aggregate::{savings_by_windows, sum_in_range};
pub use config::SavingsConfig;
pub use error::{ConfigError, RejectReason, TimestampError};
pub use ingest::parse_expenses;
pub use model::{
    FilterOutcome, IndexSavings, OverrideRule, ParsedExpenses, PensionSavings, PeriodRules,
    ProjectionRequest, RawExpense, RejectedTransaction, ReturnsReport, SurchargeRule,
    Transaction, ValidationOutcome, Window, WindowSavings,
};
pub use periods::{PeriodSchedule, apply_override, apply_surcharge, filter_by_periods};
pub use returns::{project_index, project_pension};
pub use timestamp::{Calendar, DateRange, Moment, in_range_inclusive};
pub use validator::validate_transactions;
