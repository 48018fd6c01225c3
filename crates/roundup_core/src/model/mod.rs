mod results;
mod rules;
mod transaction;

pub use results::{
    FilterOutcome, IndexSavings, ParsedExpenses, PensionSavings, RejectedTransaction,
    ReturnsReport, ValidationOutcome, WindowSavings,
};
pub use rules::{OverrideRule, PeriodRules, SurchargeRule, Window};
pub use transaction::{ProjectionRequest, RawExpense, Transaction};
