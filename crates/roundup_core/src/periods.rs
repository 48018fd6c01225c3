//! Period rule engine
//!
//! Two independent rule families act on a transaction's remanent:
//! - override ("q") rules replace it with a fixed amount; when several
//!   match, the latest `start` wins and equal starts go to the earliest-listed
//!   rule
//! - surcharge ("p") rules add their `extra`; every matching rule counts
//!
//! Overrides are applied first, surcharges always on top.

use std::cmp::Reverse;

use tracing::debug;

use crate::error::RejectReason;
use crate::model::{
    FilterOutcome, OverrideRule, PeriodRules, RejectedTransaction, SurchargeRule, Transaction,
};
use crate::timestamp::{Calendar, DateRange, Moment};

#[derive(Debug, Clone, Copy)]
struct ResolvedOverride {
    /// Position in the submitted list, used for the tie-break
    index: usize,
    range: DateRange,
    fixed: f64,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedSurcharge {
    range: DateRange,
    extra: f64,
}

/// Rules with their bounds parsed once, ready to be applied to many
/// transactions. Rules whose bounds do not parse are left out.
#[derive(Debug, Clone, Default)]
pub struct PeriodSchedule {
    overrides: Vec<ResolvedOverride>,
    surcharges: Vec<ResolvedSurcharge>,
}

impl PeriodSchedule {
    pub fn resolve(rules: &PeriodRules, calendar: &Calendar) -> Self {
        Self {
            overrides: resolve_overrides(&rules.overrides, calendar),
            surcharges: resolve_surcharges(&rules.surcharges, calendar),
        }
    }

    /// Fixed amount of the winning override rule covering `moment`, if any
    pub fn override_at(&self, moment: Moment) -> Option<f64> {
        self.overrides
            .iter()
            .filter(|rule| rule.range.contains(moment))
            .min_by_key(|rule| (Reverse(rule.range.start), rule.index))
            .map(|rule| rule.fixed)
    }

    /// Sum of `extra` over every surcharge rule covering `moment`
    pub fn surcharge_at(&self, moment: Moment) -> f64 {
        self.surcharges
            .iter()
            .filter(|rule| rule.range.contains(moment))
            .map(|rule| rule.extra)
            .sum()
    }

    /// Remanent after both rule families
    pub fn effective_remanent(&self, remanent: f64, moment: Moment) -> f64 {
        self.override_at(moment).unwrap_or(remanent) + self.surcharge_at(moment)
    }

    /// Transaction with its effective remanent, or the reason its date
    /// could not be read
    pub fn apply(
        &self,
        transaction: &Transaction,
        calendar: &Calendar,
    ) -> Result<Transaction, RejectReason> {
        let moment = calendar.parse(&transaction.date)?;
        Ok(transaction.with_remanent(self.effective_remanent(transaction.remanent, moment)))
    }
}

fn resolve_overrides(rules: &[OverrideRule], calendar: &Calendar) -> Vec<ResolvedOverride> {
    rules
        .iter()
        .enumerate()
        .filter_map(
            |(index, rule)| match calendar.parse_range(&rule.start, &rule.end) {
                Ok(range) => Some(ResolvedOverride {
                    index,
                    range,
                    fixed: rule.fixed,
                }),
                Err(err) => {
                    debug!(index, "skipping override rule: {err}");
                    None
                }
            },
        )
        .collect()
}

fn resolve_surcharges(rules: &[SurchargeRule], calendar: &Calendar) -> Vec<ResolvedSurcharge> {
    rules
        .iter()
        .enumerate()
        .filter_map(
            |(index, rule)| match calendar.parse_range(&rule.start, &rule.end) {
                Ok(range) => Some(ResolvedSurcharge {
                    range,
                    extra: rule.extra,
                }),
                Err(err) => {
                    debug!(index, "skipping surcharge rule: {err}");
                    None
                }
            },
        )
        .collect()
}

/// Fixed amount of the override rule that applies at `moment`, if any
pub fn apply_override(moment: Moment, rules: &[OverrideRule], calendar: &Calendar) -> Option<f64> {
    let schedule = PeriodSchedule {
        overrides: resolve_overrides(rules, calendar),
        surcharges: Vec::new(),
    };
    schedule.override_at(moment)
}

/// Total surcharge that applies at `moment`
pub fn apply_surcharge(moment: Moment, rules: &[SurchargeRule], calendar: &Calendar) -> f64 {
    let schedule = PeriodSchedule {
        overrides: Vec::new(),
        surcharges: resolve_surcharges(rules, calendar),
    };
    schedule.surcharge_at(moment)
}

/// Apply both rule families to every transaction.
///
/// Transactions whose date does not parse are reported in `invalid` with the
/// parse error; everything else lands in `valid` with its effective remanent.
pub fn filter_by_periods(
    transactions: &[Transaction],
    rules: &PeriodRules,
    calendar: &Calendar,
) -> FilterOutcome {
    let schedule = PeriodSchedule::resolve(rules, calendar);
    let mut outcome = FilterOutcome::default();

    for transaction in transactions {
        match schedule.apply(transaction, calendar) {
            Ok(effective) => outcome.valid.push(effective),
            Err(reason) => outcome
                .invalid
                .push(RejectedTransaction::new(transaction.clone(), reason)),
        }
    }

    outcome
}
