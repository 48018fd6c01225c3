//! Round-up arithmetic
//!
//! Every expense is rounded up to the next multiple of a rounding unit; the
//! difference is the remanent that goes to savings.

/// Default rounding step
pub const DEFAULT_ROUNDING_UNIT: f64 = 100.0;
/// Default exclusive upper bound for a single expense amount
pub const DEFAULT_MAX_AMOUNT: f64 = 500_000.0;

/// Ceiling and remanent derived from one amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundUp {
    pub ceiling: f64,
    pub remanent: f64,
}

/// Smallest multiple of `unit` that is `>= amount`.
///
/// Non-positive amounts round to exactly one unit, so their remanent is the
/// full unit.
#[inline]
pub fn ceiling(amount: f64, unit: f64) -> f64 {
    if amount <= 0.0 {
        return unit;
    }
    (amount / unit).ceil() * unit
}

#[inline]
pub fn remanent(amount: f64, unit: f64) -> f64 {
    ceiling(amount, unit) - amount
}

pub fn round_up(amount: f64, unit: f64) -> RoundUp {
    let ceiling = ceiling(amount, unit);
    RoundUp {
        ceiling,
        remanent: ceiling - amount,
    }
}

/// Sanity bound shared by ingestion and validation: finite and in `[0, max)`
#[inline]
pub fn amount_in_range(amount: f64, max: f64) -> bool {
    amount.is_finite() && amount >= 0.0 && amount < max
}
