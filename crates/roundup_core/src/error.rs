use std::fmt;

/// Errors produced when reading wall-clock timestamp text
#[derive(Debug, Clone)]
pub enum TimestampError {
    /// Input was the empty string
    Empty,
    /// Text does not match `YYYY-MM-DD HH:mm:ss` or `YYYY-MM-DD HH:mm`
    Format,
    /// Text has the right shape but names no real calendar instant
    Value(jiff::Error),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Empty => write!(f, "Invalid timestamp type or empty"),
            TimestampError::Format => write!(f, "Timestamp must match YYYY-MM-DD HH:mm:ss"),
            TimestampError::Value(e) => write!(f, "Invalid date value: {e}"),
        }
    }
}

impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimestampError::Value(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jiff::Error> for TimestampError {
    fn from(err: jiff::Error) -> Self {
        TimestampError::Value(err)
    }
}

/// Why a transaction was rejected by the validator or the period filter.
///
/// The `Display` output is the human-readable message reported alongside the
/// rejected record.
#[derive(Debug, Clone)]
pub enum RejectReason {
    /// The transaction date could not be read
    Timestamp(TimestampError),
    /// Supplied ceiling/remanent disagree with the values derived from `amount`
    Integrity {
        expected_ceiling: f64,
        expected_remanent: f64,
    },
    /// Amount is non-finite, negative, or at/above the sanity bound
    AmountRange { max: f64 },
    /// Another record with the exact same date text was seen earlier
    Duplicate,
    /// Sum of all valid remanents is above the investment cap
    CapExceeded { total: f64, cap: f64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Timestamp(e) => write!(f, "{e}"),
            RejectReason::Integrity {
                expected_ceiling,
                expected_remanent,
            } => write!(
                f,
                "Ceiling/remanent mismatch: expected ceiling={expected_ceiling}, remanent={expected_remanent}"
            ),
            RejectReason::AmountRange { max } => write!(f, "Amount out of range [0, {max})"),
            RejectReason::Duplicate => write!(f, "Duplicate date"),
            RejectReason::CapExceeded { total, cap } => {
                write!(f, "Total investment {total} exceeds max {cap}")
            }
        }
    }
}

impl From<TimestampError> for RejectReason {
    fn from(err: TimestampError) -> Self {
        RejectReason::Timestamp(err)
    }
}

/// Errors in the engine configuration
#[derive(Debug, Clone)]
pub enum ConfigError {
    UnknownTimeZone { name: String, source: jiff::Error },
    InvalidRoundingUnit(f64),
    InvalidMaxAmount(f64),
    /// Tax bracket thresholds must be ascending
    UnsortedBrackets,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownTimeZone { name, source } => {
                write!(f, "unknown time zone {name:?}: {source}")
            }
            ConfigError::InvalidRoundingUnit(unit) => {
                write!(f, "rounding unit must be a positive number, got {unit}")
            }
            ConfigError::InvalidMaxAmount(max) => {
                write!(f, "max amount must be a positive number, got {max}")
            }
            ConfigError::UnsortedBrackets => {
                write!(f, "tax bracket thresholds must be in ascending order")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::UnknownTimeZone { source, .. } => Some(source),
            _ => None,
        }
    }
}
