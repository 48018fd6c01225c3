//! Timestamp normalization
//!
//! Expense, rule and window timestamps arrive as wall-clock text such as
//! `2023-10-12 20:15:00`. A [`Calendar`] pins that text to an instant in an
//! explicit time zone, so range checks compare real instants and never depend
//! on the host's ambient zone.

use jiff::SignedDuration;
use jiff::civil::DateTime;
use jiff::tz::{AmbiguousOffset, Offset, TimeZone};

use crate::error::{ConfigError, TimestampError};

/// Shape of an accepted timestamp; `D` is any ASCII digit.
const FULL_SHAPE: &[u8] = b"DDDD-DD-DD DD:DD:DD";
/// Length of the shape without the trailing `:ss`.
const SHORT_LEN: usize = 16;

const UNIX_EPOCH: DateTime = DateTime::constant(1970, 1, 1, 0, 0, 0, 0);

/// A parsed timestamp, ordered by the instant it denotes.
///
/// The instant is kept as whole seconds from the Unix epoch rather than a
/// `jiff::Timestamp`, so every civil value from year 0 to 9999 is
/// representable in any zone. Alongside it sits the wall clock that instant
/// reads in the calendar that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Moment {
    unix_seconds: i64,
    wall_clock: DateTime,
}

impl Moment {
    /// Seconds since `1970-01-01 00:00:00Z`
    pub fn as_second(self) -> i64 {
        self.unix_seconds
    }

    /// Wall clock in the zone of the calendar that parsed this moment
    pub fn wall_clock(self) -> DateTime {
        self.wall_clock
    }
}

/// A closed interval of instants, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Moment,
    pub end: Moment,
}

impl DateRange {
    #[inline]
    pub fn contains(&self, moment: Moment) -> bool {
        in_range_inclusive(moment, self.start, self.end)
    }
}

/// `true` iff `start <= moment <= end`.
///
/// An inverted range (`start > end`) contains nothing.
#[inline]
pub fn in_range_inclusive(moment: Moment, start: Moment, end: Moment) -> bool {
    start <= moment && moment <= end
}

/// Interprets wall-clock text in a fixed time zone.
///
/// Wall-clock readings that fall into a DST gap or fold resolve with the
/// "compatible" strategy (later offset for gaps, earlier for folds).
#[derive(Debug, Clone)]
pub struct Calendar {
    tz: TimeZone,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    pub fn new(tz: TimeZone) -> Self {
        Self { tz }
    }

    pub fn utc() -> Self {
        Self::new(TimeZone::UTC)
    }

    /// Look up a zone by IANA name (e.g. `Asia/Kolkata`). `UTC` always resolves.
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        if name.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }
        TimeZone::get(name)
            .map(Self::new)
            .map_err(|source| ConfigError::UnknownTimeZone {
                name: name.to_string(),
                source,
            })
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Parse `YYYY-MM-DD HH:mm:ss` or `YYYY-MM-DD HH:mm` (seconds default to 0).
    ///
    /// Surrounding whitespace is ignored. Every field must be ASCII digits of
    /// exactly the width shown.
    pub fn parse(&self, text: &str) -> Result<Moment, TimestampError> {
        if text.is_empty() {
            return Err(TimestampError::Empty);
        }
        let wall_clock = parse_wall_clock(text.trim())?;
        Ok(self.resolve(wall_clock))
    }

    /// Pin a wall clock to an instant with the "compatible" strategy.
    ///
    /// Both gap and fold use the offset in force before the transition; a
    /// gap reading is then rendered with the offset after it, which moves the
    /// wall clock forward by the length of the gap.
    fn resolve(&self, wall_clock: DateTime) -> Moment {
        let (offset, rendered_with) = match self.tz.to_ambiguous_timestamp(wall_clock).offset() {
            AmbiguousOffset::Unambiguous { offset } => (offset, offset),
            AmbiguousOffset::Gap { before, after } => (before, after),
            AmbiguousOffset::Fold { before, .. } => (before, before),
        };

        let shift = offset_seconds(rendered_with) - offset_seconds(offset);
        let rendered = wall_clock
            .checked_add(SignedDuration::from_secs(shift))
            .unwrap_or(wall_clock);

        Moment {
            unix_seconds: wall_clock.duration_since(UNIX_EPOCH).as_secs() - offset_seconds(offset),
            wall_clock: rendered,
        }
    }

    /// Parse both ends of a closed range
    pub fn parse_range(&self, start: &str, end: &str) -> Result<DateRange, TimestampError> {
        Ok(DateRange {
            start: self.parse(start)?,
            end: self.parse(end)?,
        })
    }

    /// Render `Y-MM-DD HH:mm:ss`. The year is not padded, so the output
    /// length varies for years outside 1000..=9999.
    pub fn format(&self, moment: Moment) -> String {
        let dt = moment.wall_clock;
        format!(
            "{}-{:02}-{:02} {:02}:{:02}:{:02}",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        )
    }

    /// Parse then re-render into canonical form
    pub fn normalize(&self, text: &str) -> Result<String, TimestampError> {
        self.parse(text).map(|m| self.format(m))
    }
}

fn offset_seconds(offset: Offset) -> i64 {
    i64::from(offset.seconds())
}

fn parse_wall_clock(text: &str) -> Result<DateTime, TimestampError> {
    let bytes = text.as_bytes();
    if bytes.len() != SHORT_LEN && bytes.len() != FULL_SHAPE.len() {
        return Err(TimestampError::Format);
    }

    let shape_ok = bytes.iter().zip(FULL_SHAPE).all(|(&b, &want)| match want {
        b'D' => b.is_ascii_digit(),
        _ => b == want,
    });
    if !shape_ok {
        return Err(TimestampError::Format);
    }

    let field = |from: usize, to: usize| -> i16 {
        bytes[from..to]
            .iter()
            .fold(0i16, |acc, b| acc * 10 + i16::from(b - b'0'))
    };

    let second = if bytes.len() == FULL_SHAPE.len() {
        field(17, 19)
    } else {
        0
    };

    // Two-digit fields are at most 99, so the narrowing casts are lossless.
    Ok(DateTime::new(
        field(0, 4),
        field(5, 7) as i8,
        field(8, 10) as i8,
        field(11, 13) as i8,
        field(14, 16) as i8,
        second as i8,
        0,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_seconds() {
        let cal = Calendar::utc();
        let with = cal.parse("2023-10-12 20:15:00").unwrap();
        let without = cal.parse("2023-10-12 20:15").unwrap();
        assert_eq!(with, without);
        assert_eq!(cal.format(with), "2023-10-12 20:15:00");
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let cal = Calendar::utc();
        let m = cal.parse("  2023-02-28 15:49:07 \n").unwrap();
        assert_eq!(cal.format(m), "2023-02-28 15:49:07");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Calendar::utc().parse(""),
            Err(TimestampError::Empty)
        ));
    }

    #[test]
    fn test_rejects_other_shapes() {
        let cal = Calendar::utc();
        for text in [
            "   ",
            "2023-10-12",
            "2023-10-12T20:15:00",
            "2023/10/12 20:15:00",
            "2023-1-12 20:15:00",
            "23-10-12 20:15:00",
            "2023-10-12 20:15:00.000",
            "2023-10-12 20:15:0",
            "２023-10-12 20:15:00",
        ] {
            assert!(
                matches!(cal.parse(text), Err(TimestampError::Format)),
                "expected format error for {text:?}"
            );
        }
    }

    #[test]
    fn test_rejects_impossible_values() {
        let cal = Calendar::utc();
        for text in [
            "2023-13-01 00:00:00",
            "2023-00-10 00:00:00",
            "2023-02-29 00:00:00",
            "2023-04-31 00:00:00",
            "2023-10-12 24:00:00",
            "2023-10-12 23:60:00",
            "2023-10-12 23:59:60",
        ] {
            assert!(
                matches!(cal.parse(text), Err(TimestampError::Value(_))),
                "expected value error for {text:?}"
            );
        }
        assert!(cal.parse("2024-02-29 12:00:00").is_ok());
    }

    #[test]
    fn test_format_does_not_pad_year() {
        let cal = Calendar::utc();
        let m = cal.parse("0999-01-02 03:04:05").unwrap();
        assert_eq!(cal.format(m), "999-01-02 03:04:05");
    }

    #[test]
    fn test_roundtrip() {
        let cal = Calendar::utc();
        for text in [
            "2000-01-01 00:00:00",
            "2024-02-29 23:59:59",
            "2023-07-01 21:59:00",
            "9999-12-31 23:59:59",
            "0000-01-01 00:00:00",
        ] {
            let m = cal.parse(text).unwrap();
            assert_eq!(cal.parse(&cal.format(m)).unwrap(), m, "roundtrip failed for {text}");
        }
    }

    #[test]
    fn test_range_is_inclusive_at_both_ends() {
        let cal = Calendar::utc();
        let range = cal
            .parse_range("2023-07-01 00:00:00", "2023-07-31 23:59:00")
            .unwrap();
        assert!(range.contains(cal.parse("2023-07-01 00:00:00").unwrap()));
        assert!(range.contains(cal.parse("2023-07-31 23:59:00").unwrap()));
        assert!(!range.contains(cal.parse("2023-07-31 23:59:01").unwrap()));
        assert!(!range.contains(cal.parse("2023-06-30 23:59:59").unwrap()));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let cal = Calendar::utc();
        let start = cal.parse("2023-12-31 00:00").unwrap();
        let end = cal.parse("2023-01-01 00:00").unwrap();
        let mid = cal.parse("2023-06-01 00:00").unwrap();
        assert!(!in_range_inclusive(mid, start, end));
    }

    #[test]
    fn test_time_zone_shifts_the_instant() {
        let utc = Calendar::utc();
        let ist = Calendar::new(TimeZone::fixed(jiff::tz::offset(5)));
        let text = "2023-10-12 20:15:00";
        let a = utc.parse(text).unwrap();
        let b = ist.parse(text).unwrap();
        assert_eq!(a.as_second() - b.as_second(), 5 * 3600);
        // Each calendar renders its own instant back to the same wall clock
        assert_eq!(ist.format(b), text);
    }

    #[test]
    fn test_named_zones() {
        assert!(Calendar::named("UTC").is_ok());
        assert!(matches!(
            Calendar::named("Not/AZone"),
            Err(ConfigError::UnknownTimeZone { .. })
        ));
    }

    #[test]
    fn test_full_civil_range_parses_and_orders() {
        for cal in [
            Calendar::utc(),
            Calendar::new(TimeZone::fixed(jiff::tz::offset(-10))),
            Calendar::new(TimeZone::fixed(jiff::tz::offset(14))),
        ] {
            let last = cal.parse("9999-12-31 23:59:59").unwrap();
            let before_last = cal.parse("9999-12-31 23:59:58").unwrap();
            let first = cal.parse("0000-01-01 00:00:00").unwrap();
            assert!(first < before_last && before_last < last);
            assert_eq!(last.as_second() - before_last.as_second(), 1);
            assert_eq!(cal.format(last), "9999-12-31 23:59:59");
            assert_eq!(cal.format(first), "0-01-01 00:00:00");
        }

        let cal = Calendar::utc();
        let range = cal
            .parse_range("9999-12-31 00:00:00", "9999-12-31 23:59:59")
            .unwrap();
        assert!(range.contains(cal.parse("9999-12-31 12:00").unwrap()));
    }

    #[test]
    fn test_matches_unix_seconds() {
        let cal = Calendar::utc();
        assert_eq!(cal.parse("1970-01-01 00:00:00").unwrap().as_second(), 0);
        assert_eq!(
            cal.parse("2023-10-12 20:15:00").unwrap().as_second(),
            "2023-10-12T20:15:00Z".parse::<jiff::Timestamp>().unwrap().as_second()
        );
    }

    #[test]
    fn test_dst_gap_and_fold_resolve_compatibly() {
        let cal = Calendar::new(TimeZone::posix("EST5EDT,M3.2.0,M11.1.0").unwrap());

        for text in [
            "2024-03-10 02:30:00", // gap
            "2024-11-03 01:30:00", // fold
            "2024-07-04 12:00:00",
        ] {
            let wall: DateTime = text.replace(' ', "T").parse().unwrap();
            let expected = cal
                .time_zone()
                .to_ambiguous_timestamp(wall)
                .compatible()
                .unwrap();
            let moment = cal.parse(text).unwrap();
            assert_eq!(moment.as_second(), expected.as_second(), "instant for {text}");
            assert_eq!(
                cal.format(moment),
                cal.format(cal.parse(&cal.format(moment)).unwrap()),
                "roundtrip for {text}"
            );
        }

        // A reading inside the gap renders as the wall clock after it
        let gap = cal.parse("2024-03-10 02:30:00").unwrap();
        assert_eq!(cal.format(gap), "2024-03-10 03:30:00");
        // The earlier of the two fold readings is taken
        let fold = cal.parse("2024-11-03 01:30:00").unwrap();
        assert_eq!(cal.format(fold), "2024-11-03 01:30:00");
    }
}
