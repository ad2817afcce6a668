use std::fmt::{self, Formatter};
use std::str::FromStr;
use std::time::Duration;

use derive_more::{Display, Error};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

const MAX_FRACTION_DIGITS: usize = 7;
const NANOS_PER_TICK: u32 = 100;

/// A signed span of time, as written in configuration files and the like.
///
/// Parsed from `[-]d` (whole days) or `[-][d.]hh:mm[:ss[.fffffff]]`, where hours are at most 23,
/// minutes and seconds at most 59 and the fraction has up to seven digits. Surrounding whitespace
/// is ignored.
///
/// ```
/// use std::time::Duration;
/// use ease_util::ext::TimeSpan;
///
/// let span: TimeSpan = "1.02:03:04.5".parse().unwrap();
/// assert_eq!(span.to_duration(), Some(Duration::from_millis(93_784_500)));
/// assert!("-00:01".parse::<TimeSpan>().unwrap().is_negative());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeSpan {
    negative: bool,
    magnitude: Duration,
}

impl TimeSpan {
    /// Creates a TimeSpan from its sign and magnitude. A zero span is never negative.
    pub const fn new(negative: bool, magnitude: Duration) -> TimeSpan {
        TimeSpan {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    pub const fn magnitude(&self) -> Duration {
        self.magnitude
    }

    /// Returns the span as a [`Duration`], or None if it is negative.
    pub const fn to_duration(&self) -> Option<Duration> {
        if self.negative {
            None
        } else {
            Some(self.magnitude)
        }
    }
}

impl From<Duration> for TimeSpan {
    fn from(value: Duration) -> Self {
        TimeSpan::new(false, value)
    }
}

impl FromStr for TimeSpan {
    type Err = ParseTimeSpanError;

    fn from_str(s: &str) -> Result<TimeSpan, ParseTimeSpanError> {
        parse(s.trim()).ok_or_else(|| ParseTimeSpanError {
            input: s.to_owned(),
        })
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let secs = self.magnitude.as_secs();
        let (days, rem) = (secs / SECS_PER_DAY, secs % SECS_PER_DAY);

        if self.negative {
            write!(f, "-")?;
        }
        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(
            f,
            "{:02}:{:02}:{:02}",
            rem / SECS_PER_HOUR,
            rem % SECS_PER_HOUR / SECS_PER_MINUTE,
            rem % SECS_PER_MINUTE
        )?;

        match self.magnitude.subsec_nanos() / NANOS_PER_TICK {
            0 => Ok(()),
            ticks => write!(f, ".{ticks:07}"),
        }
    }
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("{input:?} is not a valid time span")]
pub struct ParseTimeSpanError {
    #[error(not(source))]
    pub input: String,
}

fn parse(s: &str) -> Option<TimeSpan> {
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let Some(colon) = s.find(':') else {
        let days = number(s, usize::MAX)?;
        return Some(TimeSpan::new(negative, Duration::from_secs(days.checked_mul(SECS_PER_DAY)?)));
    };

    let (days, clock) = match s[..colon].split_once('.') {
        Some((days, _)) => (number(days, usize::MAX)?, &s[days.len() + 1..]),
        None => (0, s),
    };

    let mut parts = clock.split(':');
    let hours = bounded(parts.next()?, 23)?;
    let minutes = bounded(parts.next()?, 59)?;
    let (seconds, nanos) = match parts.next() {
        Some(seconds) => match seconds.split_once('.') {
            Some((seconds, fraction)) => (bounded(seconds, 59)?, fraction_nanos(fraction)?),
            None => (bounded(seconds, 59)?, 0),
        },
        None => (0, 0),
    };
    if parts.next().is_some() {
        return None;
    }

    let secs = days
        .checked_mul(SECS_PER_DAY)?
        .checked_add(hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE + seconds)?;
    Some(TimeSpan::new(negative, Duration::new(secs, nanos)))
}

/// Parses a non-empty run of at most `max_digits` ASCII digits.
fn number(s: &str, max_digits: usize) -> Option<u64> {
    if !s.is_empty() && s.len() <= max_digits && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn bounded(s: &str, max: u64) -> Option<u64> {
    number(s, 2).filter(|value| *value <= max)
}

fn fraction_nanos(s: &str) -> Option<u32> {
    let ticks = number(s, MAX_FRACTION_DIGITS)?;
    let scale = 10u64.pow((MAX_FRACTION_DIGITS - s.len()) as u32);
    u32::try_from(ticks * scale).ok().map(|ticks| ticks * NANOS_PER_TICK)
}
