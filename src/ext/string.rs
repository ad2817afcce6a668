use std::str::FromStr;
use std::time::Duration;

use super::TimeSpan;

/// Lenient conversion of optional text, such as environment variables or configuration entries,
/// into values.
///
/// Every conversion falls back to a default instead of failing: when the input is absent, empty,
/// only whitespace, or doesn't parse. Present input is trimmed before being parsed.
///
/// ```
/// use ease_util::ext::StrExtension;
///
/// assert_eq!("  1234 ".to_value_or(0u16), 1234);
/// assert_eq!("wickedly invalid".to_value_or(12.5), 12.5);
/// assert_eq!(None::<&str>.to_value_or(true), true);
/// ```
pub trait StrExtension {
    /// Returns the trimmed input, or None if there is no meaningful input.
    fn trimmed_input(&self) -> Option<&str>;

    /// Parses the input as a `T`, returning `default` when that isn't possible.
    fn to_value_or<T: FromStr>(&self, default: T) -> T {
        self.to_value_or_else(|| default)
    }

    /// Parses the input as a `T`, computing the default when that isn't possible.
    fn to_value_or_else<T: FromStr>(&self, default: impl FnOnce() -> T) -> T {
        self.trimmed_input()
            .and_then(|input| input.parse().ok())
            .unwrap_or_else(default)
    }

    /// Parses the input as a [`TimeSpan`], returning `default` when that isn't possible or the
    /// span is negative.
    fn to_duration_or(&self, default: Duration) -> Duration {
        self.trimmed_input()
            .and_then(|input| input.parse::<TimeSpan>().ok())
            .and_then(|span| span.to_duration())
            .unwrap_or(default)
    }
}

impl StrExtension for str {
    fn trimmed_input(&self) -> Option<&str> {
        match self.trim() {
            "" => None,
            trimmed => Some(trimmed),
        }
    }
}

impl<S: AsRef<str>> StrExtension for Option<S> {
    fn trimmed_input(&self) -> Option<&str> {
        self.as_ref()?.as_ref().trimmed_input()
    }
}
