//! Duration literals for the presign validity window.
//!
//! Accepts the same grammar as Go's `time.ParseDuration`: an optional sign
//! followed by one or more `<decimal><unit>` groups such as `15m`, `1h30m`,
//! `1.5h` or `-45s`. Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`,
//! `m` and `h`. The bare literal `0` needs no unit.
//!
//! The parsed value is a signed nanosecond count. No bounds are enforced
//! here: zero and negative windows parse fine, and the signer decides what
//! it accepts.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const MICROSECOND: u64 = 1_000;
const MILLISECOND: u64 = 1_000_000;
const SECOND: u64 = 1_000_000_000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Largest magnitude a literal may reach (`|i64::MIN|`).
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Errors produced while parsing a duration literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpiryError {
    /// Malformed number, empty input, or out of range.
    #[error("time: invalid duration {0:?}")]
    Invalid(String),

    /// A number with no unit after it.
    #[error("time: missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A unit outside `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`.
    #[error("time: unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The offending unit.
        unit: String,
        /// The whole literal.
        input: String,
    },
}

/// A signed validity window, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Expiry {
    nanos: i64,
}

impl Expiry {
    /// The empty window.
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create a window from a signed nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// The window as a signed nanosecond count.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Whether the window lies in the past.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    /// The window handed to the signer: whole seconds, negative clamped to zero.
    #[must_use]
    pub fn signing_window(self) -> Duration {
        u64::try_from(self.nanos).map_or(Duration::ZERO, |n| Duration::from_secs(n / SECOND))
    }
}

impl FromStr for Expiry {
    type Err = ExpiryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{:?}", Duration::from_nanos(self.nanos.unsigned_abs()))
    }
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

// The fractional part goes through f64, which loses precision past 2^53 ns.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn parse(input: &str) -> Result<Expiry, ExpiryError> {
    let invalid = || ExpiryError::Invalid(input.to_owned());

    let mut rest = input;
    let mut negative = false;
    if let Some(r) = rest.strip_prefix('-') {
        negative = true;
        rest = r;
    } else if let Some(r) = rest.strip_prefix('+') {
        rest = r;
    }

    if rest == "0" {
        return Ok(Expiry::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after, has_whole) = leading_int(rest).ok_or_else(invalid)?;
        rest = after;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let parsed = leading_fraction(after_dot);
            fraction = parsed.value;
            scale = parsed.scale;
            has_fraction = parsed.consumed > 0;
            rest = &after_dot[parsed.consumed..];
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(ExpiryError::MissingUnit(input.to_owned()));
        }
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];
        let unit = unit_nanos(unit).ok_or_else(|| ExpiryError::UnknownUnit {
            unit: unit.to_owned(),
            input: input.to_owned(),
        })?;

        let mut value = whole
            .checked_mul(unit)
            .filter(|v| *v <= MAX_MAGNITUDE)
            .ok_or_else(invalid)?;
        if fraction > 0 {
            let extra = (fraction as f64 * (unit as f64 / scale)) as u64;
            value = value
                .checked_add(extra)
                .filter(|v| *v <= MAX_MAGNITUDE)
                .ok_or_else(invalid)?;
        }
        total = total
            .checked_add(value)
            .filter(|v| *v <= MAX_MAGNITUDE)
            .ok_or_else(invalid)?;
    }

    let nanos = if negative {
        0_i64.checked_sub_unsigned(total).ok_or_else(invalid)?
    } else {
        i64::try_from(total).map_err(|_| invalid())?
    };
    Ok(Expiry::from_nanos(nanos))
}

/// Consume leading ASCII digits. Returns `None` when the number overflows.
fn leading_int(s: &str) -> Option<(u64, &str, bool)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut x: u64 = 0;
    for b in s[..end].bytes() {
        if x > MAX_MAGNITUDE / 10 {
            return None;
        }
        x = x * 10 + u64::from(b - b'0');
        if x > MAX_MAGNITUDE {
            return None;
        }
    }
    Some((x, &s[end..], end > 0))
}

struct Fraction {
    value: u64,
    scale: f64,
    consumed: usize,
}

/// Consume the digits after a decimal point. Digits past the representable
/// precision are consumed but ignored.
fn leading_fraction(s: &str) -> Fraction {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    for b in s[..end].bytes() {
        if overflow {
            continue;
        }
        if value > (MAX_MAGNITUDE - 1) / 10 {
            overflow = true;
            continue;
        }
        let next = value * 10 + u64::from(b - b'0');
        if next > MAX_MAGNITUDE {
            overflow = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    Fraction {
        value,
        scale,
        consumed: end,
    }
}
