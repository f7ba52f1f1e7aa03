//! Fare amounts, base-fare parsing and fixed-point formatting.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leading decimal literal: optional sign, then `12`, `12.`, `12.5` or `.5`,
/// then an optional exponent such as `e2`.
static FARE_LITERAL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?)(?:([0-9]+)(?:\.([0-9]*))?|\.([0-9]+))(?:[eE]([+-]?[0-9]+))?").ok()
});

/// Widest digit string and scale held exactly in a `u128`.
const MAX_DIGITS: u32 = 38;

/// A monetary amount in cents to avoid floating-point issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Render with exactly two fractional digits, e.g. `151.00`.
    #[must_use]
    pub fn format_fixed2(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;
        format!("{sign}{whole}.{frac:02}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_fixed2())
    }
}

/// The flat per-seat price, read once when the view mounts.
///
/// Held exactly as `units / 10^scale` so that totals are rounded only once,
/// after multiplying by the seat count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFare {
    units: u128,
    scale: u32,
}

impl BaseFare {
    #[must_use]
    pub fn new(amount: Money) -> Self {
        let cents = u128::try_from(amount.cents()).unwrap_or(0);
        Self::normalized(cents, 2)
    }

    fn normalized(mut units: u128, mut scale: u32) -> Self {
        if units == 0 {
            return Self::default();
        }
        while scale > 0 && units % 10 == 0 {
            units /= 10;
            scale -= 1;
        }
        Self { units, scale }
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.units == 0
    }

    /// The per-seat fare rounded half-up to cents.
    #[must_use]
    pub fn amount(self) -> Money {
        self.times(1)
    }

    /// `count` seats at this fare, rounded half-up to cents.
    #[must_use]
    pub fn times(self, count: usize) -> Money {
        let total = self
            .units
            .saturating_mul(u128::try_from(count).unwrap_or(u128::MAX));
        let cents = if self.scale >= 2 {
            let divisor = pow10(self.scale - 2);
            let (quotient, remainder) = (total / divisor, total % divisor);
            if remainder >= divisor - remainder {
                quotient.saturating_add(1)
            } else {
                quotient
            }
        } else {
            total.saturating_mul(pow10(2 - self.scale))
        };
        Money::from_cents(i64::try_from(cents).unwrap_or(i64::MAX))
    }

    /// Parse the leading decimal literal of `text`.
    ///
    /// Anything after the literal is ignored. Text without a leading number
    /// reads as zero and negative values clamp to zero.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let Some(caps) = FARE_LITERAL.as_ref().and_then(|re| re.captures(text)) else {
            return Self::default();
        };
        if caps.get(1).is_some_and(|m| m.as_str() == "-") {
            return Self::default();
        }
        let whole = caps.get(2).map_or("", |m| m.as_str());
        let frac = caps
            .get(3)
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        let exponent = caps.get(5).map_or(0, |m| parse_exponent(m.as_str()));
        literal_to_fare(whole, frac, exponent)
    }

    /// Whether a non-blank field value read as zero.
    #[must_use]
    pub fn degraded_from(self, value: Option<&str>) -> bool {
        self.is_zero() && value.is_some_and(|text| !text.trim().is_empty())
    }

    /// Read the base-fare field; a missing field counts as `"0"`.
    #[must_use]
    pub fn from_field(value: Option<&str>) -> Self {
        Self::parse(value.unwrap_or("0"))
    }
}

fn pow10(exp: u32) -> u128 {
    10_u128.checked_pow(exp).unwrap_or(u128::MAX)
}

fn parse_exponent(text: &str) -> i64 {
    text.parse::<i64>().unwrap_or(if text.starts_with('-') {
        i64::MIN / 2
    } else {
        i64::MAX / 2
    })
}

/// `digits(whole ++ frac) * 10^(exponent - frac.len())`, kept within `u128`.
fn literal_to_fare(whole: &str, frac: &str, exponent: i64) -> BaseFare {
    let digits: String = whole
        .chars()
        .chain(frac.chars())
        .skip_while(|c| *c == '0')
        .collect();
    if digits.is_empty() {
        return BaseFare::default();
    }

    let frac_len = i64::try_from(frac.len()).unwrap_or(i64::MAX / 2);
    let mut power = exponent.saturating_sub(frac_len);
    let kept = digits.len().min(MAX_DIGITS as usize);
    power = power.saturating_add(i64::try_from(digits.len() - kept).unwrap_or(0));
    let mut units = digits[..kept].parse::<u128>().unwrap_or(u128::MAX);

    if power >= 0 {
        let shift = u32::try_from(power).unwrap_or(u32::MAX);
        units = units.checked_mul(pow10(shift)).unwrap_or(u128::MAX);
        return BaseFare::normalized(units, 0);
    }

    let mut scale = u32::try_from(power.unsigned_abs()).unwrap_or(u32::MAX);
    if scale > MAX_DIGITS {
        let excess = scale - MAX_DIGITS;
        units = if excess > MAX_DIGITS {
            0
        } else {
            units / pow10(excess)
        };
        scale = MAX_DIGITS;
    }
    BaseFare::normalized(units, scale)
}

/// Total for `count` selected seats.
#[must_use]
pub fn total_fare(count: usize, base: BaseFare) -> Money {
    base.times(count)
}
