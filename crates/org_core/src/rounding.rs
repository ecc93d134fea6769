//! Integer-first one-decimal values.
//!
//! Rates and averages are carried as whole tenths so that rounding is exact
//! and comparisons against thresholds never see binary float noise.
//! Ties round half up (`6.25` -> `6.3`).

use core::fmt;

/// A non-negative quantity with one decimal, stored as tenths.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct OneDecimal(u32);

impl OneDecimal {
    pub const ZERO: OneDecimal = OneDecimal(0);

    pub const fn from_tenths(tenths: u32) -> Self { Self(tenths) }

    pub const fn tenths(self) -> u32 { self.0 }

    pub fn as_f64(self) -> f64 { f64::from(self.0) / 10.0 }
}

impl fmt::Display for OneDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// `round_half_up(num / den)` for non-negative integers; 0 when `den == 0`.
#[inline]
pub fn div_round_half_up(num: u64, den: u64) -> u64 {
    if den == 0 { 0 } else { (2 * num + den) / (2 * den) }
}

/// `num / den * 100` rounded to one decimal, as tenths. 0 when `den == 0`.
pub fn percent_one_decimal_tenths(num: u64, den: u64) -> OneDecimal {
    OneDecimal(saturate(div_round_half_up(num.saturating_mul(1000), den)))
}

/// `num / den` rounded to one decimal, as tenths. 0 when `den == 0`.
pub fn ratio_one_decimal_tenths(num: u64, den: u64) -> OneDecimal {
    OneDecimal(saturate(div_round_half_up(num.saturating_mul(10), den)))
}

#[inline]
fn saturate(x: u64) -> u32 {
    u32::try_from(x).unwrap_or(u32::MAX)
}

#[cfg(feature = "serde")]
impl serde::Serialize for OneDecimal {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.as_f64())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OneDecimal {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        let v = f64::deserialize(d)?;
        if !(v.is_finite() && v >= 0.0) {
            return Err(D::Error::custom("expected a non-negative finite number"));
        }
        // +0.5 then truncate: half-up on the already one-decimal wire value.
        let tenths = v * 10.0 + 0.5;
        if tenths >= f64::from(u32::MAX) {
            return Err(D::Error::custom("one-decimal value out of range"));
        }
        Ok(OneDecimal(tenths as u32))
    }
}
