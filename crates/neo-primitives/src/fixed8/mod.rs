//! Fixed-point asset values with 8 fractional digits.
//!
//! Native asset amounts are carried as a signed 64-bit count of minor units
//! (1 unit = 10^-8 of the asset) so that fee and change arithmetic never
//! touches floating point. The wire encoding is the raw `i64`, little-endian.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Number of fractional decimal digits.
pub const DECIMALS: usize = 8;

/// Minor units in one whole asset unit.
pub const ONE: i64 = 100_000_000;

/// A fixed-point value with 8 decimals, stored as minor units.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed8(i64);

impl Fixed8 {
    /// The zero value.
    pub const ZERO: Fixed8 = Fixed8(0);

    /// Create a value from a raw count of minor units.
    pub const fn from_units(units: i64) -> Self {
        Fixed8(units)
    }

    /// Create a value from a whole number of asset units.
    ///
    /// # Returns
    /// An error if `whole * 10^8` overflows.
    pub fn from_int(whole: i64) -> Result<Self, PrimitivesError> {
        whole
            .checked_mul(ONE)
            .map(Fixed8)
            .ok_or(PrimitivesError::Fixed8Overflow)
    }

    /// Parse a decimal string such as `"3"`, `"0.5"` or `"-12.00000001"`.
    ///
    /// At most 8 fractional digits are accepted; anything finer cannot be
    /// represented and is rejected rather than rounded.
    ///
    /// # Arguments
    /// * `s` - The decimal string.
    ///
    /// # Returns
    /// The parsed value, or an error for malformed input or overflow.
    pub fn from_decimal_str(s: &str) -> Result<Self, PrimitivesError> {
        let invalid = || PrimitivesError::InvalidFixed8(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac_part.len() > DECIMALS {
            return Err(invalid());
        }

        let whole: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| PrimitivesError::Fixed8Overflow)?
        };
        let mut frac: i64 = 0;
        for (i, c) in frac_part.chars().enumerate() {
            let digit = i64::from(c as u8 - b'0');
            frac += digit * 10i64.pow((DECIMALS - 1 - i) as u32);
        }

        // Built on the signed side so that i64::MIN parses.
        let scaled = whole.checked_mul(ONE);
        let units = if negative {
            scaled.and_then(i64::checked_neg).and_then(|w| w.checked_sub(frac))
        } else {
            scaled.and_then(|w| w.checked_add(frac))
        };
        units.map(Fixed8).ok_or(PrimitivesError::Fixed8Overflow)
    }

    /// The raw count of minor units.
    pub const fn units(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checked addition; `None` on overflow.
    pub fn checked_add(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_add(other.0).map(Fixed8)
    }

    /// Checked subtraction; `None` on overflow.
    pub fn checked_sub(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_sub(other.0).map(Fixed8)
    }
}

/// Decimal rendering without trailing fractional zeros: `7`, `0.5`, `-1.25`.
impl fmt::Display for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / ONE as u64;
        let frac = abs % ONE as u64;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:08}", frac);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed8({})", self)
    }
}

impl FromStr for Fixed8 {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fixed8::from_decimal_str(s)
    }
}

/// Serialized as a decimal string so that no precision is lost in JSON.
impl Serialize for Fixed8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct Fixed8Visitor;

impl<'de> Visitor<'de> for Fixed8Visitor {
    type Value = Fixed8;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal string or number with at most 8 fractional digits")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Fixed8, E> {
        Fixed8::from_decimal_str(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Fixed8, E> {
        Fixed8::from_int(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Fixed8, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(PrimitivesError::Fixed8Overflow))?;
        Fixed8::from_int(v).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Fixed8, E> {
        let rendered = format!("{:.8}", v);
        Fixed8::from_decimal_str(&rendered).map_err(E::custom)
    }
}

/// Accepts either a decimal string or a JSON number, as RPC nodes and
/// indexers disagree on which they emit.
impl<'de> Deserialize<'de> for Fixed8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(Fixed8Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(Fixed8::from_decimal_str("3").unwrap().units(), 300_000_000);
        assert_eq!(Fixed8::from_decimal_str("3.0").unwrap().units(), 300_000_000);
        assert_eq!(Fixed8::from_decimal_str("0.5").unwrap().units(), 50_000_000);
        assert_eq!(Fixed8::from_decimal_str(".5").unwrap().units(), 50_000_000);
        assert_eq!(Fixed8::from_decimal_str("0.00000001").unwrap().units(), 1);
        assert_eq!(Fixed8::from_decimal_str("-1.25").unwrap().units(), -125_000_000);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Fixed8::from_decimal_str("").is_err());
        assert!(Fixed8::from_decimal_str(".").is_err());
        assert!(Fixed8::from_decimal_str("1.000000001").is_err());
        assert!(Fixed8::from_decimal_str("1e8").is_err());
        assert!(Fixed8::from_decimal_str("1,5").is_err());
        assert!(Fixed8::from_decimal_str("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_extremes() {
        for units in [i64::MIN, i64::MIN + 1, i64::MAX] {
            let value = Fixed8::from_units(units);
            assert_eq!(Fixed8::from_decimal_str(&value.to_string()).unwrap(), value);
        }
        assert_eq!(Fixed8::from_units(i64::MIN).to_string(), "-92233720368.54775808");
        assert!(matches!(
            Fixed8::from_decimal_str("-92233720368.54775809"),
            Err(PrimitivesError::Fixed8Overflow)
        ));
        assert!(matches!(
            Fixed8::from_decimal_str("92233720368.54775808"),
            Err(PrimitivesError::Fixed8Overflow)
        ));
    }

    #[test]
    fn test_display_trims_zeros() {
        assert_eq!(Fixed8::from_units(700_000_000).to_string(), "7");
        assert_eq!(Fixed8::from_units(50_000_000).to_string(), "0.5");
        assert_eq!(Fixed8::from_units(1).to_string(), "0.00000001");
        assert_eq!(Fixed8::from_units(-125_000_000).to_string(), "-1.25");
        assert_eq!(Fixed8::ZERO.to_string(), "0");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Fixed8::from_int(10).unwrap();
        let b = Fixed8::from_int(3).unwrap();
        assert_eq!(a.checked_sub(b), Some(Fixed8::from_int(7).unwrap()));
        assert_eq!(Fixed8::from_units(i64::MAX).checked_add(Fixed8::from_units(1)), None);
        assert!(Fixed8::from_int(i64::MAX).is_err());
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let from_str: Fixed8 = serde_json::from_str(r#""2.5""#).unwrap();
        let from_int: Fixed8 = serde_json::from_str("2").unwrap();
        let from_float: Fixed8 = serde_json::from_str("2.5").unwrap();
        assert_eq!(from_str.units(), 250_000_000);
        assert_eq!(from_int.units(), 200_000_000);
        assert_eq!(from_float, from_str);
        assert_eq!(serde_json::to_string(&from_str).unwrap(), r#""2.5""#);
    }
}
