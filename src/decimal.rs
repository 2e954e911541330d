//! Arbitrary-precision decimal parsing and comparison.
//!
//! `serde_json`'s `arbitrary_precision` feature keeps a JSON number's original lexeme
//! around, but comparing two lexemes still needs exact arithmetic — `1` and `1.0` must
//! compare equal, and `0.1 + 0.2 == 0.3` must not silently slip through `f64`. This
//! module parses a lexeme into a `BigRational` once and does every comparison there.
use std::cmp::Ordering;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use serde_json::Number;

/// An exact decimal value, parsed once from a JSON number lexeme.
#[derive(Clone, Debug)]
pub struct Decimal(BigRational);

#[derive(Debug)]
pub struct DecimalParseError(pub String);

impl std::fmt::Display for DecimalParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a valid JSON number", self.0)
    }
}

impl std::error::Error for DecimalParseError {}

impl Decimal {
    pub fn from_number(number: &Number) -> Result<Self, DecimalParseError> {
        Self::from_lexeme(&number.to_string())
    }

    /// Parses a JSON number lexeme such as `"1"`, `"-3.25"`, `"1e10"`, `"2.5E-3"`.
    pub fn from_lexeme(lexeme: &str) -> Result<Self, DecimalParseError> {
        let (mantissa_part, exponent) = match lexeme.find(|c| c == 'e' || c == 'E') {
            Some(idx) => {
                let exp = lexeme[idx + 1..]
                    .parse::<i64>()
                    .map_err(|_| DecimalParseError(lexeme.to_owned()))?;
                (&lexeme[..idx], exp)
            }
            None => (lexeme, 0),
        };

        let (int_part, frac_part) = match mantissa_part.find('.') {
            Some(idx) => (&mantissa_part[..idx], &mantissa_part[idx + 1..]),
            None => (mantissa_part, ""),
        };

        if int_part.is_empty() || (int_part == "-" ) {
            return Err(DecimalParseError(lexeme.to_owned()));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let numerator =
            BigInt::from_str(&digits).map_err(|_| DecimalParseError(lexeme.to_owned()))?;
        let scale = frac_part.len() as i64 - exponent;

        let value = if scale > 0 {
            BigRational::new(numerator, BigInt::from(10).pow(scale as u32))
        } else {
            BigRational::from_integer(numerator * BigInt::from(10).pow((-scale) as u32))
        };
        Ok(Decimal(value))
    }

    /// True iff this value represents an exact integer (`1`, `1.0`, `1e0`, but not `1.5`).
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// `self % other == 0`, used for `multipleOf`.
    pub fn is_multiple_of(&self, other: &Decimal) -> bool {
        if other.0.is_zero() {
            return false;
        }
        (&self.0 / &other.0).is_integer()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.to_integer())
        } else {
            write!(f, "{:.12}", num_traits::ToPrimitive::to_f64(&self.0).unwrap_or(f64::NAN))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_equals_one_point_zero() {
        let a = Decimal::from_lexeme("1").unwrap();
        let b = Decimal::from_lexeme("1.0").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scientific_notation_parses_exactly() {
        let a = Decimal::from_lexeme("1e0").unwrap();
        let b = Decimal::from_lexeme("1").unwrap();
        assert_eq!(a, b);
        assert!(a.is_integer());
    }

    #[test]
    fn one_point_five_is_not_integer() {
        let v = Decimal::from_lexeme("1.5").unwrap();
        assert!(!v.is_integer());
    }

    #[test]
    fn exact_sum_not_lossy() {
        // f64 gives 0.1 + 0.2 != 0.3; exact decimal arithmetic must agree.
        let sum = Decimal::from_lexeme("0.3").unwrap();
        let ten = Decimal::from_lexeme("10").unwrap();
        assert!(sum.is_multiple_of(&Decimal::from_lexeme("0.1").unwrap()));
        assert!(!ten.is_multiple_of(&Decimal::from_lexeme("3").unwrap()));
    }

    #[test]
    fn multiple_of_zero_point_one() {
        let v = Decimal::from_lexeme("3.0000000000000004").unwrap();
        let step = Decimal::from_lexeme("0.0000000000000001").unwrap();
        assert!(v.is_multiple_of(&step));
    }

    #[test]
    fn negative_numbers_parse() {
        let v = Decimal::from_lexeme("-3.25").unwrap();
        assert!(v.is_negative());
    }
}
