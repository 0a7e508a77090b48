//! # Numeric Extensions
//!
//! Two immutable scalar families:
//!
//! - `WeakInt`: 64-bit integer with checked arithmetic, base conversion,
//!   primality and integer-valued roots, logarithms and trigonometry.
//! - `CorrectFloat`: f64 whose addition rounds away binary artifacts
//!   (`0.1 + 0.2 == 0.3`).
//!
//! Every operation returns a new scalar of the same family. Real-valued
//! results are truncated toward zero when they land in the integer family.
//! Adding a text operand made only of ASCII digits parses it first.

use crate::primitives::{MAX_BASE, MAX_FLOAT_PLACES, MIN_BASE};
use crate::{Kinded, PrimitiveError, Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

const BASE_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn is_digit_text(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digit_text(s: &str) -> Result<i64, PrimitiveError> {
    s.parse()
        .map_err(|_| PrimitiveError::InvalidNumber(s.to_string()))
}

fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

// =============================================================================
// SCALAR
// =============================================================================

/// Real-valued operations shared by both numeric families.
///
/// Implementors provide the f64 round trip; the operations are computed in
/// f64 and converted back with `from_f64`.
pub trait Scalar: Sized + Copy {
    fn as_f64(self) -> f64;

    /// Convert a real result back into this family. Fails on NaN, infinity
    /// or a value the family cannot hold.
    fn from_f64(value: f64) -> Result<Self, PrimitiveError>;

    /// The `n`-th root.
    fn sqrt(self, n: u32) -> Result<Self, PrimitiveError> {
        if n == 0 {
            return Err(PrimitiveError::interval("n", n, "[1, inf)"));
        }
        let x = self.as_f64();
        let root = if n == 2 {
            x.sqrt()
        } else {
            x.powf(1.0 / f64::from(n))
        };
        Self::from_f64(root)
    }

    /// Logarithm in `base`.
    fn log(self, base: f64) -> Result<Self, PrimitiveError> {
        let x = self.as_f64();
        if x <= 0.0 || x.is_nan() {
            return Err(PrimitiveError::interval("value", x, "(0, inf)"));
        }
        if base <= 0.0 || (base - 1.0).abs() < f64::EPSILON || base.is_nan() {
            return Err(PrimitiveError::interval("base", base, "(0, 1) U (1, inf)"));
        }
        Self::from_f64(x.log(base))
    }

    /// Sine of this value taken in degrees.
    fn sin(self) -> Result<Self, PrimitiveError> {
        Self::from_f64(degrees_to_radians(self.as_f64()).sin())
    }

    /// Cosine of this value taken in degrees.
    fn cos(self) -> Result<Self, PrimitiveError> {
        Self::from_f64(degrees_to_radians(self.as_f64()).cos())
    }

    /// Tangent of this value taken in degrees.
    fn tan(self) -> Result<Self, PrimitiveError> {
        Self::from_f64(degrees_to_radians(self.as_f64()).tan())
    }
}

// =============================================================================
// WEAK INT
// =============================================================================

/// Integer family.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WeakInt(i64);

impl WeakInt {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn pow(self, n: u32) -> Result<Self, PrimitiveError> {
        self.0
            .checked_pow(n)
            .map(Self)
            .ok_or(PrimitiveError::Overflow("pow"))
    }

    /// Digits in reverse order, sign kept: `-120` becomes `-21`.
    pub fn reverse(self) -> Result<Self, PrimitiveError> {
        let digits: String = self.0.unsigned_abs().to_string().chars().rev().collect();
        let magnitude: i64 = digits
            .parse()
            .map_err(|_| PrimitiveError::Overflow("reverse"))?;
        Ok(Self(if self.0 < 0 { -magnitude } else { magnitude }))
    }

    /// Greatest common divisor of this value and `others` (always >= 0).
    pub fn gcd(self, others: &[i64]) -> Result<Self, PrimitiveError> {
        let g = others
            .iter()
            .fold(self.0.unsigned_abs(), |acc, x| gcd_u64(acc, x.unsigned_abs()));
        i64::try_from(g)
            .map(Self)
            .map_err(|_| PrimitiveError::Overflow("gcd"))
    }

    /// Least common multiple of this value and `others` (always >= 0; 0 if
    /// any operand is 0).
    pub fn lcm(self, others: &[i64]) -> Result<Self, PrimitiveError> {
        let l = others.iter().try_fold(self.0.unsigned_abs(), |acc, x| {
            let x = x.unsigned_abs();
            if acc == 0 || x == 0 {
                return Some(0);
            }
            (acc / gcd_u64(acc, x)).checked_mul(x)
        });
        l.and_then(|l| i64::try_from(l).ok())
            .map(Self)
            .ok_or(PrimitiveError::Overflow("lcm"))
    }

    /// Digits of this value in `base` (`0-9a-z`, most significant first,
    /// leading `-` for negatives).
    pub fn to_base(self, base: u32) -> Result<String, PrimitiveError> {
        check_base(base)?;
        let radix = u64::from(base);
        let mut value = self.0.unsigned_abs();
        let mut digits = Vec::new();
        loop {
            digits.push(BASE_DIGITS[(value % radix) as usize]);
            value /= radix;
            if value == 0 {
                break;
            }
        }
        if self.0 < 0 {
            digits.push(b'-');
        }
        digits.reverse();
        Ok(digits.into_iter().map(char::from).collect())
    }

    /// Parse `digits` written in `base`. Inverse of `to_base`.
    pub fn from_base(digits: &str, base: u32) -> Result<Self, PrimitiveError> {
        check_base(base)?;
        i64::from_str_radix(digits, base)
            .map(Self)
            .map_err(|_| PrimitiveError::InvalidNumber(digits.to_string()))
    }

    /// Trial division by every integer in `2..=sqrt(self)`.
    #[must_use]
    pub fn is_prime(self) -> bool {
        if self.0 < 2 {
            return false;
        }
        let Ok(root) = self.sqrt(2) else {
            return false;
        };
        (2..=root.0).all(|divisor| self.0 % divisor != 0)
    }

    /// Add an integer, float (truncated), boolean or digit-text operand.
    pub fn try_add(self, other: impl Into<Value>) -> Result<Self, PrimitiveError> {
        match other.into() {
            Value::Int(i) => self.checked_add(i),
            Value::Bool(b) => self.checked_add(i64::from(b)),
            Value::Float(x) => Self::from_f64(self.as_f64() + x),
            Value::Text(s) if is_digit_text(&s) => self.checked_add(parse_digit_text(&s)?),
            other => Err(PrimitiveError::TypeMismatch {
                operation: "add",
                kind: other.kind(),
            }),
        }
    }

    fn checked_add(self, other: i64) -> Result<Self, PrimitiveError> {
        self.0
            .checked_add(other)
            .map(Self)
            .ok_or(PrimitiveError::Overflow("add"))
    }
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn check_base(base: u32) -> Result<(), PrimitiveError> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(PrimitiveError::interval("base", base, "[2, 36]"))
    }
}

impl Scalar for WeakInt {
    fn as_f64(self) -> f64 {
        self.0 as f64
    }

    fn from_f64(value: f64) -> Result<Self, PrimitiveError> {
        let truncated = value.trunc();
        if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
            Ok(Self(truncated as i64))
        } else {
            Err(PrimitiveError::InvalidNumber(value.to_string()))
        }
    }
}

impl Kinded for WeakInt {
    fn kind(&self) -> ValueKind {
        ValueKind::Integer
    }
}

impl fmt::Display for WeakInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WeakInt {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| PrimitiveError::InvalidNumber(s.to_string()))
    }
}

impl From<i64> for WeakInt {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<WeakInt> for Value {
    fn from(value: WeakInt) -> Self {
        Self::Int(value.0)
    }
}

impl Add for WeakInt {
    type Output = Result<Self, PrimitiveError>;

    fn add(self, other: Self) -> Self::Output {
        self.checked_add(other.0)
    }
}

/// `WeakInt(1) + "41"` parses the digits first.
impl Add<&str> for WeakInt {
    type Output = Result<Self, PrimitiveError>;

    fn add(self, other: &str) -> Self::Output {
        self.try_add(other)
    }
}

// =============================================================================
// CORRECT FLOAT
// =============================================================================

/// Float family with artifact-free addition.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectFloat(f64);

impl CorrectFloat {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn pow(self, n: i32) -> Self {
        Self(self.0.powi(n))
    }

    /// Decimal representation reversed, sign kept: `12.5` becomes `5.21`.
    pub fn reverse(self) -> Result<Self, PrimitiveError> {
        if !self.0.is_finite() {
            return Err(PrimitiveError::InvalidNumber(self.0.to_string()));
        }
        let digits: String = self.0.abs().to_string().chars().rev().collect();
        let magnitude: f64 = digits
            .parse()
            .map_err(|_| PrimitiveError::InvalidNumber(digits.clone()))?;
        Ok(Self(magnitude.copysign(self.0)))
    }

    /// Add a float with rounding, or an integer, boolean or digit-text
    /// operand exactly.
    pub fn try_add(self, other: impl Into<Value>) -> Result<Self, PrimitiveError> {
        match other.into() {
            Value::Float(x) => Ok(self + Self(x)),
            Value::Int(i) => Ok(Self(self.0 + i as f64)),
            Value::Bool(b) => Ok(Self(self.0 + f64::from(u8::from(b)))),
            Value::Text(s) if is_digit_text(&s) => Ok(Self(self.0 + parse_digit_text(&s)? as f64)),
            other => Err(PrimitiveError::TypeMismatch {
                operation: "add",
                kind: other.kind(),
            }),
        }
    }
}

/// Digits after the decimal point in the shortest round-trip form of `x`.
fn fraction_digits(x: f64) -> usize {
    x.to_string().split_once('.').map_or(0, |(_, frac)| frac.len())
}

fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}

impl Scalar for CorrectFloat {
    fn as_f64(self) -> f64 {
        self.0
    }

    fn from_f64(value: f64) -> Result<Self, PrimitiveError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(PrimitiveError::InvalidNumber(value.to_string()))
        }
    }
}

impl Kinded for CorrectFloat {
    fn kind(&self) -> ValueKind {
        ValueKind::Float
    }
}

impl fmt::Display for CorrectFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CorrectFloat {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| PrimitiveError::InvalidNumber(s.to_string()))
    }
}

impl From<f64> for CorrectFloat {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<CorrectFloat> for Value {
    fn from(value: CorrectFloat) -> Self {
        Self::Float(value.0)
    }
}

/// Rounds the sum to as many decimal places as both operands carry together.
impl Add for CorrectFloat {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let places = (fraction_digits(self.0) + fraction_digits(other.0)).min(MAX_FLOAT_PLACES);
        Self(round_to(self.0 + other.0, places))
    }
}

/// `CorrectFloat(0.5) + "2"` parses the digits first.
impl Add<&str> for CorrectFloat {
    type Output = Result<Self, PrimitiveError>;

    fn add(self, other: &str) -> Self::Output {
        self.try_add(other)
    }
}

// =============================================================================
// TESTS
// =============================================================================
