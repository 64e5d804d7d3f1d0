//! # Money Module
//!
//! Provides the `Money` type and currency display formatting.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Backend sends:  "price": 0.1   and   "price": 0.2                      │
//! │  Naive sum:      0.30000000000000004  ❌ shown on a receipt             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paisa / cents)                      │
//! │    Decimal amounts are converted ONCE at the API boundary               │
//! │    (Money::from_decimal), all sums happen on i64, and only the          │
//! │    display layer inserts the decimal point.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::{CurrencyFormat, Money};
//!
//! let price = Money::from_minor(123450);
//! assert_eq!(price.format(&CurrencyFormat::default()), "Rs 1,234.50");
//!
//! let usd = CurrencyFormat::new("$", 2);
//! assert_eq!(price.format(&usd), "$ 1,234.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paisa for PKR).
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► OrderItem.line_total ──► Order total ──► "Rs 1,234.50"
/// Staff salary   ──► Payroll summary      ──► "Rs 85,000.00"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Converts a decimal amount from a backend payload.
    ///
    /// Rounds half away from zero to the nearest minor unit. Non-finite
    /// input maps to zero.
    ///
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(10.99).minor(), 1099);
    /// assert_eq!(Money::from_decimal(-2.5).minor(), -250);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * MINOR_PER_MAJOR as f64).round() as i64)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by an item quantity, saturating at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats for display with the given currency settings.
    ///
    /// ## Format
    /// ```text
    /// <sign><symbol> <grouped major>[.<minor>]
    ///   123450 minor, Rs, 2 decimals  →  "Rs 1,234.50"
    ///   -550 minor,   Rs, 2 decimals  →  "-Rs 5.50"
    ///   123450 minor, Rs, 0 decimals  →  "Rs 1,235"
    /// ```
    pub fn format(&self, currency: &CurrencyFormat) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_major = MINOR_PER_MAJOR as u64;

        let body = if currency.decimals == 0 {
            let rounded = (abs + per_major / 2) / per_major;
            group_thousands(rounded)
        } else {
            format!(
                "{}.{:02}",
                group_thousands(abs / per_major),
                abs % per_major
            )
        };

        if currency.symbol.is_empty() {
            format!("{}{}", sign, body)
        } else {
            format!("{}{} {}", sign, currency.symbol, body)
        }
    }
}

/// Inserts `,` every three digits from the right.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Currency Format
// =============================================================================

/// Display settings for monetary amounts.
///
/// Only 0 and 2 decimals are meaningful; anything non-zero renders two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    /// Symbol placed before the amount ("Rs", "$").
    pub symbol: String,

    /// Number of decimal places to show.
    pub decimals: u8,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            decimals,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::new("Rs", 2)
    }
}

/// Formats a decimal amount straight from a payload.
///
/// ```rust
/// use bistro_core::money::{format_currency, CurrencyFormat};
///
/// assert_eq!(format_currency(1500.0, &CurrencyFormat::default()), "Rs 1,500.00");
/// ```
pub fn format_currency(amount: f64, currency: &CurrencyFormat) -> String {
    Money::from_decimal(amount).format(currency)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Uses the default currency format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&CurrencyFormat::default()))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
