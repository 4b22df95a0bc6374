//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The storefront this core serves previously did all its pricing in     │
//! │  JavaScript floats:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Céntimos                                         │
//! │    S/ 10.50 is stored as 1050                                           │
//! │    Sums, tier lookups and discounts are exact integer arithmetic        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog document carries prices as two-decimal strings
//! (e.g. `"10.50"`); [`Money::parse_decimal`] converts them exactly once at
//! the catalog boundary. Everything downstream is integer math.
//!
//! ## Usage
//! ```rust
//! use botica_core::money::Money;
//!
//! let price = Money::parse_decimal("10.50").unwrap();
//! assert_eq!(price.cents(), 1050);
//! assert_eq!(price.to_string(), "S/ 10.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in céntimos (hundredths of a sol).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction of a clamped discount can never underflow,
///   but intermediate arithmetic is allowed to go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

/// Error parsing a decimal price string into [`Money`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid price string: {0:?}")]
pub struct ParseMoneyError(pub String);

impl Money {
    /// Creates a Money value from céntimos (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole soles.
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// assert_eq!(Money::from_soles(500).cents(), 50000); // S/ 500.00
    /// ```
    #[inline]
    pub const fn from_soles(soles: i64) -> Self {
        Money(soles * 100)
    }

    /// Parses a fixed-point decimal string (`"10.50"`, `"8"`, `"6.5"`)
    /// into exact céntimos.
    ///
    /// The catalog converter always emits two decimals, but one-decimal and
    /// integer forms are accepted too. More than two decimals, a missing
    /// integer part, or any non-digit character is rejected.
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10.50").unwrap().cents(), 1050);
    /// assert_eq!(Money::parse_decimal("8").unwrap().cents(), 800);
    /// assert_eq!(Money::parse_decimal("6.5").unwrap().cents(), 650);
    /// assert!(Money::parse_decimal("10.505").is_err());
    /// assert!(Money::parse_decimal("S/ 10").is_err());
    /// ```
    pub fn parse_decimal(s: &str) -> Result<Self, ParseMoneyError> {
        let s = s.trim();
        let err = || ParseMoneyError(s.to_string());

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        if frac_part.len() > 2 || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let soles: i64 = int_part.parse().map_err(|_| err())?;
        let cents: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| err())? * 10,
            _ => frac_part.parse().map_err(|_| err())?,
        };

        Ok(Money(soles * 100 + cents))
    }

    /// Returns the value in céntimos (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-soles portion.
    #[inline]
    pub const fn soles(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the céntimos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1050); // S/ 10.50
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 3150);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Computes a percentage of this amount, expressed in basis points
    /// (1000 bps = 10%), with half-up rounding.
    ///
    /// ## Why Basis Points?
    /// Integer percentages would lose fractions like 12.5%; basis points
    /// keep the registry exact without touching floating point.
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(20000); // S/ 200.00
    /// assert_eq!(subtotal.percentage(1000).cents(), 2000); // 10% = S/ 20.00
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 intermediate prevents overflow on large subtotals
        let amount = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(amount as i64)
    }

    /// Returns the smaller of two amounts. Used to clamp discounts so they
    /// never exceed the subtotal.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the literal `S/ ` currency prefix with fixed two decimals,
/// exactly as the storefront shows prices.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}S/ {}.{:02}", sign, self.soles().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Money sums over iterator of line totals.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
