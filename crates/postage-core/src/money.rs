//! # Money Module
//!
//! Provides the `Money` type for handling postage amounts safely.
//!
//! ## Why Integer Pence?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    4.99 + 2.99 + 39.90 = 47.879999999999995  ❌ WRONG!                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pence                                            │
//! │    499 + 299 + 3990 = 4788 pence = £47.88                               │
//! │    Sums are exact, so the final total never drifts                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Floating-point pounds only appear at the edges (caller input). They are
//! converted once with [`Money::from_pounds`], which rounds half away from
//! zero to the nearest penny.
//!
//! ## Usage
//! ```rust
//! use postage_core::money::Money;
//!
//! let standard = Money::from_pence(499); // £4.99
//!
//! let two_items = standard * 2;                        // £9.98
//! let first_class = standard + Money::from_pence(299); // £7.98
//! assert_eq!(two_items.pence(), 998);
//! assert_eq!(first_class.pence(), 798);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in pence (the smallest unit of sterling).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction
/// - **Single field tuple struct**: serialises as a bare integer
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  RuleTable rates ──┬──► base postage ──┐                                │
/// │                    ├──► supplement ────┼──► Quote.total                 │
/// │                    └──► surcharges ────┘                                │
/// │                                                                         │
/// │  Order.declared_total ──► free threshold comparison                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence.
    ///
    /// ## Example
    /// ```rust
    /// use postage_core::money::Money;
    ///
    /// let surcharge = Money::from_pence(1990); // £19.90
    /// assert_eq!(surcharge.pence(), 1990);
    /// ```
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Creates a Money value from a floating-point amount of pounds.
    ///
    /// Rounds to the nearest penny, half away from zero (never bankers
    /// rounding). Non-finite input yields zero.
    ///
    /// ## Example
    /// ```rust
    /// use postage_core::money::Money;
    ///
    /// assert_eq!(Money::from_pounds(24.99).pence(), 2499);
    /// assert_eq!(Money::from_pounds(0.125).pence(), 13);
    /// assert_eq!(Money::from_pounds(-0.125).pence(), -13);
    /// ```
    pub fn from_pounds(pounds: f64) -> Self {
        if !pounds.is_finite() {
            return Money::zero();
        }
        // f64::round is half-away-from-zero
        Money((pounds * 100.0).round() as i64)
    }

    /// Returns the value in pence.
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the value in pounds.
    ///
    /// For callers that want a plain number; never feed the result back
    /// into further arithmetic.
    #[inline]
    pub fn pounds(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the whole-pound portion.
    #[inline]
    pub const fn whole_pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the pence portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
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

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a per-item rate by an item count.
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use postage_core::money::Money;
    ///
    /// let next_day = Money::from_pence(1199);
    /// assert_eq!(next_day.per_item(2).pence(), 2398);
    /// assert!(next_day.per_item(0).is_zero());
    /// ```
    #[inline]
    pub const fn per_item(&self, count: usize) -> Self {
        let count = if count > i64::MAX as usize {
            i64::MAX
        } else {
            count as i64
        };
        Money(self.0.saturating_mul(count))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering, e.g. `£27.88`.
///
/// ## Note
/// Not a localisation layer. Front ends format amounts themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}£{}.{:02}",
            sign,
            self.whole_pounds().abs(),
            self.pence_part()
        )
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
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
