//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE DRIFT PROBLEM                                                      │
//! │                                                                         │
//! │  Half-and-half pizzas charge HALF of each flavor price:                 │
//! │    R$ 4.55 / 2 = R$ 2.275      → not representable in whole cents      │
//! │                                                                         │
//! │  Quantity updates recover the unit price from the stored total:        │
//! │    unit = total / quantity      → must give back EXACTLY the unit      │
//! │                                                                         │
//! │  With floats:  0.1 + 0.2 = 0.30000000000000004  ❌                      │
//! │  With cents:   455 / 2 = 227 (half a cent lost)  ❌                     │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimal, never rounded internally               │
//! │    2.275 × 3 = 6.825, 6.825 / 3 = 2.275         ✅                      │
//! │    Rounding to 2 places happens ONLY when rendering                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // 10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // 21.98
//! let total = price + Money::from_cents(500);   // 15.99
//! assert_eq!(doubled, Money::from_cents(2198));
//! assert_eq!(total, Money::from_cents(1599));
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use ts_rs::TS;

/// Number of decimal places shown when money is rendered.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents an exact monetary value in the major currency unit.
///
/// ## Design Decisions
/// - **Decimal (base 10)**: Halving and quantity division stay exact
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Serialized as a JSON number**: The order API expects `totalPrice: 19.5`
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  PizzaType.base_price ─┐                                                │
/// │  PizzaFlavor.price ────┼──► unit price ──► CartLineItem.total_price     │
/// │  PizzaExtra.price ─────┤                          │                     │
/// │  PizzaCrust.price ─────┘                          ▼                     │
/// │                                   Cart total ──► + delivery fee         │
/// │                                                   │                     │
/// │                                                   ▼                     │
/// │                                   Order totalAmount, "R$ 24.00" in UI   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    Decimal,
);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let price = Money::from_cents(2500); // Represents 25.00
    /// assert_eq!(price.to_string(), "$25.00");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Wraps an already exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact, unrounded decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns exactly half of the amount.
    ///
    /// Used for half-and-half flavor pricing. No rounding takes place:
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let half = Money::from_cents(455).half(); // 2.275
    /// assert_eq!(half.multiply_quantity(4), Money::from_cents(910));
    /// assert_eq!(half + half, Money::from_cents(455));
    /// ```
    #[inline]
    pub fn half(&self) -> Self {
        Money(self.0 / Decimal::TWO)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(650); // 6.50
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(1950));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Divides a quantity-scaled total back into its unit amount.
    ///
    /// Returns `None` for a zero quantity. When `self` was produced by
    /// [`Money::multiply_quantity`] with the same quantity the result is the
    /// original unit amount, exactly.
    ///
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let unit = Money::from_cents(455).half();
    /// let total = unit.multiply_quantity(7);
    /// assert_eq!(total.divide_quantity(7), Some(unit));
    /// assert_eq!(total.divide_quantity(0), None);
    /// ```
    #[inline]
    pub fn divide_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_div(Decimal::from(qty)).map(Money)
    }

    /// Rounds to `decimals` places using Bankers Rounding.
    ///
    /// ## Render Time Only
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Stored:    24.275   ── never rounded, feeds later recomputation   │
    /// │  Rendered:  24.28    ── rounded(2), shown to the customer          │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Bankers Rounding rounds 0.5 to the nearest EVEN digit, so
    /// 2.275 → 2.28 and 2.265 → 2.26.
    pub fn rounded(&self, decimals: u32) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Customer-facing formatting (currency
/// symbol, decimal separator) lives in the storefront configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded(DISPLAY_DECIMALS).0;
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        write!(
            f,
            "{}${:.prec$}",
            sign,
            rounded.abs(),
            prec = DISPLAY_DECIMALS as usize
        )
    }
}

/// Parses a plain decimal string such as `"6.50"`.
impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a quantity.
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

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
