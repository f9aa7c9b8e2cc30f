//! # Pricing Calculator
//!
//! Deterministic unit and total prices for pizzas and beverages.
//!
//! ## Pizza Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit = base_price                                                      │
//! │       + Σ flavor.price          (single flavor)                         │
//! │       + Σ flavor.price / 2      (half-and-half: average, not sum)       │
//! │       + Σ extra.price           (placement does NOT change the price)   │
//! │       + crust.price             (0 without crust)                       │
//! │                                                                         │
//! │  total = unit × quantity                                                │
//! │                                                                         │
//! │  Example: 18.00 + 2.00/2 + 4.00/2 + 3.00 (whole) = 24.00               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A selection without flavors prices at zero; the cart refuses it.
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::money::Money;
//! use pizzeria_core::pricing::line_total;
//!
//! assert_eq!(line_total(Money::from_cents(3800), 2), Money::from_cents(7600));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::placement::AppliedExtra;
use crate::selection::PizzaSelection;
use crate::types::{Beverage, PizzaCrust, PizzaFlavor, PizzaType};

// =============================================================================
// Price Breakdown
// =============================================================================

/// Price preview shown on the customization screen after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    pub base: Money,
    pub flavors: Money,
    pub extras: Money,
    pub crust: Money,
    pub unit_price: Money,
    pub quantity: i64,
    pub total_price: Money,
}

impl PriceBreakdown {
    /// An all-zero preview for an incomplete selection.
    pub fn zero(quantity: i64) -> Self {
        PriceBreakdown {
            quantity,
            ..Default::default()
        }
    }
}

// =============================================================================
// Contributions
// =============================================================================

/// Flavor contribution: full prices for one flavor, half of each for two.
pub fn flavor_contribution(flavors: &[PizzaFlavor]) -> Money {
    let half_and_half = flavors.len() > 1;
    flavors
        .iter()
        .map(|f| if half_and_half { f.price.half() } else { f.price })
        .sum()
}

/// Extras contribution, independent of placement.
pub fn extras_contribution(extras: &[AppliedExtra]) -> Money {
    extras.iter().map(|a| a.extra.price).sum()
}

/// Crust contribution, zero without crust.
pub fn crust_contribution(crust: Option<&PizzaCrust>) -> Money {
    crust.map(|c| c.price).unwrap_or_default()
}

// =============================================================================
// Pizza & Beverage Pricing
// =============================================================================

/// Unit price of one pizza. Zero when no flavor is selected.
pub fn pizza_unit_price(
    pizza_type: &PizzaType,
    flavors: &[PizzaFlavor],
    crust: Option<&PizzaCrust>,
    extras: &[AppliedExtra],
) -> Money {
    if flavors.is_empty() {
        return Money::zero();
    }

    pizza_type.base_price
        + flavor_contribution(flavors)
        + extras_contribution(extras)
        + crust_contribution(crust)
}

/// Full breakdown of a pizza selection.
///
/// ## User Workflow
/// ```text
/// Pick flavor / crust / extra / quantity
///      │
///      ▼
/// price_pizza(&selection) ← THIS FUNCTION (on every change)
///      │
///      ▼
/// "Total: R$ 76,00" on the add-to-cart button
/// ```
pub fn price_pizza(selection: &PizzaSelection) -> PriceBreakdown {
    let quantity = selection.quantity();
    if !selection.has_flavor() {
        return PriceBreakdown::zero(quantity);
    }

    let extras = selection.extras().applied();
    let base = selection.pizza_type().base_price;
    let flavors = flavor_contribution(selection.flavors());
    let extras = extras_contribution(extras);
    let crust = crust_contribution(selection.crust());
    let unit_price = base + flavors + extras + crust;

    PriceBreakdown {
        base,
        flavors,
        extras,
        crust,
        unit_price,
        quantity,
        total_price: line_total(unit_price, quantity),
    }
}

/// Unit price of a beverage. No modifiers.
pub fn beverage_unit_price(beverage: &Beverage) -> Money {
    beverage.price
}

/// Quantity-scaled total of a unit price. Never rounded.
#[inline]
pub fn line_total(unit_price: Money, quantity: i64) -> Money {
    unit_price.multiply_quantity(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
