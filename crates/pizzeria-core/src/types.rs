//! # Catalog Types
//!
//! Read-only menu types consumed by pricing and the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │     PizzaType       │   │   PizzaFlavor   │   │    Beverage     │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id                 │   │  id             │   │  id             │   │
//! │  │  name               │   │  name           │   │  name           │   │
//! │  │  base_price         │   │  price          │   │  price          │   │
//! │  │  available_extras ──┼─┐ └─────────────────┘   │  category       │   │
//! │  │  available_crusts ──┼┐│                       └─────────────────┘   │
//! │  └─────────────────────┘││ ┌─────────────────┐   ┌─────────────────┐   │
//! │                         │└►│   PizzaExtra    │   │   PizzaCrust    │◄┐ │
//! │                         │  │  id, name,price │   │  id, name,price │ │ │
//! │                         │  └─────────────────┘   └─────────────────┘ │ │
//! │                         └──────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These arrive already validated from the menu boundary in the storefront
//! app; nothing in this crate re-checks their shape.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog Item Trait
// =============================================================================

/// Common view over every priced menu entry.
pub trait CatalogItem {
    /// Identifier assigned by the menu API.
    fn id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    /// Price contribution of this entry.
    fn price(&self) -> Money;
}

macro_rules! impl_catalog_item {
    ($ty:ty, $price:ident) => {
        impl CatalogItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn price(&self) -> Money {
                self.$price
            }
        }
    };
}

// =============================================================================
// Pizza Type
// =============================================================================

/// A base pizza product (size/style) with its starting price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PizzaType {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price before flavors, crust and extras.
    pub base_price: Money,
    /// Extras offered for this type. Empty means no restriction.
    #[serde(default)]
    pub available_extras: Vec<PizzaExtra>,
    /// Crusts offered for this type. Empty means no restriction.
    #[serde(default)]
    pub available_crusts: Vec<PizzaCrust>,
}

impl PizzaType {
    /// Checks whether an extra may be added to this pizza type.
    pub fn offers_extra(&self, extra_id: &str) -> bool {
        self.available_extras.is_empty() || self.available_extras.iter().any(|e| e.id == extra_id)
    }

    /// Checks whether a crust may be chosen for this pizza type.
    pub fn offers_crust(&self, crust_id: &str) -> bool {
        self.available_crusts.is_empty() || self.available_crusts.iter().any(|c| c.id == crust_id)
    }
}

impl_catalog_item!(PizzaType, base_price);

// =============================================================================
// Flavor / Extra / Crust
// =============================================================================

/// A pizza flavor. On a half-and-half pizza it covers one half.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PizzaFlavor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Add-on price over the base price.
    pub price: Money,
}

impl_catalog_item!(PizzaFlavor, price);

/// An extra topping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PizzaExtra {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Money,
}

impl_catalog_item!(PizzaExtra, price);

/// A stuffed or special crust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PizzaCrust {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Money,
}

impl_catalog_item!(PizzaCrust, price);

// =============================================================================
// Beverage
// =============================================================================

/// Beverage grouping used by the drinks page filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BeverageCategory {
    pub id: String,
    pub name: String,
}

/// A beverage sold by the unit. No modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Beverage {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<BeverageCategory>,
    #[serde(default)]
    pub alcoholic: bool,
}

impl_catalog_item!(Beverage, price);

// =============================================================================
// Item Type
// =============================================================================

/// Discriminator for cart line items and order payload entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ItemType {
    Pizza,
    Beverage,
}

// =============================================================================
// Unit Tests
// =============================================================================
