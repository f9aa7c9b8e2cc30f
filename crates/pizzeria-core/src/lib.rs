//! # pizzeria-core: Pure Cart Pricing Logic for the Pizzeria Storefront
//!
//! This crate is the **heart** of the storefront. It prices pizzas and
//! beverages, models where extra toppings go, and owns the cart store. It has
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pizzeria Storefront Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (single-page app)                   │   │
//! │  │   Menu ──► Customize ──► Cart ──► Checkout ──► Order tracking   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront (app crate)                       │   │
//! │  │   menu boundary, session state, checkout, order tracker         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pizzeria-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ selection │  │  pricing  │  │   cart    │  │ placement │  │   │
//! │  │   │ flavors,  │─►│ unit and  │─►│ line items│  │ whole or  │  │   │
//! │  │   │ crust,qty │  │  totals   │  │ aggregates│  │ one half  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • DETERMINISTIC             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Remote menu and order REST API                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (PizzaType, PizzaFlavor, Beverage, etc.)
//! - [`money`] - Exact decimal Money (no floating point!)
//! - [`placement`] - Whole vs. half placement of extras
//! - [`selection`] - The pizza being customized
//! - [`pricing`] - Unit and total prices
//! - [`cart`] - The cart store
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use pizzeria_core::cart::{Cart, SequentialIds};
//! use pizzeria_core::money::Money;
//! use pizzeria_core::selection::PizzaSelection;
//! use pizzeria_core::types::{PizzaCrust, PizzaFlavor, PizzaType};
//!
//! let large = PizzaType {
//!     id: "large".into(),
//!     name: "Large".into(),
//!     description: None,
//!     base_price: Money::from_cents(2500),
//!     available_extras: vec![],
//!     available_crusts: vec![],
//! };
//! let mut pizza = PizzaSelection::new(large);
//! pizza.choose_flavor(PizzaFlavor {
//!     id: "calabresa".into(),
//!     name: "Calabresa".into(),
//!     description: None,
//!     price: Money::from_cents(500),
//! });
//! pizza
//!     .set_crust(Some(PizzaCrust {
//!         id: "catupiry".into(),
//!         name: "Catupiry".into(),
//!         description: None,
//!         price: Money::from_cents(800),
//!     }))
//!     .unwrap();
//! pizza.set_quantity(2).unwrap();
//!
//! let mut cart = Cart::with_id_generator(SequentialIds::default());
//! let id = cart.add_pizza(&pizza).unwrap();
//!
//! assert_eq!(cart.get(&id).unwrap().total_price, Money::from_cents(7600));
//! assert_eq!(cart.total_items(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod placement;
pub mod pricing;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItemKind, CartLineItem, CartSnapshot, CartTotals, IdGenerator};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use placement::{AppliedExtra, ExtrasPlacement, Placement};
pub use pricing::PriceBreakdown;
pub use selection::PizzaSelection;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and keeps order payloads a reasonable size.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Flavors per pizza: one whole, or two halves
pub const MAX_FLAVORS: usize = 2;

/// Maximum length of a pizza's observations
pub const MAX_OBSERVATIONS_LEN: usize = 500;
