//! # Cart State
//!
//! Holds the session cart shared by commands and the checkout flow.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Checkout takes the ordered lines out from an async task after submission
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Frontend Action          Command                  Cart Change          │
//! │  ───────────────          ───────                  ───────────          │
//! │                                                                         │
//! │  Confirm pizza ──────────► add_pizza_to_cart() ──► cart.add_pizza       │
//! │                                                                         │
//! │  Tap beverage ───────────► add_beverage_to_cart()► cart.add_beverage    │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_item() ───► cart.update_quantity │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ───► cart.remove_item     │
//! │                                                                         │
//! │  Order placed ───────────► place_order() ────────► cart.remove_ordered  │
//! │                                                                         │
//! │  NOTE: The lock is never held across an `.await`.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use pizzeria_core::cart::{Cart, IdGenerator};

/// Session cart state.
///
/// Cloning shares the same cart.
///
/// ## Poisoning
/// A poisoned lock is recovered, not propagated. Cart mutations validate
/// before they change anything, so the cart is never left half-updated.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::from_cart(Cart::new())
    }

    /// Creates an empty cart state with a custom line id source.
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self::from_cart(Cart::with_id_generator(ids))
    }

    fn from_cart(cart: Cart) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use storefront_lib::state::CartState;
    ///
    /// let cart_state = CartState::new();
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// assert_eq!(totals.total_items, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use pizzeria_core::{Beverage, Money};
    /// use storefront_lib::state::CartState;
    ///
    /// let soda = Beverage {
    ///     id: "soda".to_string(),
    ///     name: "Soda".to_string(),
    ///     description: None,
    ///     price: Money::from_cents(650),
    ///     category: None,
    ///     alcoholic: false,
    /// };
    ///
    /// let cart_state = CartState::new();
    /// cart_state.with_cart_mut(|cart| cart.add_beverage(&soda, 2))?;
    ///
    /// let shared = cart_state.clone();
    /// assert_eq!(shared.with_cart(|cart| cart.total_price()), Money::from_cents(1300));
    /// # Ok::<(), pizzeria_core::CoreError>(())
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
