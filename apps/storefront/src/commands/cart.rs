//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Page   │     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                 add_pizza_to_cart                  place_order          │
//! │                 add_beverage_to_cart               (checkout.rs)        │
//! │                 update_cart_item                         │              │
//! │                 remove_from_cart                         │              │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear_cart ─────────────────────► (back to empty)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use pizzeria_core::validation::validate_flavor_count;
use pizzeria_core::{CartSnapshot, Placement, PizzaSelection, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::menu::Menu;
use crate::state::CartState;

/// One extra the customer picked, and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraRequest {
    pub extra_id: String,
    /// Flavor half the extra goes on; absent for the whole pizza.
    #[serde(default)]
    pub flavor_id: Option<String>,
}

/// A customized pizza as the frontend sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaRequest {
    pub pizza_type_id: String,
    pub flavor_ids: Vec<String>,
    #[serde(default)]
    pub crust_id: Option<String>,
    #[serde(default)]
    pub extras: Vec<ExtraRequest>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub observations: Option<String>,
}

/// Resolves catalog ids into a validated pizza selection.
///
/// ## Errors
/// - `NOT_FOUND` for an unknown pizza type, flavor, crust or extra
/// - `VALIDATION_ERROR` for more than two flavors, a crust or extra the pizza
///   type does not offer, an extra listed twice, or a half placement on a
///   flavor not selected
pub fn resolve_pizza(menu: &Menu, request: &PizzaRequest) -> Result<PizzaSelection, ApiError> {
    let pizza_type = menu
        .pizza_type(&request.pizza_type_id)
        .ok_or_else(|| ApiError::not_found("Pizza type", &request.pizza_type_id))?;

    if !request.flavor_ids.is_empty() {
        validate_flavor_count(request.flavor_ids.len())?;
    }
    let flavors = request
        .flavor_ids
        .iter()
        .map(|id| {
            menu.flavor(id)
                .cloned()
                .ok_or_else(|| ApiError::not_found("Flavor", id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut selection = PizzaSelection::new(pizza_type.clone());
    let mut flavors = flavors.into_iter();
    match (flavors.next(), flavors.next()) {
        (Some(first), Some(second)) => {
            selection.choose_halves(first, second)?;
        }
        (Some(only), None) => {
            selection.choose_flavor(only);
        }
        // no flavor yet: priced at zero and refused by the cart
        (None, _) => {}
    }

    if let Some(crust_id) = &request.crust_id {
        let crust = menu
            .crust_for(pizza_type, crust_id)
            .ok_or_else(|| ApiError::not_found("Crust", crust_id))?;
        selection.set_crust(Some(crust.clone()))?;
    }

    // the request is the final state, so each extra appears at most once
    let mut seen = HashSet::new();
    for extra in &request.extras {
        if !seen.insert(extra.extra_id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "extraId".to_string(),
                value: extra.extra_id.clone(),
            }
            .into());
        }

        let found = menu
            .extra_for(pizza_type, &extra.extra_id)
            .ok_or_else(|| ApiError::not_found("Extra", &extra.extra_id))?;
        let placement = match &extra.flavor_id {
            Some(flavor_id) => Placement::on_flavor(flavor_id.clone()),
            None => Placement::Whole,
        };
        selection.toggle_extra(found.clone(), placement)?;
    }

    if let Some(quantity) = request.quantity {
        selection.set_quantity(quantity)?;
    }
    if let Some(observations) = &request.observations {
        selection.set_observations(observations.clone())?;
    }

    Ok(selection)
}

/// Gets the current cart contents.
///
/// ## Returns
/// Line items plus `{ lineCount, totalItems, totalPrice }`
pub fn get_cart(cart: &CartState) -> CartSnapshot {
    debug!("get_cart command");
    cart.with_cart(|c| c.snapshot())
}

/// Adds a customized pizza to the cart.
///
/// ## Behavior
/// - Always a new line item, even for an identical pizza
/// - The price is frozen at the time of adding
pub fn add_pizza_to_cart(
    menu: &Menu,
    cart: &CartState,
    request: PizzaRequest,
) -> Result<CartSnapshot, ApiError> {
    debug!(pizza_type = %request.pizza_type_id, flavors = ?request.flavor_ids, "add_pizza_to_cart command");

    let selection = resolve_pizza(menu, &request)?;
    cart.with_cart_mut(|c| -> Result<CartSnapshot, ApiError> {
        c.add_pizza(&selection)?;
        Ok(c.snapshot())
    })
}

/// Adds a beverage to the cart.
///
/// ## Behavior
/// - Beverage already in cart: quantity increases
/// - Otherwise: added as a new line item
pub fn add_beverage_to_cart(
    menu: &Menu,
    cart: &CartState,
    beverage_id: &str,
    quantity: i64,
) -> Result<CartSnapshot, ApiError> {
    debug!(beverage_id, quantity, "add_beverage_to_cart command");

    let beverage = menu
        .beverage(beverage_id)
        .ok_or_else(|| ApiError::not_found("Beverage", beverage_id))?;

    cart.with_cart_mut(|c| -> Result<CartSnapshot, ApiError> {
        c.add_beverage(beverage, quantity)?;
        Ok(c.snapshot())
    })
}

/// Updates the quantity of a cart item.
///
/// ## Behavior
/// - `quantity <= 0`: item removed
/// - Unknown item id: cart returned unchanged
pub fn update_cart_item(
    cart: &CartState,
    item_id: &str,
    quantity: i64,
) -> Result<CartSnapshot, ApiError> {
    debug!(item_id, quantity, "update_cart_item command");

    cart.with_cart_mut(|c| -> Result<CartSnapshot, ApiError> {
        if !c.update_quantity(item_id, quantity)? {
            debug!(item_id, "Cart item not found, nothing to update");
        }
        Ok(c.snapshot())
    })
}

/// Removes an item from the cart. Unknown ids are ignored.
pub fn remove_from_cart(cart: &CartState, item_id: &str) -> CartSnapshot {
    debug!(item_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_item(item_id);
        c.snapshot()
    })
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState) -> CartSnapshot {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        c.snapshot()
    })
}
