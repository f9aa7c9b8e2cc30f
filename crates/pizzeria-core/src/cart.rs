//! # Cart Store
//!
//! The session cart: line items plus the operations the storefront offers
//! on them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Customer Action          Cart Method             Line Item Change      │
//! │  ───────────────          ───────────             ────────────────      │
//! │                                                                         │
//! │  Confirm pizza ──────────► add_pizza() ─────────► items.push(new id)    │
//! │                                                   (pizzas never merge)  │
//! │                                                                         │
//! │  Tap beverage ───────────► add_beverage() ──────► same beverage?        │
//! │                                                   qty += n, reprice     │
//! │                                                   else items.push       │
//! │                                                                         │
//! │  Stepper +/- ────────────► update_quantity() ───► qty <= 0 → remove     │
//! │                                                   else total/qty × new  │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item() ───────► items.retain          │
//! │                                                                         │
//! │  NOTE: Unknown ids are silently ignored. A double tap on "remove" or   │
//! │        a stale view must never surface an error.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line item has `quantity >= 1`
//! - `total_price` is always `unit price × quantity`, exactly
//! - At most [`MAX_CART_ITEMS`] line items, at most [`MAX_ITEM_QUANTITY`]
//!   units per line

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::placement::AppliedExtra;
use crate::pricing::{beverage_unit_price, line_total, price_pizza};
use crate::selection::PizzaSelection;
use crate::types::{Beverage, ItemType, PizzaCrust, PizzaFlavor, PizzaType};
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Id Generation
// =============================================================================

/// Source of line item ids.
///
/// Injected into the cart so tests get deterministic ids while production
/// uses random UUIDs.
pub trait IdGenerator: fmt::Debug + Send {
    /// Returns an id never returned before by this generator.
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic ids: `item-1`, `item-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Creates a counter producing `<prefix>-1`, `<prefix>-2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("item")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// Resolved pizza fields frozen at the moment the pizza was confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PizzaLine {
    pub pizza_type: PizzaType,
    pub flavors: Vec<PizzaFlavor>,
    pub crust: Option<PizzaCrust>,
    pub applied_extras: Vec<AppliedExtra>,
}

impl From<&PizzaSelection> for PizzaLine {
    fn from(selection: &PizzaSelection) -> Self {
        PizzaLine {
            pizza_type: selection.pizza_type().clone(),
            flavors: selection.flavors().to_vec(),
            crust: selection.crust().cloned(),
            applied_extras: selection.extras().applied().to_vec(),
        }
    }
}

/// What a line item holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "itemType", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum CartItemKind {
    Pizza(PizzaLine),
    Beverage(Beverage),
}

/// One entry of the cart.
///
/// ## Design Notes
/// - `total_price` is the source of truth; the unit price is recovered as
///   `total_price / quantity` and is exact because money is decimal
/// - `item` is a frozen copy of the catalog data, so later menu changes do
///   not alter what the customer already put in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    /// Line id from the cart's [`IdGenerator`]
    pub id: String,

    /// Display name, `"Large (Calabresa / Tuna)"` for pizzas
    pub name: String,

    pub item: CartItemKind,

    pub quantity: i64,

    /// Quantity-scaled total, never rounded
    pub total_price: Money,

    /// Free text; empty for beverages
    pub observations: String,

    #[ts(type = "string")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Price of one unit, `total_price / quantity`.
    pub fn unit_price(&self) -> Money {
        self.total_price
            .divide_quantity(self.quantity)
            .unwrap_or_default()
    }

    /// Whether this line holds a pizza or a beverage.
    pub fn item_type(&self) -> ItemType {
        match self.item {
            CartItemKind::Pizza(_) => ItemType::Pizza,
            CartItemKind::Beverage(_) => ItemType::Beverage,
        }
    }

    /// The beverage id for beverage lines.
    pub fn beverage_id(&self) -> Option<&str> {
        match &self.item {
            CartItemKind::Beverage(b) => Some(&b.id),
            CartItemKind::Pizza(_) => None,
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Aggregates shown in the cart badge and summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of line items
    pub line_count: usize,
    /// Sum of quantities
    pub total_items: i64,
    /// Sum of line totals
    pub total_price: Money,
}

/// Serializable view of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart of one session.
#[derive(Debug)]
pub struct Cart {
    items: Vec<CartLineItem>,
    ids: Box<dyn IdGenerator>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates an empty cart with random UUID line ids.
    pub fn new() -> Self {
        Self::with_id_generator(UuidGenerator)
    }

    /// Creates an empty cart drawing line ids from `ids`.
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Cart {
            items: Vec::new(),
            ids: Box::new(ids),
        }
    }

    /// Adds a confirmed pizza as a new line item.
    ///
    /// Pizzas never merge: two identical selections make two lines.
    ///
    /// ## Errors
    /// - `IncompleteSelection` / `Validation` from [`PizzaSelection::validate`]
    /// - `CartTooLarge` when the cart already has [`MAX_CART_ITEMS`] lines
    pub fn add_pizza(&mut self, selection: &PizzaSelection) -> CoreResult<String> {
        selection.validate()?;
        self.ensure_room()?;

        let price = price_pizza(selection);
        let id = self.ids.next_id();
        self.items.push(CartLineItem {
            id: id.clone(),
            name: selection.display_name(),
            item: CartItemKind::Pizza(PizzaLine::from(selection)),
            quantity: price.quantity,
            total_price: price.total_price,
            observations: selection.observations().to_string(),
            added_at: Utc::now(),
        });

        Ok(id)
    }

    /// Adds `quantity` units of a beverage.
    ///
    /// If the beverage is already in the cart its line grows instead, and the
    /// total is recomputed as `price × new quantity` from the beverage stored
    /// on that line. Returns the id of the line that holds the beverage.
    pub fn add_beverage(&mut self, beverage: &Beverage, quantity: i64) -> CoreResult<String> {
        validate_quantity(quantity)?;

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|i| i.beverage_id() == Some(beverage.id.as_str()))
        {
            let new_quantity = line.quantity + quantity;
            if new_quantity > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_quantity,
                    max: MAX_ITEM_QUANTITY,
                });
            }

            if let CartItemKind::Beverage(stored) = &line.item {
                line.total_price = line_total(beverage_unit_price(stored), new_quantity);
            }
            line.quantity = new_quantity;
            return Ok(line.id.clone());
        }

        self.ensure_room()?;

        let id = self.ids.next_id();
        self.items.push(CartLineItem {
            id: id.clone(),
            name: beverage.name.clone(),
            item: CartItemKind::Beverage(beverage.clone()),
            quantity,
            total_price: line_total(beverage_unit_price(beverage), quantity),
            observations: String::new(),
            added_at: Utc::now(),
        });

        Ok(id)
    }

    /// Sets the quantity of a line.
    ///
    /// - `quantity <= 0` removes the line
    /// - otherwise `total_price = (total_price / quantity) × new quantity`
    /// - an unknown id changes nothing
    ///
    /// Returns `true` when a line was changed or removed.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> CoreResult<bool> {
        if quantity <= 0 {
            return Ok(self.remove_item(id));
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let Some(line) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };

        line.total_price = line_total(line.unit_price(), quantity);
        line.quantity = quantity;
        Ok(true)
    }

    /// Drops a line. Returns `false` for an unknown id.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Takes placed units out of the cart.
    ///
    /// `ordered` holds `(line id, quantity)` as submitted. A line that grew
    /// since then keeps the extra units; lines added later are untouched.
    pub fn remove_ordered(&mut self, ordered: &[(String, i64)]) {
        for (id, quantity) in ordered {
            let Some(line) = self.items.iter_mut().find(|i| &i.id == id) else {
                continue;
            };

            let left = line.quantity - quantity;
            if left > 0 {
                line.total_price = line_total(line.unit_price(), left);
                line.quantity = left;
            } else {
                self.items.retain(|i| &i.id != id);
            }
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities over all lines.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals. Not rounded.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(|i| i.total_price).sum()
    }

    /// Number of line items.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            line_count: self.line_count(),
            total_items: self.total_items(),
            total_price: self.total_price(),
        }
    }

    /// Copies the cart into its serializable view.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            totals: self.totals(),
        }
    }

    fn ensure_room(&self) -> CoreResult<()> {
        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Placement;
    use crate::types::PizzaExtra;

    fn cart() -> Cart {
        Cart::with_id_generator(SequentialIds::default())
    }

    fn pizza_type(base_cents: i64) -> PizzaType {
        PizzaType {
            id: "large".to_string(),
            name: "Large".to_string(),
            description: None,
            base_price: Money::from_cents(base_cents),
            available_extras: Vec::new(),
            available_crusts: Vec::new(),
        }
    }

    fn flavor(id: &str, cents: i64) -> PizzaFlavor {
        PizzaFlavor {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            price: Money::from_cents(cents),
        }
    }

    fn beverage(id: &str, cents: i64) -> Beverage {
        Beverage {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            price: Money::from_cents(cents),
            category: None,
            alcoholic: false,
        }
    }

    fn selection(base_cents: i64, flavor_cents: i64, quantity: i64) -> PizzaSelection {
        let mut selection = PizzaSelection::new(pizza_type(base_cents));
        selection.choose_flavor(flavor("calabresa", flavor_cents));
        selection.set_quantity(quantity).unwrap();
        selection
    }

    #[test]
    fn test_beverage_merges_by_id() {
        let mut cart = cart();
        let soda = beverage("soda", 650);

        let first = cart.add_beverage(&soda, 1).unwrap();
        let second = cart.add_beverage(&soda, 2).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.line_count(), 1);
        let line = cart.get(&first).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.total_price, Money::from_cents(1950));
        assert_eq!(line.observations, "");
    }

    #[test]
    fn test_beverage_merge_uses_stored_price() {
        let mut cart = cart();
        cart.add_beverage(&beverage("soda", 650), 1).unwrap();

        // menu reloaded with a new price while the cart was open
        let id = cart.add_beverage(&beverage("soda", 900), 1).unwrap();

        assert_eq!(cart.get(&id).unwrap().total_price, Money::from_cents(1300));
    }

    #[test]
    fn test_update_quantity_recomputes_from_unit_price() {
        // unit 10.00, qty 3 → 30.00; update to 5 → 50.00
        let mut cart = cart();
        let id = cart.add_pizza(&selection(800, 200, 3)).unwrap();
        assert_eq!(cart.get(&id).unwrap().total_price, Money::from_cents(3000));

        assert!(cart.update_quantity(&id, 5).unwrap());

        let line = cart.get(&id).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.total_price, Money::from_cents(5000));
    }

    #[test]
    fn test_update_quantity_does_not_drift() {
        let mut cart = cart();
        let mut half = PizzaSelection::new(pizza_type(2000));
        half.choose_halves(flavor("a", 355), flavor("b", 400)).unwrap();
        let id = cart.add_pizza(&half).unwrap();
        let unit = cart.get(&id).unwrap().unit_price();

        for q in [7, 3, 11, 1, 999, 2] {
            cart.update_quantity(&id, q).unwrap();
        }

        let line = cart.get(&id).unwrap();
        assert_eq!(line.unit_price(), unit);
        assert_eq!(line.total_price, unit.multiply_quantity(2));
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = cart();
        let id = cart.add_beverage(&beverage("soda", 650), 2).unwrap();

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());

        let id = cart.add_beverage(&beverage("soda", 650), 2).unwrap();
        assert!(cart.update_quantity(&id, -4).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stale_ids_are_noops() {
        let mut cart = cart();
        let id = cart.add_beverage(&beverage("soda", 650), 1).unwrap();
        let before = cart.snapshot();

        assert!(!cart.update_quantity("ghost", 4).unwrap());
        assert!(!cart.remove_item("ghost"));
        assert_eq!(cart.snapshot(), before);

        assert!(cart.remove_item(&id));
        assert!(!cart.remove_item(&id));
        assert!(!cart.update_quantity(&id, 2).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_pizzas_never_merge() {
        let mut cart = cart();
        let selection = selection(2500, 500, 1);

        let a = cart.add_pizza(&selection).unwrap();
        let b = cart.add_pizza(&selection).unwrap();

        assert_ne!(a, b);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_incomplete_pizza_is_refused() {
        let mut cart = cart();
        let selection = PizzaSelection::new(pizza_type(2500));

        let err = cart.add_pizza(&selection).unwrap_err();

        assert!(matches!(err, CoreError::IncompleteSelection { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_pizza_line_keeps_placements_and_name() {
        let mut cart = cart();
        let mut selection = PizzaSelection::new(pizza_type(1800));
        selection
            .choose_halves(flavor("Calabresa", 200), flavor("Atum", 400))
            .unwrap();
        let bacon = PizzaExtra {
            id: "bacon".to_string(),
            name: "Bacon".to_string(),
            description: None,
            price: Money::from_cents(300),
        };
        selection
            .toggle_extra(bacon, Placement::on_flavor("Atum"))
            .unwrap();
        selection.set_observations("bem assada").unwrap();

        let id = cart.add_pizza(&selection).unwrap();
        let line = cart.get(&id).unwrap();

        assert_eq!(line.name, "Large (Calabresa / Atum)");
        assert_eq!(line.total_price, Money::from_cents(2400));
        assert_eq!(line.observations, "bem assada");
        assert_eq!(line.item_type(), ItemType::Pizza);
        match &line.item {
            CartItemKind::Pizza(pizza) => {
                assert_eq!(pizza.applied_extras[0].placement, Placement::on_flavor("Atum"));
            }
            CartItemKind::Beverage(_) => panic!("expected a pizza line"),
        }
    }

    #[test]
    fn test_totals() {
        let mut cart = cart();
        cart.add_pizza(&selection(2500, 500, 2)).unwrap();
        cart.add_beverage(&beverage("soda", 650), 3).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_items, 5);
        assert_eq!(totals.total_price, Money::from_cents(6000 + 1950));

        cart.clear();
        assert_eq!(cart.totals(), CartTotals::default());
    }

    #[test]
    fn test_remove_ordered_keeps_later_additions() {
        let mut cart = cart();
        let pizza_id = cart.add_pizza(&selection(2500, 500, 1)).unwrap();
        let soda_id = cart.add_beverage(&beverage("soda", 650), 2).unwrap();
        let ordered = vec![(pizza_id, 1), (soda_id.clone(), 2)];

        // added while the order was being submitted
        cart.add_beverage(&beverage("soda", 650), 1).unwrap();
        let juice_id = cart.add_beverage(&beverage("juice", 800), 1).unwrap();

        cart.remove_ordered(&ordered);

        assert_eq!(cart.line_count(), 2);
        let soda = cart.get(&soda_id).unwrap();
        assert_eq!(soda.quantity, 1);
        assert_eq!(soda.total_price, Money::from_cents(650));
        assert_eq!(cart.get(&juice_id).unwrap().quantity, 1);

        // a stale id changes nothing
        cart.remove_ordered(&[("item-99".to_string(), 1)]);
        assert_eq!(cart.total_price(), Money::from_cents(1450));
    }

    #[test]
    fn test_sequential_ids() {
        let mut cart = cart();
        assert_eq!(cart.add_beverage(&beverage("a", 100), 1).unwrap(), "item-1");
        assert_eq!(cart.add_beverage(&beverage("b", 100), 1).unwrap(), "item-2");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn test_quantity_limits() {
        let mut cart = cart();
        let id = cart.add_beverage(&beverage("soda", 650), 998).unwrap();

        let err = cart.add_beverage(&beverage("soda", 650), 2).unwrap_err();
        assert!(matches!(
            err,
            CoreError::QuantityTooLarge { requested: 1000, .. }
        ));
        assert_eq!(cart.get(&id).unwrap().quantity, 998);

        assert!(cart.update_quantity(&id, MAX_ITEM_QUANTITY + 1).is_err());
        assert!(cart.add_beverage(&beverage("water", 300), 0).is_err());
    }

    #[test]
    fn test_cart_too_large() {
        let mut cart = cart();
        for i in 0..MAX_CART_ITEMS {
            cart.add_beverage(&beverage(&format!("b{i}"), 100), 1).unwrap();
        }

        let err = cart.add_beverage(&beverage("extra", 100), 1).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));

        // merging into an existing line still works at the limit
        assert!(cart.add_beverage(&beverage("b0", 100), 1).is_ok());
    }

    #[test]
    fn test_line_item_wire_shape() {
        let mut cart = cart();
        let id = cart.add_beverage(&beverage("soda", 650), 3).unwrap();

        let json = serde_json::to_value(cart.get(&id).unwrap()).unwrap();

        assert_eq!(json["item"]["itemType"], "BEVERAGE");
        assert_eq!(json["totalPrice"], 19.5);
        assert_eq!(json["quantity"], 3);
    }
}
