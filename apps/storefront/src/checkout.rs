//! # Checkout
//!
//! Assembles the order submission payload from the cart and places it.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  Cart ──► CheckoutDetails (delivery/pickup, address, payment)          │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  build_order_request()                                                  │
//! │     ├── empty cart? ─────────────────► CheckoutError::EmptyCart        │
//! │     ├── delivery without address? ───► CheckoutError::MissingAddress   │
//! │     ├── card without brand/type? ────► CheckoutError::MissingCardDetails│
//! │     ├── items  = cart lines → OrderItem (PIZZA | BEVERAGE)             │
//! │     ├── fee    = delivery && subtotal < threshold ? fee : 0            │
//! │     ├── total  = subtotal + fee                                        │
//! │     └── eta    = now + 45 min (delivery) | 30 min (pickup)             │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  OrderSubmitter::submit() ──► OrderReceipt { id, status }              │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  cart.remove_ordered()   (submitted lines only, once accepted)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use pizzeria_core::{Cart, CartItemKind, CartLineItem, Money, Placement};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CheckoutError, CheckoutResult};
use crate::state::{CartState, DeliverySettings};

// =============================================================================
// Delivery & Payment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryType {
    Delivery,
    Pickup,
}

/// Where a delivery order goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub street: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub zip_code: String,
}

impl DeliveryAddress {
    fn check_complete(&self) -> CheckoutResult<()> {
        let required = [
            ("street", &self.street),
            ("number", &self.number),
            ("neighborhood", &self.neighborhood),
            ("city", &self.city),
            ("zipCode", &self.zip_code),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(CheckoutError::IncompleteAddress { field: *field }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Elo,
    Amex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Credit,
    Debit,
}

/// How the customer pays on delivery or pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<CardBrand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
}

impl Payment {
    pub fn cash() -> Self {
        Payment {
            method: PaymentMethod::Cash,
            card_brand: None,
            card_type: None,
        }
    }

    pub fn card(brand: CardBrand, card_type: CardType) -> Self {
        Payment {
            method: PaymentMethod::Card,
            card_brand: Some(brand),
            card_type: Some(card_type),
        }
    }
}

/// What the customer fills in on the checkout page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddress>,
    pub payment: Payment,
    #[serde(default)]
    pub observations: Option<String>,
}

// =============================================================================
// Order Status
// =============================================================================

/// Order lifecycle as reported by the order API.
///
/// ```text
/// RECEIVED ──► PREPARING ──► OUT_FOR_DELIVERY ──► COMPLETED
///     │            │                │
///     └────────────┴────────────────┴──────────► CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Received,
    Preparing,
    OutForDelivery,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Progress steps shown by the tracker, in order.
    pub const STEPS: [OrderStatus; 4] = [
        OrderStatus::Received,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Completed,
    ];

    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Order received",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Completed and cancelled orders never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Tracker progress in percent. `None` for cancelled orders.
    pub fn progress(&self) -> Option<u8> {
        match self {
            OrderStatus::Completed => Some(100),
            OrderStatus::Cancelled => None,
            other => {
                let step = Self::STEPS.iter().position(|s| s == other)?;
                Some(((step + 1) * 100 / Self::STEPS.len()) as u8)
            }
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Order Payload
// =============================================================================

/// Where one extra goes, as the order API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraSelection {
    pub extra_id: String,
    /// `null` for the whole pizza
    pub flavor_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaOrderItem {
    pub pizza_type_id: String,
    pub flavor_ids: Vec<String>,
    pub extra_selections: Vec<ExtraSelection>,
    pub crust_id: Option<String>,
    pub observations: String,
    pub quantity: i64,
    pub total_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeverageOrderItem {
    pub beverage_id: String,
    pub observations: String,
    pub quantity: i64,
    pub total_price: Money,
}

/// One entry of the order, discriminated by `itemType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "itemType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderItem {
    Pizza(PizzaOrderItem),
    Beverage(BeverageOrderItem),
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        match &line.item {
            CartItemKind::Pizza(pizza) => OrderItem::Pizza(PizzaOrderItem {
                pizza_type_id: pizza.pizza_type.id.clone(),
                flavor_ids: pizza.flavors.iter().map(|f| f.id.clone()).collect(),
                extra_selections: pizza
                    .applied_extras
                    .iter()
                    .map(|a| ExtraSelection {
                        extra_id: a.extra.id.clone(),
                        flavor_id: match &a.placement {
                            Placement::Whole => None,
                            Placement::Flavor(id) => Some(id.clone()),
                        },
                    })
                    .collect(),
                crust_id: pizza.crust.as_ref().map(|c| c.id.clone()),
                observations: line.observations.clone(),
                quantity: line.quantity,
                total_price: line.total_price,
            }),
            CartItemKind::Beverage(beverage) => OrderItem::Beverage(BeverageOrderItem {
                beverage_id: beverage.id.clone(),
                observations: line.observations.clone(),
                quantity: line.quantity,
                total_price: line.total_price,
            }),
        }
    }
}

/// The order submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    pub delivery_type: DeliveryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<DeliveryAddress>,
    pub payment: Payment,
    pub status: OrderStatus,
    pub total_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub estimated_delivery_time: DateTime<Utc>,
}

/// Subtotal, fee and total shown before the customer confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

/// What the order API answers to a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub estimated_delivery_time: Option<DateTime<Utc>>,
}

// =============================================================================
// Pricing Rules
// =============================================================================

/// Delivery fee: charged on delivery orders below the free-delivery threshold.
pub fn delivery_fee(settings: &DeliverySettings, delivery_type: DeliveryType, subtotal: Money) -> Money {
    match delivery_type {
        DeliveryType::Delivery if subtotal < settings.free_delivery_threshold => settings.fee,
        _ => Money::zero(),
    }
}

pub fn order_totals(settings: &DeliverySettings, delivery_type: DeliveryType, subtotal: Money) -> OrderTotals {
    let fee = delivery_fee(settings, delivery_type, subtotal);
    OrderTotals {
        subtotal,
        delivery_fee: fee,
        total: subtotal + fee,
    }
}

/// When the order should arrive (delivery) or be ready (pickup).
pub fn estimated_delivery_time(
    settings: &DeliverySettings,
    delivery_type: DeliveryType,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let minutes = match delivery_type {
        DeliveryType::Delivery => settings.delivery_minutes,
        DeliveryType::Pickup => settings.pickup_minutes,
    };
    now + Duration::minutes(i64::from(minutes))
}

// =============================================================================
// Building & Placing
// =============================================================================

/// Builds the order payload from the cart.
///
/// The delivery address is dropped for pickup orders.
pub fn build_order_request(
    cart: &Cart,
    details: &CheckoutDetails,
    settings: &DeliverySettings,
    now: DateTime<Utc>,
) -> CheckoutResult<CreateOrderRequest> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let delivery_address = match details.delivery_type {
        DeliveryType::Delivery => {
            let address = details
                .delivery_address
                .clone()
                .ok_or(CheckoutError::MissingAddress)?;
            address.check_complete()?;
            Some(address)
        }
        DeliveryType::Pickup => None,
    };

    let payment = details.payment;
    if payment.method == PaymentMethod::Card
        && (payment.card_brand.is_none() || payment.card_type.is_none())
    {
        return Err(CheckoutError::MissingCardDetails);
    }

    let totals = order_totals(settings, details.delivery_type, cart.total_price());

    Ok(CreateOrderRequest {
        items: cart.items().iter().map(OrderItem::from).collect(),
        delivery_type: details.delivery_type,
        delivery_address,
        payment,
        status: OrderStatus::Received,
        total_amount: totals.total,
        observations: details
            .observations
            .clone()
            .filter(|o| !o.trim().is_empty()),
        estimated_delivery_time: estimated_delivery_time(settings, details.delivery_type, now),
    })
}

/// Sends orders to the order API.
pub trait OrderSubmitter: Send + Sync {
    fn submit(
        &self,
        order: &CreateOrderRequest,
    ) -> impl Future<Output = CheckoutResult<OrderReceipt>> + Send;
}

/// Submits the cart as an order and takes the ordered lines out of the cart
/// once it is accepted.
///
/// The lock is not held while the order API answers, so lines added in the
/// meantime stay in the cart. On failure the cart is left as it was so the
/// customer can retry.
pub async fn place_order<S: OrderSubmitter>(
    cart: &CartState,
    details: &CheckoutDetails,
    settings: &DeliverySettings,
    submitter: &S,
) -> CheckoutResult<OrderReceipt> {
    let (request, ordered) = cart.with_cart(|c| {
        let request = build_order_request(c, details, settings, Utc::now())?;
        let ordered: Vec<(String, i64)> = c
            .items()
            .iter()
            .map(|line| (line.id.clone(), line.quantity))
            .collect();
        Ok::<_, CheckoutError>((request, ordered))
    })?;
    debug!(
        items = request.items.len(),
        total = %request.total_amount,
        "Submitting order"
    );

    let receipt = submitter.submit(&request).await?;

    cart.with_cart_mut(|c| c.remove_ordered(&ordered));
    info!(order_id = %receipt.id, status = ?receipt.status, "Order placed");

    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::cart::SequentialIds;
    use pizzeria_core::{Beverage, PizzaExtra, PizzaFlavor, PizzaSelection, PizzaType};
    use std::sync::Mutex;

    fn soda(cents: i64) -> Beverage {
        Beverage {
            id: "soda".to_string(),
            name: "Soda".to_string(),
            description: None,
            price: Money::from_cents(cents),
            category: None,
            alcoholic: false,
        }
    }

    fn cart_with_soda(cents: i64) -> Cart {
        let mut cart = Cart::with_id_generator(SequentialIds::default());
        cart.add_beverage(&soda(cents), 1).unwrap();
        cart
    }

    fn address() -> DeliveryAddress {
        DeliveryAddress {
            street: "Rua das Flores".to_string(),
            number: "42".to_string(),
            complement: None,
            neighborhood: "Centro".to_string(),
            city: "São Paulo".to_string(),
            zip_code: "01234-567".to_string(),
        }
    }

    fn delivery() -> CheckoutDetails {
        CheckoutDetails {
            delivery_type: DeliveryType::Delivery,
            delivery_address: Some(address()),
            payment: Payment::cash(),
            observations: None,
        }
    }

    fn pickup() -> CheckoutDetails {
        CheckoutDetails {
            delivery_type: DeliveryType::Pickup,
            delivery_address: Some(address()),
            payment: Payment::card(CardBrand::Visa, CardType::Credit),
            observations: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_delivery_fee_threshold() {
        let settings = DeliverySettings::default();

        assert_eq!(
            delivery_fee(&settings, DeliveryType::Delivery, Money::from_cents(3999)),
            Money::from_cents(500)
        );
        assert_eq!(
            delivery_fee(&settings, DeliveryType::Delivery, Money::from_cents(4000)),
            Money::zero()
        );
        assert_eq!(
            delivery_fee(&settings, DeliveryType::Pickup, Money::from_cents(1000)),
            Money::zero()
        );
    }

    #[test]
    fn test_order_request_below_threshold() {
        let settings = DeliverySettings::default();
        let now = Utc::now();
        let cart = cart_with_soda(650);

        let order = build_order_request(&cart, &delivery(), &settings, now).unwrap();

        assert_eq!(order.total_amount, Money::from_cents(1150));
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.estimated_delivery_time, now + Duration::minutes(45));
        assert!(order.delivery_address.is_some());
    }

    #[test]
    fn test_pickup_drops_address_and_fee() {
        let settings = DeliverySettings::default();
        let now = Utc::now();
        let cart = cart_with_soda(650);

        let order = build_order_request(&cart, &pickup(), &settings, now).unwrap();

        assert_eq!(order.total_amount, Money::from_cents(650));
        assert!(order.delivery_address.is_none());
        assert!(order.observations.is_none());
        assert_eq!(order.estimated_delivery_time, now + Duration::minutes(30));
    }

    #[test]
    fn test_checkout_rejections() {
        let settings = DeliverySettings::default();
        let now = Utc::now();

        let empty = Cart::new();
        assert!(matches!(
            build_order_request(&empty, &delivery(), &settings, now),
            Err(CheckoutError::EmptyCart)
        ));

        let cart = cart_with_soda(650);
        let mut no_address = delivery();
        no_address.delivery_address = None;
        assert!(matches!(
            build_order_request(&cart, &no_address, &settings, now),
            Err(CheckoutError::MissingAddress)
        ));

        let mut partial = delivery();
        if let Some(a) = partial.delivery_address.as_mut() {
            a.zip_code = String::new();
        }
        assert!(matches!(
            build_order_request(&cart, &partial, &settings, now),
            Err(CheckoutError::IncompleteAddress { field: "zipCode" })
        ));

        let mut card = delivery();
        card.payment = Payment {
            method: PaymentMethod::Card,
            card_brand: Some(CardBrand::Elo),
            card_type: None,
        };
        assert!(matches!(
            build_order_request(&cart, &card, &settings, now),
            Err(CheckoutError::MissingCardDetails)
        ));
    }

    #[test]
    fn test_order_payload_shape() {
        let mut cart = Cart::with_id_generator(SequentialIds::default());
        let mut pizza = PizzaSelection::new(PizzaType {
            id: "large".to_string(),
            name: "Large".to_string(),
            description: None,
            base_price: Money::from_cents(1800),
            available_extras: Vec::new(),
            available_crusts: Vec::new(),
        });
        let flavor = |id: &str, cents| PizzaFlavor {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            price: Money::from_cents(cents),
        };
        pizza.choose_halves(flavor("a", 200), flavor("b", 400)).unwrap();
        let extra = |id: &str| PizzaExtra {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            price: Money::from_cents(300),
        };
        pizza.toggle_extra(extra("bacon"), Placement::Whole).unwrap();
        pizza.toggle_extra(extra("olives"), Placement::on_flavor("b")).unwrap();
        cart.add_pizza(&pizza).unwrap();
        cart.add_beverage(&soda(650), 3).unwrap();

        let order = build_order_request(&cart, &pickup(), &DeliverySettings::default(), Utc::now())
            .unwrap();
        let json = serde_json::to_value(&order).unwrap();

        let pizza = &json["items"][0];
        assert_eq!(pizza["itemType"], "PIZZA");
        assert_eq!(pizza["pizzaTypeId"], "large");
        assert_eq!(pizza["flavorIds"], serde_json::json!(["a", "b"]));
        assert_eq!(
            pizza["extraSelections"],
            serde_json::json!([
                { "extraId": "bacon", "flavorId": null },
                { "extraId": "olives", "flavorId": "b" }
            ])
        );
        assert!(pizza["crustId"].is_null());
        assert_eq!(pizza["totalPrice"], 27.0);

        let beverage = &json["items"][1];
        assert_eq!(beverage["itemType"], "BEVERAGE");
        assert_eq!(beverage["beverageId"], "soda");
        assert_eq!(beverage["totalPrice"], 19.5);

        assert_eq!(json["deliveryType"], "PICKUP");
        assert_eq!(json["status"], "RECEIVED");
        assert_eq!(json["payment"]["method"], "CARD");
        assert_eq!(json["payment"]["cardBrand"], "visa");
        assert_eq!(json["totalAmount"], 46.5);
        assert!(json.get("deliveryAddress").is_none());
    }

    #[test]
    fn test_order_status_progress() {
        assert_eq!(OrderStatus::Received.progress(), Some(25));
        assert_eq!(OrderStatus::Preparing.progress(), Some(50));
        assert_eq!(OrderStatus::OutForDelivery.progress(), Some(75));
        assert_eq!(OrderStatus::Completed.progress(), Some(100));
        assert_eq!(OrderStatus::Cancelled.progress(), None);

        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"OUT_FOR_DELIVERY\""
        );
    }

    struct RecordingSubmitter {
        fail: bool,
        seen: Mutex<Vec<CreateOrderRequest>>,
    }

    impl OrderSubmitter for RecordingSubmitter {
        async fn submit(&self, order: &CreateOrderRequest) -> CheckoutResult<OrderReceipt> {
            self.seen.lock().unwrap().push(order.clone());
            if self.fail {
                return Err(CheckoutError::SubmissionFailed("503".to_string()));
            }
            Ok(OrderReceipt {
                id: "order-1".to_string(),
                status: OrderStatus::Received,
                estimated_delivery_time: Some(order.estimated_delivery_time),
            })
        }
    }

    #[tokio::test]
    async fn test_place_order_clears_cart_on_success() {
        let cart = CartState::with_id_generator(SequentialIds::default());
        cart.with_cart_mut(|c| c.add_beverage(&soda(650), 2)).unwrap();
        let submitter = RecordingSubmitter {
            fail: false,
            seen: Mutex::new(Vec::new()),
        };

        let receipt = place_order(&cart, &delivery(), &DeliverySettings::default(), &submitter)
            .await
            .unwrap();

        assert_eq!(receipt.id, "order-1");
        assert!(cart.with_cart(|c| c.is_empty()));
        assert_eq!(submitter.seen.lock().unwrap().len(), 1);
    }

    /// Adds a beverage to the shared cart while the order is in flight.
    struct BusySubmitter<'a> {
        cart: &'a CartState,
    }

    impl OrderSubmitter for BusySubmitter<'_> {
        async fn submit(&self, order: &CreateOrderRequest) -> CheckoutResult<OrderReceipt> {
            let mut juice = soda(800);
            juice.id = "juice".to_string();
            self.cart
                .with_cart_mut(|c| {
                    c.add_beverage(&juice, 1)?;
                    c.add_beverage(&soda(650), 1)
                })
                .unwrap();

            Ok(OrderReceipt {
                id: "order-2".to_string(),
                status: OrderStatus::Received,
                estimated_delivery_time: Some(order.estimated_delivery_time),
            })
        }
    }

    #[tokio::test]
    async fn test_place_order_keeps_lines_added_in_flight() {
        let cart = CartState::with_id_generator(SequentialIds::default());
        cart.with_cart_mut(|c| c.add_beverage(&soda(650), 2)).unwrap();
        let submitter = BusySubmitter { cart: &cart };

        place_order(&cart, &delivery(), &DeliverySettings::default(), &submitter)
            .await
            .unwrap();

        let left = cart.with_cart(|c| c.snapshot());
        assert_eq!(left.totals.line_count, 2);
        assert_eq!(left.totals.total_items, 2);
        assert_eq!(left.totals.total_price, Money::from_cents(1450));
    }

    #[tokio::test]
    async fn test_place_order_keeps_cart_on_failure() {
        let cart = CartState::with_id_generator(SequentialIds::default());
        cart.with_cart_mut(|c| c.add_beverage(&soda(650), 2)).unwrap();
        let submitter = RecordingSubmitter {
            fail: true,
            seen: Mutex::new(Vec::new()),
        };

        let result = place_order(&cart, &delivery(), &DeliverySettings::default(), &submitter).await;

        assert!(matches!(result, Err(CheckoutError::SubmissionFailed(_))));
        assert_eq!(cart.with_cart(|c| c.total_items()), 2);
    }
}
