//! # Storefront Library
//!
//! Application layer of the pizzeria storefront: session state, the menu
//! boundary, checkout, order tracking and the commands the single-page
//! frontend invokes.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (logging & quote CLI)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Session cart behind Arc<Mutex<_>>
//! │   └── config.rs   ◄─── Layered storefront configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── menu.rs     ◄─── Menu listing, price preview
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Quote, place order, tracking
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── menu.rs         ◄─── Menu payload validation and lookups
//! ├── checkout.rs     ◄─── Order payload, delivery fee, order status
//! ├── tracking.rs     ◄─── Order status polling task
//! └── error.rs        ◄─── Layer errors and ApiError
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront State                                     │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │      Menu        │ │    CartState     │ │  StorefrontConfig    │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • Pizza types   │ │  • Line items    │ │  • Currency          │   │
//! │  │  • Flavors       │ │  • Totals        │ │  • Delivery fee      │   │
//! │  │  • Beverages     │ │                  │ │  • Tracker polling   │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Each command only takes the state it needs.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod checkout;
pub mod commands;
pub mod error;
pub mod menu;
pub mod state;
pub mod tracking;

use std::path::PathBuf;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use checkout::CheckoutDetails;
use commands::cart::PizzaRequest;
use menu::Menu;
use state::{CartState, StorefrontConfig};

/// A beverage line of an order file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BeverageRequest {
    beverage_id: String,
    #[serde(default = "one")]
    quantity: i64,
}

fn one() -> i64 {
    1
}

/// The order file read by the quote CLI.
///
/// ```json
/// {
///   "pizzas": [{ "pizzaTypeId": "large", "flavorIds": ["calabresa"], "quantity": 2 }],
///   "beverages": [{ "beverageId": "cola", "quantity": 3 }],
///   "checkout": { "deliveryType": "PICKUP", "payment": { "method": "CASH" } }
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderFile {
    #[serde(default)]
    pizzas: Vec<PizzaRequest>,
    #[serde(default)]
    beverages: Vec<BeverageRequest>,
    checkout: CheckoutDetails,
}

/// Quotes an order from a menu file and an order file.
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  storefront <menu.json> <order.json>                                    │
/// │                                                                         │
/// │  1. Initialize logging (RUST_LOG, default DEFAULT_LOG_FILTER)          │
/// │  2. Load config (PIZZERIA_CONFIG or platform config dir)               │
/// │  3. Validate the menu payload                                          │
/// │  4. Fill a cart through the cart commands                              │
/// │  5. Build the order request                                            │
/// │  6. Print the request JSON and the formatted totals                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let (Some(menu_path), Some(order_path)) = (args.next(), args.next()) else {
        return Err("usage: storefront <menu.json> <order.json>".into());
    };

    let config_path = std::env::var("PIZZERIA_CONFIG").ok().map(PathBuf::from);
    let config = StorefrontConfig::load_or_default(config_path);

    let menu = Menu::from_json(&std::fs::read_to_string(&menu_path)?)?;
    info!(
        pizza_types = menu.pizza_types().len(),
        flavors = menu.flavors().len(),
        beverages = menu.beverages().len(),
        "Menu loaded"
    );

    let order: OrderFile = serde_json::from_str(&std::fs::read_to_string(&order_path)?)?;
    debug!(
        pizzas = order.pizzas.len(),
        beverages = order.beverages.len(),
        "Order file loaded"
    );

    let cart = CartState::new();
    for pizza in order.pizzas {
        commands::cart::add_pizza_to_cart(&menu, &cart, pizza)?;
    }
    for beverage in &order.beverages {
        commands::cart::add_beverage_to_cart(&menu, &cart, &beverage.beverage_id, beverage.quantity)?;
    }

    let totals = commands::checkout::quote_order(&cart, &config, order.checkout.delivery_type);
    let request = cart.with_cart(|c| {
        checkout::build_order_request(c, &order.checkout, &config.delivery, Utc::now())
    })?;

    println!("{}", serde_json::to_string_pretty(&request)?);
    println!("Subtotal:     {}", config.format_currency(totals.subtotal));
    println!("Delivery fee: {}", config.format_currency(totals.delivery_fee));
    println!("Total:        {}", config.format_currency(totals.total));

    Ok(())
}

/// Filter used when `RUST_LOG` is unset: debug for the storefront, info for
/// everything else. Directives match target prefixes, so this names the crate.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront_lib=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_lib=trace` - Show trace for the storefront only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so the quote stays clean on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed (tests, embedding hosts)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
