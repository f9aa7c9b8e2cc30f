//! # Storefront Quote CLI
//!
//! Prices an order the way the storefront would submit it.
//!
//! ```text
//! $ storefront menu.json order.json
//! {
//!   "items": [ ... ],
//!   "deliveryType": "DELIVERY",
//!   "totalAmount": 40.0,
//!   ...
//! }
//! Subtotal:     R$ 35,00
//! Delivery fee: R$ 5,00
//! Total:        R$ 40,00
//! ```
//!
//! The actual setup is in lib.rs for better testability.

fn main() {
    if let Err(e) = storefront_lib::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
