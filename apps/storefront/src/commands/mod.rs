//! # Storefront Commands
//!
//! Every operation the single-page frontend can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── menu.rs      ◄─── Menu listing, beverage search, live price preview
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Quote, place order, start tracking
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Frontend                                                               │
//! │  ────────                                                               │
//! │  addPizzaToCart({ pizzaTypeId: 'large', flavorIds: ['calabresa'] })     │
//! │         │                                                               │
//! │         │ (JSON)                                                        │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  fn add_pizza_to_cart(                                                  │
//! │      menu: &Menu,          ◄── catalog loaded at startup               │
//! │      cart: &CartState,     ◄── session cart                            │
//! │      request: PizzaRequest ◄── from the frontend                       │
//! │  ) -> Result<CartSnapshot, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Frontend receives: { items: [...], totals: {...} }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod menu;
