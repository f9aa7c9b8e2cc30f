//! # Storefront State
//!
//! Session-scoped state shared by the commands.
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐
//! │    Menu          │ │    CartState     │ │  StorefrontConfig    │
//! │  (menu.rs)       │ │                  │ │                      │
//! │  • Catalog       │ │  • Current cart  │ │  • Currency          │
//! │  • Lookups by id │ │  • Line items    │ │  • Delivery fee      │
//! │  • read-only     │ │  • Arc<Mutex>    │ │  • Tracking          │
//! └──────────────────┘ └──────────────────┘ └──────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartState;
pub use config::{CurrencySettings, DeliverySettings, StorefrontConfig, TrackingSettings};
