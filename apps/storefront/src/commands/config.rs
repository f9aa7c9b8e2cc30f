//! # Config Commands
//!
//! Read-only access to the storefront configuration.

use tracing::debug;

use crate::state::StorefrontConfig;

/// Gets the current storefront configuration.
///
/// ## When Used
/// - App startup (currency formatting)
/// - Checkout page (delivery fee and free-delivery threshold hints)
pub fn get_config(config: &StorefrontConfig) -> StorefrontConfig {
    debug!("get_config command");
    config.clone()
}
