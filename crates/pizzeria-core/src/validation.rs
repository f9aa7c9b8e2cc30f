//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Customization screen                                         │
//! │  ├── Add-to-cart disabled until a flavor is picked                     │
//! │  └── Quantity stepper never goes below 1                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Menu boundary (storefront app)                               │
//! │  └── Catalog JSON shape, ids, non-negative prices                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE + selection rules                                │
//! │  ├── Quantity range, flavor count, observations length                 │
//! │  └── Runs before any cart mutation                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Order API (external)                                         │
//! │  └── Authoritative pricing and availability                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::validation::{validate_quantity, validate_flavor_count};
//!
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_flavor_count(3).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CART_ITEMS, MAX_FLAVORS, MAX_ITEM_QUANTITY, MAX_OBSERVATIONS_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use pizzeria_core::validation::validate_name;
///
/// assert!(validate_name("Calabresa").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates the free-text observations of a pizza ("no onions, please").
///
/// ## Rules
/// - Can be empty
/// - Maximum 500 characters
pub fn validate_observations(text: &str) -> ValidationResult<()> {
    if text.chars().count() > MAX_OBSERVATIONS_LEN {
        return Err(ValidationError::TooLong {
            field: "observations".to_string(),
            max: MAX_OBSERVATIONS_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Customization: Quantity stepper                                        │
/// │                                                                         │
/// │  User picks quantity: 2                                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(2) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Pricing preview, then add to cart                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Note that the cart's `update_quantity` deliberately accepts `<= 0` as
/// "remove"; this validator is for quantities that create items.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates the number of flavors on one pizza.
///
/// ## Rules
/// - 0 flavors: incomplete, refused
/// - 1 flavor: whole pizza
/// - 2 flavors: half-and-half
/// - More than 2: refused
pub fn validate_flavor_count(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "flavors".to_string(),
        });
    }

    if count > MAX_FLAVORS {
        return Err(ValidationError::OutOfRange {
            field: "flavors".to_string(),
            min: 1,
            max: MAX_FLAVORS as i64,
        });
    }

    Ok(())
}

/// Validates a catalog price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (the house flavor often costs nothing extra)
///
/// ## Example
/// ```rust
/// use pizzeria_core::money::Money;
/// use pizzeria_core::validation::validate_price;
///
/// assert!(validate_price("price", Money::from_cents(650)).is_ok());
/// assert!(validate_price("price", Money::zero()).is_ok());
/// assert!(validate_price("price", Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size before adding a new line item.
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
