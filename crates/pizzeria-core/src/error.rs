//! # Error Types
//!
//! Domain-specific error types for pizzeria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pizzeria-core errors (this file)                                      │
//! │  ├── CoreError        - Cart and selection rule violations             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  ├── MenuError        - Catalog payload rejected at the API boundary   │
//! │  ├── CheckoutError    - Order could not be assembled or submitted      │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, limits)
//! 3. Errors are enum variants, never String
//! 4. Stale line item ids are NOT errors (see `cart`)

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent cart rule violations. They are raised before the
/// cart changes, so a failed operation leaves the cart untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A pizza was confirmed without any flavor.
    ///
    /// ## User Workflow
    /// ```text
    /// Customization screen, no flavor picked
    ///      │
    ///      ▼
    /// Preview shows 0.00, "Add to cart" tapped anyway
    ///      │
    ///      ▼
    /// IncompleteSelection { pizza_type: "Large" }
    ///      │
    ///      ▼
    /// UI shows: "Choose at least one flavor"
    /// ```
    #[error("Pizza {pizza_type} needs at least one flavor")]
    IncompleteSelection { pizza_type: String },

    /// Cart has exceeded maximum allowed line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a selection or an input value doesn't meet
/// requirements. Used for early validation before cart logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., the same flavor on both halves).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// An extra was placed on a half that is not part of the pizza.
    #[error("Extra {extra_id} cannot be placed on flavor {flavor_id}: not part of this pizza")]
    InvalidPlacement { extra_id: String, flavor_id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
