//! # Storefront Error Types
//!
//! Layer errors of the storefront and the unified `ApiError` every command
//! returns to the UI.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  addPizzaToCart({...})                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown id? ───────── ApiError::not_found ────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule violated? ─── CoreError::Validation ──── ApiError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "VALIDATION_ERROR"                                       │
//! │    // e.message = "Validation error: flavors is required"               │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pizzeria_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Menu Errors
// =============================================================================

/// The menu payload was rejected at the API boundary.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The payload is not JSON of the expected shape.
    #[error("Malformed menu payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// One entry breaks a field rule (empty id, negative price, ...).
    #[error("Invalid {kind} '{id}': {source}")]
    InvalidEntry {
        kind: &'static str,
        id: String,
        #[source]
        source: ValidationError,
    },

    /// Two entries of the same kind share an id.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

pub type MenuResult<T> = Result<T, MenuError>;

// =============================================================================
// Checkout Errors
// =============================================================================

/// The order could not be assembled or submitted.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Delivery orders need a delivery address")]
    MissingAddress,

    #[error("Delivery address field {field} is required")]
    IncompleteAddress { field: &'static str },

    #[error("Card payments need a card brand and type")]
    MissingCardDetails,

    /// The order API refused or failed the submission.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Tracking Errors
// =============================================================================

/// A single order status poll failed.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order API unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Storefront configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid storefront configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// API Error
// =============================================================================

/// API error returned from storefront commands.
///
/// ## Serialization
/// This is what the frontend receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Flavor not found: calabresa"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown catalog id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart limit reached
    CartError,

    /// Menu payload rejected
    MenuError,

    /// Order could not be placed
    CheckoutError,

    /// Order status unavailable
    TrackingError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CartTooLarge { .. } => ApiError::cart(err.to_string()),
            CoreError::IncompleteSelection { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::Validation(_) => ApiError::validation(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::from(CoreError::from(err))
    }
}

impl From<MenuError> for ApiError {
    fn from(err: MenuError) -> Self {
        ApiError::new(ErrorCode::MenuError, err.to_string())
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::SubmissionFailed(ref e) => {
                // Log the actual error but return a generic message
                tracing::error!("Order submission failed: {}", e);
                ApiError::new(
                    ErrorCode::CheckoutError,
                    "Your order could not be placed, please try again",
                )
            }
            other => ApiError::new(ErrorCode::CheckoutError, other.to_string()),
        }
    }
}

impl From<TrackingError> for ApiError {
    fn from(err: TrackingError) -> Self {
        match err {
            TrackingError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            other => ApiError::new(ErrorCode::TrackingError, other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
