//! # Error Types
//!
//! Domain-specific error types for botica-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  botica-core errors (this file)                                        │
//! │  ├── CoreError        - Cart and discount rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  botica-catalog errors (separate crate)                                │
//! │  └── CatalogError     - Document parse/validation failures             │
//! │                                                                         │
//! │  Every CoreError is locally recoverable: the presentation layer turns  │
//! │  it into a message and the session continues. Only a catalog load      │
//! │  failure halts further interaction.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, minimum, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations. They should be caught and
/// translated to user-friendly messages; none abort the session.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Variant id not present in the catalog.
    ///
    /// ## When This Occurs
    /// - A cart line references an id that the loaded catalog doesn't carry
    /// - A stale frontend id after a catalog refresh
    #[error("Variant not found: {0}")]
    VariantNotFound(u32),

    /// Product id not present in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Discount code is not in the registry.
    #[error("Unknown discount code: {0}")]
    UnknownDiscountCode(String),

    /// Discount code is valid but the cart subtotal is below its gate.
    ///
    /// The required minimum is carried so the UI can tell the shopper how
    /// much more they need to spend.
    #[error("Code {code} requires a minimum subtotal of {minimum} (current: {subtotal})")]
    DiscountMinimumNotMet {
        code: String,
        minimum: Money,
        subtotal: Money,
    },

    /// A second code was attempted while one is active. Only one discount
    /// may be applied at a time; the first one stays.
    #[error("Discount {active} is already applied")]
    DiscountAlreadyApplied { active: String },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DiscountMinimumNotMet {
            code: "GRANCOMPRA".to_string(),
            minimum: Money::from_soles(500),
            subtotal: Money::from_soles(300),
        };
        assert_eq!(
            err.to_string(),
            "Code GRANCOMPRA requires a minimum subtotal of S/ 500.00 (current: S/ 300.00)"
        );

        let err = CoreError::UnknownDiscountCode("NOPE".to_string());
        assert_eq!(err.to_string(), "Unknown discount code: NOPE");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
