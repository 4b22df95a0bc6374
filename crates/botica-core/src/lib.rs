//! # botica-core: Pure Business Logic for the Botica Storefront
//!
//! This crate is the **heart** of the storefront. It contains the pricing,
//! filtering and cart logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Botica Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (browser, JavaScript)                  │   │
//! │  │  Category sections ─► Detail overlay ─► Cart sidebar ─► Checkout│   │
//! │  │  (DOM, carousel, zoom widget - presentation glue, not here)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ TypeScript bindings (ts-rs)            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ botica-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌──────────┐ ┌─────────┐  │   │
//! │  │  │ pricing │ │ filter  │ │  cart  │ │ discount │ │ session │  │   │
//! │  │  │  tiers  │ │ picker  │ │ totals │ │ registry │ │ context │  │   │
//! │  │  └─────────┘ └─────────┘ └────────┘ └──────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              botica-catalog (document boundary)                 │   │
//! │  │          parse, clean and validate products.json                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Immutable-after-load catalog types
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Tier resolution keyed on total cart quantity
//! - [`filter`] - Variant filter consistency engine and overlay controller
//! - [`cart`] - Cart aggregation with cross-line tier pooling
//! - [`discount`] - Discount code registry and evaluation
//! - [`session`] - The explicit session context (no ambient globals)
//! - [`summary`] - Plain-text order itemization for checkout hand-off
//! - [`error`] - Domain error types
//! - [`validation`] - Early input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: resolving a tier or matching a variant with the
//!    same inputs always yields the same output - no hidden mutable state
//! 2. **No I/O**: network, file system and DOM access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are céntimos (i64), parsed
//!    exactly once at the catalog boundary
//! 4. **Explicit Errors**: all errors are typed, never strings or panics,
//!    and every one of them is locally recoverable

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod error;
pub mod filter;
pub mod money;
pub mod pricing;
pub mod session;
pub mod summary;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use botica_core::Money` instead of
// `use botica_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals, DiscountLine, PricedLine};
pub use catalog::{Catalog, Category, PricingTier, Product, Variant};
pub use discount::{Discount, DiscountKind, DiscountRegistry};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{Dimension, FilterOption, FilterSelection, VariantPicker};
pub use money::Money;
pub use pricing::{resolve_tier, tier_incentive, Incentive};
pub use session::{CartView, StoreSession};
pub use summary::order_summary;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines (unique variants) allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts; the catalog itself is far smaller than this.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 999;

// =============================================================================
// Shared Test Fixture
// =============================================================================
