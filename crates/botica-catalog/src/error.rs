//! # Catalog Load Error Types
//!
//! Error types for the catalog document boundary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  I/O error (std::io) or JSON error (serde_json)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds which product/variant is broken     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Startup refuses the document; the storefront never runs on a          │
//! │  half-valid catalog                                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validation error names the offending product or variant id so the
//! merchant can fix the source spreadsheet row directly.

use thiserror::Error;

/// Catalog document load and validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading the document file failed.
    ///
    /// ## When This Occurs
    /// - products.json missing or unreadable
    /// - File permissions issue
    #[error("failed to read catalog document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not the expected JSON shape.
    ///
    /// ## When This Occurs
    /// - Truncated or hand-edited JSON
    /// - A field with the wrong type (e.g. numeric id as string)
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document contains no products at all.
    #[error("catalog document contains no products")]
    Empty,

    /// Two products share an id.
    #[error("duplicate product id {product_id}")]
    DuplicateProductId { product_id: u32 },

    /// Two variants share an id. Variant ids must be unique across the
    /// whole catalog because the cart references them bare.
    #[error("duplicate variant id {variant_id}")]
    DuplicateVariantId { variant_id: u32 },

    /// A product has an empty variants list.
    ///
    /// ## When This Occurs
    /// - Spreadsheet row group lost its variant rows during conversion
    #[error("product {product_id} has no variants")]
    NoVariants { product_id: u32 },

    /// A variant has no images.
    #[error("variant {variant_id} has no images")]
    NoImages { variant_id: u32 },

    /// A variant has no pricing tiers, so no price could ever be resolved.
    #[error("variant {variant_id} has no pricing tiers")]
    NoTiers { variant_id: u32 },

    /// A tier price string is not a valid decimal amount.
    ///
    /// ## When This Occurs
    /// - A price cell with currency symbols or thousands separators
    /// - More than two decimal places
    #[error("variant {variant_id} has invalid price {raw:?}")]
    InvalidPrice { variant_id: u32, raw: String },

    /// A tier threshold of zero; thresholds are 1-based quantities.
    #[error("variant {variant_id} has a pricing tier with min_qty 0")]
    ZeroTierThreshold { variant_id: u32 },

    /// Tier thresholds decrease somewhere in the list. Resolution relies on
    /// non-decreasing order; equal thresholds are tolerated (the later tier
    /// wins).
    #[error("variant {variant_id} has unsorted pricing tiers ({prev} then {next})")]
    UnsortedTiers {
        variant_id: u32,
        prev: u32,
        next: u32,
    },
}

/// Result type for catalog boundary operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
