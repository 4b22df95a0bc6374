//! # botica-catalog: Catalog Document Boundary
//!
//! Loads, cleans and validates the storefront's catalog document
//! (products.json) into [`botica_core`] domain types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Botica Storefront Data Flow                         │
//! │                                                                         │
//! │  products.json (spreadsheet converter output)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 botica-catalog (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐     ┌───────────────┐    ┌─────────────┐  │   │
//! │  │   │    fetch      │     │   document    │    │  validate   │  │   │
//! │  │   │  (tokio::fs)  │ ──► │ parse + clean │ ──►│ invariants  │  │   │
//! │  │   └───────────────┘     └───────────────┘    └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                ▼                                        │
//! │                    botica_core::Catalog (immutable)                     │
//! │                        │                                                │
//! │                        ▼                                                │
//! │              StoreSession (pricing, filters, cart)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is the only place in the workspace that performs I/O for catalog
//! data and the only place that sees the document's raw quirks (decimal
//! price strings, `"nan"` dosage sentinels, suffixed quantity labels). A
//! document that fails validation is rejected whole; there is no partial
//! load.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let catalog = botica_catalog::load("data/products.json").await?;
//! let mut session = botica_core::StoreSession::new(catalog);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;

mod document;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};

use std::path::Path;

use tracing::{debug, info};

use botica_core::catalog::Catalog;

use crate::document::CatalogDocument;

// =============================================================================
// Entry Points
// =============================================================================

/// Parses and validates a catalog document from a JSON string.
///
/// This is the synchronous core of the boundary; [`load`] wraps it with the
/// file read. Hosts that receive the document some other way (embedded
/// asset, HTTP response body) call this directly.
pub fn parse_str(json: &str) -> CatalogResult<Catalog> {
    let doc: CatalogDocument = serde_json::from_str(json)?;
    doc.into_catalog()
}

/// Reads, parses and validates a catalog document from disk.
pub async fn load(path: impl AsRef<Path>) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading catalog document");

    let raw = tokio::fs::read_to_string(path).await?;
    let catalog = parse_str(&raw)?;

    info!(
        products = catalog.products.len(),
        variants = catalog.products.iter().map(|p| p.variants.len()).sum::<usize>(),
        categories = catalog.categories.len(),
        "catalog loaded"
    );
    Ok(catalog)
}
