//! # Store Session
//!
//! The explicit session context that owns catalog, cart and discount
//! registry. The original storefront kept these in page-lifetime globals;
//! here every operation goes through one object with no ambient state.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StoreSession                                     │
//! │                                                                         │
//! │  open_product(id) ───► VariantPicker ───► select(dim, value)           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                       resolved variant ───► add_to_cart(variant, qty)  │
//! │                                                    │                    │
//! │  apply_discount(code) ─────────────────────────────┤                    │
//! │                                                    ▼                    │
//! │                                              cart_view()                │
//! │                                   (priced lines + totals + incentive,  │
//! │                                    one consistent snapshot)            │
//! │                                                    │                    │
//! │  order_summary() ◄─────────────────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded by design: every operation runs to completion before the
//! next one starts, so there is no interior locking here. A host that runs
//! commands concurrently wraps the session in its own `Mutex`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::{Cart, CartTotals, PricedLine};
use crate::catalog::{Catalog, Product};
use crate::discount::{Discount, DiscountRegistry};
use crate::error::{CoreError, CoreResult};
use crate::filter::VariantPicker;
use crate::pricing::{tier_incentive, Incentive};
use crate::summary::order_summary;
use crate::validation::{validate_discount_code, validate_quantity, validate_search_query};

// =============================================================================
// Cart View
// =============================================================================

/// Everything the cart sidebar renders, produced as one consistent snapshot
/// after each mutation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<PricedLine>,
    pub totals: CartTotals,
    /// Upsell hint; `None` for an empty cart or a catalog without breaks.
    pub incentive: Option<Incentive>,
}

// =============================================================================
// Store Session
// =============================================================================

/// Owns all mutable storefront state for one page session.
#[derive(Debug)]
pub struct StoreSession {
    catalog: Catalog,
    registry: DiscountRegistry,
    cart: Cart,
}

impl StoreSession {
    /// Creates a session over a loaded catalog with the built-in promotions.
    pub fn new(catalog: Catalog) -> Self {
        StoreSession::with_registry(catalog, DiscountRegistry::builtin())
    }

    /// Creates a session with a custom discount registry.
    pub fn with_registry(catalog: Catalog, registry: DiscountRegistry) -> Self {
        StoreSession {
            catalog,
            registry,
            cart: Cart::new(),
        }
    }

    /// The read-only catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart (read-only; mutate through session methods).
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // -------------------------------------------------------------------------
    // Browsing
    // -------------------------------------------------------------------------

    /// Case-insensitive product search for the header search box.
    pub fn search(&self, query: &str) -> CoreResult<Vec<&Product>> {
        let query = validate_search_query(query)?;
        Ok(self.catalog.search(&query))
    }

    /// Opens the product detail overlay.
    pub fn open_product(&self, product_id: u32) -> CoreResult<VariantPicker<'_>> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;
        debug!(product_id, "open product overlay");
        Ok(VariantPicker::open(product))
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------
    // Every mutation returns the fresh CartView so the caller never renders
    // from stale figures.

    /// Adds a variant to the cart (merging into an existing line).
    pub fn add_to_cart(&mut self, variant_id: u32, quantity: u32) -> CoreResult<CartView> {
        validate_quantity(quantity)?;
        debug!(variant_id, quantity, "add to cart");
        self.cart.add_item(&self.catalog, variant_id, quantity)?;
        self.cart_view()
    }

    /// Sets a line's quantity; 0 removes the line.
    pub fn set_quantity(&mut self, variant_id: u32, quantity: u32) -> CoreResult<CartView> {
        debug!(variant_id, quantity, "set cart quantity");
        self.cart.set_quantity(variant_id, quantity)?;
        self.cart_view()
    }

    /// Removes a line from the cart.
    pub fn remove_from_cart(&mut self, variant_id: u32) -> CoreResult<CartView> {
        debug!(variant_id, "remove from cart");
        self.cart.remove_item(variant_id)?;
        self.cart_view()
    }

    /// Clears the cart (and with it any active discount).
    pub fn clear_cart(&mut self) -> CoreResult<CartView> {
        debug!("clear cart");
        self.cart.clear();
        self.cart_view()
    }

    /// Applies a discount code to the cart.
    pub fn apply_discount(&mut self, code: &str) -> CoreResult<&Discount> {
        validate_discount_code(code)?;
        debug!(code, "apply discount");
        self.cart.apply_discount(&self.catalog, &self.registry, code)
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    /// The sidebar snapshot: priced lines, totals and the upsell hint.
    pub fn cart_view(&self) -> CoreResult<CartView> {
        let lines = self.cart.priced_lines(&self.catalog)?;
        let totals = self.cart.totals(&self.catalog)?;
        let incentive = if self.cart.is_empty() {
            None
        } else {
            tier_incentive(&self.catalog, totals.total_quantity)
        };
        Ok(CartView {
            lines,
            totals,
            incentive,
        })
    }

    /// The plain-text order itemization for checkout hand-off.
    pub fn order_summary(&self) -> CoreResult<String> {
        order_summary(&self.cart, &self.catalog)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
