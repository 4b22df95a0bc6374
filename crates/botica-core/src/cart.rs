//! # Cart Aggregator
//!
//! Holds the session's cart lines and recomputes aggregate figures whenever
//! anything changes.
//!
//! ## Recomputation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Aggregation                                   │
//! │                                                                         │
//! │  add / set quantity / remove                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total quantity = Σ line.quantity        (across ALL lines)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  per line: resolve_tier(variant.tiers, total quantity)                 │
//! │            line total = tier price × line.quantity                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = Σ line totals                                              │
//! │  discount = clamp(applied discount amount, subtotal)                   │
//! │  total    = subtotal − discount                                        │
//! │                                                                         │
//! │  Nothing is cached: every figure derives from the lines in one pass,   │
//! │  so a mutation can never leave quantity badge and total disagreeing.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by variant id (adding the same variant merges)
//! - Line quantity is always >= 1 (0 removes the line)
//! - At most one discount is active; it is cleared when the cart empties

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::discount::{Discount, DiscountRegistry};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::resolve_tier;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the cart: a variant reference plus the display data captured
/// at add time.
///
/// ## Design Notes
/// Name and thumbnail are denormalized so the sidebar renders without a
/// catalog lookup; pricing is NOT denormalized, because the applicable tier
/// depends on the whole cart and must be resolved fresh on every change.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog-unique variant id.
    pub variant_id: u32,

    /// Owning product id.
    pub product_id: u32,

    /// "{product name} ({variant name})", captured at add time.
    pub display_name: String,

    /// Thumbnail URL, captured at add time.
    pub image: String,

    /// Units of this variant, always >= 1.
    pub quantity: u32,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Priced Views
// =============================================================================

/// A cart line with its tier-resolved price, as displayed in the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    pub variant_id: u32,
    pub display_name: String,
    pub image: String,
    pub quantity: u32,
    /// Unit price at the tier the whole cart currently qualifies for.
    pub unit_price: Money,
    /// Label of that tier, e.g. "Mayoreo (10+)".
    pub tier_label: String,
    /// `unit_price × quantity`.
    pub line_total: Money,
}

/// The discount line of the totals block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLine {
    pub code: String,
    pub amount: Money,
}

/// Aggregate figures, recomputed as one atomic snapshot per mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of lines (unique variants).
    pub line_count: usize,
    /// Total units across all lines (the cart badge).
    pub total_quantity: u32,
    pub subtotal: Money,
    pub discount: Option<DiscountLine>,
    pub total: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The session's shopping cart.
///
/// Lines keep insertion order. All mutation goes through methods so the
/// discount-clears-on-empty invariant cannot be bypassed.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount: Option<Discount>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// The cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The currently applied discount, if any.
    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (unique variants).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines. Tier resolution keys on this figure.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Adds a variant to the cart, merging into an existing line.
    ///
    /// ## Behavior
    /// - Quantity must be a positive integer; 0 is rejected and the cart is
    ///   left untouched
    /// - If the variant is already in the cart the quantities sum, so adding
    ///   a then b is identical to adding a+b once
    /// - A new line captures the display name and thumbnail at add time
    pub fn add_item(&mut self, catalog: &Catalog, variant_id: u32, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        let (product, variant) = catalog
            .variant(variant_id)
            .ok_or(CoreError::VariantNotFound(variant_id))?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.variant_id == variant_id) {
            let merged = line.quantity + quantity;
            if merged > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = merged;
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }
        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge { max: MAX_CART_LINES });
        }

        self.lines.push(CartLine {
            variant_id,
            product_id: product.id,
            display_name: format!("{} ({})", product.name, variant.name),
            image: variant.thumbnail().to_string(),
            quantity,
            added_at: Utc::now(),
        });
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line entirely
    /// - If removal empties the cart, the active discount is cleared
    pub fn set_quantity(&mut self, variant_id: u32, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(variant_id);
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.variant_id == variant_id)
            .ok_or(CoreError::VariantNotFound(variant_id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by variant id.
    pub fn remove_item(&mut self, variant_id: u32) -> CoreResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.variant_id != variant_id);
        if self.lines.len() == before {
            return Err(CoreError::VariantNotFound(variant_id));
        }
        self.clear_discount_if_empty();
        Ok(())
    }

    /// Clears all lines and the discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = None;
    }

    fn clear_discount_if_empty(&mut self) {
        if self.lines.is_empty() {
            self.discount = None;
        }
    }

    /// Applies a discount code.
    ///
    /// ## Failure order
    /// Unknown code, then minimum-subtotal gate, then already-applied. A
    /// failed attempt leaves cart and active discount untouched.
    pub fn apply_discount(
        &mut self,
        catalog: &Catalog,
        registry: &DiscountRegistry,
        code: &str,
    ) -> CoreResult<&Discount> {
        let subtotal = self.subtotal(catalog)?;
        let discount = registry.validate(code, subtotal)?.clone();

        if let Some(active) = &self.discount {
            return Err(CoreError::DiscountAlreadyApplied {
                active: active.code.clone(),
            });
        }

        Ok(self.discount.insert(discount))
    }

    // -------------------------------------------------------------------------
    // Derived figures
    // -------------------------------------------------------------------------

    /// The lines with their tier-resolved prices. The tier for every line is
    /// keyed on the TOTAL cart quantity: adding more of any product can
    /// lower the per-unit price of every line already here.
    pub fn priced_lines(&self, catalog: &Catalog) -> CoreResult<Vec<PricedLine>> {
        let total_quantity = self.total_quantity();
        self.lines
            .iter()
            .map(|line| {
                let (_, variant) = catalog
                    .variant(line.variant_id)
                    .ok_or(CoreError::VariantNotFound(line.variant_id))?;
                let tier = resolve_tier(&variant.tiers, total_quantity);
                Ok(PricedLine {
                    variant_id: line.variant_id,
                    display_name: line.display_name.clone(),
                    image: line.image.clone(),
                    quantity: line.quantity,
                    unit_price: tier.unit_price,
                    tier_label: tier.label.clone(),
                    line_total: tier.unit_price.multiply_quantity(line.quantity),
                })
            })
            .collect()
    }

    /// Sum of all tier-priced line totals.
    pub fn subtotal(&self, catalog: &Catalog) -> CoreResult<Money> {
        Ok(self
            .priced_lines(catalog)?
            .iter()
            .map(|line| line.line_total)
            .sum())
    }

    /// The active discount's amount, clamped to the subtotal. Zero when no
    /// discount is applied.
    pub fn discount_amount(&self, catalog: &Catalog) -> CoreResult<Money> {
        let subtotal = self.subtotal(catalog)?;
        Ok(self
            .discount
            .as_ref()
            .map(|d| d.amount_for(subtotal))
            .unwrap_or_else(Money::zero))
    }

    /// `subtotal − discount`, never negative thanks to the clamp.
    pub fn total(&self, catalog: &Catalog) -> CoreResult<Money> {
        let subtotal = self.subtotal(catalog)?;
        let discount = self.discount_amount(catalog)?;
        Ok(subtotal - discount)
    }

    /// One atomic snapshot of all aggregate figures. Badge count, subtotal,
    /// discount line and total come from a single computation over the same
    /// lines, so no mutation can be observed half-applied.
    pub fn totals(&self, catalog: &Catalog) -> CoreResult<CartTotals> {
        let lines = self.priced_lines(catalog)?;
        let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
        let discount = self.discount.as_ref().map(|d| DiscountLine {
            code: d.code.clone(),
            amount: d.amount_for(subtotal),
        });
        let discount_amount = discount
            .as_ref()
            .map(|d| d.amount)
            .unwrap_or_else(Money::zero);

        Ok(CartTotals {
            line_count: lines.len(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount,
            total: subtotal - discount_amount,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
