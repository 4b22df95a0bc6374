//! # Tier Resolution
//!
//! Selects the applicable pricing tier for a variant given the cumulative
//! cart quantity, and computes the "add N more" upsell hint.
//!
//! ## The Central Pricing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tier selection is GLOBAL to the cart                                   │
//! │                                                                         │
//! │  Tiers:  min 1 → S/ 10.00   min 10 → S/ 8.00   min 50 → S/ 6.00        │
//! │                                                                         │
//! │  Cart:   5 × Melatonina  +  5 × Colágeno   →  total quantity 10        │
//! │                                                                         │
//! │  BOTH lines are priced at the min-10 tier (S/ 8.00), even though       │
//! │  neither line alone reaches 10 units. Adding more of ANY product can   │
//! │  lower the per-unit price of EVERY line already in the cart.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Catalog, PricingTier};

// =============================================================================
// Tier Resolver
// =============================================================================

/// Returns the tier that applies at the given cumulative quantity.
///
/// ## Algorithm
/// Scan from the highest threshold downward and take the first tier whose
/// threshold is `<= quantity`. Thresholds are inclusive lower bounds: a
/// quantity exactly equal to a threshold gets that tier, not the preceding
/// one. If the quantity is below every threshold, the lowest tier is the
/// fallback.
///
/// ## Precondition
/// `tiers` must be non-empty with non-decreasing `min_qty`; catalog
/// validation guarantees both for every variant. When two tiers share a
/// threshold, the later one wins.
///
/// ## Example
/// ```rust
/// use botica_core::catalog::PricingTier;
/// use botica_core::money::Money;
/// use botica_core::pricing::resolve_tier;
///
/// let tiers = vec![
///     PricingTier { min_qty: 1, label: "Precio Individual".into(), unit_price: Money::from_cents(1000) },
///     PricingTier { min_qty: 10, label: "Mayoreo (10+)".into(), unit_price: Money::from_cents(800) },
/// ];
/// assert_eq!(resolve_tier(&tiers, 9).unit_price.cents(), 1000);
/// assert_eq!(resolve_tier(&tiers, 10).unit_price.cents(), 800);
/// ```
pub fn resolve_tier(tiers: &[PricingTier], quantity: u32) -> &PricingTier {
    debug_assert!(!tiers.is_empty(), "variant without pricing tiers");
    tiers
        .iter()
        .rev()
        .find(|tier| quantity >= tier.min_qty)
        .unwrap_or(&tiers[0])
}

// =============================================================================
// Tier Incentive
// =============================================================================

/// Upsell hint shown in the cart sidebar: how far the shopper is from the
/// next catalog-wide price break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Incentive {
    /// Adding `needed` more units (of anything) reaches the `next_min` tier.
    NextTier { needed: u32, next_min: u32 },
    /// The cart already qualifies for the highest tier in the catalog.
    BestPrice,
}

impl Incentive {
    /// The storefront message for this incentive.
    pub fn message(&self) -> String {
        match self {
            Incentive::NextTier { needed, .. } => {
                format!("¡Añade {needed} más para un mejor precio!")
            }
            Incentive::BestPrice => "¡Felicidades! Tienes el mejor precio.".to_string(),
        }
    }
}

/// Computes the incentive for the current total cart quantity.
///
/// Thresholds are pooled across the whole catalog (every tier of every
/// variant, threshold > 1), because tier selection itself is pooled: any
/// product the shopper adds moves them toward the same break points.
///
/// Returns `None` when the catalog has no tier beyond the base price.
pub fn tier_incentive(catalog: &Catalog, total_quantity: u32) -> Option<Incentive> {
    let mut thresholds: Vec<u32> = catalog
        .products
        .iter()
        .flat_map(|p| p.variants.iter())
        .flat_map(|v| v.tiers.iter())
        .map(|t| t.min_qty)
        .filter(|&min| min > 1)
        .collect();
    thresholds.sort_unstable();
    thresholds.dedup();

    let highest = *thresholds.last()?;
    match thresholds.iter().find(|&&min| total_quantity < min) {
        Some(&next_min) => Some(Incentive::NextTier {
            needed: next_min - total_quantity,
            next_min,
        }),
        None => (total_quantity >= highest).then_some(Incentive::BestPrice),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
