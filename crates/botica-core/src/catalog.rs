//! # Catalog Types
//!
//! Domain types for the product catalog, immutable after load.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  Catalog                                                                │
//! │  ├── Category            (key, title, description - section headers)   │
//! │  └── Product             (id, name, brand, category, tags)             │
//! │      └── Variant         (id, presentation, dosage, quantity label,    │
//! │          │                images)                                      │
//! │          └── PricingTier (min_qty threshold, label, unit price)        │
//! │                                                                         │
//! │  Variant ids are unique across the WHOLE catalog, not just within one  │
//! │  product: the cart references variants by bare id.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants (enforced by the botica-catalog boundary, relied on here)
//! - Every product has at least one variant
//! - Every variant has at least one image and at least one pricing tier
//! - Tiers are sorted by non-decreasing `min_qty`, thresholds >= 1
//! - A `dosage` of `None` means the dimension is absent for that variant
//!   (the source document's `"nan"` sentinel is cleaned at the boundary)

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Pricing Tier
// =============================================================================

/// A quantity threshold at which the unit price changes.
///
/// Thresholds are inclusive lower bounds and are evaluated against the
/// *total cart quantity*, not the line quantity (see `pricing::resolve_tier`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    /// Minimum cumulative quantity for this tier to apply (>= 1).
    pub min_qty: u32,

    /// Display label, e.g. "Precio Individual" or "Mayoreo (10+)".
    pub label: String,

    /// Unit price at this tier.
    pub unit_price: Money,
}

// =============================================================================
// Variant
// =============================================================================

/// A specific purchasable configuration of a product.
///
/// Within one product the (presentation, dosage, quantity) tuple is not
/// required to be unique; the id always is.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Catalog-unique identifier.
    pub id: u32,

    /// Variant display name, e.g. "Melatonina 10mg x 30".
    pub name: String,

    /// Presentation discriminator, e.g. "Caja" or "Blister".
    pub presentation: String,

    /// Dosage discriminator, e.g. "10mg". Absent for products where
    /// dosage does not apply.
    pub dosage: Option<String>,

    /// Quantity discriminator, stored normalized without the unit suffix
    /// (the UI renders "30" as "30 unidades").
    pub quantity_label: String,

    /// Image URLs; the first one is the thumbnail.
    pub images: Vec<String>,

    /// Pricing tiers in non-decreasing `min_qty` order.
    pub tiers: Vec<PricingTier>,
}

impl Variant {
    /// Returns the thumbnail image (first in the list).
    ///
    /// The boundary guarantees at least one image per variant.
    pub fn thumbnail(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or("")
    }

    /// Returns the cheapest unit price across this variant's tiers.
    pub fn lowest_price(&self) -> Money {
        self.tiers
            .iter()
            .map(|t| t.unit_price)
            .min()
            .unwrap_or_else(Money::zero)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product with one or more purchasable variants.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog-unique identifier.
    pub id: u32,

    /// Display name shown on the product card.
    pub name: String,

    /// Brand line shown above the name.
    pub brand: String,

    /// Category key, joined against `Catalog::categories`.
    pub category: String,

    /// One-line card description.
    pub short_description: Option<String>,

    /// Free-form tags; the card shows up to three.
    pub tags: Vec<String>,

    /// Purchasable variants, never empty.
    pub variants: Vec<Variant>,
}

impl Product {
    /// Returns the lowest unit price across all variants and tiers,
    /// for the "Desde S/ x.xx" card label.
    pub fn lowest_price(&self) -> Money {
        self.variants
            .iter()
            .map(Variant::lowest_price)
            .min()
            .unwrap_or_else(Money::zero)
    }

    /// Case-insensitive search predicate over name, brand, tags and
    /// variant names. `query` must already be lowercased.
    fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.brand.to_lowercase().contains(query)
            || self.tags.join(" ").to_lowercase().contains(query)
            || self
                .variants
                .iter()
                .any(|v| v.name.to_lowercase().contains(query))
    }
}

// =============================================================================
// Category
// =============================================================================

/// A storefront section header. Categories keep the document order so the
/// page renders sections in the order the merchant wrote them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Key referenced by `Product::category`.
    pub key: String,

    /// Section title, e.g. "Sueño y Relax".
    pub title: String,

    /// Section description paragraph.
    pub description: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// The immutable-after-load product catalog.
///
/// Loaded once at startup by the botica-catalog crate; every computation in
/// this crate treats it as read-only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Looks up a product by id.
    pub fn product(&self, product_id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Looks up a variant by its catalog-unique id, returning the owning
    /// product alongside it (the cart needs both for the display name).
    pub fn variant(&self, variant_id: u32) -> Option<(&Product, &Variant)> {
        self.products.iter().find_map(|p| {
            p.variants
                .iter()
                .find(|v| v.id == variant_id)
                .map(|v| (p, v))
        })
    }

    /// Products belonging to one category, in catalog order.
    pub fn products_in_category<'a>(
        &'a self,
        category_key: &'a str,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| p.category == category_key)
    }

    /// Case-insensitive substring search over product name, brand, tags and
    /// variant names. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches_query(&query))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{catalog_fixture, tier};

    #[test]
    fn test_variant_lookup_spans_products() {
        let catalog = catalog_fixture();

        let (product, variant) = catalog.variant(201).expect("variant 201 exists");
        assert_eq!(product.id, 2);
        assert_eq!(variant.name, "Colágeno x 60");

        assert!(catalog.variant(9999).is_none());
    }

    #[test]
    fn test_lowest_price_spans_variants_and_tiers() {
        let catalog = catalog_fixture();
        let product = catalog.product(1).unwrap();

        // The blister variant's bulk tier bottoms out at S/ 4.00
        assert_eq!(product.lowest_price(), Money::from_cents(400));
    }

    #[test]
    fn test_search_matches_name_brand_tags_and_variants() {
        let catalog = catalog_fixture();

        assert_eq!(catalog.search("melatonina").len(), 1);
        assert_eq!(catalog.search("NATURFLEX").len(), 1); // brand, case-insensitive
        assert_eq!(catalog.search("sueño").len(), 1); // tag
        assert_eq!(catalog.search("x 60").len(), 1); // variant name
        assert!(catalog.search("paracetamol").is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let catalog = catalog_fixture();
        assert_eq!(catalog.search("  ").len(), catalog.products.len());
    }

    #[test]
    fn test_products_in_category() {
        let catalog = catalog_fixture();
        let in_sleep: Vec<_> = catalog.products_in_category("sueño").collect();
        assert_eq!(in_sleep.len(), 1);
        assert_eq!(in_sleep[0].id, 1);
    }

    #[test]
    fn test_variant_lowest_price() {
        let variant = Variant {
            id: 1,
            name: "x".into(),
            presentation: "Caja".into(),
            dosage: None,
            quantity_label: "30".into(),
            images: vec!["img.webp".into()],
            tiers: vec![tier(1, "Precio Individual", 1000), tier(10, "Mayoreo (10+)", 800)],
        };
        assert_eq!(variant.lowest_price(), Money::from_cents(800));
        assert_eq!(variant.thumbnail(), "img.webp");
    }
}
