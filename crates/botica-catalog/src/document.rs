//! # Catalog Document Parsing
//!
//! Raw document types mirroring the products.json produced by the
//! spreadsheet converter, plus the cleaning and validation pass that turns
//! them into `botica_core` domain types.
//!
//! ## Document Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {                                                                      │
//! │    "products": [                                                        │
//! │      { "id": 1, "name": "...", "brand": "...", "category": "sueño",    │
//! │        "variants": [                                                    │
//! │          { "variantId": 101, "presentation": "Caja",                   │
//! │            "dosage": "5mg",          ← "nan" sentinel when absent      │
//! │            "quantity": "30",         ← stringified, may carry suffix   │
//! │            "pricingTiers": [                                            │
//! │              { "minQty": 1, "price": "10.00",  ← decimal STRING        │
//! │                "tierName": "Precio Individual" } ] } ] } ],            │
//! │    "categoryDefinitions": {                                             │
//! │      "sueño": { "title": "...", "description": "..." }, ...            │
//! │    }                                 ← object order = section order    │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cleaning Contract
//! The converter stringifies spreadsheet cells as-is, so this module is the
//! single place that repairs its artifacts:
//! - dosage `"nan"` (an empty cell) or blank becomes `None`
//! - quantity labels lose a trailing `" unidades"` suffix
//! - prices are parsed from decimal strings into exact céntimos
//!
//! Everything downstream assumes clean data; see the invariants listed on
//! [`botica_core::catalog`].

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use botica_core::catalog::{Catalog, Category, PricingTier, Product, Variant};
use botica_core::filter::Dimension;
use botica_core::money::Money;

use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Raw Document Types
// =============================================================================
// Deserialization targets only. Field names track the document verbatim;
// nothing outside this module sees these types.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogDocument {
    products: Vec<ProductDoc>,
    /// Keyed by category key; object order is the storefront section order
    /// (serde_json's preserve_order feature keeps it).
    #[serde(default)]
    category_definitions: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDoc {
    id: u32,
    name: String,
    brand: String,
    category: String,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    variants: Vec<VariantDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantDoc {
    variant_id: u32,
    name: String,
    presentation: String,
    #[serde(default)]
    dosage: Option<String>,
    quantity: String,
    images: Vec<String>,
    pricing_tiers: Vec<TierDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TierDoc {
    min_qty: u32,
    price: String,
    tier_name: String,
}

#[derive(Debug, Deserialize)]
struct CategoryDoc {
    title: String,
    description: String,
}

// =============================================================================
// Cleaning
// =============================================================================

/// Repairs a stringified-spreadsheet dosage cell: the converter writes the
/// literal `"nan"` for an empty cell.
fn clean_dosage(raw: Option<String>) -> Option<String> {
    let value = raw?;
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value.to_string())
    }
}

/// Normalizes a quantity label to its bare value; the converter sometimes
/// carries the display suffix through.
fn clean_quantity(raw: &str) -> String {
    Dimension::Quantity.normalize(raw.trim()).to_string()
}

// =============================================================================
// Conversion and Validation
// =============================================================================

impl CatalogDocument {
    /// Converts the raw document into validated domain types.
    ///
    /// Fails on the first structural problem; a product referencing an
    /// undefined category is only warned about (the product stays reachable
    /// through search, it just renders in no section).
    pub(crate) fn into_catalog(self) -> CatalogResult<Catalog> {
        if self.products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let categories = convert_categories(self.category_definitions)?;
        let category_keys: HashSet<&str> = categories.iter().map(|c| c.key.as_str()).collect();

        let mut product_ids: HashSet<u32> = HashSet::new();
        let mut variant_ids: HashSet<u32> = HashSet::new();

        let mut products = Vec::with_capacity(self.products.len());
        for doc in self.products {
            if !product_ids.insert(doc.id) {
                return Err(CatalogError::DuplicateProductId { product_id: doc.id });
            }
            if doc.variants.is_empty() {
                return Err(CatalogError::NoVariants { product_id: doc.id });
            }
            if !category_keys.contains(doc.category.as_str()) {
                warn!(
                    product_id = doc.id,
                    category = %doc.category,
                    "product references an undefined category; it will render in no section"
                );
            }

            let mut variants = Vec::with_capacity(doc.variants.len());
            for variant_doc in doc.variants {
                if !variant_ids.insert(variant_doc.variant_id) {
                    return Err(CatalogError::DuplicateVariantId {
                        variant_id: variant_doc.variant_id,
                    });
                }
                variants.push(convert_variant(variant_doc)?);
            }

            products.push(Product {
                id: doc.id,
                name: doc.name,
                brand: doc.brand,
                category: doc.category,
                short_description: doc.short_description.filter(|s| !s.trim().is_empty()),
                tags: doc.tags.unwrap_or_default(),
                variants,
            });
        }

        Ok(Catalog {
            products,
            categories,
        })
    }
}

fn convert_variant(doc: VariantDoc) -> CatalogResult<Variant> {
    let variant_id = doc.variant_id;

    if doc.images.is_empty() {
        return Err(CatalogError::NoImages { variant_id });
    }
    if doc.pricing_tiers.is_empty() {
        return Err(CatalogError::NoTiers { variant_id });
    }

    let mut tiers = Vec::with_capacity(doc.pricing_tiers.len());
    let mut prev_min_qty: Option<u32> = None;
    for tier_doc in doc.pricing_tiers {
        if tier_doc.min_qty == 0 {
            return Err(CatalogError::ZeroTierThreshold { variant_id });
        }
        if let Some(prev) = prev_min_qty {
            // Non-decreasing is the contract; on a duplicate threshold the
            // later tier wins during resolution
            if tier_doc.min_qty < prev {
                return Err(CatalogError::UnsortedTiers {
                    variant_id,
                    prev,
                    next: tier_doc.min_qty,
                });
            }
            if tier_doc.min_qty == prev {
                warn!(
                    variant_id,
                    min_qty = tier_doc.min_qty,
                    "duplicate pricing tier threshold; the later tier takes precedence"
                );
            }
        }
        prev_min_qty = Some(tier_doc.min_qty);

        let unit_price =
            Money::parse_decimal(&tier_doc.price).map_err(|_| CatalogError::InvalidPrice {
                variant_id,
                raw: tier_doc.price.clone(),
            })?;

        tiers.push(PricingTier {
            min_qty: tier_doc.min_qty,
            label: tier_doc.tier_name,
            unit_price,
        });
    }

    Ok(Variant {
        id: variant_id,
        name: doc.name,
        presentation: doc.presentation.trim().to_string(),
        dosage: clean_dosage(doc.dosage),
        quantity_label: clean_quantity(&doc.quantity),
        images: doc.images,
        tiers,
    })
}

/// Converts the categoryDefinitions object, keeping document order.
fn convert_categories(definitions: Map<String, Value>) -> CatalogResult<Vec<Category>> {
    definitions
        .into_iter()
        .map(|(key, value)| {
            let doc: CategoryDoc = serde_json::from_value(value)?;
            Ok(Category {
                key,
                title: doc.title,
                description: doc.description,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CatalogResult<Catalog> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        doc.into_catalog()
    }

    /// One product, one variant, templated so each test can inject a broken
    /// fragment.
    fn doc_with_variant(variant_json: &str) -> String {
        format!(
            r#"{{
                "products": [
                    {{
                        "id": 1,
                        "name": "Melatonina Forte",
                        "brand": "DormiBien",
                        "category": "sueño",
                        "shortDescription": "Para un descanso profundo.",
                        "tags": ["sueño"],
                        "variants": [{variant_json}]
                    }}
                ],
                "categoryDefinitions": {{
                    "sueño": {{ "title": "Sueño y Relax", "description": "Descanso." }}
                }}
            }}"#
        )
    }

    const GOOD_VARIANT: &str = r#"{
        "variantId": 101,
        "name": "Melatonina 5mg x 30",
        "presentation": "Caja",
        "dosage": "5mg",
        "quantity": "30 unidades",
        "images": ["img/melatonina.webp"],
        "pricingTiers": [
            { "minQty": 1, "price": "10.00", "tierName": "Precio Individual" },
            { "minQty": 10, "price": "8.00", "tierName": "Mayoreo (10+)" }
        ]
    }"#;

    #[test]
    fn test_clean_dosage_sentinels() {
        assert_eq!(clean_dosage(Some("5mg".into())), Some("5mg".to_string()));
        assert_eq!(clean_dosage(Some(" 5mg ".into())), Some("5mg".to_string()));
        assert_eq!(clean_dosage(Some("nan".into())), None);
        assert_eq!(clean_dosage(Some("NaN".into())), None);
        assert_eq!(clean_dosage(Some("  ".into())), None);
        assert_eq!(clean_dosage(None), None);
    }

    #[test]
    fn test_clean_quantity_strips_suffix() {
        assert_eq!(clean_quantity("30 unidades"), "30");
        assert_eq!(clean_quantity(" 30 "), "30");
        assert_eq!(clean_quantity("30"), "30");
    }

    #[test]
    fn test_good_document_converts() {
        let catalog = parse(&doc_with_variant(GOOD_VARIANT)).expect("valid document");

        let (product, variant) = catalog.variant(101).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(variant.dosage.as_deref(), Some("5mg"));
        assert_eq!(variant.quantity_label, "30"); // suffix stripped
        assert_eq!(variant.tiers[0].unit_price, Money::from_cents(1000));
        assert_eq!(variant.tiers[1].label, "Mayoreo (10+)");

        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].key, "sueño");
    }

    #[test]
    fn test_nan_dosage_becomes_none() {
        let variant = GOOD_VARIANT.replace("\"5mg\"", "\"nan\"");
        let catalog = parse(&doc_with_variant(&variant)).unwrap();
        assert!(catalog.variant(101).unwrap().1.dosage.is_none());
    }

    #[test]
    fn test_empty_document_rejected() {
        let err = parse(r#"{ "products": [], "categoryDefinitions": {} }"#).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn test_variant_without_tiers_rejected() {
        let variant = GOOD_VARIANT.replace(
            r#""pricingTiers": [
            { "minQty": 1, "price": "10.00", "tierName": "Precio Individual" },
            { "minQty": 10, "price": "8.00", "tierName": "Mayoreo (10+)" }
        ]"#,
            r#""pricingTiers": []"#,
        );
        let err = parse(&doc_with_variant(&variant)).unwrap_err();
        assert!(matches!(err, CatalogError::NoTiers { variant_id: 101 }));
    }

    #[test]
    fn test_bad_price_names_the_variant() {
        let variant = GOOD_VARIANT.replace("\"10.00\"", "\"S/ 10.00\"");
        let err = parse(&doc_with_variant(&variant)).unwrap_err();
        match err {
            CatalogError::InvalidPrice { variant_id, raw } => {
                assert_eq!(variant_id, 101);
                assert_eq!(raw, "S/ 10.00");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decreasing_tiers_rejected() {
        let variant = GOOD_VARIANT.replace("\"minQty\": 1,", "\"minQty\": 20,");
        let err = parse(&doc_with_variant(&variant)).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnsortedTiers { variant_id: 101, prev: 20, next: 10 }
        ));
    }

    #[test]
    fn test_duplicate_tier_threshold_tolerated() {
        // Two tiers sharing a threshold are valid input; resolution lets the
        // later one win
        let variant = GOOD_VARIANT.replace("\"minQty\": 10", "\"minQty\": 1");
        let catalog = parse(&doc_with_variant(&variant)).expect("non-decreasing is accepted");

        let (_, variant) = catalog.variant(101).unwrap();
        assert_eq!(variant.tiers.len(), 2);
        assert_eq!(variant.tiers[0].min_qty, 1);
        assert_eq!(variant.tiers[1].min_qty, 1);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let variant = GOOD_VARIANT.replace("\"minQty\": 1,", "\"minQty\": 0,");
        let err = parse(&doc_with_variant(&variant)).unwrap_err();
        assert!(matches!(err, CatalogError::ZeroTierThreshold { variant_id: 101 }));
    }

    #[test]
    fn test_duplicate_variant_id_across_products_rejected() {
        let json = format!(
            r#"{{
                "products": [
                    {{ "id": 1, "name": "A", "brand": "B", "category": "c",
                       "variants": [{v}] }},
                    {{ "id": 2, "name": "C", "brand": "D", "category": "c",
                       "variants": [{v}] }}
                ],
                "categoryDefinitions": {{ "c": {{ "title": "T", "description": "D" }} }}
            }}"#,
            v = GOOD_VARIANT
        );
        let err = parse(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateVariantId { variant_id: 101 }));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = format!(
            r#"{{
                "products": [
                    {{ "id": 1, "name": "A", "brand": "B", "category": "c",
                       "variants": [{GOOD_VARIANT}] }}
                ]
            }}"#
        );
        let catalog = parse(&json).unwrap();
        let product = catalog.product(1).unwrap();
        assert!(product.short_description.is_none());
        assert!(product.tags.is_empty());
        assert!(catalog.categories.is_empty());
    }

    #[test]
    fn test_category_order_follows_document() {
        let json = format!(
            r#"{{
                "products": [
                    {{ "id": 1, "name": "A", "brand": "B", "category": "zzz",
                       "variants": [{GOOD_VARIANT}] }}
                ],
                "categoryDefinitions": {{
                    "zzz": {{ "title": "Last alphabetically", "description": "d" }},
                    "aaa": {{ "title": "First alphabetically", "description": "d" }}
                }}
            }}"#
        );
        let catalog = parse(&json).unwrap();
        let keys: Vec<&str> = catalog.categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["zzz", "aaa"]);
    }
}
