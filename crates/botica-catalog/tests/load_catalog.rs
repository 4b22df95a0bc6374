//! Integration tests: load the bundled catalog fixture from disk and drive
//! a full storefront session over it.

use std::path::PathBuf;

use botica_catalog::CatalogError;
use botica_core::filter::Dimension;
use botica_core::money::Money;
use botica_core::StoreSession;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/products.json")
}

#[tokio::test]
async fn load_fixture_document() {
    let catalog = botica_catalog::load(fixture_path())
        .await
        .expect("fixture is valid");

    assert_eq!(catalog.products.len(), 2);

    // Cleaning applied: suffixed quantity normalized, "nan" dosage dropped
    let (_, variant_102) = catalog.variant(102).unwrap();
    assert_eq!(variant_102.quantity_label, "30");

    let (_, variant_201) = catalog.variant(201).unwrap();
    assert!(variant_201.dosage.is_none());

    // Prices parsed into exact céntimos
    let (_, variant_101) = catalog.variant(101).unwrap();
    assert_eq!(variant_101.tiers[2].unit_price, Money::from_cents(600));

    // Section order matches the document object order
    let keys: Vec<&str> = catalog.categories.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["sueño", "huesos"]);
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let err = botica_catalog::load("does/not/exist.json").await.unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[tokio::test]
async fn session_over_loaded_catalog() {
    let catalog = botica_catalog::load(fixture_path()).await.unwrap();
    let mut session = StoreSession::new(catalog);

    // Pick the 10mg presentation through the overlay controller
    let mut picker = session.open_product(1).unwrap();
    let variant = picker.select(Dimension::Dosage, "10mg").unwrap();
    assert_eq!(variant.id, 102);

    // Ten units cross the first break: 10 × S/ 10.00
    let view = session.add_to_cart(102, 10).unwrap();
    assert_eq!(view.totals.subtotal, Money::from_soles(100));
    assert_eq!(view.lines[0].tier_label, "Mayoreo (10+)");

    session.apply_discount("SOLES20").unwrap();
    let view = session.cart_view().unwrap();
    assert_eq!(view.totals.total, Money::from_soles(80));

    let summary = session.order_summary().unwrap();
    assert!(summary.contains("*TOTAL DEL PEDIDO: S/ 80.00*"));
}

#[test]
fn parse_str_rejects_malformed_json() {
    let err = botica_catalog::parse_str("{ not json").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}
