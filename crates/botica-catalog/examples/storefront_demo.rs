//! End-to-end demo: load the test catalog, browse it, fill a cart and print
//! the checkout summary.
//!
//! Run with:
//! ```sh
//! cargo run -p botica-catalog --example storefront_demo
//! ```

use botica_core::filter::Dimension;
use botica_core::StoreSession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,botica_core=debug,botica_catalog=debug".into()),
        )
        .init();

    let path = format!("{}/tests/data/products.json", env!("CARGO_MANIFEST_DIR"));
    let catalog = botica_catalog::load(&path).await?;
    let mut session = StoreSession::new(catalog);

    for category in &session.catalog().categories {
        println!("== {} ==", category.title);
        let products: Vec<String> = session
            .catalog()
            .products_in_category(&category.key)
            .map(|p| format!("{} (desde {})", p.name, p.lowest_price()))
            .collect();
        for line in products {
            println!("   {line}");
        }
    }

    // Pick the 10mg melatonin through the overlay controller
    let mut picker = session.open_product(1)?;
    let variant = picker
        .select(Dimension::Dosage, "10mg")
        .ok_or("dosage 10mg should be selectable")?;
    let variant_id = variant.id;

    let view = session.add_to_cart(variant_id, 8)?;
    if let Some(incentive) = &view.incentive {
        println!("\n{}", incentive.message());
    }

    // Two more units cross the wholesale break
    session.add_to_cart(variant_id, 2)?;
    session.apply_discount("SOLES20")?;

    println!("\n{}", session.order_summary()?);
    Ok(())
}
