//! Catalog browsing and search commands.

#![allow(clippy::print_stdout)]

use saahaz_client::api::ApiError;
use saahaz_client::api::types::{Product, ProductFilter};
use saahaz_client::search::HeaderSearch;
use saahaz_client::store::Store;
use saahaz_core::{CategoryId, ProductId};

fn print_product_line(product: &Product) {
    let flag = if product.featured { " [featured]" } else { "" };
    println!(
        "{}  {}  {}{}",
        product.id, product.name, product.price, flag
    );
}

/// List products, optionally filtered.
pub async fn products(
    store: &Store,
    category: Option<String>,
    featured: bool,
) -> Result<(), ApiError> {
    let filter = match (category, featured) {
        (Some(id), _) => ProductFilter::in_category(CategoryId::new(id)),
        (None, true) => ProductFilter::featured(),
        (None, false) => ProductFilter::all(),
    };

    let products = store.api().products(&filter).await?;
    if products.is_empty() {
        println!("No products");
        return Ok(());
    }
    for product in &products {
        print_product_line(product);
    }
    Ok(())
}

/// Show one product in full.
pub async fn product(store: &Store, id: &str) -> Result<(), ApiError> {
    let product = store.api().product(&ProductId::new(id)).await?;

    println!("{}  ({})", product.name, product.id);
    println!("  {}", product.description);
    println!("  Price: {}", product.price);
    if !product.sizes.is_empty() {
        println!("  Sizes: {}", product.sizes.join(", "));
    }
    if !product.colors.is_empty() {
        println!("  Colors: {}", product.colors.join(", "));
    }
    println!("  In stock: {}", product.inventory);
    Ok(())
}

/// List categories.
pub async fn categories(store: &Store) -> Result<(), ApiError> {
    let categories = store.api().categories().await?;
    for category in &categories {
        match &category.description {
            Some(description) => println!("{}  {}  - {}", category.id, category.name, description),
            None => println!("{}  {}", category.id, category.name),
        }
    }
    Ok(())
}

/// Search the catalog by case-insensitive substring on name or description.
pub async fn search(store: &Store, query: &str) -> Result<(), ApiError> {
    let catalog = store.api().products(&ProductFilter::all()).await?;
    let mut surface = HeaderSearch::new(catalog);
    surface.set_query(query);

    if surface.results().is_empty() {
        println!("No matches for \"{query}\"");
        return Ok(());
    }
    for product in surface.results() {
        print_product_line(product);
    }
    Ok(())
}
