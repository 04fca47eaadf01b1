//! Cart commands.

#![allow(clippy::print_stdout)]

use saahaz_client::api::types::ProductFilter;
use saahaz_client::cart::VariantKey;
use saahaz_client::store::Store;
use saahaz_core::ProductId;

fn variant_label(size: Option<&str>, color: Option<&str>) -> String {
    match (size, color) {
        (Some(size), Some(color)) => format!(" ({size}, {color})"),
        (Some(size), None) => format!(" ({size})"),
        (None, Some(color)) => format!(" ({color})"),
        (None, None) => String::new(),
    }
}

/// Add a product variant to the cart.
pub fn add(
    store: &mut Store,
    product_id: String,
    quantity: u32,
    size: Option<String>,
    color: Option<String>,
) {
    let label = variant_label(size.as_deref(), color.as_deref());
    store.add_item(ProductId::new(&product_id), quantity, size, color);
    println!(
        "Added {quantity} x {product_id}{label}; cart now has {} item(s)",
        store.item_count()
    );
}

/// Remove a cart line by its exact variant key.
pub fn remove(store: &mut Store, product_id: String, size: Option<String>, color: Option<String>) {
    let key = VariantKey::new(ProductId::new(product_id), size, color);
    store.remove_item(&key);
    println!("Removed; cart now has {} item(s)", store.item_count());
}

/// Set a line's quantity; zero removes it.
pub fn update(
    store: &mut Store,
    product_id: String,
    quantity: u32,
    size: Option<String>,
    color: Option<String>,
) {
    let key = VariantKey::new(ProductId::new(product_id), size, color);
    store.update_quantity(&key, quantity);
    println!("Updated; cart now has {} item(s)", store.item_count());
}

/// Show the cart with line prices where the catalog is reachable.
pub async fn show(store: &Store) {
    if store.cart().is_empty() {
        println!("Cart is empty");
        return;
    }

    // Prices are display-only here; checkout recomputes them. An
    // unreachable backend just means lines print without totals.
    let catalog = store
        .api()
        .products(&ProductFilter::all())
        .await
        .unwrap_or_default();
    let price_of = |id: &ProductId| {
        catalog
            .iter()
            .find(|product| &product.id == id)
            .map(|product| product.price)
    };

    for line in store.cart().lines() {
        let label = variant_label(line.size.as_deref(), line.color.as_deref());
        match price_of(&line.product_id) {
            Some(price) => println!(
                "{} x {}{}  {}",
                line.quantity,
                line.product_id,
                label,
                price.times(line.quantity)
            ),
            None => println!("{} x {}{}", line.quantity, line.product_id, label),
        }
    }
    println!("Items: {}", store.item_count());
    println!("Subtotal: {}", store.cart().subtotal(price_of));
}

/// Empty the cart.
pub fn clear(store: &mut Store) {
    store.clear_cart();
    println!("Cart cleared");
}
