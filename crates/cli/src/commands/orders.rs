//! Checkout and order history commands.

#![allow(clippy::print_stdout)]

use std::str::FromStr;

use saahaz_client::api::ApiError;
use saahaz_client::store::Store;
use saahaz_core::DeliveryOption;

/// Submit the cart as an order.
pub async fn checkout(
    store: &mut Store,
    address: String,
    phone: String,
    delivery: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let option = DeliveryOption::from_str(delivery)?;
    let order = store.place_order(address, phone, option).await?;

    println!("Order placed: {}", order.id);
    println!("  Status: {}", order.status);
    println!("  Subtotal: {}", order.subtotal);
    println!(
        "  Delivery ({}): {}",
        order.delivery_option, order.delivery_charge
    );
    println!("  Total: {}", order.total_amount);
    Ok(())
}

/// List orders: own orders for customers, all orders for admins.
pub async fn list(store: &Store) -> Result<(), ApiError> {
    let orders = store.api().orders().await?;
    if orders.is_empty() {
        println!("No orders");
        return Ok(());
    }

    for order in &orders {
        println!(
            "{}  {}  {}  {} item(s)  {}",
            order.id,
            order.created_at.format("%Y-%m-%d"),
            order.status,
            order.items.iter().map(|line| line.quantity).sum::<u32>(),
            order.total_amount,
        );
    }
    Ok(())
}
