//! Back-office commands. These go straight to the API client; admin writes
//! never touch the cart/session store.

#![allow(clippy::print_stdout)]

use rust_decimal::Decimal;

use saahaz_client::api::ApiError;
use saahaz_client::api::types::{CategoryInput, ProductInput};
use saahaz_client::store::Store;
use saahaz_core::{CategoryId, OrderId, OrderStatus, Price, ProductId};

#[allow(clippy::too_many_arguments)]
pub async fn product_create(
    store: &Store,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    sizes: Vec<String>,
    colors: Vec<String>,
    images: Vec<String>,
    inventory: u32,
    featured: bool,
) -> Result<(), ApiError> {
    let input = ProductInput {
        name,
        description,
        price: Price::new(price),
        category_id: CategoryId::new(category),
        images,
        sizes,
        colors,
        inventory,
        featured,
    };
    let product = store.api().create_product(&input).await?;
    println!("Created product {} ({})", product.name, product.id);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn product_update(
    store: &Store,
    id: &str,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    sizes: Vec<String>,
    colors: Vec<String>,
    images: Vec<String>,
    inventory: u32,
    featured: bool,
) -> Result<(), ApiError> {
    let input = ProductInput {
        name,
        description,
        price: Price::new(price),
        category_id: CategoryId::new(category),
        images,
        sizes,
        colors,
        inventory,
        featured,
    };
    let product = store.api().update_product(&ProductId::new(id), &input).await?;
    println!("Updated product {} ({})", product.name, product.id);
    Ok(())
}

pub async fn product_delete(store: &Store, id: &str) -> Result<(), ApiError> {
    store.api().delete_product(&ProductId::new(id)).await?;
    println!("Deleted product {id}");
    Ok(())
}

pub async fn category_create(
    store: &Store,
    name: String,
    description: Option<String>,
    image: Option<String>,
) -> Result<(), ApiError> {
    let input = CategoryInput {
        name,
        description,
        image,
    };
    let category = store.api().create_category(&input).await?;
    println!("Created category {} ({})", category.name, category.id);
    Ok(())
}

pub async fn category_update(
    store: &Store,
    id: &str,
    name: String,
    description: Option<String>,
    image: Option<String>,
) -> Result<(), ApiError> {
    let input = CategoryInput {
        name,
        description,
        image,
    };
    let category = store
        .api()
        .update_category(&CategoryId::new(id), &input)
        .await?;
    println!("Updated category {} ({})", category.name, category.id);
    Ok(())
}

pub async fn category_delete(store: &Store, id: &str) -> Result<(), ApiError> {
    store.api().delete_category(&CategoryId::new(id)).await?;
    println!("Deleted category {id}");
    Ok(())
}

pub async fn order_status(store: &Store, id: &str, status: OrderStatus) -> Result<(), ApiError> {
    store
        .api()
        .update_order_status(&OrderId::new(id), status)
        .await?;
    println!("Order {id} is now {status}");
    Ok(())
}
