//! Integration tests for the Saahaz storefront client.
//!
//! Tests run the real [`saahaz_client::store::Store`] against a `wiremock`
//! backend and a `tempfile` state directory, exercising the full path from
//! store operation through HTTP to persisted state. No live backend is
//! needed.
//!
//! # Test Categories
//!
//! - `store_lifecycle` - startup restoration, login, logout
//! - `checkout` - order submission and cart clearing
//! - `api_errors` - backend error mapping and catalog caching

use std::path::Path;

use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

use saahaz_client::config::ClientConfig;
use saahaz_client::store::Store;

/// Build a store persisting under `state_dir` and talking to `server`.
pub fn store_for(server: &MockServer, state_dir: &Path) -> Store {
    let api_url: Url = server.uri().parse().expect("mock server URI is a URL");
    Store::from_config(&ClientConfig {
        api_url,
        state_dir: state_dir.to_path_buf(),
    })
}

/// A user record in the backend's wire shape.
#[must_use]
pub fn user_json(id: &str, email: &str, name: &str, is_admin: bool) -> Value {
    json!({
        "id": id,
        "email": email,
        "name": name,
        "is_admin": is_admin,
        "address": null,
        "phone": null,
        "created_at": "2025-08-25T10:00:00+00:00"
    })
}

/// A login/register response body.
#[must_use]
pub fn auth_json(token: &str, user: Value) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user
    })
}

/// A catalog product in the backend's wire shape.
#[must_use]
pub fn product_json(id: &str, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "category_id": "c-1",
        "images": [],
        "sizes": ["S", "M", "L"],
        "colors": ["Blue"],
        "inventory": 10,
        "featured": false,
        "created_at": "2025-08-25T10:00:00+00:00"
    })
}

/// A placed order in the backend's wire shape.
#[must_use]
pub fn order_json(id: &str, items: Value, subtotal: f64, delivery_charge: f64) -> Value {
    json!({
        "id": id,
        "user_id": "u-1",
        "items": items,
        "subtotal": subtotal,
        "delivery_charge": delivery_charge,
        "total_amount": subtotal + delivery_charge,
        "status": "pending",
        "delivery_address": "123 Fashion Street, Lahore",
        "phone": "+92 300 1234567",
        "delivery_option": "standard",
        "payment_method": "cash_on_delivery",
        "created_at": "2025-08-25T10:00:00+00:00",
        "updated_at": "2025-08-25T10:00:00+00:00"
    })
}
