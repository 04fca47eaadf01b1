//! Wire types for the Saahaz backend REST API.
//!
//! Field names match the backend's JSON exactly; the client treats catalog
//! and order records as DTOs owned and validated by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use saahaz_core::{
    CategoryId, DeliveryOption, Email, OrderId, OrderStatus, Price, ProductId, UserId,
};

use crate::cart::CartLine;

/// Authenticated user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response from login and register: bearer credential plus user record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: User,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Profile update request body. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category_id: CategoryId,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub inventory: u32,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Product create/update request body (admin).
#[derive(Debug, Clone, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub inventory: u32,
    pub featured: bool,
}

/// Filters for the product listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub featured: Option<bool>,
}

impl ProductFilter {
    /// No filtering: the full catalog.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            category_id: None,
            featured: None,
        }
    }

    /// Only featured products.
    #[must_use]
    pub const fn featured() -> Self {
        Self {
            category_id: None,
            featured: Some(true),
        }
    }

    /// Products in one category.
    #[must_use]
    pub const fn in_category(category_id: CategoryId) -> Self {
        Self {
            category_id: Some(category_id),
            featured: None,
        }
    }
}

/// Catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Category create/update request body (admin).
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Acknowledgement body for delete and status-update endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message: String,
}

/// A placed order as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartLine>,
    pub subtotal: Price,
    pub delivery_charge: Price,
    pub total_amount: Price,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub phone: String,
    #[serde(default)]
    pub delivery_option: DeliveryOption,
    #[serde(default)]
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Checkout submission. `items` mirrors the cart-line wire shape; the
/// backend recomputes the subtotal authoritatively from its own prices.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreate {
    pub items: Vec<CartLine>,
    pub delivery_address: String,
    pub phone: String,
    pub delivery_option: DeliveryOption,
    pub delivery_charge: Price,
    pub subtotal: Price,
    pub total: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_backend_shape() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "5f0c...",
                "email": "user@example.com",
                "name": "Test User",
                "is_admin": false,
                "address": null,
                "phone": "+92 300 1234567",
                "created_at": "2025-08-25T10:00:00+00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(user.name, "Test User");
        assert_eq!(user.phone.as_deref(), Some("+92 300 1234567"));
        assert!(!user.is_admin);
    }

    #[test]
    fn test_product_defaults_for_optional_collections() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "p-1",
                "name": "Tee",
                "description": "A tee",
                "price": 1499.0,
                "category_id": "c-1",
                "created_at": "2025-08-25T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert!(product.sizes.is_empty());
        assert!(product.colors.is_empty());
        assert_eq!(product.inventory, 0);
        assert!(!product.featured);
    }

    #[test]
    fn test_profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            name: Some("New Name".to_string()),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, "{\"name\":\"New Name\"}");
    }

    #[test]
    fn test_order_create_items_use_cart_line_shape() {
        let order = OrderCreate {
            items: vec![CartLine {
                product_id: ProductId::new("p-1"),
                quantity: 2,
                size: Some("M".to_string()),
                color: None,
            }],
            delivery_address: "123 Fashion Street, Lahore".to_string(),
            phone: "+92 300 1234567".to_string(),
            delivery_option: DeliveryOption::Standard,
            delivery_charge: Price::from_cents(20000),
            subtotal: Price::from_cents(299800),
            total: Price::from_cents(319800),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["items"][0]["product_id"], "p-1");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["size"], "M");
        assert_eq!(json["delivery_option"], "standard");
    }
}
