//! Checkout flow: cart contents become an order, then the cart is cleared.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use saahaz_core::{DeliveryOption, ProductId};
use saahaz_integration_tests::{order_json, product_json, store_for};

#[tokio::test]
async fn test_place_order_submits_lines_and_clears_cart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json("p-1", "Classic Tee", 1500.0)])),
        )
        .mount(&server)
        .await;

    let items = json!([{"product_id": "p-1", "quantity": 2, "size": "M"}]);
    Mock::given(method("POST"))
        .and(path("/orders"))
        // Subtotal from catalog price, standard delivery on top.
        .and(body_partial_json(json!({
            "items": [{"product_id": "p-1", "quantity": 2, "size": "M"}],
            "delivery_option": "standard",
            "subtotal": 3000.0,
            "delivery_charge": 200.0,
            "total": 3200.0
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(order_json("o-1", items, 3000.0, 200.0)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_for(&server, dir.path());
    store.initialize().await;
    store.add_item(ProductId::new("p-1"), 2, Some("M".into()), None);

    let order = store
        .place_order(
            "123 Fashion Street, Lahore".into(),
            "+92 300 1234567".into(),
            DeliveryOption::Standard,
        )
        .await
        .expect("checkout");

    assert_eq!(order.id.as_str(), "o-1");
    assert!(store.cart().is_empty());
    // The snapshot is deleted, not rewritten as an empty array.
    assert!(!dir.path().join("cart").exists());
}

#[tokio::test]
async fn test_rejected_order_leaves_cart_intact() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Product not found"})),
        )
        .mount(&server)
        .await;

    let mut store = store_for(&server, dir.path());
    store.initialize().await;
    store.add_item(ProductId::new("p-gone"), 1, None, None);

    let result = store
        .place_order("addr".into(), "phone".into(), DeliveryOption::Free)
        .await;

    assert!(result.is_err());
    assert_eq!(store.item_count(), 1);
    assert!(dir.path().join("cart").exists());
}
