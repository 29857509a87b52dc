//! End-to-end Store behavior against a mockito backend.

use jsonwebtoken::{encode, EncodingKey, Header};
use mockito::Matcher;
use serde_json::json;

use storefront_client::{ClientConfig, RequestError, Store};
use storefront_core::fallback;
use storefront_core::state::AuthAction;
use storefront_core::types::{CartLine, Credentials, PlaceOrder, Registration};

// === Helpers ===

fn store_for(server: &mockito::ServerGuard) -> Store {
    let config = ClientConfig::for_base_url(format!("{}/api", server.url()));
    Store::from_config(&config).expect("Store should build from a valid config")
}

fn jwt(expires_in: i64) -> String {
    let claims = json!({
        "user_id": 1,
        "email": "jane@example.com",
        "role": "customer",
        "exp": chrono::Utc::now().timestamp() + expires_in,
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap()
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Jane",
        "email": "jane@example.com",
        "role": "customer",
        "created_at": "2024-01-01T00:00:00Z"
    })
}

fn cart_json() -> String {
    json!({
        "items": [
            {
                "id": 11, "product_id": 1, "product_name": "Classic White T-Shirt",
                "base_price": 100.0, "discount_percentage": 0, "quantity": 2,
                "color_id": 1, "color_name": "White", "size_id": 2, "size_name": "M",
                "image_url": "/images/product-1.jpg", "in_stock": 12
            },
            {
                "id": 12, "product_id": 2, "product_name": "Summer Floral Dress",
                "base_price": 50.0, "discount_percentage": 10, "quantity": 1,
                "color_id": 4, "color_name": "Blue", "size_id": 7, "size_name": "S",
                "image_url": "", "in_stock": 3
            }
        ],
        "summary": {"total_items": 3, "sub_total": 245.0}
    })
    .to_string()
}

// === Auth ===

#[tokio::test]
async fn test_login_persists_token_and_authenticates() {
    let mut server = mockito::Server::new_async().await;
    let token = jwt(3600);

    let mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "jane@example.com",
            "password": "secret123"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "Login successful", "user": user_json(), "token": token}).to_string())
        .create_async()
        .await;

    let store = store_for(&server);
    store
        .login(Credentials {
            email: "jane@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .expect("login should succeed");

    {
        let state = store.state();
        assert!(state.auth.is_authenticated);
        assert_eq!(state.auth.user.as_ref().map(|u| u.name.as_str()), Some("Jane"));
        assert_eq!(state.auth.token.as_deref(), Some(token.as_str()));
    }
    assert_eq!(store.tokens().get().as_deref(), Some(token.as_str()));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_failure_resets_session() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Invalid credentials"}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store.tokens().set("stale-credential");

    let result = store
        .login(Credentials {
            email: "jane@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    match result {
        Err(RequestError::Status { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("Expected RequestError::Status, got {other:?}"),
    }

    let state = store.state();
    assert!(!state.auth.is_authenticated);
    assert!(state.auth.user.is_none());
    assert_eq!(state.auth.status.error.as_deref(), Some("Invalid credentials"));
    assert!(store.tokens().get().is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_register_does_not_log_in() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/auth/register")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"message": "User registered successfully", "user": user_json(), "token": jwt(3600)})
                .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    store
        .register(Registration {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .expect("register should succeed");

    let state = store.state();
    assert!(!state.auth.is_authenticated);
    assert!(state.auth.user.is_none());
    assert!(!state.auth.status.loading);
    assert!(store.tokens().get().is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_current_user_clears_session() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/auth/me")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Invalid or expired token"}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store.tokens().set(&jwt(3600));

    let result = store.fetch_current_user().await;
    assert!(result.unwrap_err().is_unauthorized());

    let state = store.state();
    assert!(!state.auth.is_authenticated);
    assert_eq!(state.auth.status.error.as_deref(), Some("Invalid or expired token"));
    assert!(store.tokens().get().is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_logout_stops_sending_bearer() {
    let mut server = mockito::Server::new_async().await;
    let token = jwt(3600);

    let with_bearer = server
        .mock("GET", "/api/cart")
        .match_header("authorization", format!("Bearer {token}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(cart_json())
        .create_async()
        .await;
    let anonymous = server
        .mock("GET", "/api/wishlist")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Authorization header is required"}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store.tokens().set(&token);
    store.fetch_cart().await.expect("authenticated fetch");

    store.logout();
    {
        let state = store.state();
        assert!(state.auth.user.is_none());
        assert!(state.auth.token.is_none());
        assert!(!state.auth.is_authenticated);
    }

    let result = store.fetch_wishlist().await;
    assert_eq!(result.unwrap_err().status(), Some(401));
    assert_eq!(
        store.state().wishlist.status.error.as_deref(),
        Some("Authorization header is required")
    );

    with_bearer.assert_async().await;
    anonymous.assert_async().await;
}

#[tokio::test]
async fn test_expired_token_is_purged_and_not_sent() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/products")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"products": [], "meta": {"page": 1, "limit": 12, "total": 0}}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store.tokens().set(&jwt(-60));
    assert!(!store.tokens().is_valid());
    assert!(store.tokens().get().is_none());

    store.fetch_products(Default::default()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_expiring_mid_use_resets_auth() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/cart")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Authorization header is required"}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    // A session restored earlier whose credential has since run out.
    let token = jwt(-1);
    store.tokens().set(&token);
    store.dispatch(AuthAction::Restored { token });
    assert!(store.state().auth.is_authenticated);

    let result = store.fetch_cart().await;
    assert_eq!(result.unwrap_err().status(), Some(401));

    let state = store.state();
    assert!(!store.tokens().is_valid());
    assert!(!state.auth.is_authenticated);
    assert!(state.auth.token.is_none());
    assert!(state.auth.user.is_none());

    mock.assert_async().await;
}

// === Cart ===

#[tokio::test]
async fn test_add_to_cart_refetches_cart() {
    let mut server = mockito::Server::new_async().await;

    let add = server
        .mock("POST", "/api/cart")
        .match_body(Matcher::Json(json!({
            "product_id": 1, "color_id": 1, "size_id": 2, "quantity": 2
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Item added to cart", "id": 11}"#)
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/api/cart")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(cart_json())
        .create_async()
        .await;

    let store = store_for(&server);
    store
        .add_to_cart(CartLine {
            product_id: 1,
            color_id: 1,
            size_id: 2,
            quantity: 2,
        })
        .await
        .expect("add should succeed");

    let state = store.state();
    let totals = state.cart.totals();
    assert_eq!(state.cart.items.len(), 2);
    assert_eq!(totals.total_items, 3);
    assert_eq!(totals.subtotal.cents(), 24_500);
    assert!(!state.cart.status.loading);

    add.assert_async().await;
    fetch.assert_async().await;
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let mut server = mockito::Server::new_async().await;

    let fetch = server
        .mock("GET", "/api/cart")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(cart_json())
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/cart/11")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Item removed from cart"}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store.fetch_cart().await.unwrap();
    store.update_cart_item(11, 0).await.unwrap();

    let state = store.state();
    assert_eq!(state.cart.items.len(), 1);
    assert_eq!(state.cart.totals().total_items, 1);
    assert_eq!(state.cart.totals().subtotal.cents(), 4_500);

    fetch.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_clear_cart_zeroes_totals() {
    let mut server = mockito::Server::new_async().await;

    let _fetch = server
        .mock("GET", "/api/cart")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(cart_json())
        .create_async()
        .await;
    let clear = server
        .mock("DELETE", "/api/cart")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Cart cleared"}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    store.fetch_cart().await.unwrap();
    store.clear_cart().await.unwrap();

    let state = store.state();
    assert!(state.cart.items.is_empty());
    assert_eq!(state.cart.totals().total_items, 0);
    assert!(state.cart.totals().subtotal.is_zero());

    clear.assert_async().await;
}

#[tokio::test]
async fn test_failed_follow_up_read_reports_read_failure() {
    let mut server = mockito::Server::new_async().await;

    let _add = server
        .mock("POST", "/api/cart")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Item added to cart", "id": 11}"#)
        .create_async()
        .await;
    let _fetch = server
        .mock("GET", "/api/cart")
        .with_status(500)
        .create_async()
        .await;

    let store = store_for(&server);
    let result = store
        .add_to_cart(CartLine {
            product_id: 1,
            color_id: 1,
            size_id: 2,
            quantity: 1,
        })
        .await;

    assert_eq!(result.unwrap_err().message(), "Failed to fetch cart");
    assert_eq!(store.state().cart.status.error.as_deref(), Some("Failed to fetch cart"));
}

#[tokio::test]
async fn test_malformed_cart_is_rejected() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/cart")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"id": 1, "product_id": 2, "base_price": 10.0, "quantity": -1}]}"#)
        .create_async()
        .await;

    let store = store_for(&server);
    let result = store.fetch_cart().await;

    assert!(matches!(result, Err(RequestError::Malformed { .. })));
    let state = store.state();
    assert!(state.cart.items.is_empty());
    assert_eq!(state.cart.status.error.as_deref(), Some("Failed to fetch cart"));
}

// === Wishlist ===

#[tokio::test]
async fn test_toggle_twice_is_a_no_op() {
    let mut server = mockito::Server::new_async().await;

    let add = server
        .mock("POST", "/api/wishlist")
        .match_body(Matcher::Json(json!({"product_id": 4})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Product added to wishlist", "id": 31}"#)
        .expect(1)
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/api/wishlist")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"items": [{
                "id": 31, "product_id": 4, "product_name": "Leather Crossbody Bag",
                "product_description": "", "base_price": 89.99, "discount_percentage": 15,
                "image_url": "/images/product-4.jpg", "in_stock": true
            }]})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let remove = server
        .mock("DELETE", "/api/wishlist/31")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Product removed from wishlist"}"#)
        .expect(1)
        .create_async()
        .await;

    let store = store_for(&server);

    store.toggle_wishlist(4).await.unwrap();
    assert!(store.state().wishlist.contains(4));

    store.toggle_wishlist(4).await.unwrap();
    assert!(!store.state().wishlist.contains(4));
    assert!(store.state().wishlist.is_empty());

    add.assert_async().await;
    fetch.assert_async().await;
    remove.assert_async().await;
}

// === Products ===

#[tokio::test]
async fn test_failed_catalog_fetch_leaves_set_empty() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/products")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let store = store_for(&server);
    let result = store.fetch_products(Default::default()).await;
    assert_eq!(result.unwrap_err().message(), "Failed to fetch products");

    let state = store.state();
    assert!(state.products.products.is_empty());
    assert_eq!(state.products.status.error.as_deref(), Some("Failed to fetch products"));
    assert!(fallback::should_substitute(&state.products.products, state.products.status.loading));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_products_sends_query() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/products")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "12".into()),
            Matcher::UrlEncoded("category_id".into(), "3".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "products": [{
                    "id": 4, "name": "Leather Crossbody Bag", "description": "",
                    "category_id": 3, "category_name": "Accessories",
                    "base_price": 89.99, "discount_percentage": 15,
                    "featured": true, "primary_image": "/images/product-4.jpg",
                    "created_at": "2024-05-01T00:00:00Z"
                }],
                "meta": {"page": 2, "limit": 12, "total": 13, "total_pages": 2}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    store
        .fetch_products(storefront_core::types::ProductQuery {
            page: Some(2),
            limit: Some(12),
            category_id: Some(3),
            featured: None,
        })
        .await
        .unwrap();

    let state = store.state();
    assert_eq!(state.products.products.len(), 1);
    assert_eq!(state.products.pagination.page, 2);
    assert_eq!(state.products.pagination.total, 13);
    assert_eq!(state.products.products[0].primary_image(), Some("/images/product-4.jpg"));

    mock.assert_async().await;
}

// === Orders ===

#[tokio::test]
async fn test_place_order_loads_placed_order() {
    let mut server = mockito::Server::new_async().await;

    let place = server
        .mock("POST", "/api/orders")
        .match_body(Matcher::Json(json!({"address_id": 2, "payment_method": "card"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Order placed successfully", "order_id": 5, "total_amount": 94.98}"#)
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/api/orders/5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"order": {
                "id": 5, "total_amount": 94.98, "payment_method": "card",
                "payment_status": "pending", "order_status": "processing",
                "address": {
                    "id": 2, "name": "Home", "street": "1 Main St", "city": "Springfield",
                    "state": "IL", "postal_code": "62701", "country": "US",
                    "phone": "555-0100", "is_default": true
                },
                "items": [{
                    "product_id": 2, "product_name": "Summer Floral Dress",
                    "quantity": 2, "price_per_unit": 44.99
                }]
            }})
            .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    store
        .place_order(PlaceOrder {
            address_id: 2,
            payment_method: "card".to_string(),
        })
        .await
        .unwrap();

    let state = store.state();
    let current = state.orders.current_order.as_ref().expect("placed order is current");
    assert_eq!(current.id, 5);
    assert_eq!(current.total.cents(), 9_498);
    assert_eq!(state.orders.orders.first().map(|o| o.id), Some(5));

    place.assert_async().await;
    fetch.assert_async().await;
}
