//! Handler tests for the storefront domain
//!
//! The router is driven through `oneshot` against an in-memory document store,
//! so these cover request parsing, status codes, error bodies and what ends up
//! stored, without a MongoDB server.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use database::mongodb::bson::{Document, doc};
use domain_storefront::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::{InMemoryDocumentStore, TestDataBuilder};
use tower::ServiceExt; // For oneshot()

const PRODUCTS: &str = "product";
const CATEGORIES: &str = "category";
const ORDERS: &str = "order";
const CONTACTS: &str = "contactmessage";

fn app(store: &Arc<InMemoryDocumentStore>) -> Router {
    let repository = DocumentStorefrontRepository::new(store.clone());
    let service = StorefrontService::new(repository);
    Router::new().nest("/api", handlers::router(service))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn product(title: &str, category: &str) -> Document {
    doc! {
        "title": title,
        "description": format!("{} description", title),
        "price": 12.5,
        "category": category,
        "in_stock": true,
        "image": format!("https://cdn.example.com/{}.png", title),
    }
}

#[tokio::test]
async fn test_list_products_filters_by_category_without_ids() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store.seed(
        PRODUCTS,
        [
            product("hammer", "tools"),
            product("shirt", "apparel"),
            product("saw", "tools"),
        ],
    );

    let response = app(&store)
        .oneshot(get("/api/products?category=tools"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
    for product in &products {
        assert_eq!(product["category"], "tools");
        assert!(product.get("_id").is_none());
    }
}

#[tokio::test]
async fn test_list_products_empty_category_lists_all() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store.seed(PRODUCTS, [product("hammer", "tools"), product("rake", "garden")]);

    let response = app(&store)
        .oneshot(get("/api/products?category="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_checkout_accepts_whole_float_quantity() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let body = json!({
        "items": [{"product_id": "p1", "title": "Widget", "quantity": 2.0, "price": 5.0}],
        "total": 10.0
    });

    let response = app(&store)
        .oneshot(post_json("/api/checkout", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = store.documents(ORDERS);
    assert_eq!(stored.len(), 1);
    let items = stored[0].get_array("items").unwrap();
    let line = items[0].as_document().unwrap();
    assert_eq!(line.get_i64("quantity").unwrap(), 2);
}

#[tokio::test]
async fn test_list_products_caps_at_fifty() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store.seed(
        PRODUCTS,
        (0..60).map(|i| product(&format!("item-{}", i), "bulk")),
    );

    let response = app(&store).oneshot(get("/api/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 50);
}

#[tokio::test]
async fn test_list_products_unknown_category_is_empty() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store.seed(PRODUCTS, [product("hammer", "tools")]);

    let response = app(&store)
        .oneshot(get("/api/products?category=garden"))
        .await
        .unwrap();

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_list_products_optional_fields_are_null() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store.seed(
        PRODUCTS,
        [doc! { "title": "bare", "price": 1.0, "category": "misc" }],
    );

    let response = app(&store).oneshot(get("/api/products")).await.unwrap();

    let products: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(
        products[0],
        json!({
            "title": "bare",
            "description": null,
            "price": 1.0,
            "category": "misc",
            "in_stock": true,
            "image": null
        })
    );
}

#[tokio::test]
async fn test_list_products_invalid_stored_document_is_500() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store.seed(PRODUCTS, [doc! { "title": "", "price": 1.0, "category": "misc" }]);

    let response = app(&store).oneshot(get("/api/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("product"));
}

#[tokio::test]
async fn test_list_categories_strips_ids() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store.seed(
        CATEGORIES,
        [
            doc! { "name": "Tools", "slug": "tools", "description": "Hand tools" },
            doc! { "name": "Apparel", "slug": "apparel" },
        ],
    );

    let response = app(&store).oneshot(get("/api/categories")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let categories: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["slug"], "tools");
    assert!(categories[1]["description"].is_null());
    assert!(categories.iter().all(|c| c.get("_id").is_none()));
}

#[tokio::test]
async fn test_storage_failure_is_500_with_raw_message() {
    let store = Arc::new(InMemoryDocumentStore::failing("No servers available"));

    let response = app(&store).oneshot(get("/api/categories")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Connection failed: No servers available");
}

#[tokio::test]
async fn test_submit_contact_stores_submitted_fields() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let builder = TestDataBuilder::from_test_name("contact_stores");
    let payload = json!({
        "name": builder.name("customer", "ada"),
        "email": builder.email("ada"),
        "subject": "Order question",
        "message": "When will my widget ship?",
        "newsletter": true
    });

    let response = app(&store)
        .oneshot(post_json("/api/contact", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "success": true }));

    let stored = store.documents(CONTACTS);
    assert_eq!(stored.len(), 1);
    let mut stored = stored[0].clone();
    stored.remove("_id");
    assert_eq!(
        stored,
        doc! {
            "name": builder.name("customer", "ada"),
            "email": builder.email("ada"),
            "subject": "Order question",
            "message": "When will my widget ship?",
        }
    );
}

#[tokio::test]
async fn test_submit_contact_invalid_email_is_422_and_not_stored() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let payload = json!({
        "name": "Ada",
        "email": "not-an-email",
        "subject": "Hi",
        "message": "Hello"
    });

    let response = app(&store)
        .oneshot(post_json("/api/contact", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
    assert!(store.documents(CONTACTS).is_empty());
}

#[tokio::test]
async fn test_submit_contact_missing_email_is_422_and_not_stored() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let payload = json!({ "name": "Ada", "subject": "Hi", "message": "Hello" });

    let response = app(&store)
        .oneshot(post_json("/api/contact", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.documents(CONTACTS).is_empty());
}

#[tokio::test]
async fn test_checkout_example_scenario() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let payload = json!({
        "items": [{ "product_id": "p1", "title": "Widget", "quantity": 2, "price": 9.99 }],
        "total": 19.98,
        "customer_email": "a@b.com"
    });

    let response = app(&store)
        .oneshot(post_json("/api/checkout", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "success": true, "status": "paid" }));

    let orders = store.documents(ORDERS);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].get_str("status").unwrap(), "paid");
    assert_eq!(orders[0].get_str("currency").unwrap(), "USD");
    assert_eq!(orders[0].get_str("customer_email").unwrap(), "a@b.com");
}

#[tokio::test]
async fn test_checkout_negative_total_is_422() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let payload = json!({ "items": [], "total": -5 });

    let response = app(&store)
        .oneshot(post_json("/api/checkout", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.documents(ORDERS).is_empty());
}

#[tokio::test]
async fn test_checkout_empty_items_with_zero_total_is_accepted() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let payload = json!({ "items": [], "total": 0 });

    let response = app(&store)
        .oneshot(post_json("/api/checkout", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.documents(ORDERS).len(), 1);
}

#[tokio::test]
async fn test_checkout_invalid_item_is_422_with_path() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let builder = TestDataBuilder::from_test_name("checkout_invalid_item");
    let payload = json!({
        "items": [
            { "product_id": builder.product_id(1), "title": "Widget", "quantity": 1, "price": 5.0 },
            { "product_id": builder.product_id(2), "title": "Gadget", "quantity": 0, "price": 5.0 }
        ],
        "total": 10.0
    });

    let response = app(&store)
        .oneshot(post_json("/api/checkout", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["details"]["items[1].quantity"].is_array());
    assert!(store.documents(ORDERS).is_empty());
}

#[tokio::test]
async fn test_checkout_is_not_idempotent() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let payload = json!({
        "items": [{ "product_id": "p1", "title": "Widget", "quantity": 1, "price": 3.0 }],
        "total": 3.0
    });

    for _ in 0..2 {
        let response = app(&store)
            .oneshot(post_json("/api/checkout", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let orders = store.documents(ORDERS);
    assert_eq!(orders.len(), 2);
    assert_ne!(orders[0].get("_id"), orders[1].get("_id"));
}

#[tokio::test]
async fn test_checkout_storage_failure_is_500() {
    let store = Arc::new(InMemoryDocumentStore::failing("write concern timeout"));
    let payload = json!({ "items": [], "total": 0 });

    let response = app(&store)
        .oneshot(post_json("/api/checkout", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("write concern timeout")
    );
}

#[tokio::test]
async fn test_checkout_malformed_json_is_400() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let request = Request::builder()
        .method("POST")
        .uri("/api/checkout")
        .header("content-type", "application/json")
        .body(Body::from("{\"items\": ["))
        .unwrap();

    let response = app(&store).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.documents(ORDERS).is_empty());
}
