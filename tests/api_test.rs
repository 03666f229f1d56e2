//! Handler tests against the full route table, in-process via
//! `actix_web::test`.

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use storefront::handlers::{self, extractors::SESSION_COOKIE};
use storefront::{AppConfig, AppState};

const ADMIN_PASSWORD: &str = "s3cret-admin";

fn state() -> web::Data<AppState> {
    let config = AppConfig {
        admin_password: ADMIN_PASSWORD.to_string(),
        ..AppConfig::default()
    };
    web::Data::new(AppState::in_memory(&config).expect("state should build"))
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("response should set the session cookie")
        .into_owned()
}

fn credentials(username: &str, password: &str) -> Value {
    json!({ "username": username, "password": password })
}

/// (10.00 × 2) + (5.00 × 1) shipped by Fast Express: 25.00 + 5.99.
fn order_body(total: &str, second_supplier: Value) -> Value {
    json!({
        "totalAmount": total,
        "customerName": "Ada Lovelace",
        "customerEmail": "ada@example.com",
        "shippingAddress": "12 St James's Sq, London, LN SW1Y",
        "paymentMethod": "credit_card",
        "items": [
            { "productId": 1, "productName": "Smartwatch X1", "quantity": 2, "price": "10.00", "supplierId": 1 },
            { "productId": 6, "productName": "Leather Wallet", "quantity": 1, "price": "5.00", "supplierId": second_supplier }
        ]
    })
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn catalog_lists_filters_and_finds_products() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let all: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/products").to_request()).await;
    assert_eq!(all.len(), 15);
    assert!(all[0]["price"].is_string());

    let services: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/products/category/services").to_request(),
    )
    .await;
    assert_eq!(services.len(), 3);
    assert!(services.iter().all(|p| p["isService"] == true));

    let everything: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/products/category/all").to_request(),
    )
    .await;
    assert_eq!(everything.len(), 15);

    let sorted: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/products?sort=price-asc&maxPrice=100").to_request(),
    )
    .await;
    let prices: Vec<f64> = sorted
        .iter()
        .map(|p| p["price"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(!prices.is_empty());
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    assert!(prices.iter().all(|p| *p <= 100.0));

    let one: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/products/1").to_request()).await;
    assert_eq!(one["id"], 1);
}

#[actix_web::test]
async fn product_lookup_errors() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/999").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product not found");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/abc").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid ID");
    assert_eq!(body["errors"][0]["field"], "id");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/products?minPrice=cheap").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_product_validates_and_stores() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({
                "name": "Desk Lamp",
                "description": "Warm light",
                "price": "24.50",
                "category": "home",
                "image": "https://img.example/lamp.jpg",
                "rating": "4.1"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["id"], 16);
    assert_eq!(created["isService"], false);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({
                "name": "",
                "description": "Nothing",
                "price": "-1",
                "category": "home",
                "image": "x",
                "rating": "4"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid product data");
    assert!(body["errors"].as_array().unwrap().len() >= 2);
}

#[actix_web::test]
async fn malformed_body_is_a_field_error() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid request body");
    assert_eq!(body["errors"][0]["field"], "body");
}

#[actix_web::test]
async fn register_login_logout_cycle() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(credentials("ada", "analytical"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let cookie = session_cookie(&resp);
    let user: Value = test::read_body_json(resp).await;
    assert_eq!(user["username"], "ada");
    assert_eq!(user["isAdmin"], false);
    assert!(user.get("passwordHash").is_none());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(credentials("ada", "again"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let me: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/user").cookie(cookie.clone()).to_request(),
    )
    .await;
    assert_eq!(me["username"], "ada");

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/logout").cookie(cookie.clone()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/user").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(credentials("ada", "wrong"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid username or password");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(credentials("ada", "analytical"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn orders_require_login_and_a_consistent_total() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .set_json(order_body("30.99", json!(1)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(credentials("buyer", "pw"))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&resp);

    // Shipping charged twice for the same supplier.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .cookie(cookie.clone())
            .set_json(order_body("36.98", json!(1)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid order data");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .cookie(cookie.clone())
            .set_json(order_body("25.00", Value::Null))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .cookie(cookie.clone())
            .set_json(order_body("30.99", json!(99)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .cookie(cookie.clone())
            .set_json(order_body("30.99", json!(1)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = test::read_body_json(resp).await;
    assert_eq!(order["totalAmount"], "30.99");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["paymentMethod"], "credit_card");

    let mine: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/orders/my-orders").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["id"], order["id"]);
}

#[actix_web::test]
async fn admin_routes_enforce_roles_and_update_status() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/admin/orders").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(credentials("shopper", "pw"))
            .to_request(),
    )
    .await;
    let shopper = session_cookie(&resp);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/admin/orders").cookie(shopper.clone()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .cookie(shopper)
            .set_json(order_body("30.99", json!(1)))
            .to_request(),
    )
    .await;
    let order: Value = test::read_body_json(resp).await;
    let order_id = order["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(credentials("admin", ADMIN_PASSWORD))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let admin = session_cookie(&resp);

    let all: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/admin/orders").cookie(admin.clone()).to_request(),
    )
    .await;
    assert_eq!(all.len(), 1);

    let details: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/admin/orders/{}", order_id))
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert_eq!(details["id"], order_id);
    assert_eq!(details["items"].as_array().unwrap().len(), 2);
    assert_eq!(details["items"][1]["supplierId"], 1);

    let updated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/orders/{}/status", order_id))
            .cookie(admin.clone())
            .set_json(json!({ "status": "shipped" }))
            .to_request(),
    )
    .await;
    assert_eq!(updated["status"], "shipped");

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/orders/{}/status", order_id))
            .cookie(admin.clone())
            .set_json(json!({ "status": "lost" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "status");

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/api/admin/orders/4242/status")
            .cookie(admin.clone())
            .set_json(json!({ "status": "delivered" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/admin/orders/4242").cookie(admin).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
