pub mod admin;
pub mod auth;
pub mod extractors;
pub mod health;
pub mod orders;
pub mod products;

use actix_web::{error, web};

use crate::errors::AppError;

/// Registers every route plus the extractor error handlers, so malformed
/// bodies, ids and queries answer with the same JSON error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::Error::from(AppError::invalid_field("Invalid request body", "body", detail))
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::Error::from(AppError::invalid_field("Invalid ID", "id", detail))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::Error::from(AppError::invalid_field("Invalid query string", "query", detail))
    }))
    .route("/health", web::get().to(health::health))
    .service(
        web::scope("/api")
            .route("/products", web::get().to(products::list_products))
            .route("/products", web::post().to(products::create_product))
            .route(
                "/products/category/{category}",
                web::get().to(products::list_by_category),
            )
            .route("/products/{id}", web::get().to(products::get_product))
            .route("/orders", web::post().to(orders::create_order))
            .route("/orders/my-orders", web::get().to(orders::my_orders))
            .route("/admin/orders", web::get().to(admin::list_orders))
            .route("/admin/orders/{id}", web::get().to(admin::get_order))
            .route(
                "/admin/orders/{id}/status",
                web::patch().to(admin::update_order_status),
            )
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/user", web::get().to(auth::current_user)),
    );
}
