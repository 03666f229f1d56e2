use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::money::decimal_text;
use crate::domain::order::{NewOrder, NewOrderItem, Order, PaymentMethod};
use crate::errors::AppError;
use crate::handlers::extractors::CurrentUser;
use crate::state::AppState;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    #[serde(with = "decimal_text")]
    #[schema(value_type = String, example = "9.99")]
    pub price: BigDecimal,
    pub supplier_id: Option<i32>,
}

/// Checkout payload. The owning user comes from the session, never the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Subtotal plus shipping, two decimals, e.g. "30.99"
    #[serde(with = "decimal_text")]
    #[schema(value_type = String, example = "30.99")]
    pub total_amount: BigDecimal,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<CreateOrderItemRequest>,
}

impl CreateOrderRequest {
    pub fn into_new_order(self, user_id: i32) -> NewOrder {
        NewOrder {
            user_id,
            total_amount: self.total_amount,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            shipping_address: self.shipping_address,
            payment_method: self.payment_method,
            items: self
                .items
                .into_iter()
                .map(|i| NewOrderItem {
                    product_id: i.product_id,
                    product_name: i.product_name,
                    quantity: i.quantity,
                    price: i.price,
                    supplier_id: i.supplier_id,
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Creates an order and its items for the logged-in user. The order is only
/// stored when every item names a known supplier and the total matches the
/// items plus one shipping fee per distinct supplier.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = Order),
        (status = 400, description = "Invalid order data"),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let created = state
        .orders
        .create_order(body.into_inner().into_new_order(user.id))?;
    Ok(HttpResponse::Created().json(created.order))
}

/// GET /api/orders/my-orders
///
/// Orders placed by the logged-in user, without their items.
#[utoipa::path(
    get,
    path = "/api/orders/my-orders",
    responses(
        (status = 200, description = "The caller's orders", body = [Order]),
        (status = 401, description = "Not logged in"),
    ),
    tag = "orders"
)]
pub async fn my_orders(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.orders.list_orders_for_user(user.id)?))
}
