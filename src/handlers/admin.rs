use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDetails, OrderStatus};
use crate::errors::AppError;
use crate::handlers::extractors::AdminUser;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of pending, processing, shipped, delivered, cancelled
    #[serde(default)]
    pub status: String,
}

/// GET /api/admin/orders
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    responses(
        (status = 200, description = "Every order, without items", body = [Order]),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Admin access required"),
    ),
    tag = "admin"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.orders.list_orders()?))
}

/// GET /api/admin/orders/{id}
///
/// Returns the order together with its items.
#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderDetails),
        (status = 400, description = "Invalid order id"),
        (status = 404, description = "Order not found"),
    ),
    tag = "admin"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.orders.get_order(path.into_inner())?))
}

/// PATCH /api/admin/orders/{id}/status
///
/// Moves the order to any of the five statuses; there is no enforced order.
#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 400, description = "Missing or unknown status"),
        (status = 404, description = "Order not found"),
    ),
    tag = "admin"
)]
pub async fn update_order_status(
    state: web::Data<AppState>,
    AdminUser(admin): AdminUser,
    path: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let raw = body.into_inner().status;
    if raw.is_empty() {
        return Err(AppError::invalid_field("Status is required", "status", "is required"));
    }
    let status: OrderStatus = raw
        .parse()
        .map_err(|e: DomainError| {
            AppError::invalid_field("Invalid order status", "status", e.to_string())
        })?;

    let updated = state.orders.update_status(order_id, status)?;
    log::info!("Admin {} set order {} to {}", admin.username, order_id, status);
    Ok(HttpResponse::Ok().json(updated))
}
