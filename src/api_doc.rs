use utoipa::OpenApi;

use crate::domain::errors::FieldError;
use crate::domain::order::{Order, OrderDetails, OrderItem, OrderStatus, PaymentMethod};
use crate::domain::product::Product;
use crate::domain::user::UserView;
use crate::handlers::admin::UpdateStatusRequest;
use crate::handlers::auth::Credentials;
use crate::handlers::orders::{CreateOrderItemRequest, CreateOrderRequest};
use crate::handlers::products::CreateProductRequest;
use crate::handlers::{admin, auth, health, orders, products};

#[derive(OpenApi)]
#[openapi(
    info(title = "Storefront API", description = "Catalog, checkout and order administration"),
    paths(
        health::health,
        products::list_products,
        products::list_by_category,
        products::get_product,
        products::create_product,
        orders::create_order,
        orders::my_orders,
        admin::list_orders,
        admin::get_order,
        admin::update_order_status,
        auth::register,
        auth::login,
        auth::logout,
        auth::current_user,
    ),
    components(schemas(
        Product,
        CreateProductRequest,
        Order,
        OrderItem,
        OrderDetails,
        OrderStatus,
        PaymentMethod,
        CreateOrderRequest,
        CreateOrderItemRequest,
        UpdateStatusRequest,
        Credentials,
        UserView,
        FieldError,
    )),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Checkout and order history"),
        (name = "admin", description = "Order administration"),
        (name = "auth", description = "Accounts and sessions"),
    )
)]
pub struct ApiDoc;
