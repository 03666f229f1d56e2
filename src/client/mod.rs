//! Buyer and admin side of the storefront: talks to the REST API, turns the
//! cart into an order, and caches the admin order views.

pub mod admin;
pub mod http;
pub mod submission;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use thiserror::Error;

use crate::cart::CartError;
use crate::domain::order::{Order, OrderDetails, OrderStatus};
use crate::handlers::orders::CreateOrderRequest;

pub use admin::{AdminOrderViewer, OrderCache};
pub use http::HttpStorefrontClient;
pub use submission::{build_order_request, submit_order, BuyerDetails};

#[derive(Debug, Error)]
pub enum ClientError {
    /// A non-2xx answer; `message` is the server's own wording.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Please select a supplier for all items before checkout")]
    MissingSuppliers(Vec<u64>),

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Invalid order status '{0}'")]
    InvalidStatus(String),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Backend calls that order submission and the admin viewer depend on.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn create_order(&self, order: &CreateOrderRequest) -> Result<Order, ClientError>;
    async fn admin_orders(&self) -> Result<Vec<Order>, ClientError>;
    async fn admin_order(&self, id: i32) -> Result<OrderDetails, ClientError>;
    async fn update_order_status(&self, id: i32, status: OrderStatus) -> Result<Order, ClientError>;
}
