//! In-memory `StorefrontApi` that records how often each call is made.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{ClientError, StorefrontApi};
use crate::domain::order::{Order, OrderDetails, OrderItem, OrderStatus, PaymentMethod};
use crate::handlers::orders::CreateOrderRequest;

#[derive(Default)]
pub struct FakeApi {
    pub orders: Mutex<Vec<OrderDetails>>,
    pub create_calls: AtomicU64,
    pub list_calls: AtomicU64,
    pub detail_calls: AtomicU64,
    pub update_calls: AtomicU64,
    pub reject_with: Option<(u16, String)>,
}

impl FakeApi {
    pub fn rejecting(status: u16, message: &str) -> Self {
        Self {
            reject_with: Some((status, message.to_string())),
            ..Default::default()
        }
    }

    /// Adds a pending order with no items.
    pub async fn seed_order(&self) -> Order {
        let mut orders = self.orders.lock().await;
        let order = Order {
            id: orders.len() as i32 + 1,
            user_id: 2,
            total_amount: BigDecimal::from(10),
            customer_name: "Seed Buyer".to_string(),
            customer_email: "seed@example.com".to_string(),
            shipping_address: "1 Seed St, Town, ST 00000".to_string(),
            payment_method: PaymentMethod::Cash,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        orders.push(OrderDetails {
            order: order.clone(),
            items: Vec::new(),
        });
        order
    }

    fn rejection(&self) -> Result<(), ClientError> {
        match &self.reject_with {
            Some((status, message)) => Err(ClientError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> ClientError {
        ClientError::Api {
            status: 404,
            message: "Order not found".to_string(),
        }
    }
}

#[async_trait]
impl StorefrontApi for FakeApi {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.rejection()?;

        let mut orders = self.orders.lock().await;
        let id = orders.len() as i32 + 1;
        let now = Utc::now();
        let order = Order {
            id,
            user_id: 1,
            total_amount: request.total_amount.clone(),
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            shipping_address: request.shipping_address.clone(),
            payment_method: request.payment_method,
            status: OrderStatus::Pending,
            created_at: now,
        };
        let items = request
            .items
            .iter()
            .enumerate()
            .map(|(n, item)| OrderItem {
                id: n as i32 + 1,
                order_id: id,
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                price: item.price.clone(),
                supplier_id: item.supplier_id,
                created_at: now,
            })
            .collect();
        orders.push(OrderDetails {
            order: order.clone(),
            items,
        });
        Ok(order)
    }

    async fn admin_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.rejection()?;
        Ok(self.orders.lock().await.iter().map(|d| d.order.clone()).collect())
    }

    async fn admin_order(&self, id: i32) -> Result<OrderDetails, ClientError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.rejection()?;
        self.orders
            .lock()
            .await
            .iter()
            .find(|d| d.order.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn update_order_status(&self, id: i32, status: OrderStatus) -> Result<Order, ClientError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.rejection()?;
        let mut orders = self.orders.lock().await;
        let details = orders
            .iter_mut()
            .find(|d| d.order.id == id)
            .ok_or_else(Self::not_found)?;
        details.order.status = status;
        Ok(details.order.clone())
    }
}
