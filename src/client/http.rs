use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{ClientError, StorefrontApi};
use crate::domain::order::{Order, OrderDetails, OrderStatus};
use crate::domain::product::Product;
use crate::domain::user::UserView;
use crate::handlers::orders::CreateOrderRequest;

/// reqwest client that keeps the session cookie between calls.
#[derive(Debug, Clone)]
pub struct HttpStorefrontClient {
    base_url: String,
    http: Client,
}

impl HttpStorefrontClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<UserView, ClientError> {
        let body = json!({ "username": username, "password": password });
        decode(self.http.post(self.url("/api/register")).json(&body).send().await?).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<UserView, ClientError> {
        let body = json!({ "username": username, "password": password });
        decode(self.http.post(self.url("/api/login")).json(&body).send().await?).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        check(self.http.post(self.url("/api/logout")).send().await?).await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<UserView, ClientError> {
        decode(self.http.get(self.url("/api/user")).send().await?).await
    }

    pub async fn products(&self) -> Result<Vec<Product>, ClientError> {
        decode(self.http.get(self.url("/api/products")).send().await?).await
    }

    pub async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, ClientError> {
        let url = self.url(&format!("/api/products/category/{}", category));
        decode(self.http.get(url).send().await?).await
    }

    pub async fn product(&self, id: i32) -> Result<Product, ClientError> {
        let url = self.url(&format!("/api/products/{}", id));
        decode(self.http.get(url).send().await?).await
    }

    pub async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        decode(self.http.get(self.url("/api/orders/my-orders")).send().await?).await
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontClient {
    async fn create_order(&self, order: &CreateOrderRequest) -> Result<Order, ClientError> {
        decode(self.http.post(self.url("/api/orders")).json(order).send().await?).await
    }

    async fn admin_orders(&self) -> Result<Vec<Order>, ClientError> {
        decode(self.http.get(self.url("/api/admin/orders")).send().await?).await
    }

    async fn admin_order(&self, id: i32) -> Result<OrderDetails, ClientError> {
        let url = self.url(&format!("/api/admin/orders/{}", id));
        decode(self.http.get(url).send().await?).await
    }

    async fn update_order_status(&self, id: i32, status: OrderStatus) -> Result<Order, ClientError> {
        let url = self.url(&format!("/api/admin/orders/{}/status", id));
        let body = json!({ "status": status });
        decode(self.http.patch(url).json(&body).send().await?).await
    }
}

/// Turns a non-2xx response into `ClientError::Api`, keeping the server's
/// `message` when the body has one.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json::<T>().await?)
}
