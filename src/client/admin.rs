use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::{ClientError, StorefrontApi};
use crate::domain::order::{Order, OrderDetails, OrderStatus};

/// Cached admin views: the order list and per-order details.
#[derive(Debug, Default)]
pub struct OrderCache {
    list: Option<Vec<Order>>,
    details: HashMap<i32, OrderDetails>,
}

impl OrderCache {
    pub fn list(&self) -> Option<&[Order]> {
        self.list.as_deref()
    }

    pub fn detail(&self, id: i32) -> Option<&OrderDetails> {
        self.details.get(&id)
    }

    pub fn store_list(&mut self, orders: Vec<Order>) {
        self.list = Some(orders);
    }

    pub fn invalidate_list(&mut self) {
        self.list = None;
    }

    pub fn clear(&mut self) {
        self.list = None;
        self.details.clear();
    }

    fn apply_update(&mut self, updated: &Order) {
        if let Some(list) = self.list.as_mut() {
            for order in list.iter_mut().filter(|o| o.id == updated.id) {
                *order = updated.clone();
            }
        }
        if let Some(details) = self.details.get_mut(&updated.id) {
            details.order = updated.clone();
        }
    }
}

pub struct AdminOrderViewer<A> {
    api: A,
    cache: OrderCache,
}

impl<A: StorefrontApi> AdminOrderViewer<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: OrderCache::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &OrderCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut OrderCache {
        &mut self.cache
    }

    /// All orders, fetched once and then served from the cache.
    pub async fn orders(&mut self) -> Result<&[Order], ClientError> {
        if self.cache.list.is_none() {
            let fetched = self.api.admin_orders().await?;
            self.cache.list = Some(fetched);
        }
        Ok(self.cache.list.as_deref().unwrap_or(&[]))
    }

    pub async fn order(&mut self, id: i32) -> Result<&OrderDetails, ClientError> {
        match self.cache.details.entry(id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let fetched = self.api.admin_order(id).await?;
                Ok(entry.insert(fetched))
            }
        }
    }

    /// Statuses outside the fixed set fail here without a request.
    pub async fn update_status(&mut self, id: i32, status: &str) -> Result<Order, ClientError> {
        let status: OrderStatus = status
            .parse()
            .map_err(|_| ClientError::InvalidStatus(status.to_string()))?;
        let updated = self.api.update_order_status(id, status).await?;
        self.cache.apply_update(&updated);
        Ok(updated)
    }

    pub fn refresh(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::client::fake::FakeApi;

    async fn viewer_with_orders(count: usize) -> AdminOrderViewer<FakeApi> {
        let api = FakeApi::default();
        for _ in 0..count {
            api.seed_order().await;
        }
        AdminOrderViewer::new(api)
    }

    #[tokio::test]
    async fn list_is_fetched_once() {
        let mut viewer = viewer_with_orders(2).await;

        assert_eq!(viewer.orders().await.unwrap().len(), 2);
        assert_eq!(viewer.orders().await.unwrap().len(), 2);
        assert_eq!(viewer.api().list_calls.load(Ordering::SeqCst), 1);

        viewer.refresh();
        viewer.orders().await.unwrap();
        assert_eq!(viewer.api().list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_status_never_reaches_the_api() {
        let mut viewer = viewer_with_orders(1).await;

        for bad in ["archived", "Shipped", ""] {
            let err = viewer.update_status(1, bad).await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidStatus(ref s) if s == bad));
        }
        assert_eq!(viewer.api().update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_refreshes_list_and_detail_caches() {
        let mut viewer = viewer_with_orders(2).await;
        viewer.orders().await.unwrap();
        assert_eq!(viewer.order(2).await.unwrap().order.status, OrderStatus::Pending);

        let updated = viewer.update_status(2, "shipped").await.unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);

        let cache = viewer.cache();
        let listed = cache.list().unwrap().iter().find(|o| o.id == 2).unwrap();
        assert_eq!(listed.status, OrderStatus::Shipped);
        assert_eq!(cache.detail(2).unwrap().order.status, OrderStatus::Shipped);
        assert_eq!(cache.list().unwrap()[0].status, OrderStatus::Pending);

        // Both views came from cache after the update.
        viewer.order(2).await.unwrap();
        assert_eq!(viewer.api().detail_calls.load(Ordering::SeqCst), 1);
        assert_eq!(viewer.api().list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn any_status_may_follow_any_other() {
        let mut viewer = viewer_with_orders(1).await;
        for status in ["delivered", "pending", "cancelled", "processing"] {
            let updated = viewer.update_status(1, status).await.unwrap();
            assert_eq!(updated.status.as_str(), status);
        }
    }

    #[tokio::test]
    async fn missing_order_is_an_api_error() {
        let mut viewer = viewer_with_orders(0).await;
        match viewer.order(9).await.unwrap_err() {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Order not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
