use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderDetails, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::domain::supplier::{Supplier, SUPPLIERS};

pub struct OrderService<R> {
    repo: R,
    suppliers: &'static [Supplier],
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            suppliers: &SUPPLIERS,
        }
    }

    /// Validates the order against the supplier table, then persists it
    /// together with its items.
    pub fn create_order(&self, order: NewOrder) -> Result<OrderDetails, DomainError> {
        order.validate(self.suppliers)?;
        let created = self.repo.create(order)?;
        log::info!(
            "Created order {} for user {} ({} items, total {})",
            created.order.id,
            created.order.user_id,
            created.items.len(),
            created.order.total_amount
        );
        Ok(created)
    }

    pub fn get_order(&self, id: i32) -> Result<OrderDetails, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("Order"))
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.list()
    }

    pub fn list_orders_for_user(&self, user_id: i32) -> Result<Vec<Order>, DomainError> {
        self.repo.list_by_user(user_id)
    }

    /// Any status may follow any other.
    pub fn update_status(&self, id: i32, status: OrderStatus) -> Result<Order, DomainError> {
        let updated = self
            .repo
            .update_status(id, status)?
            .ok_or(DomainError::NotFound("Order"))?;
        log::info!("Order {} status changed to {}", id, status);
        Ok(updated)
    }
}
