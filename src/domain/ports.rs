//! Storage interfaces. Services depend on these traits only, never on a
//! concrete backing store.

use super::errors::DomainError;
use super::order::{NewOrder, Order, OrderDetails, OrderStatus};
use super::product::{NewProduct, Product};
use super::user::{NewUser, User};

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;
    fn list(&self) -> Result<Vec<Product>, DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn create(&self, user: NewUser) -> Result<User, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Persists the order and all of its items as one unit.
    fn create(&self, order: NewOrder) -> Result<OrderDetails, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<OrderDetails>, DomainError>;
    fn list(&self) -> Result<Vec<Order>, DomainError>;
    fn list_by_user(&self, user_id: i32) -> Result<Vec<Order>, DomainError>;
    fn update_status(&self, id: i32, status: OrderStatus) -> Result<Option<Order>, DomainError>;
}
