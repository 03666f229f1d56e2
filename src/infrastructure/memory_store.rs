use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderDetails, OrderItem, OrderStatus};
use crate::domain::ports::{OrderRepository, ProductRepository, UserRepository};
use crate::domain::product::{NewProduct, Product};
use crate::domain::user::{NewUser, User};

// ── Tables ───────────────────────────────────────────────────────────────────

/// Rows keyed by an auto-incrementing id, iterated in insertion order.
#[derive(Debug)]
struct Table<T> {
    next_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.entry(id).or_insert(build(id))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
}

// ── Products ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryProductRepository {
    products: Arc<Mutex<Table<Product>>>,
}

impl ProductRepository for MemoryProductRepository {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut table = lock(&self.products)?;
        let created = table.insert_with(|id| Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image: product.image,
            rating: product.rating,
            badge: product.badge,
            discount_price: product.discount_price,
            is_service: product.is_service,
            created_at: Utc::now(),
        });
        Ok(created.clone())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        Ok(lock(&self.products)?.rows.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(lock(&self.products)?.rows.values().cloned().collect())
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<Mutex<Table<User>>>,
}

impl UserRepository for MemoryUserRepository {
    fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = lock(&self.users)?;
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(DomainError::InvalidInput("Username already exists".to_string()));
        }
        let created = table.insert_with(|id| User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
        });
        Ok(created.clone())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(lock(&self.users)?.rows.get(&id).cloned())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(lock(&self.users)?
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct OrderTables {
    orders: Table<Order>,
    items: Table<OrderItem>,
}

impl OrderTables {
    fn items_for(&self, order_id: i32) -> Vec<OrderItem> {
        self.items
            .rows
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }
}

/// Orders and their items live behind one lock so an order never becomes
/// visible without its items.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderRepository {
    tables: Arc<Mutex<OrderTables>>,
}

impl OrderRepository for MemoryOrderRepository {
    fn create(&self, order: NewOrder) -> Result<OrderDetails, DomainError> {
        let mut tables = lock(&self.tables)?;
        let now = Utc::now();

        // 1. Insert the order
        let created = tables
            .orders
            .insert_with(|id| Order {
                id,
                user_id: order.user_id,
                total_amount: order.total_amount,
                customer_name: order.customer_name,
                customer_email: order.customer_email,
                shipping_address: order.shipping_address,
                payment_method: order.payment_method,
                status: OrderStatus::Pending,
                created_at: now,
            })
            .clone();

        // 2. Insert its items
        let items = order
            .items
            .into_iter()
            .map(|item| {
                tables
                    .items
                    .insert_with(|id| OrderItem {
                        id,
                        order_id: created.id,
                        product_id: item.product_id,
                        product_name: item.product_name,
                        quantity: item.quantity,
                        price: item.price,
                        supplier_id: item.supplier_id,
                        created_at: now,
                    })
                    .clone()
            })
            .collect();

        Ok(OrderDetails {
            order: created,
            items,
        })
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderDetails>, DomainError> {
        let tables = lock(&self.tables)?;

        let Some(order) = tables.orders.rows.get(&id).cloned() else {
            return Ok(None);
        };

        Ok(Some(OrderDetails {
            items: tables.items_for(order.id),
            order,
        }))
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(lock(&self.tables)?.orders.rows.values().cloned().collect())
    }

    fn list_by_user(&self, user_id: i32) -> Result<Vec<Order>, DomainError> {
        Ok(lock(&self.tables)?
            .orders
            .rows
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_status(&self, id: i32, status: OrderStatus) -> Result<Option<Order>, DomainError> {
        let mut tables = lock(&self.tables)?;
        Ok(tables.orders.rows.get_mut(&id).map(|order| {
            order.status = status;
            order.clone()
        }))
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

/// One handle per table; clones share the same underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub products: MemoryProductRepository,
    pub users: MemoryUserRepository,
    pub orders: MemoryOrderRepository,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
