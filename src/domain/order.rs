use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::{DomainError, FieldError};
use super::money::{decimal_text, format_amount, same_amount};
use super::supplier::{find_supplier, shipping_total, Supplier};

/// Order lifecycle state. Any status may move to any other; only admins
/// change it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown order status '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Cash,
    BankTransfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    #[serde(with = "decimal_text")]
    #[schema(value_type = String, example = "30.99")]
    pub total_amount: BigDecimal,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    #[serde(with = "decimal_text")]
    #[schema(value_type = String, example = "10.00")]
    pub price: BigDecimal,
    pub supplier_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// An order together with its items, as the admin detail view shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub supplier_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub total_amount: BigDecimal,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn subtotal(&self) -> BigDecimal {
        self.items
            .iter()
            .map(|item| &item.price * &BigDecimal::from(item.quantity))
            .sum()
    }

    /// Checks buyer fields, items, supplier choices and that the claimed
    /// total is subtotal plus one fee per distinct supplier.
    pub fn validate(&self, suppliers: &[Supplier]) -> Result<(), DomainError> {
        let mut errors = Vec::new();

        if self.customer_name.trim().is_empty() {
            errors.push(FieldError::new("customerName", "must not be empty"));
        }
        if !self.customer_email.contains('@') {
            errors.push(FieldError::new("customerEmail", "must be a valid email address"));
        }
        if self.shipping_address.trim().is_empty() {
            errors.push(FieldError::new("shippingAddress", "must not be empty"));
        }
        if self.items.is_empty() {
            errors.push(FieldError::new("items", "order must contain at least one item"));
        }

        let zero = BigDecimal::from(0);
        for (i, item) in self.items.iter().enumerate() {
            if item.quantity < 1 {
                errors.push(FieldError::new(format!("items[{i}].quantity"), "must be at least 1"));
            }
            if item.price < zero {
                errors.push(FieldError::new(format!("items[{i}].price"), "must not be negative"));
            }
            match item.supplier_id {
                None => errors.push(FieldError::new(
                    format!("items[{i}].supplierId"),
                    "a supplier must be selected",
                )),
                Some(id) if find_supplier(suppliers, id).is_none() => errors.push(
                    FieldError::new(format!("items[{i}].supplierId"), format!("unknown supplier {id}")),
                ),
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            let expected = self.subtotal()
                + shipping_total(suppliers, self.items.iter().filter_map(|i| i.supplier_id));
            if !same_amount(&expected, &self.total_amount) {
                errors.push(FieldError::new(
                    "totalAmount",
                    format!("expected {}", format_amount(&expected)),
                ));
            }
        }

        DomainError::check("Invalid order data", errors)
    }
}
