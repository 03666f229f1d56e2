//! Order summary shown at checkout: subtotal, shipping per distinct supplier
//! and the lines still waiting for a supplier choice.

use bigdecimal::BigDecimal;

use crate::cart::Cart;
use crate::domain::supplier::{find_supplier, shipping_total, Supplier};

pub const MISSING_SUPPLIER_WARNING: &str =
    "Please select a supplier for all items before checkout";

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSummary {
    pub subtotal: BigDecimal,
    pub shipping: BigDecimal,
    pub total: BigDecimal,
    /// Cart line ids without a selected supplier.
    pub missing_suppliers: Vec<u64>,
}

impl CheckoutSummary {
    pub fn for_cart(cart: &Cart, suppliers: &[Supplier]) -> Self {
        let shipping = shipping_total(
            suppliers,
            cart.items.iter().filter_map(|item| item.selected_supplier_id),
        );
        let missing_suppliers = cart
            .items
            .iter()
            .filter(|item| item.selected_supplier_id.is_none())
            .map(|item| item.id)
            .collect();

        Self {
            subtotal: cart.total.clone(),
            total: &cart.total + &shipping,
            shipping,
            missing_suppliers,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.missing_suppliers.is_empty()
    }

    pub fn warning(&self) -> Option<&'static str> {
        (!self.is_ready()).then_some(MISSING_SUPPLIER_WARNING)
    }
}

/// Distinct suppliers chosen in the cart, in id order, for display.
pub fn chosen_suppliers<'a>(cart: &Cart, suppliers: &'a [Supplier]) -> Vec<&'a Supplier> {
    let mut ids: Vec<i32> = cart
        .items
        .iter()
        .filter_map(|item| item.selected_supplier_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids.into_iter()
        .filter_map(|id| find_supplier(suppliers, id))
        .collect()
}
