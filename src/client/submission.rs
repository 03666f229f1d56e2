use serde::{Deserialize, Serialize};

use super::admin::OrderCache;
use super::{ClientError, StorefrontApi};
use crate::cart::{Cart, CartError, CartStore, SnapshotStore};
use crate::checkout::CheckoutSummary;
use crate::domain::money::round_amount;
use crate::domain::order::{Order, PaymentMethod};
use crate::domain::supplier::{Supplier, SUPPLIERS};
use crate::handlers::orders::{CreateOrderItemRequest, CreateOrderRequest};

/// What the checkout form collects from the buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub payment_method: PaymentMethod,
}

impl BuyerDetails {
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn shipping_address(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip_code)
    }
}

/// Builds the order payload for the cart. Fails before any request is made
/// when the cart is empty or a line has no supplier.
pub fn build_order_request(
    cart: &Cart,
    buyer: &BuyerDetails,
    suppliers: &[Supplier],
) -> Result<CreateOrderRequest, ClientError> {
    if cart.items.is_empty() {
        return Err(ClientError::EmptyCart);
    }
    let summary = CheckoutSummary::for_cart(cart, suppliers);
    if !summary.is_ready() {
        return Err(ClientError::MissingSuppliers(summary.missing_suppliers));
    }

    let items = cart
        .items
        .iter()
        .map(|item| -> Result<CreateOrderItemRequest, ClientError> {
            let quantity = i32::try_from(item.quantity).map_err(|_| {
                CartError::InvalidQuantity {
                    got: i64::from(item.quantity),
                }
            })?;
            Ok(CreateOrderItemRequest {
                product_id: item.product_id,
                product_name: item.name.clone(),
                quantity,
                price: item.price.clone(),
                supplier_id: item.selected_supplier_id,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CreateOrderRequest {
        total_amount: round_amount(&summary.total),
        customer_name: buyer.customer_name(),
        customer_email: buyer.email.clone(),
        shipping_address: buyer.shipping_address(),
        payment_method: buyer.payment_method,
        items,
    })
}

/// Places the order for the current cart. On success the cart is cleared and
/// the cached admin order list dropped; on failure both are left as they were.
/// Once the backend accepts the order the call succeeds, even if the emptied
/// cart cannot be saved.
pub async fn submit_order<A, S>(
    api: &A,
    cart: &mut CartStore<S>,
    buyer: &BuyerDetails,
    cache: &mut OrderCache,
) -> Result<Order, ClientError>
where
    A: StorefrontApi + ?Sized,
    S: SnapshotStore,
{
    let request = build_order_request(cart.cart(), buyer, &SUPPLIERS)?;
    let order = api.create_order(&request).await?;
    log::info!("Order {} placed, total {}", order.id, order.total_amount);

    cache.invalidate_list();
    if let Err(e) = cart.clear() {
        log::warn!("Order {} placed but the cart snapshot was not cleared: {}", order.id, e);
    }
    Ok(order)
}
