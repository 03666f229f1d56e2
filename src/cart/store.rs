use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::snapshot::{CartError, SnapshotStore};
use crate::domain::money::decimal_text;
use crate::domain::product::Product;

/// Key the cart snapshot is stored under.
pub const CART_KEY: &str = "cart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u64,
    pub product_id: i32,
    pub name: String,
    #[serde(with = "decimal_text")]
    pub price: BigDecimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub is_service: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_supplier_id: Option<i32>,
}

impl CartItem {
    pub fn line_total(&self) -> BigDecimal {
        &self.price * &BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    #[serde(with = "decimal_text")]
    pub total: BigDecimal,
}

impl Cart {
    fn recompute_total(&mut self) {
        self.total = self
            .items
            .iter()
            .fold(BigDecimal::from(0), |sum, item| sum + item.line_total());
    }

    fn item_mut(&mut self, item_id: u64) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }
}

// Every line must hold at least one unit.
fn parse_snapshot(text: &str) -> Result<Cart, String> {
    let cart: Cart = serde_json::from_str(text).map_err(|e| e.to_string())?;
    match cart.items.iter().find(|item| item.quantity == 0) {
        Some(item) => Err(format!("line {} has quantity 0", item.id)),
        None => Ok(cart),
    }
}

/// The cart plus the snapshot store it is mirrored to.
///
/// Every mutation recomputes the total and rewrites the snapshot.
#[derive(Debug)]
pub struct CartStore<S> {
    store: S,
    cart: Cart,
}

impl<S: SnapshotStore> CartStore<S> {
    /// Restores the saved cart, if any. A snapshot that does not parse is
    /// dropped from the store and the cart starts empty.
    pub fn load(mut store: S) -> Result<Self, CartError> {
        let parsed = match store.read(CART_KEY) {
            Ok(None) => Ok(Cart::default()),
            Ok(Some(text)) => parse_snapshot(&text),
            Err(CartError::Corrupt(reason)) => Err(reason),
            Err(e) => return Err(e),
        };
        let cart = match parsed {
            Ok(mut cart) => {
                cart.recompute_total();
                cart
            }
            Err(reason) => {
                log::warn!("Discarding unreadable cart snapshot: {}", reason);
                store.remove(CART_KEY)?;
                Cart::default()
            }
        };
        Ok(Self { store, cart })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.cart.items
    }

    pub fn total(&self) -> &BigDecimal {
        &self.cart.total
    }

    pub fn is_empty(&self) -> bool {
        self.cart.items.is_empty()
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> u64 {
        self.cart.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Adds `quantity` of the product, merging into its existing line.
    /// Returns the id of the affected line.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u64, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { got: 0 });
        }

        let existing = self
            .cart
            .items
            .iter()
            .position(|item| item.product_id == product.id);
        let id = match existing {
            Some(index) => {
                let item = &mut self.cart.items[index];
                let merged = i64::from(item.quantity) + i64::from(quantity);
                item.quantity =
                    u32::try_from(merged).map_err(|_| CartError::InvalidQuantity { got: merged })?;
                item.id
            }
            None => {
                let id = self.next_item_id();
                self.cart.items.push(CartItem {
                    id,
                    product_id: product.id,
                    name: product.name.clone(),
                    price: product.price.clone(),
                    quantity,
                    image: product.image.clone(),
                    is_service: product.is_service,
                    selected_supplier_id: None,
                });
                id
            }
        };

        self.commit()?;
        Ok(id)
    }

    pub fn remove(&mut self, item_id: u64) -> Result<(), CartError> {
        self.cart.items.retain(|item| item.id != item_id);
        self.commit()
    }

    /// Quantities below 1 are ignored.
    pub fn set_quantity(&mut self, item_id: u64, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Ok(());
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity { got: quantity })?;
        if let Some(item) = self.cart.item_mut(item_id) {
            item.quantity = quantity;
        }
        self.commit()
    }

    /// The supplier id is not checked here; the checkout summary and the
    /// backend both reject unknown ones.
    pub fn set_supplier(&mut self, item_id: u64, supplier_id: i32) -> Result<(), CartError> {
        if let Some(item) = self.cart.item_mut(item_id) {
            item.selected_supplier_id = Some(supplier_id);
        }
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), CartError> {
        self.cart = Cart::default();
        self.persist()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // Millisecond timestamps, bumped past any id already in use.
    fn next_item_id(&self) -> u64 {
        let mut id = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        while self.cart.items.iter().any(|item| item.id == id) {
            id += 1;
        }
        id
    }

    fn commit(&mut self) -> Result<(), CartError> {
        self.cart.recompute_total();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), CartError> {
        let snapshot = serde_json::to_string(&self.cart)?;
        self.store.write(CART_KEY, &snapshot)
    }
}
