//! Client-side shopping cart: line items, a derived total, and a snapshot
//! persisted after every change.

pub mod snapshot;
pub mod store;

pub use snapshot::{CartError, FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use store::{Cart, CartItem, CartStore, CART_KEY};
