use std::sync::Arc;

use uuid::Uuid;

use super::errors::{HandleError, StoreError};
use super::order::{Item, Order};

/// Authoritative order storage.
pub trait OrderStore: Send + Sync + 'static {
    /// Persists the order with its delivery, payment and items atomically.
    fn save(&self, order: &Order) -> Result<Uuid, StoreError>;
    /// Header, delivery and payment only; `items` is left empty.
    fn get_by_id(&self, id: Uuid) -> Result<Order, StoreError>;
    fn get_items_by_order_id(&self, id: Uuid) -> Result<Vec<Item>, StoreError>;
    /// Fully assembled orders, most recently created first.
    fn get_last_orders(&self, limit: i64) -> Result<Vec<Order>, StoreError>;
}

impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    fn save(&self, order: &Order) -> Result<Uuid, StoreError> {
        (**self).save(order)
    }

    fn get_by_id(&self, id: Uuid) -> Result<Order, StoreError> {
        (**self).get_by_id(id)
    }

    fn get_items_by_order_id(&self, id: Uuid) -> Result<Vec<Item>, StoreError> {
        (**self).get_items_by_order_id(id)
    }

    fn get_last_orders(&self, limit: i64) -> Result<Vec<Order>, StoreError> {
        (**self).get_last_orders(limit)
    }
}

/// Read-side cache of fully assembled orders.
pub trait OrderCache: Send + Sync + 'static {
    fn get(&self, id: Uuid) -> Option<Arc<Order>>;
    fn set(&self, id: Uuid, order: Arc<Order>);
}

/// Turns a raw stream payload into a persisted order.
pub trait MessageHandler: Send + Sync + 'static {
    fn handle_message(&self, payload: &[u8]) -> Result<(), HandleError>;
}
