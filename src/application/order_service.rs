use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::StoreError;
use crate::domain::order::Order;
use crate::domain::ports::{OrderCache, OrderStore};

/// Read/write policy for orders: cache-aside reads, store-only writes.
pub struct OrderService<R> {
    repo: R,
    cache: Option<Arc<dyn OrderCache>>,
}

impl<R: OrderStore> OrderService<R> {
    pub fn new(repo: R, cache: Option<Arc<dyn OrderCache>>) -> Self {
        Self { repo, cache }
    }

    /// Persists the order. The cache is left untouched; the next read of
    /// this id loads it from the store.
    pub fn save_order(&self, order: &Order) -> Result<Uuid, StoreError> {
        self.repo.save(order)
    }

    pub fn get_order_by_id(&self, id: Uuid) -> Result<Arc<Order>, StoreError> {
        match &self.cache {
            Some(cache) => {
                if let Some(order) = cache.get(id) {
                    log::debug!("cache hit for order {}", id);
                    return Ok(order);
                }
                let order = Arc::new(self.load(id)?);
                cache.set(id, Arc::clone(&order));
                Ok(order)
            }
            None => self.load(id).map(Arc::new),
        }
    }

    fn load(&self, id: Uuid) -> Result<Order, StoreError> {
        let mut order = self.repo.get_by_id(id)?;
        order.items = self.repo.get_items_by_order_id(id)?;
        Ok(order)
    }
}
