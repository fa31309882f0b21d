//! In-memory fakes of the ports, shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::errors::StoreError;
use crate::domain::order::{Item, Order};
use crate::domain::ports::OrderStore;

#[derive(Default)]
pub struct FakeStore {
    orders: Mutex<Vec<Order>>,
    fail_save: Mutex<Option<StoreError>>,
    fail_reads: Mutex<Option<StoreError>>,
    pub get_by_id_calls: AtomicUsize,
    pub get_items_calls: AtomicUsize,
    pub last_orders_calls: AtomicUsize,
}

impl FakeStore {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
            ..Default::default()
        }
    }

    pub fn fail_next_save(&self, err: StoreError) {
        *self.fail_save.lock().unwrap() = Some(err);
    }

    pub fn fail_reads_with(&self, err: StoreError) {
        *self.fail_reads.lock().unwrap() = Some(err);
    }

    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn store_reads(&self) -> usize {
        self.get_by_id_calls.load(Ordering::SeqCst) + self.get_items_calls.load(Ordering::SeqCst)
    }

    /// Replaces a stored order in place, bypassing `save`.
    pub fn overwrite(&self, order: Order) {
        let mut orders = self.orders.lock().unwrap();
        if let Some(existing) = orders.iter_mut().find(|o| o.order_uid == order.order_uid) {
            *existing = order;
        }
    }

    fn read_failure(&self) -> Option<StoreError> {
        self.fail_reads.lock().unwrap().take()
    }
}

impl OrderStore for FakeStore {
    fn save(&self, order: &Order) -> Result<Uuid, StoreError> {
        if let Some(err) = self.fail_save.lock().unwrap().take() {
            return Err(err);
        }
        let mut orders = self.orders.lock().unwrap();
        if orders.iter().any(|o| o.order_uid == order.order_uid) {
            return Err(StoreError::InsertOrderFailed("duplicate key".into()));
        }
        orders.push(order.clone());
        Ok(order.order_uid)
    }

    fn get_by_id(&self, id: Uuid) -> Result<Order, StoreError> {
        self.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.read_failure() {
            return Err(err);
        }
        let orders = self.orders.lock().unwrap();
        let mut order = orders
            .iter()
            .find(|o| o.order_uid == id)
            .cloned()
            .ok_or(StoreError::OrderNotFound)?;
        order.items.clear();
        Ok(order)
    }

    fn get_items_by_order_id(&self, id: Uuid) -> Result<Vec<Item>, StoreError> {
        self.get_items_calls.fetch_add(1, Ordering::SeqCst);
        let orders = self.orders.lock().unwrap();
        Ok(orders
            .iter()
            .find(|o| o.order_uid == id)
            .map(|o| o.items.clone())
            .unwrap_or_default())
    }

    fn get_last_orders(&self, limit: i64) -> Result<Vec<Order>, StoreError> {
        self.last_orders_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.read_failure() {
            return Err(err);
        }
        let orders = self.orders.lock().unwrap();
        Ok(orders
            .iter()
            .rev()
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

