use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::errors::CacheError;
use crate::domain::order::Order;
use crate::domain::ports::{OrderCache, OrderStore};

struct Entry {
    order: Arc<Order>,
    /// `None` never expires.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory order cache with per-entry expiration.
///
/// A zero `default_expiration` keeps entries forever; a zero
/// `cleanup_interval` disables the background sweep, leaving only the lazy
/// expiry check in [`OrderCache::get`].
pub struct MemoryCache<S> {
    entries: DashMap<Uuid, Entry>,
    default_expiration: Duration,
    cleanup_interval: Duration,
    store: S,
}

impl<S: OrderStore> MemoryCache<S> {
    pub fn new(store: S, default_expiration: Duration, cleanup_interval: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_expiration,
            cleanup_interval,
            store,
        }
    }

    /// Seeds the cache with up to `limit` of the most recently created orders.
    pub fn preload(&self, limit: u32) -> Result<(), CacheError> {
        let orders = self.store.get_last_orders(i64::from(limit)).map_err(|e| {
            log::error!("failed to preload cache: {}", e);
            CacheError::PreloadFailed(e)
        })?;

        if orders.is_empty() {
            log::info!("no orders found to preload cache");
            return Ok(());
        }

        let count = orders.len();
        for order in orders {
            self.set(order.order_uid, Arc::new(order));
        }

        log::info!("cache preloaded successfully: orders_count={}", count);
        Ok(())
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn delete_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Starts the periodic sweep. Returns `None` when sweeping is disabled.
    pub fn spawn_sweeper(self: &Arc<Self>, shutdown: CancellationToken) -> Option<JoinHandle<()>> {
        if self.cleanup_interval.is_zero() {
            return None;
        }

        let cache = Arc::clone(self);
        let period = self.cleanup_interval;
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        log::info!("cache sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = cache.delete_expired();
                        if removed > 0 {
                            log::debug!("cache sweep removed {} expired entries", removed);
                        }
                    }
                }
            }
        }))
    }
}

impl<S: OrderStore> OrderCache for MemoryCache<S> {
    fn get(&self, id: Uuid) -> Option<Arc<Order>> {
        let now = Instant::now();
        {
            let entry = self.entries.get(&id)?;
            if !entry.is_expired(now) {
                return Some(Arc::clone(&entry.order));
            }
        }
        self.entries.remove_if(&id, |_, entry| entry.is_expired(now));
        None
    }

    fn set(&self, id: Uuid, order: Arc<Order>) {
        let expires_at = (!self.default_expiration.is_zero())
            .then(|| Instant::now() + self.default_expiration);
        self.entries.insert(id, Entry { order, expires_at });
    }
}
