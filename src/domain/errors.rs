use thiserror::Error;

/// Coarse classification of store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    TransactionFailure,
    InsertFailure,
    ScanFailure,
    Unavailable,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to begin transaction: {0}")]
    BeginFailed(String),
    #[error("failed to commit transaction: {0}")]
    CommitFailed(String),
    #[error("failed to insert into orders: {0}")]
    InsertOrderFailed(String),
    #[error("failed to insert into delivery: {0}")]
    InsertDeliveryFailed(String),
    #[error("failed to insert into payment: {0}")]
    InsertPaymentFailed(String),
    #[error("failed to insert into items: {0}")]
    InsertItemFailed(String),
    #[error("Order not found")]
    OrderNotFound,
    #[error("failed to scan row: {0}")]
    ScanFailed(String),
    #[error("failed to get items by order ID: {0}")]
    ItemsFetchFailed(String),
    #[error("failed to scan order items: {0}")]
    ItemScanFailed(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::OrderNotFound => ErrorKind::NotFound,
            StoreError::BeginFailed(_) | StoreError::CommitFailed(_) => {
                ErrorKind::TransactionFailure
            }
            StoreError::InsertOrderFailed(_)
            | StoreError::InsertDeliveryFailed(_)
            | StoreError::InsertPaymentFailed(_)
            | StoreError::InsertItemFailed(_) => ErrorKind::InsertFailure,
            StoreError::ScanFailed(_)
            | StoreError::ItemsFetchFailed(_)
            | StoreError::ItemScanFailed(_) => ErrorKind::ScanFailure,
            StoreError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to preload cache: {0}")]
    PreloadFailed(#[source] StoreError),
}

/// Outcome of a failed ingestion message.
#[derive(Debug, Error)]
pub enum HandleError {
    #[error("invalid message format: {0}")]
    InvalidFormat(String),
    #[error("order is empty")]
    EmptyOrder,
    #[error("validation failed: {0}")]
    ValidationFailed(String),
    #[error("failed to persist order: {0}")]
    PersistFailed(#[source] StoreError),
    #[error("unexpected handler error: {0}")]
    Internal(String),
}
