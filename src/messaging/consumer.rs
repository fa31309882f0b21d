use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::HandleError;
use crate::domain::ports::MessageHandler;

/// One record read from the stream.
#[derive(Debug, Clone)]
pub struct StreamMessage {
    pub partition: i32,
    pub offset: i64,
    pub payload: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// The source was closed; no further messages will arrive.
    #[error("message source closed")]
    Closed,
    #[error("transport error: {0}")]
    Transport(String),
}

/// Pull-based view of the message stream.
#[async_trait]
pub trait MessageSource: Send {
    async fn next_message(&mut self) -> Result<StreamMessage, SourceError>;
    fn close(&mut self);
}

/// Per-outcome counters for one consumer run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConsumeStats {
    pub handled: u64,
    pub invalid_format: u64,
    pub empty: u64,
    pub validation_failed: u64,
    pub persist_failed: u64,
    pub unclassified: u64,
    pub read_errors: u64,
}

pub struct Consumer<S, H> {
    source: S,
    handler: Arc<H>,
    retry_backoff: Duration,
}

impl<S: MessageSource, H: MessageHandler> Consumer<S, H> {
    pub fn new(source: S, handler: Arc<H>) -> Self {
        Self {
            source,
            handler,
            retry_backoff: Duration::from_millis(500),
        }
    }

    /// Delay before retrying after a transport read error.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Consumes until `shutdown` fires or the source closes.
    ///
    /// Handler failures are logged and the message is dropped; the loop
    /// never stops because of a single message.
    pub async fn run(mut self, shutdown: CancellationToken) -> ConsumeStats {
        let mut stats = ConsumeStats::default();
        log::info!("consumer started");

        loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => Err(SourceError::Closed),
                msg = self.source.next_message() => msg,
            };

            let msg = match next {
                Ok(msg) => msg,
                Err(SourceError::Closed) => {
                    log::info!("received shutdown signal, stopping consumer");
                    break;
                }
                Err(SourceError::Transport(e)) => {
                    stats.read_errors += 1;
                    log::error!("error reading message: {}", e);
                    if !self.retry_backoff.is_zero() {
                        tokio::select! {
                            _ = shutdown.cancelled() => {}
                            _ = tokio::time::sleep(self.retry_backoff) => {}
                        }
                    }
                    continue;
                }
            };

            let handler = Arc::clone(&self.handler);
            let payload = msg.payload.clone();
            let result = tokio::task::spawn_blocking(move || handler.handle_message(&payload))
                .await
                .unwrap_or_else(|e| Err(HandleError::Internal(e.to_string())));

            match result {
                Ok(()) => {
                    stats.handled += 1;
                    log::info!(
                        "message handled successfully: partition={} offset={}",
                        msg.partition,
                        msg.offset
                    );
                }
                Err(err) => record_failure(&mut stats, &msg, &err),
            }
        }

        self.source.close();
        log::info!("consumer finished: {:?}", stats);
        stats
    }
}

fn record_failure(stats: &mut ConsumeStats, msg: &StreamMessage, err: &HandleError) {
    let body = String::from_utf8_lossy(&msg.payload);
    let (counter, level, what) = match err {
        HandleError::InvalidFormat(_) => (
            &mut stats.invalid_format,
            log::Level::Warn,
            "invalid message format",
        ),
        HandleError::EmptyOrder => (&mut stats.empty, log::Level::Warn, "empty order received"),
        HandleError::ValidationFailed(_) => (
            &mut stats.validation_failed,
            log::Level::Warn,
            "validation error",
        ),
        HandleError::PersistFailed(_) => (
            &mut stats.persist_failed,
            log::Level::Warn,
            "failed to create order",
        ),
        HandleError::Internal(_) => (
            &mut stats.unclassified,
            log::Level::Error,
            "unexpected error while handling message",
        ),
    };
    *counter += 1;
    log::log!(
        level,
        "{}: partition={} offset={} message={} error={}",
        what,
        msg.partition,
        msg.offset,
        body,
        err
    );
}
