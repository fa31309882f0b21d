use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::application::order_service::OrderService;
use crate::domain::errors::HandleError;
use crate::domain::order::Order;
use crate::domain::ports::{MessageHandler, OrderStore};

/// Decodes a raw payload into an order.
///
/// `null` and `{}` are reported as [`HandleError::EmptyOrder`]; anything that
/// is not a JSON object, or whose fields have the wrong types, is
/// [`HandleError::InvalidFormat`].
pub fn decode_order(payload: &[u8]) -> Result<Order, HandleError> {
    let value: Value =
        serde_json::from_slice(payload).map_err(|e| HandleError::InvalidFormat(e.to_string()))?;

    match &value {
        Value::Null => return Err(HandleError::EmptyOrder),
        Value::Object(fields) if fields.is_empty() => return Err(HandleError::EmptyOrder),
        Value::Object(_) => {}
        _ => {
            return Err(HandleError::InvalidFormat(
                "expected a JSON object".to_string(),
            ))
        }
    }

    serde_json::from_value(value).map_err(|e| HandleError::InvalidFormat(e.to_string()))
}

/// Handles "order created" messages by persisting the decoded order.
pub struct CreateOrderHandler<R> {
    service: Arc<OrderService<R>>,
}

impl<R: OrderStore> CreateOrderHandler<R> {
    pub fn new(service: Arc<OrderService<R>>) -> Self {
        Self { service }
    }
}

impl<R: OrderStore> MessageHandler for CreateOrderHandler<R> {
    fn handle_message(&self, payload: &[u8]) -> Result<(), HandleError> {
        let order = decode_order(payload)?;

        order
            .validate()
            .map_err(|e| HandleError::ValidationFailed(e.to_string()))?;

        let id = self
            .service
            .save_order(&order)
            .map_err(HandleError::PersistFailed)?;

        log::debug!("order {} persisted", id);
        Ok(())
    }
}
