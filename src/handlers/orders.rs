use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::domain::order::Order;
use crate::domain::ports::OrderStore;
use crate::errors::AppError;

fn parse_order_id(raw: &str) -> Result<Uuid, AppError> {
    let id = Uuid::parse_str(raw)
        .map_err(|_| AppError::BadRequest("invalid UUID format".to_string()))?;
    if id.is_nil() {
        return Err(AppError::BadRequest("order ID is required".to_string()));
    }
    Ok(id)
}

/// GET /orders/{id}
///
/// Returns the order together with its delivery, payment and items. Served
/// from the cache when present, otherwise loaded from the database.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, description = "Malformed order id"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order<R: OrderStore>(
    service: web::Data<OrderService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = parse_order_id(&path.into_inner())?;

    let order = web::block(move || service.get_order_by_id(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    log::info!("order received: {}", order_id);
    Ok(HttpResponse::Ok().json(order.as_ref()))
}
