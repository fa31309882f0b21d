use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Absent fields decode to their defaults so that a payload missing a
// required field fails validation rather than decoding.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct Order {
    #[validate(custom(function = "not_nil"))]
    pub order_uid: Uuid,
    #[validate(length(min = 1))]
    pub track_number: String,
    #[validate(length(min = 1))]
    pub entry: String,
    #[validate(nested)]
    pub delivery: Delivery,
    #[validate(nested)]
    pub payment: Payment,
    /// Kept in insertion order.
    #[validate(nested)]
    pub items: Vec<Item>,
    #[validate(length(min = 1))]
    pub locale: String,
    pub internal_signature: String,
    #[validate(length(min = 1))]
    pub customer_id: String,
    #[validate(length(min = 1))]
    pub delivery_service: String,
    #[validate(length(min = 1))]
    pub shardkey: String,
    #[validate(range(min = 0))]
    pub sm_id: i32,
    /// Assigned by the store; ignored on ingestion.
    pub date_created: Option<DateTime<Utc>>,
    pub oof_shard: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct Delivery {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub zip: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub region: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct Payment {
    #[validate(length(min = 1))]
    pub transaction: String,
    pub request_id: String,
    #[validate(length(min = 1))]
    pub currency: String,
    #[validate(length(min = 1))]
    pub provider: String,
    #[serde(with = "bigdecimal::serde::json_num")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "non_negative"))]
    pub amount: BigDecimal,
    /// Unix timestamp, seconds.
    #[validate(range(min = 0))]
    pub payment_dt: i64,
    pub bank: String,
    #[serde(with = "bigdecimal::serde::json_num")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "non_negative"))]
    pub delivery_cost: BigDecimal,
    #[serde(with = "bigdecimal::serde::json_num")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "non_negative"))]
    pub goods_total: BigDecimal,
    #[serde(with = "bigdecimal::serde::json_num")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "non_negative"))]
    pub custom_fee: BigDecimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct Item {
    #[validate(range(min = 0))]
    pub chrt_id: i64,
    #[validate(length(min = 1))]
    pub track_number: String,
    #[serde(with = "bigdecimal::serde::json_num")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "non_negative"))]
    pub price: BigDecimal,
    #[validate(length(min = 1))]
    pub rid: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0, max = 100))]
    pub sale: i32,
    pub size: String,
    #[serde(with = "bigdecimal::serde::json_num")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "non_negative"))]
    pub total_price: BigDecimal,
    #[validate(range(min = 0))]
    pub nm_id: i64,
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(range(min = 0))]
    pub status: i32,
}

fn not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("nil_uuid"));
    }
    Ok(())
}

fn non_negative(value: &BigDecimal) -> Result<(), ValidationError> {
    if *value < BigDecimal::from(0) {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}
