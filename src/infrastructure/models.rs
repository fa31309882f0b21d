use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::order::{Delivery, Item, Order, Payment};
use crate::schema::{delivery, items, orders, payment};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub order_uid: Uuid,
    pub track_number: String,
    pub entry: String,
    pub locale: String,
    pub internal_signature: String,
    pub customer_id: String,
    pub delivery_service: String,
    pub shardkey: String,
    pub sm_id: i32,
    pub date_created: DateTime<Utc>,
    pub oof_shard: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub order_uid: Uuid,
    pub track_number: &'a str,
    pub entry: &'a str,
    pub locale: &'a str,
    pub internal_signature: &'a str,
    pub customer_id: &'a str,
    pub delivery_service: &'a str,
    pub shardkey: &'a str,
    pub sm_id: i32,
    pub oof_shard: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = delivery)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryRow {
    pub order_uid: Uuid,
    pub name: String,
    pub phone: String,
    pub zip: String,
    pub city: String,
    pub address: String,
    pub region: String,
    pub email: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = payment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRow {
    pub order_uid: Uuid,
    pub transaction: String,
    pub request_id: String,
    pub currency: String,
    pub provider: String,
    pub amount: BigDecimal,
    pub payment_dt: i64,
    pub bank: String,
    pub delivery_cost: BigDecimal,
    pub goods_total: BigDecimal,
    pub custom_fee: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub id: i64,
    pub order_uid: Uuid,
    pub chrt_id: i64,
    pub track_number: String,
    pub price: BigDecimal,
    pub rid: String,
    pub name: String,
    pub sale: i32,
    pub size: String,
    pub total_price: BigDecimal,
    pub nm_id: i64,
    pub brand: String,
    pub status: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = items)]
pub struct NewItemRow {
    pub order_uid: Uuid,
    pub chrt_id: i64,
    pub track_number: String,
    pub price: BigDecimal,
    pub rid: String,
    pub name: String,
    pub sale: i32,
    pub size: String,
    pub total_price: BigDecimal,
    pub nm_id: i64,
    pub brand: String,
    pub status: i32,
}

// ── Domain <-> row mapping ───────────────────────────────────────────────────

impl<'a> From<&'a Order> for NewOrderRow<'a> {
    fn from(o: &'a Order) -> Self {
        NewOrderRow {
            order_uid: o.order_uid,
            track_number: &o.track_number,
            entry: &o.entry,
            locale: &o.locale,
            internal_signature: &o.internal_signature,
            customer_id: &o.customer_id,
            delivery_service: &o.delivery_service,
            shardkey: &o.shardkey,
            sm_id: o.sm_id,
            oof_shard: &o.oof_shard,
        }
    }
}

impl DeliveryRow {
    pub fn from_domain(order_uid: Uuid, d: &Delivery) -> Self {
        DeliveryRow {
            order_uid,
            name: d.name.clone(),
            phone: d.phone.clone(),
            zip: d.zip.clone(),
            city: d.city.clone(),
            address: d.address.clone(),
            region: d.region.clone(),
            email: d.email.clone(),
        }
    }
}

impl From<DeliveryRow> for Delivery {
    fn from(r: DeliveryRow) -> Self {
        Delivery {
            name: r.name,
            phone: r.phone,
            zip: r.zip,
            city: r.city,
            address: r.address,
            region: r.region,
            email: r.email,
        }
    }
}

impl PaymentRow {
    pub fn from_domain(order_uid: Uuid, p: &Payment) -> Self {
        PaymentRow {
            order_uid,
            transaction: p.transaction.clone(),
            request_id: p.request_id.clone(),
            currency: p.currency.clone(),
            provider: p.provider.clone(),
            amount: p.amount.clone(),
            payment_dt: p.payment_dt,
            bank: p.bank.clone(),
            delivery_cost: p.delivery_cost.clone(),
            goods_total: p.goods_total.clone(),
            custom_fee: p.custom_fee.clone(),
        }
    }
}

impl From<PaymentRow> for Payment {
    fn from(r: PaymentRow) -> Self {
        Payment {
            transaction: r.transaction,
            request_id: r.request_id,
            currency: r.currency,
            provider: r.provider,
            amount: r.amount,
            payment_dt: r.payment_dt,
            bank: r.bank,
            delivery_cost: r.delivery_cost,
            goods_total: r.goods_total,
            custom_fee: r.custom_fee,
        }
    }
}

impl NewItemRow {
    pub fn from_domain(order_uid: Uuid, i: &Item) -> Self {
        NewItemRow {
            order_uid,
            chrt_id: i.chrt_id,
            track_number: i.track_number.clone(),
            price: i.price.clone(),
            rid: i.rid.clone(),
            name: i.name.clone(),
            sale: i.sale,
            size: i.size.clone(),
            total_price: i.total_price.clone(),
            nm_id: i.nm_id,
            brand: i.brand.clone(),
            status: i.status,
        }
    }
}

impl From<ItemRow> for Item {
    fn from(r: ItemRow) -> Self {
        Item {
            chrt_id: r.chrt_id,
            track_number: r.track_number,
            price: r.price,
            rid: r.rid,
            name: r.name,
            sale: r.sale,
            size: r.size,
            total_price: r.total_price,
            nm_id: r.nm_id,
            brand: r.brand,
            status: r.status,
        }
    }
}

/// Assembles an order from the joined header, delivery and payment rows.
/// Items are attached separately.
pub fn assemble(o: OrderRow, d: DeliveryRow, p: PaymentRow) -> Order {
    Order {
        order_uid: o.order_uid,
        track_number: o.track_number,
        entry: o.entry,
        delivery: d.into(),
        payment: p.into(),
        items: Vec::new(),
        locale: o.locale,
        internal_signature: o.internal_signature,
        customer_id: o.customer_id,
        delivery_service: o.delivery_service,
        shardkey: o.shardkey,
        sm_id: o.sm_id,
        date_created: Some(o.date_created),
        oof_shard: o.oof_shard,
    }
}
