//! Port trait for the relational order store.
//!
//! The fulfillment service talks to persistence exclusively through this
//! trait: `MemoryOrderStore` for tests and local runs, `PgOrderStore` (feature
//! `postgres`) for production.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::types::OrderId;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Allocate the id the next submitted order will use.
    async fn next_order_id(&self) -> Result<OrderId>;

    /// Record one line item. An error means the item was not written.
    async fn insert_order_item(&self, item: &str, quantity: i64, order_id: OrderId)
        -> Result<()>;

    async fn insert_order_tracking(&self, order_id: OrderId, status: &str) -> Result<()>;

    /// Status of an order, or `None` if no such order is tracked.
    async fn get_order_status(&self, order_id: OrderId) -> Result<Option<String>>;

    async fn get_total_order_price(&self, order_id: OrderId) -> Result<Decimal>;
}
