//! Postgres-backed `OrderStore`.
//!
//! All SQL is runtime-checked (`sqlx::query`, not `sqlx::query!`) so the crate
//! builds without a live database. Schema: `migrations/0001_orders.sql`.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::ports::OrderStore;
use crate::types::OrderId;

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the bundled schema. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(include_str!("../migrations/0001_orders.sql"))
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn next_order_id(&self) -> Result<OrderId> {
        let (next,) = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT nextval('order_id_seq')
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(OrderId(next))
    }

    async fn insert_order_item(
        &self,
        item: &str,
        quantity: i64,
        order_id: OrderId,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO orders (order_id, item_id, quantity, total_price)
            SELECT $1, item_id, $2, price * $2
            FROM food_items
            WHERE name = $3
            "#,
        )
        .bind(order_id.0)
        .bind(quantity)
        .bind(item)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;

        if result.rows_affected() != 1 {
            bail!("unknown food item: {item}");
        }
        Ok(())
    }

    async fn insert_order_tracking(&self, order_id: OrderId, status: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO order_tracking (order_id, status)
            VALUES ($1, $2)
            "#,
        )
        .bind(order_id.0)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(())
    }

    async fn get_order_status(&self, order_id: OrderId) -> Result<Option<String>> {
        let row = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT status
            FROM order_tracking
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(row.map(|(status,)| status))
    }

    async fn get_total_order_price(&self, order_id: OrderId) -> Result<Decimal> {
        let (total,) = sqlx::query_as::<_, (Decimal,)>(
            r#"
            SELECT COALESCE(SUM(total_price), 0)
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(total)
    }
}
