//! In-memory `OrderStore`.
//!
//! Behaves like the relational schema: line items must reference a menu item,
//! ids are `max + 1`, totals are priced from the menu.

use std::collections::{BTreeMap, HashMap};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::ports::OrderStore;
use crate::types::OrderId;

/// A stored line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub order_id: OrderId,
    pub item: String,
    pub quantity: i64,
    pub total_price: Decimal,
}

/// The restaurant's standard menu with unit prices.
pub fn default_menu() -> HashMap<String, Decimal> {
    [
        ("pav bhaji", 6),
        ("chole bhature", 7),
        ("pizza", 8),
        ("mango lassi", 5),
        ("masala dosa", 6),
        ("vegetable biryani", 9),
        ("vada pav", 4),
        ("rava dosa", 7),
        ("samosa", 5),
        ("lasagna", 10),
    ]
    .into_iter()
    .map(|(name, price)| (name.to_string(), Decimal::from(price)))
    .collect()
}

#[derive(Default)]
struct Tables {
    items: Vec<StoredItem>,
    tracking: BTreeMap<OrderId, String>,
    /// Highest id handed out by `next_order_id`, written or not.
    last_allocated: i64,
}

impl Tables {
    fn max_order_id(&self) -> i64 {
        let from_items = self.items.iter().map(|i| i.order_id.0).max().unwrap_or(0);
        let from_tracking = self.tracking.keys().next_back().map_or(0, |id| id.0);
        from_items.max(from_tracking)
    }
}

pub struct MemoryOrderStore {
    menu: HashMap<String, Decimal>,
    tables: RwLock<Tables>,
}

impl MemoryOrderStore {
    pub fn new(menu: HashMap<String, Decimal>) -> Self {
        Self {
            menu,
            tables: RwLock::new(Tables::default()),
        }
    }

    pub fn with_default_menu() -> Self {
        Self::new(default_menu())
    }

    /// Line items recorded for `order_id`, in insertion order.
    pub async fn items_for(&self, order_id: OrderId) -> Vec<StoredItem> {
        self.tables
            .read()
            .await
            .items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect()
    }

    pub async fn item_count(&self) -> usize {
        self.tables.read().await.items.len()
    }

    pub async fn tracked_orders(&self) -> usize {
        self.tables.read().await.tracking.len()
    }
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::with_default_menu()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn next_order_id(&self) -> Result<OrderId> {
        let mut tables = self.tables.write().await;
        let next = tables.last_allocated.max(tables.max_order_id()) + 1;
        tables.last_allocated = next;
        Ok(OrderId(next))
    }

    async fn insert_order_item(
        &self,
        item: &str,
        quantity: i64,
        order_id: OrderId,
    ) -> Result<()> {
        let price = self
            .menu
            .get(item)
            .ok_or_else(|| anyhow!("unknown food item: {item}"))?;
        if quantity <= 0 {
            bail!("quantity must be positive, got {quantity} for {item}");
        }
        self.tables.write().await.items.push(StoredItem {
            order_id,
            item: item.to_string(),
            quantity,
            total_price: *price * Decimal::from(quantity),
        });
        Ok(())
    }

    async fn insert_order_tracking(&self, order_id: OrderId, status: &str) -> Result<()> {
        self.tables
            .write()
            .await
            .tracking
            .insert(order_id, status.to_string());
        Ok(())
    }

    async fn get_order_status(&self, order_id: OrderId) -> Result<Option<String>> {
        Ok(self.tables.read().await.tracking.get(&order_id).cloned())
    }

    async fn get_total_order_price(&self, order_id: OrderId) -> Result<Decimal> {
        Ok(self
            .tables
            .read()
            .await
            .items
            .iter()
            .filter(|i| i.order_id == order_id)
            .map(|i| i.total_price)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_next_order_id_starts_at_one() {
        let store = MemoryOrderStore::with_default_menu();
        assert_eq!(store.next_order_id().await.unwrap(), OrderId(1));
    }

    #[tokio::test]
    async fn test_next_order_id_follows_max() {
        let store = MemoryOrderStore::with_default_menu();
        store
            .insert_order_item("pizza", 1, OrderId(40))
            .await
            .unwrap();
        assert_eq!(store.next_order_id().await.unwrap(), OrderId(41));
    }

    #[tokio::test]
    async fn test_next_order_id_never_repeats_unwritten_ids() {
        let store = MemoryOrderStore::with_default_menu();
        let first = store.next_order_id().await.unwrap();
        let second = store.next_order_id().await.unwrap();
        assert_eq!(first, OrderId(1));
        assert_eq!(second, OrderId(2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_allocation_is_unique() {
        let store = Arc::new(MemoryOrderStore::with_default_menu());
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.next_order_id().await.unwrap() })
            })
            .collect();

        let mut ids = BTreeSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap());
        }
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn test_unknown_item_rejected() {
        let store = MemoryOrderStore::with_default_menu();
        let err = store
            .insert_order_item("sushi", 1, OrderId(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown food item"));
        assert_eq!(store.item_count().await, 0);
    }

    #[tokio::test]
    async fn test_non_positive_quantity_rejected() {
        let store = MemoryOrderStore::with_default_menu();
        assert!(store.insert_order_item("pizza", 0, OrderId(1)).await.is_err());
    }

    #[tokio::test]
    async fn test_total_price() {
        let store = MemoryOrderStore::with_default_menu();
        store.insert_order_item("samosa", 2, OrderId(1)).await.unwrap();
        store.insert_order_item("lasagna", 8, OrderId(1)).await.unwrap();
        store.insert_order_item("pizza", 3, OrderId(2)).await.unwrap();
        assert_eq!(
            store.get_total_order_price(OrderId(1)).await.unwrap(),
            Decimal::from(90)
        );
    }

    #[tokio::test]
    async fn test_order_status_not_found() {
        let store = MemoryOrderStore::with_default_menu();
        assert_eq!(store.get_order_status(OrderId(9999)).await.unwrap(), None);
        store
            .insert_order_tracking(OrderId(3), "delivered")
            .await
            .unwrap();
        assert_eq!(
            store.get_order_status(OrderId(3)).await.unwrap().as_deref(),
            Some("delivered")
        );
    }
}
