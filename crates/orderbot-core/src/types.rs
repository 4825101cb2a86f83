//! Domain types shared by the dispatcher, the draft store and the order store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order identifier allocated by the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status written for every freshly submitted order.
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// One requested food item with its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub item: String,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(item: impl Into<String>, quantity: i64) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// Food item → quantity mapping that keeps first-insertion order.
///
/// Overwriting an existing item keeps its position, so summaries read in the
/// order the customer first asked for things.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodOrder {
    lines: Vec<OrderLine>,
}

impl FoodOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an order from requested lines. Later duplicates win.
    pub fn from_lines(lines: impl IntoIterator<Item = OrderLine>) -> Self {
        let mut order = Self::new();
        for line in lines {
            order.set(line.item, line.quantity);
        }
        order
    }

    /// Insert or overwrite the quantity for `item`.
    pub fn set(&mut self, item: impl Into<String>, quantity: i64) {
        let item = item.into();
        match self.lines.iter_mut().find(|l| l.item == item) {
            Some(line) => line.quantity = quantity,
            None => self.lines.push(OrderLine { item, quantity }),
        }
    }

    /// Overwrite-merge `other` into `self`: shared items take `other`'s
    /// quantity, items only in `self` are kept.
    pub fn merge(&mut self, other: FoodOrder) {
        for line in other.lines {
            self.set(line.item, line.quantity);
        }
    }

    /// Remove `item`. Returns whether it was present.
    pub fn remove(&mut self, item: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item != item);
        self.lines.len() != before
    }

    pub fn get(&self, item: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|l| l.item == item)
            .map(|l| l.quantity)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.get(item).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_last_duplicate_wins() {
        let order = FoodOrder::from_lines([
            OrderLine::new("samosa", 2),
            OrderLine::new("pizza", 1),
            OrderLine::new("samosa", 4),
        ]);
        assert_eq!(order.get("samosa"), Some(4));
        assert_eq!(order.len(), 2);
        let names: Vec<_> = order.lines().map(|l| l.item.as_str()).collect();
        assert_eq!(names, vec!["samosa", "pizza"]);
    }

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let mut order =
            FoodOrder::from_lines([OrderLine::new("samosa", 2), OrderLine::new("lasagna", 8)]);
        order.merge(FoodOrder::from_lines([
            OrderLine::new("samosa", 5),
            OrderLine::new("vada pav", 1),
        ]));
        assert_eq!(order.get("samosa"), Some(5));
        assert_eq!(order.get("lasagna"), Some(8));
        assert_eq!(order.get("vada pav"), Some(1));
    }

    #[test]
    fn test_remove() {
        let mut order = FoodOrder::from_lines([OrderLine::new("pizza", 1)]);
        assert!(order.remove("pizza"));
        assert!(!order.remove("pizza"));
        assert!(order.is_empty());
    }

    #[test]
    fn test_item_names_are_case_sensitive() {
        let order = FoodOrder::from_lines([OrderLine::new("Pizza", 1)]);
        assert!(order.contains("Pizza"));
        assert!(!order.contains("pizza"));
    }
}
