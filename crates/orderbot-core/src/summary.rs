//! Human-readable rendering of a food order.

use crate::types::FoodOrder;

/// Render `order` as `"<qty> <item>, <qty> <item>"` in order of insertion.
/// An empty order renders as an empty string.
pub fn food_summary(order: &FoodOrder) -> String {
    order
        .lines()
        .map(|line| format!("{} {}", line.quantity, line.item))
        .collect::<Vec<_>>()
        .join(", ")
}
