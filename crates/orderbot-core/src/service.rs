//! Fulfillment service: intent dispatch and the four order handlers.
//!
//! Each call resolves the intent first (an unsupported intent fails the
//! request before any state is touched), then runs the handler under the
//! session's lock. Handlers answer with plain text; user-facing problems such
//! as an unknown order are answers, not errors.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::drafts::{DraftStore, SessionLocks};
use crate::error::Result;
use crate::intent::{self, Intent, LineRequest};
use crate::ports::OrderStore;
use crate::session::SessionKey;
use crate::summary::food_summary;
use crate::types::{FoodOrder, OrderId, STATUS_IN_PROGRESS};

pub const MSG_CLARIFY_ITEMS: &str =
    "Sorry, I didn't understand. Can you please specify food items and quantities again?";
pub const MSG_ORDER_NOT_FOUND: &str =
    "I'm having trouble finding your order. Can you place a new order?";
pub const MSG_BACKEND_ERROR: &str =
    "Sorry, I couldn't process your order due to a backend error. Please place a new order again.";

/// Result of writing a draft to the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Placed(OrderId),
    /// Nothing usable was written. Line items inserted before the failing
    /// one are left in place.
    Failed,
}

pub struct FulfillmentService {
    drafts: Arc<dyn DraftStore>,
    orders: Arc<dyn OrderStore>,
    locks: SessionLocks,
}

impl FulfillmentService {
    pub fn new(drafts: Arc<dyn DraftStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self {
            drafts,
            orders,
            locks: SessionLocks::new(),
        }
    }

    /// Route one webhook call to its handler and return the fulfillment text.
    pub async fn dispatch(
        &self,
        intent_name: &str,
        params: &Map<String, Value>,
        session: &SessionKey,
    ) -> Result<String> {
        let intent = intent_name.parse::<Intent>().inspect_err(|e| warn!("{e}"))?;
        debug!(?intent, %session, "dispatching");

        let guard = self.locks.acquire(session).await;
        let result = match intent {
            Intent::TrackOrder => self.track_order(params).await,
            Intent::AddToOrder => self.add_to_order(params, session).await,
            Intent::RemoveFromOrder => self.remove_from_order(params, session).await,
            Intent::CompleteOrder => self.complete_order(session).await,
        };
        drop(guard);
        self.locks.release_idle(session).await;
        result
    }

    async fn add_to_order(
        &self,
        params: &Map<String, Value>,
        session: &SessionKey,
    ) -> Result<String> {
        let items = intent::food_items(params)?;
        let quantities = intent::quantities(params)?;

        let lines = match intent::pair_lines(items, quantities) {
            LineRequest::Paired(lines) => lines,
            LineRequest::Mismatched { items, quantities } => {
                debug!(items, quantities, %session, "item/quantity count mismatch");
                return Ok(MSG_CLARIFY_ITEMS.to_string());
            }
        };

        let new_items = FoodOrder::from_lines(lines);
        let order = match self.drafts.get(session).await {
            Some(mut current) => {
                current.merge(new_items);
                current
            }
            None => new_items,
        };
        let summary = food_summary(&order);
        self.drafts.put(session, order).await;

        Ok(format!(
            "So far you have: {summary}. Do you need anything else?"
        ))
    }

    async fn remove_from_order(
        &self,
        params: &Map<String, Value>,
        session: &SessionKey,
    ) -> Result<String> {
        let Some(mut order) = self.drafts.get(session).await else {
            return Ok(MSG_ORDER_NOT_FOUND.to_string());
        };
        let items = intent::food_items(params)?;

        let mut removed = Vec::new();
        let mut missing = Vec::new();
        for item in items {
            if order.remove(&item) {
                removed.push(item);
            } else {
                missing.push(item);
            }
        }

        let mut parts = Vec::new();
        if !removed.is_empty() {
            parts.push(format!("Removed {} from your order.", removed.join(", ")));
        }
        if !missing.is_empty() {
            parts.push(format!(
                "Your current order does not have {}.",
                missing.join(", ")
            ));
        }
        if order.is_empty() {
            parts.push("Your order is empty!".to_string());
        } else {
            parts.push(format!(
                "Here is what is left in your order: {}",
                food_summary(&order)
            ));
        }

        self.drafts.put(session, order).await;
        Ok(parts.join(" "))
    }

    async fn complete_order(&self, session: &SessionKey) -> Result<String> {
        let Some(order) = self.drafts.get(session).await else {
            return Ok(MSG_ORDER_NOT_FOUND.to_string());
        };

        let submission = self.submit_order(&order).await;
        // One attempt per draft: the user starts over after a failure.
        self.drafts.delete(session).await;

        match submission {
            Submission::Failed => Ok(MSG_BACKEND_ERROR.to_string()),
            Submission::Placed(order_id) => {
                let total = self.orders.get_total_order_price(order_id).await?;
                info!(%order_id, %total, %session, "order placed");
                Ok(format!(
                    "Your order is placed! Your Order ID is: {order_id}. \
                     Your order total is {total}, which you can pay at the time of delivery!"
                ))
            }
        }
    }

    /// Write `order` to the order store.
    ///
    /// Allocates an id, inserts every line item, then records the order as
    /// in progress. Stops at the first failing insert without compensating
    /// for items already written.
    pub async fn submit_order(&self, order: &FoodOrder) -> Submission {
        let order_id = match self.orders.next_order_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!("order id allocation failed: {e:#}");
                return Submission::Failed;
            }
        };

        for line in order.lines() {
            if let Err(e) = self
                .orders
                .insert_order_item(&line.item, line.quantity, order_id)
                .await
            {
                warn!(%order_id, item = %line.item, "line item insert failed: {e:#}");
                return Submission::Failed;
            }
        }

        if let Err(e) = self
            .orders
            .insert_order_tracking(order_id, STATUS_IN_PROGRESS)
            .await
        {
            warn!(%order_id, "order tracking insert failed: {e:#}");
        }
        Submission::Placed(order_id)
    }

    async fn track_order(&self, params: &Map<String, Value>) -> Result<String> {
        let order_id = intent::order_id(params)?;
        Ok(match self.orders.get_order_status(order_id).await? {
            Some(status) => format!("The order status for order id: {order_id} is: {status}"),
            None => format!("No order found with order id: {order_id}"),
        })
    }
}
