//! orderbot-core — domain logic for the food-ordering webhook.
//!
//! Conversations accumulate a draft order per session; completing the
//! conversation writes the draft to the order store through [`ports::OrderStore`].

pub mod drafts;
pub mod error;
pub mod intent;
pub mod memory;
pub mod ports;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod service;
pub mod session;
pub mod summary;
pub mod types;

pub use error::{OrderBotError, Result};
pub use service::FulfillmentService;
pub use session::SessionKey;
