//! orderbot-server — HTTP fulfillment endpoint for the dialogue platform.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod webhook;
