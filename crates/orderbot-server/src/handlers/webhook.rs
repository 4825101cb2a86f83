//! POST / — fulfillment webhook.

use std::sync::Arc;

use axum::{Extension, Json};
use orderbot_core::FulfillmentService;

use crate::error::AppError;
use crate::webhook::{FulfillmentResponse, WebhookRequest};

pub async fn fulfill(
    Extension(service): Extension<Arc<FulfillmentService>>,
    Json(request): Json<WebhookRequest>,
) -> Result<Json<FulfillmentResponse>, AppError> {
    let session = request.session();
    let text = service
        .dispatch(
            request.intent_name(),
            &request.query_result.parameters,
            &session,
        )
        .await?;
    Ok(Json(FulfillmentResponse::new(text)))
}
