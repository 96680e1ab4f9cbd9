//! Telegram webhook receiver.
//!
//! POST /webhook with a Telegram `Update` body.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, error, info};

use crate::models::telegram::Update;
use crate::AppState;

/// Answers 200 whenever the body parses, handled or not. Telegram redelivers
/// updates on any other status.
pub async fn receive_update(
    State(state): State<AppState>,
    Json(update): Json<Update>,
) -> StatusCode {
    let correlation_id = uuid::Uuid::new_v4().to_string();

    let Some(msg) = update.message.as_ref().and_then(|m| m.to_inbound()) else {
        debug!(
            correlation_id = %correlation_id,
            update_id = update.update_id,
            "Ignoring update without a text message"
        );
        return StatusCode::OK;
    };

    match state.dispatcher.handle(&msg).await {
        Ok(dispatch) => info!(
            correlation_id = %correlation_id,
            update_id = update.update_id,
            chat_id = %msg.chat_id,
            ?dispatch,
            "Handled update"
        ),
        Err(e) => error!(
            correlation_id = %correlation_id,
            update_id = update.update_id,
            chat_id = %msg.chat_id,
            error = %e,
            "Failed to handle update"
        ),
    }

    StatusCode::OK
}
