//! Chat message handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use cura_core::entities::Message;
use cura_core::errors::CoreError;

use crate::api::error::ApiError;
use crate::api::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageBody {
    #[serde(alias = "collaboration_id")]
    pub collaboration_id: String,
    #[serde(alias = "sender_id")]
    pub sender_id: String,
    pub text: String,
}

/// POST /api/messages
pub async fn post_message(
    State(state): State<AppState>,
    Json(body): Json<MessageBody>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    if body.collaboration_id.trim().is_empty() {
        return Err(CoreError::missing_field("collaborationId").into());
    }
    if body.sender_id.trim().is_empty() {
        return Err(CoreError::missing_field("senderId").into());
    }
    let message = state
        .service
        .post_message(&body.collaboration_id, &body.sender_id, &body.text)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/messages/{collaboration_id}
pub async fn list_messages(
    State(state): State<AppState>,
    Path(collaboration_id): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.service.list_messages(&collaboration_id).await?))
}
