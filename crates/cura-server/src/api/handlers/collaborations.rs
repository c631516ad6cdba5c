//! Collaboration request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use cura_core::entities::CollaborationRequest;
use cura_core::enums::CollaborationStatus;
use cura_core::errors::CoreError;

use crate::api::error::ApiError;
use crate::api::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollaborationBody {
    #[serde(alias = "requester_id")]
    pub requester_id: String,
    #[serde(alias = "target_id")]
    pub target_id: String,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RespondBody {
    pub status: Option<String>,
}

/// POST /api/collaborations/request
pub async fn request_collaboration(
    State(state): State<AppState>,
    Json(body): Json<CollaborationBody>,
) -> Result<(StatusCode, Json<CollaborationRequest>), ApiError> {
    let request = state
        .service
        .create_collaboration(
            &body.requester_id,
            &body.target_id,
            body.message.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// PUT /api/collaborations/{id}/respond
pub async fn respond_to_collaboration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RespondBody>,
) -> Result<Json<CollaborationRequest>, ApiError> {
    let status: CollaborationStatus = body
        .status
        .as_deref()
        .ok_or_else(|| CoreError::missing_field("status"))?
        .parse()?;
    Ok(Json(
        state.service.respond_to_collaboration(&id, status).await?,
    ))
}
