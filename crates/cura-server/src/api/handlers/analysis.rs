//! Text analysis handler.

use axum::{extract::State, response::Json};
use serde::Deserialize;

use cura_analysis::Analysis;

use crate::api::error::ApiError;
use crate::api::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeBody {
    pub text: String,
}

/// POST /api/ai/analyze
///
/// Always 200 for non-empty text; keyword API trouble degrades to the
/// local fallback inside the analyzer.
pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<Analysis>, ApiError> {
    Ok(Json(state.analyzer.analyze(&body.text).await?))
}
