//! Shared HTTP response helpers.

use crate::error::AnalysisError;

/// Map a non-success response to [`AnalysisError::Api`] carrying the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AnalysisError> {
    if !resp.status().is_success() {
        return Err(AnalysisError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
