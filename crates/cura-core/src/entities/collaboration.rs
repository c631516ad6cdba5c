use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CollaborationStatus;

/// A proposed working relationship between two researchers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CollaborationRequest {
    pub id: String,
    pub requester_id: String,
    pub target_id: String,
    pub message: String,
    pub status: CollaborationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollaborationRequest {
    /// Whether `researcher_id` is one of the two parties.
    #[must_use]
    pub fn involves(&self, researcher_id: &str) -> bool {
        self.requester_id == researcher_id || self.target_id == researcher_id
    }
}

/// A collaboration request addressed to the dashboard owner, with the
/// requester's display name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IncomingRequest {
    #[serde(flatten)]
    pub request: CollaborationRequest,
    pub requester_name: String,
}
