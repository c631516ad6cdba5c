use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A chat message inside an accepted collaboration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub collaboration_id: String,
    pub sender_id: String,
    /// Display name joined from the sender's researcher row.
    pub sender_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
