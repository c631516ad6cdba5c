use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A researcher profile.
///
/// Nullable columns are defaulted on read ("Unknown Researcher",
/// "General Research", "N/A"), so every field is always present here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Researcher {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Free-text research field; the only join key to publications and trials.
    pub specialization: String,
    /// Ordered list of interests, stored as a JSON array.
    pub research_interests: Vec<String>,
    pub institution: String,
    pub country: String,
    pub availability: bool,
    pub orcid_link: String,
    pub researchgate_link: String,
    pub created_at: DateTime<Utc>,
}
