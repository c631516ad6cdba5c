use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A published paper. Matched to researchers by substring on `specialization`
/// and to patients by substring on `condition`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub journal: String,
    pub year: i32,
    pub country: String,
    pub url: String,
    pub condition: String,
    pub specialization: String,
}

/// A clinical trial listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClinicalTrial {
    pub id: String,
    /// External registry identifier (e.g. `NCT01234567`).
    pub trial_id: Option<String>,
    pub title: String,
    pub phase: Option<String>,
    pub country: String,
    pub url: String,
    pub status: Option<String>,
    pub condition: String,
}

/// A clinician or researcher recommended to patients for a condition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub institution: String,
    pub country: String,
    pub url: String,
}
