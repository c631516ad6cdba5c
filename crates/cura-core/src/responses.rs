//! Composite response types returned as JSON by the HTTP API.
//!
//! These structs define the shape of aggregate endpoints such as the
//! researcher dashboard, the public profile, and recommendations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    ClinicalTrial, Expert, ForumPost, IncomingRequest, Publication, Researcher,
};
use crate::enums::CollaborationStatus;

/// Text used when an item has no title to summarize.
pub const EMPTY_SUMMARY: &str = "No summary available.";

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn summarize(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// A catalog item with a short summary line.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Summarized<T> {
    #[serde(flatten)]
    pub item: T,
    pub summary: String,
}

impl Summarized<Publication> {
    #[must_use]
    pub fn publication(item: Publication, max_chars: usize) -> Self {
        let summary = summarize(&item.title, max_chars);
        Self { item, summary }
    }
}

impl Summarized<ClinicalTrial> {
    #[must_use]
    pub fn trial(item: ClinicalTrial, max_chars: usize) -> Self {
        let summary = summarize(&item.title, max_chars);
        Self { item, summary }
    }
}

/// A suggested collaborator plus the state of any request with the viewer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CollaboratorSuggestion {
    #[serde(flatten)]
    pub researcher: Researcher,
    pub collaboration_status: Option<CollaborationStatus>,
    pub collaboration_id: Option<String>,
}

/// Response from `GET /api/researchers/{id}/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardResponse {
    pub researcher: Researcher,
    pub publications: Vec<Summarized<Publication>>,
    pub clinical_trials: Vec<Summarized<ClinicalTrial>>,
    pub collaborators: Vec<CollaboratorSuggestion>,
    pub incoming_requests: Vec<IncomingRequest>,
    pub researcher_forums: Vec<ForumPost>,
    pub patient_forums: Vec<ForumPost>,
}

/// Response from `GET /api/researchers/{id}/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfileResponse {
    pub researcher: Researcher,
    pub publications: Vec<Publication>,
    pub clinical_trials: Vec<ClinicalTrial>,
    pub collaboration_status: Option<CollaborationStatus>,
    pub collaboration_id: Option<String>,
}

/// Response from `GET /api/recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecommendationsResponse {
    pub publications: Vec<Publication>,
    pub clinical_trials: Vec<ClinicalTrial>,
    pub experts: Vec<Expert>,
}

/// Response from `GET /api/researcherforums/{specialization}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpecializationForums {
    pub researcher_forums: Vec<ForumPost>,
    pub patient_forums: Vec<ForumPost>,
}

/// Response from `GET /api/researchers/specializations/list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpecializationsResponse {
    pub specializations: Vec<String>,
}

/// Response from `POST /api/researchers/setup`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SetupResponse {
    pub message: String,
    pub researcher: Researcher,
}

/// Response from `PUT /api/researchers/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearcherResponse {
    pub researcher: Researcher,
}
