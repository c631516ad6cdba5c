//! Researcher directory, dashboard, profile, search, and recommendation handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use cura_core::entities::Researcher;
use cura_core::responses::{
    DashboardResponse, ProfileResponse, RecommendationsResponse, ResearcherResponse,
    SetupResponse, SpecializationsResponse,
};
use cura_db::helpers::split_list;
use cura_db::repos::researcher::NewResearcher;
use cura_db::updates::researcher::{ResearcherUpdate, ResearcherUpdateBuilder};

use crate::api::error::ApiError;
use crate::api::state::AppState;

/// Interests arrive either as a JSON list or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Interests {
    List(Vec<String>),
    Text(String),
}

impl Interests {
    fn into_list(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Text(text) => split_list(&text),
        }
    }
}

/// Body of `POST /api/researchers/setup` and `PUT /api/researchers/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResearcherBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    #[serde(alias = "researchInterests")]
    pub research_interests: Option<Interests>,
    pub institution: Option<String>,
    pub country: Option<String>,
    pub availability: Option<bool>,
    #[serde(alias = "orcidLink")]
    pub orcid_link: Option<String>,
    #[serde(alias = "researchgateLink", alias = "researchGateLink")]
    pub researchgate_link: Option<String>,
}

impl ResearcherBody {
    fn into_new(self) -> NewResearcher {
        NewResearcher {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            specialization: self.specialization.unwrap_or_default(),
            research_interests: self
                .research_interests
                .map(Interests::into_list)
                .unwrap_or_default(),
            institution: self.institution,
            country: self.country,
            availability: self.availability.unwrap_or(false),
            orcid_link: self.orcid_link,
            researchgate_link: self.researchgate_link,
        }
    }

    fn into_update(self) -> ResearcherUpdate {
        let mut builder = ResearcherUpdateBuilder::new();
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(specialization) = self.specialization {
            builder = builder.specialization(specialization);
        }
        if let Some(institution) = self.institution {
            builder = builder.institution(institution);
        }
        if let Some(country) = self.country {
            builder = builder.country(country);
        }
        if let Some(interests) = self.research_interests {
            builder = builder.research_interests(interests.into_list());
        }
        if let Some(availability) = self.availability {
            builder = builder.availability(availability);
        }
        if let Some(link) = self.orcid_link {
            builder = builder.orcid_link(link);
        }
        if let Some(link) = self.researchgate_link {
            builder = builder.researchgate_link(link);
        }
        builder.build()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub viewer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    #[serde(default)]
    pub condition: String,
    pub country: Option<String>,
}

/// GET /api/researchers
pub async fn list_researchers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Researcher>>, ApiError> {
    Ok(Json(state.service.list_researchers().await?))
}

/// POST /api/researchers/setup
pub async fn setup_researcher(
    State(state): State<AppState>,
    Json(body): Json<ResearcherBody>,
) -> Result<(StatusCode, Json<SetupResponse>), ApiError> {
    let researcher = state.service.setup_researcher(&body.into_new()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SetupResponse {
            message: "Researcher profile created successfully.".to_string(),
            researcher,
        }),
    ))
}

/// GET /api/researchers/specializations/list
pub async fn list_specializations(
    State(state): State<AppState>,
) -> Result<Json<SpecializationsResponse>, ApiError> {
    Ok(Json(SpecializationsResponse {
        specializations: state.service.list_specializations().await?,
    }))
}

/// PUT /api/researchers/{id}
pub async fn update_researcher(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ResearcherBody>,
) -> Result<Json<ResearcherResponse>, ApiError> {
    let researcher = state
        .service
        .update_researcher(&id, &body.into_update())
        .await?;
    Ok(Json(ResearcherResponse { researcher }))
}

/// GET /api/researchers/{id}/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardResponse>, ApiError> {
    Ok(Json(state.service.dashboard(&id).await?))
}

/// GET /api/researchers/{id}/profile?viewer=
pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(
        state
            .service
            .public_profile(&id, query.viewer.as_deref())
            .await?,
    ))
}

/// GET /api/search/researchers?q=
pub async fn search_researchers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Researcher>>, ApiError> {
    Ok(Json(state.service.search_researchers(&query.q).await?))
}

/// GET /api/recommendations?condition=&country=
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    Ok(Json(
        state
            .service
            .recommendations(&query.condition, query.country.as_deref())
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interests_accept_list_or_comma_string() {
        let body: ResearcherBody =
            serde_json::from_value(serde_json::json!({"research_interests": "a, b,,c"})).unwrap();
        assert_eq!(body.into_new().research_interests, vec!["a", "b", "c"]);

        let body: ResearcherBody =
            serde_json::from_value(serde_json::json!({"researchInterests": ["x"]})).unwrap();
        assert_eq!(body.into_new().research_interests, vec!["x"]);
    }

    #[test]
    fn update_leaves_absent_fields_unset() {
        let body: ResearcherBody =
            serde_json::from_value(serde_json::json!({"country": "India"})).unwrap();
        let update = body.into_update();
        assert_eq!(update.country.as_deref(), Some("India"));
        assert!(update.name.is_none());
        assert!(update.research_interests.is_none());
    }
}
