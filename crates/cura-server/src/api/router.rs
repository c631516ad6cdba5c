//! Router configuration: route table plus CORS and request tracing layers.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{analysis, collaborations, forums, health, messages, researchers};
use super::state::AppState;

/// Build the full application router.
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        // =================================================================
        // HEALTH
        // =================================================================
        .route("/", get(health::root))
        .route("/api/health", get(health::health))
        // =================================================================
        // RESEARCHERS
        // =================================================================
        .route("/api/researchers", get(researchers::list_researchers))
        .route("/api/researchers/setup", post(researchers::setup_researcher))
        .route(
            "/api/researchers/specializations/list",
            get(researchers::list_specializations),
        )
        .route("/api/researchers/{id}", put(researchers::update_researcher))
        .route("/api/researchers/{id}/dashboard", get(researchers::dashboard))
        .route("/api/researchers/{id}/profile", get(researchers::profile))
        .route("/api/search/researchers", get(researchers::search_researchers))
        .route("/api/recommendations", get(researchers::recommendations))
        // =================================================================
        // COLLABORATION & MESSAGING
        // =================================================================
        .route(
            "/api/collaborations/request",
            post(collaborations::request_collaboration),
        )
        .route(
            "/api/collaborations/{id}/respond",
            put(collaborations::respond_to_collaboration),
        )
        .route("/api/messages", post(messages::post_message))
        .route("/api/messages/{collaboration_id}", get(messages::list_messages))
        // =================================================================
        // FORUMS
        // =================================================================
        .route("/api/forums", get(forums::list_posts).post(forums::create_post))
        .route("/api/forums/{post_id}/replies", post(forums::add_reply))
        // One segment name for both: a specialization on GET, a post ID under /replies
        .route(
            "/api/researcherforums/{key}",
            get(forums::forums_by_specialization),
        )
        .route(
            "/api/researcherforums/{key}/replies",
            post(forums::add_researcher_reply),
        )
        // =================================================================
        // TEXT ANALYSIS
        // =================================================================
        .route("/api/ai/analyze", post(analysis::analyze))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

/// CORS for the configured frontend origin. `*` allows any origin without credentials.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let origin = origin.trim();
    if origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    // Echoed back only when the request's Origin matches.
    let allowed: Vec<HeaderValue> = match origin.parse::<HeaderValue>() {
        Ok(value) => vec![value],
        Err(_) => {
            tracing::error!(origin, "CORS: invalid origin, rejecting all cross-origin requests");
            Vec::new()
        }
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
