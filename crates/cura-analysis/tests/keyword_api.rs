//! Keyword API integration tests against a local stub server.

use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use cura_analysis::{AnalysisSource, TextAnalyzer};
use cura_config::KeywordApiConfig;
use serde_json::{Value, json};

const API_KEY: &str = "test-key";

async fn keywords(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid authentication credentials"})),
        );
    }
    let text = body["text"].as_str().unwrap_or_default().to_lowercase();
    let mut found = vec![json!("patient history")];
    if text.contains("tumour") {
        found.push(json!({"keyword": "brain tumour", "score": 0.9}));
    }
    if text.contains("berlin") {
        found.push(json!("Berlin, Germany"));
    }
    (StatusCode::OK, Json(json!({"keywords": found})))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({"keywords": ["glioma"]}))
}

/// Start the stub on an ephemeral port and return its base URL.
async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/keyword", post(keywords))
        .route("/broken", post(broken))
        .route("/html", post(not_json))
        .route("/slow", post(slow));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn analyzer(url: String, api_key: &str) -> TextAnalyzer {
    TextAnalyzer::from_config(&KeywordApiConfig {
        api_key: api_key.to_string(),
        url,
        timeout_secs: 1,
    })
    .unwrap()
}

#[tokio::test]
async fn keywords_drive_detection() {
    let base = spawn_stub().await;
    let analyzer = analyzer(format!("{base}/keyword"), API_KEY);
    assert!(analyzer.uses_keyword_api());

    // "brain tumour" keyword matches on the first word of "Brain Tumor"
    let result = analyzer
        .analyze("Second opinion on a tumour, we live near Berlin")
        .await
        .unwrap();
    assert_eq!(result.source, AnalysisSource::Apilayer);
    assert_eq!(result.condition, "Brain Tumor");
    assert_eq!(result.country, "Germany");
    assert_eq!(
        result.keywords,
        vec!["patient history", "brain tumour", "Berlin, Germany"]
    );
}

#[tokio::test]
async fn wrong_key_falls_back() {
    let base = spawn_stub().await;
    let result = analyzer(format!("{base}/keyword"), "wrong")
        .analyze("Lung cancer care in India")
        .await
        .unwrap();
    assert_eq!(result.source, AnalysisSource::Fallback);
    assert_eq!(result.condition, "Lung Cancer");
    assert_eq!(result.country, "India");
    assert!(result.keywords.is_empty());
}

#[tokio::test]
async fn server_error_and_bad_body_fall_back() {
    let base = spawn_stub().await;
    for path in ["broken", "html"] {
        let result = analyzer(format!("{base}/{path}"), API_KEY)
            .analyze("diabetes")
            .await
            .unwrap();
        assert_eq!(result.source, AnalysisSource::Fallback, "{path}");
        assert_eq!(result.condition, "Diabetes");
    }
}

#[tokio::test]
async fn timeout_falls_back() {
    let base = spawn_stub().await;
    let result = analyzer(format!("{base}/slow"), API_KEY)
        .analyze("glioma")
        .await
        .unwrap();
    assert_eq!(result.source, AnalysisSource::Fallback);
    assert_eq!(result.condition, "Glioma");
}

#[tokio::test]
async fn unreachable_api_falls_back() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = analyzer(format!("http://{addr}/keyword"), API_KEY)
        .analyze("Heart disease in the USA")
        .await
        .unwrap();
    assert_eq!(result.source, AnalysisSource::Fallback);
    assert_eq!(result.condition, "Heart Disease");
    assert_eq!(result.country, "USA");
}
