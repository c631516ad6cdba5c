//! Keyword-extraction API client.

use cura_config::KeywordApiConfig;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::http::check_response;

#[derive(Serialize)]
struct KeywordRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct KeywordResponse {
    #[serde(default)]
    keywords: Vec<Keyword>,
}

/// Keywords arrive either as bare strings or as scored objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum Keyword {
    Plain(String),
    Scored { keyword: String },
}

impl Keyword {
    fn into_text(self) -> String {
        match self {
            Self::Plain(text) | Self::Scored { keyword: text } => text,
        }
    }
}

/// HTTP client for the keyword API.
pub struct KeywordClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl KeywordClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the underlying client fails to build.
    pub fn new(config: &KeywordApiConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("curalink/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// POST `{"text": ...}` and return the extracted keywords.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the request fails, times out, the API
    /// returns a non-success status, or the body is not the expected JSON.
    pub async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, AnalysisError> {
        let resp = check_response(
            self.http
                .post(&self.url)
                .header("apikey", &self.api_key)
                .json(&KeywordRequest { text })
                .send()
                .await?,
        )
        .await?;

        let body = resp.text().await?;
        let data: KeywordResponse =
            serde_json::from_str(&body).map_err(|e| AnalysisError::Parse(e.to_string()))?;
        Ok(data.keywords.into_iter().map(Keyword::into_text).collect())
    }
}
