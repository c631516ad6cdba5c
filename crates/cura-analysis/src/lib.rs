//! # cura-analysis
//!
//! Detects a medical condition and a country in free text.
//!
//! When a keyword API key is configured, the text is first sent to the
//! keyword API and detection runs over the returned keywords plus the text.
//! Without a key, or when the API call fails for any reason, detection falls
//! back to matching full vocabulary names in the text. Callers only see an
//! error for empty input.

mod client;
pub mod detect;
mod error;
mod http;

pub use client::KeywordClient;
pub use error::AnalysisError;

use cura_config::KeywordApiConfig;
use serde::{Deserialize, Serialize};

use detect::{Detection, detect_fallback, detect_with_keywords};

// ── Types ──────────────────────────────────────────────────────────

/// Which path produced an [`Analysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Keyword API plus text matching.
    Apilayer,
    /// Local full-name matching only.
    Fallback,
}

/// Result body of `POST /api/ai/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub condition: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub source: AnalysisSource,
}

impl Analysis {
    fn new(detection: Detection, keywords: Vec<String>, source: AnalysisSource) -> Self {
        Self {
            condition: detection.condition.to_string(),
            country: detection.country.to_string(),
            keywords,
            source,
        }
    }

    fn fallback(text: &str) -> Self {
        Self::new(detect_fallback(text), Vec::new(), AnalysisSource::Fallback)
    }
}

// ── Analyzer ───────────────────────────────────────────────────────

/// Text analyzer with an optional keyword API client.
pub struct TextAnalyzer {
    client: Option<KeywordClient>,
}

impl TextAnalyzer {
    /// Build from configuration. An empty API key disables the remote call.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &KeywordApiConfig) -> Result<Self, AnalysisError> {
        if !config.is_configured() {
            tracing::warn!("keyword API key not set, text analysis uses local matching only");
            return Ok(Self::fallback_only());
        }
        Ok(Self {
            client: Some(KeywordClient::new(config)?),
        })
    }

    /// An analyzer that never calls out.
    #[must_use]
    pub const fn fallback_only() -> Self {
        Self { client: None }
    }

    #[must_use]
    pub const fn uses_keyword_api(&self) -> bool {
        self.client.is_some()
    }

    /// Detect condition and country in `text`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyText`] for empty or whitespace input.
    /// Keyword API failures never surface; they are logged and the local
    /// fallback result is returned.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyText);
        }
        tracing::debug!(chars = text.chars().count(), "analyzing text");

        let Some(client) = &self.client else {
            return Ok(Analysis::fallback(text));
        };

        match client.extract_keywords(text).await {
            Ok(keywords) => {
                let detection = detect_with_keywords(&keywords, text);
                Ok(Analysis::new(detection, keywords, AnalysisSource::Apilayer))
            }
            Err(e) => {
                tracing::warn!(error = %e, "keyword API call failed, using fallback detection");
                Ok(Analysis::fallback(text))
            }
        }
    }
}
