//! Shared handler state.

use std::sync::Arc;

use cura_analysis::TextAnalyzer;
use cura_db::service::CuraService;

/// Built once at startup and cloned into every handler via `State`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CuraService>,
    pub analyzer: Arc<TextAnalyzer>,
}

impl AppState {
    #[must_use]
    pub const fn new(service: Arc<CuraService>, analyzer: Arc<TextAnalyzer>) -> Self {
        Self { service, analyzer }
    }
}
