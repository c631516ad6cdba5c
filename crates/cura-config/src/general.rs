//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_dashboard_limit() -> u32 {
    10
}

const fn default_profile_limit() -> u32 {
    5
}

const fn default_collaborator_limit() -> u32 {
    10
}

const fn default_summary_max_chars() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Publications/trials shown on a dashboard and in recommendations.
    #[serde(default = "default_dashboard_limit")]
    pub dashboard_limit: u32,

    /// Publications/trials shown on a public profile.
    #[serde(default = "default_profile_limit")]
    pub profile_limit: u32,

    /// Suggested collaborators on a dashboard.
    #[serde(default = "default_collaborator_limit")]
    pub collaborator_limit: u32,

    /// Length at which catalog titles are cut for the `summary` field.
    #[serde(default = "default_summary_max_chars")]
    pub summary_max_chars: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            dashboard_limit: default_dashboard_limit(),
            profile_limit: default_profile_limit(),
            collaborator_limit: default_collaborator_limit(),
            summary_max_chars: default_summary_max_chars(),
        }
    }
}
