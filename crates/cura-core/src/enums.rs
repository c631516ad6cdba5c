//! Status and role enums for CuraLink.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `CollaborationStatus` provides `allowed_next_states()` so the repository layer
//! can enforce transitions instead of relying on ad hoc `WHERE` clauses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// CollaborationStatus
// ---------------------------------------------------------------------------

/// Status of a collaboration request between two researchers.
///
/// ```text
/// pending → accepted ⇄ rejected
///         → rejected
/// ```
///
/// Responding with the current value is a no-op, so `accepted → accepted`
/// and `rejected → rejected` are allowed. Nothing returns to `pending`
/// through a response; only re-sending a rejected request reopens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl CollaborationStatus {
    /// Valid next states when the target responds.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending | Self::Accepted | Self::Rejected => &[Self::Accepted, Self::Rejected],
        }
    }

    /// Check whether responding with `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether chat messages may be posted on a request in this state.
    #[must_use]
    pub const fn allows_chat(self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Whether a new request between the same pair must be refused.
    #[must_use]
    pub const fn blocks_new_request(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CollaborationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollaborationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "unknown collaboration status '{other}' (expected pending, accepted, or rejected)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// AuthorRole
// ---------------------------------------------------------------------------

/// Who wrote a forum post or reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthorRole {
    Patient,
    Researcher,
}

impl AuthorRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Researcher => "researcher",
        }
    }
}

impl fmt::Display for AuthorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "researcher" => Ok(Self::Researcher),
            other => Err(CoreError::Validation(format!(
                "unknown role '{other}' (expected patient or researcher)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_accepted_or_rejected() {
        let s = CollaborationStatus::Pending;
        assert!(s.can_transition_to(CollaborationStatus::Accepted));
        assert!(s.can_transition_to(CollaborationStatus::Rejected));
    }

    #[test]
    fn responses_never_return_to_pending() {
        for s in [
            CollaborationStatus::Pending,
            CollaborationStatus::Accepted,
            CollaborationStatus::Rejected,
        ] {
            assert!(!s.can_transition_to(CollaborationStatus::Pending), "{s}");
        }
    }

    #[test]
    fn same_value_response_is_allowed() {
        assert!(CollaborationStatus::Rejected.can_transition_to(CollaborationStatus::Rejected));
        assert!(CollaborationStatus::Accepted.can_transition_to(CollaborationStatus::Accepted));
    }

    #[test]
    fn only_accepted_allows_chat() {
        assert!(CollaborationStatus::Accepted.allows_chat());
        assert!(!CollaborationStatus::Pending.allows_chat());
        assert!(!CollaborationStatus::Rejected.allows_chat());
    }

    #[test]
    fn rejected_does_not_block_new_request() {
        assert!(CollaborationStatus::Pending.blocks_new_request());
        assert!(CollaborationStatus::Accepted.blocks_new_request());
        assert!(!CollaborationStatus::Rejected.blocks_new_request());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            " Accepted ".parse::<CollaborationStatus>().unwrap(),
            CollaborationStatus::Accepted
        );
        assert!("maybe".parse::<CollaborationStatus>().is_err());
    }

    #[test]
    fn status_serde_matches_as_str() {
        for s in [
            CollaborationStatus::Pending,
            CollaborationStatus::Accepted,
            CollaborationStatus::Rejected,
        ] {
            let json = serde_json::to_value(s).unwrap();
            assert_eq!(json, serde_json::Value::String(s.as_str().to_string()));
        }
    }

    #[test]
    fn role_parses_known_values_only() {
        assert_eq!("patient".parse::<AuthorRole>().unwrap(), AuthorRole::Patient);
        assert_eq!("RESEARCHER".parse::<AuthorRole>().unwrap(), AuthorRole::Researcher);
        assert!("admin".parse::<AuthorRole>().is_err());
    }
}
