//! Entity structs for all CuraLink domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `cura-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod catalog;
mod collaboration;
mod forum;
mod message;
mod researcher;

pub use catalog::{ClinicalTrial, Expert, Publication};
pub use collaboration::{CollaborationRequest, IncomingRequest};
pub use forum::{ForumPost, ForumReply};
pub use message::Message;
pub use researcher::Researcher;
