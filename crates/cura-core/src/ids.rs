//! ID prefix constants.
//!
//! Every entity ID has the shape `{prefix}-{8 hex chars}`, e.g. `col-a3f8b2c1`.
//! The random part is produced by the database (see `CuraDb::generate_id`).

pub const PREFIX_RESEARCHER: &str = "rsr";
pub const PREFIX_COLLABORATION: &str = "col";
pub const PREFIX_MESSAGE: &str = "msg";
pub const PREFIX_POST: &str = "pst";
pub const PREFIX_REPLY: &str = "rpl";
pub const PREFIX_PUBLICATION: &str = "pub";
pub const PREFIX_TRIAL: &str = "trl";
pub const PREFIX_EXPERT: &str = "exp";

/// All prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_RESEARCHER,
    PREFIX_COLLABORATION,
    PREFIX_MESSAGE,
    PREFIX_POST,
    PREFIX_REPLY,
    PREFIX_PUBLICATION,
    PREFIX_TRIAL,
    PREFIX_EXPERT,
];
