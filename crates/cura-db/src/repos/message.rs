//! Messaging gate: chat is only open on accepted collaborations.

use chrono::Utc;

use cura_core::entities::Message;
use cura_core::errors::CoreError;
use cura_core::ids::PREFIX_MESSAGE;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, timestamp};
use crate::service::CuraService;

const SELECT_COLS: &str = "m.id, m.collaboration_id, m.sender_id, \
     COALESCE(r.name, 'Unknown Researcher'), m.text, m.created_at";

const FROM_JOINED: &str = "FROM messages m LEFT JOIN researchers r ON r.id = m.sender_id";

fn row_to_message(row: &libsql::Row) -> Result<Message, DatabaseError> {
    Ok(Message {
        id: row.get(0)?,
        collaboration_id: row.get(1)?,
        sender_id: row.get(2)?,
        sender_name: row.get(3)?,
        text: row.get(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl CuraService {
    /// Post a chat message on an accepted collaboration.
    ///
    /// The status is read at call time; nothing is written when the gate refuses.
    ///
    /// # Errors
    ///
    /// - `CoreError::Validation` for blank text.
    /// - `CoreError::NotFound` for an unknown collaboration.
    /// - `CoreError::Forbidden` when the collaboration is not accepted, or the
    ///   sender is not one of its two researchers.
    pub async fn post_message(
        &self,
        collaboration_id: &str,
        sender_id: &str,
        text: &str,
    ) -> Result<Message, DatabaseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::missing_field("text").into());
        }

        let collaboration = self.get_collaboration(collaboration_id).await?;
        if !collaboration.status.allows_chat() {
            tracing::debug!(collaboration_id, status = %collaboration.status, "chat refused");
            return Err(CoreError::Forbidden(format!(
                "chat not allowed: collaboration is {}",
                collaboration.status
            ))
            .into());
        }
        if !collaboration.involves(sender_id) {
            return Err(CoreError::Forbidden(
                "chat not allowed: sender is not part of this collaboration".into(),
            )
            .into());
        }

        let id = self.db().generate_id(PREFIX_MESSAGE).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO messages (id, collaboration_id, sender_id, text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    collaboration_id,
                    sender_id,
                    text,
                    timestamp(Utc::now())
                ],
            )
            .await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} {FROM_JOINED} WHERE m.id = ?1"),
                [id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_message(&row)
    }

    /// All messages of a collaboration, oldest first.
    ///
    /// An unknown collaboration yields an empty list.
    pub async fn list_messages(&self, collaboration_id: &str) -> Result<Vec<Message>, DatabaseError> {
        self.query_all(
            &format!(
                "SELECT {SELECT_COLS} {FROM_JOINED}
                 WHERE m.collaboration_id = ?1
                 ORDER BY m.created_at ASC, m.rowid ASC"
            ),
            [collaboration_id],
            row_to_message,
        )
        .await
    }
}
