//! Collaboration request store: one request per unordered researcher pair.
//!
//! A pending or accepted request blocks a second request for the same pair in
//! either direction. A rejected request is reopened in place when either side
//! asks again, so its ID and chat history survive.

use chrono::Utc;

use cura_core::entities::{CollaborationRequest, IncomingRequest};
use cura_core::enums::CollaborationStatus;
use cura_core::errors::CoreError;
use cura_core::ids::PREFIX_COLLABORATION;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum, timestamp};
use crate::service::CuraService;

const SELECT_COLS: &str =
    "c.id, c.requester_id, c.target_id, c.message, c.status, c.created_at, c.updated_at";

fn row_to_collaboration(row: &libsql::Row) -> Result<CollaborationRequest, DatabaseError> {
    Ok(CollaborationRequest {
        id: row.get(0)?,
        requester_id: row.get(1)?,
        target_id: row.get(2)?,
        message: row.get(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Order-independent key for a researcher pair.
#[must_use]
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}:{b}")
    } else {
        format!("{b}:{a}")
    }
}

impl CuraService {
    /// Send a collaboration request from `requester_id` to `target_id`.
    ///
    /// # Errors
    ///
    /// - `CoreError::Validation` when requester and target are the same.
    /// - `CoreError::NotFound` when either researcher does not exist.
    /// - `CoreError::Conflict` when the pair already has a pending or accepted request.
    pub async fn create_collaboration(
        &self,
        requester_id: &str,
        target_id: &str,
        message: &str,
    ) -> Result<CollaborationRequest, DatabaseError> {
        let requester_id = requester_id.trim();
        let target_id = target_id.trim();
        if requester_id.is_empty() {
            return Err(CoreError::missing_field("requesterId").into());
        }
        if target_id.is_empty() {
            return Err(CoreError::missing_field("targetId").into());
        }
        if requester_id == target_id {
            return Err(CoreError::Validation(
                "cannot send a collaboration request to yourself".into(),
            )
            .into());
        }
        self.get_researcher(requester_id).await?;
        self.get_researcher(target_id).await?;

        let now = timestamp(Utc::now());

        if let Some(existing) = self.collaboration_between(requester_id, target_id).await? {
            if existing.status.blocks_new_request() {
                return Err(CoreError::Conflict(format!(
                    "a {} collaboration request already exists between these researchers ({})",
                    existing.status, existing.id
                ))
                .into());
            }

            self.db()
                .conn()
                .execute(
                    "UPDATE collaboration_requests
                     SET requester_id = ?1, target_id = ?2, message = ?3, status = ?4,
                         created_at = ?5, updated_at = ?5
                     WHERE id = ?6",
                    libsql::params![
                        requester_id,
                        target_id,
                        message,
                        CollaborationStatus::Pending.as_str(),
                        now.as_str(),
                        existing.id.as_str()
                    ],
                )
                .await?;
            tracing::info!(collaboration_id = %existing.id, requester_id, target_id, "rejected collaboration reopened");
            return self.get_collaboration(&existing.id).await;
        }

        let id = self.db().generate_id(PREFIX_COLLABORATION).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO collaboration_requests
                    (id, requester_id, target_id, pair_key, message, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                libsql::params![
                    id.as_str(),
                    requester_id,
                    target_id,
                    pair_key(requester_id, target_id),
                    message,
                    CollaborationStatus::Pending.as_str(),
                    now.as_str()
                ],
            )
            .await
            .map_err(|e| {
                DatabaseError::conflict_on_unique(
                    e,
                    "a collaboration request already exists between these researchers",
                )
            })?;

        tracing::info!(collaboration_id = %id, requester_id, target_id, "collaboration requested");
        self.get_collaboration(&id).await
    }

    /// Set the status of a request to `accepted` or `rejected`.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` for an unknown request ID.
    /// - `CoreError::InvalidTransition` when `status` is `pending`.
    pub async fn respond_to_collaboration(
        &self,
        collaboration_id: &str,
        status: CollaborationStatus,
    ) -> Result<CollaborationRequest, DatabaseError> {
        let current = self.get_collaboration(collaboration_id).await?;
        if !current.status.can_transition_to(status) {
            return Err(CoreError::InvalidTransition {
                entity_type: "Collaboration request".into(),
                id: current.id,
                from: current.status.to_string(),
                to: status.to_string(),
            }
            .into());
        }

        self.db()
            .conn()
            .execute(
                "UPDATE collaboration_requests SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![status.as_str(), timestamp(Utc::now()), collaboration_id],
            )
            .await?;

        tracing::info!(collaboration_id, from = %current.status, to = %status, "collaboration responded");
        self.get_collaboration(collaboration_id).await
    }

    /// # Errors
    ///
    /// `CoreError::NotFound` when no request has this ID.
    pub async fn get_collaboration(&self, id: &str) -> Result<CollaborationRequest, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM collaboration_requests c WHERE c.id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("Collaboration request", id))?;
        row_to_collaboration(&row)
    }

    /// The request between `a` and `b` in either direction, if any.
    pub async fn collaboration_between(
        &self,
        a: &str,
        b: &str,
    ) -> Result<Option<CollaborationRequest>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM collaboration_requests c
                     WHERE c.pair_key = ?1
                     ORDER BY c.updated_at DESC
                     LIMIT 1"
                ),
                [pair_key(a, b)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_collaboration(&row)?)),
            None => Ok(None),
        }
    }

    /// Requests addressed to `target_id`, newest first, with the requester's name.
    pub async fn incoming_collaborations(
        &self,
        target_id: &str,
    ) -> Result<Vec<IncomingRequest>, DatabaseError> {
        self.query_all(
            &format!(
                "SELECT {SELECT_COLS}, COALESCE(r.name, 'Unknown Researcher')
                 FROM collaboration_requests c
                 JOIN researchers r ON r.id = c.requester_id
                 WHERE c.target_id = ?1
                 ORDER BY c.created_at DESC, c.rowid DESC"
            ),
            [target_id],
            |row| {
                Ok(IncomingRequest {
                    request: row_to_collaboration(row)?,
                    requester_name: row.get(7)?,
                })
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_researcher, test_service};
    use pretty_assertions::assert_eq;

    #[test]
    fn pair_key_is_order_independent() {
        assert_eq!(pair_key("rsr-b", "rsr-a"), pair_key("rsr-a", "rsr-b"));
        assert_ne!(pair_key("rsr-a", "rsr-b"), pair_key("rsr-a", "rsr-c"));
    }

    #[tokio::test]
    async fn create_collaboration_starts_pending() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let b = seed_researcher(&svc, "Dr. B", "Oncology").await;

        let req = svc.create_collaboration(&a, &b, "Hi").await.unwrap();
        assert!(req.id.starts_with("col-"));
        assert_eq!(req.status, CollaborationStatus::Pending);
        assert_eq!(req.requester_id, a);
        assert_eq!(req.target_id, b);
        assert_eq!(req.message, "Hi");
    }

    #[tokio::test]
    async fn self_request_is_rejected() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let err = svc.create_collaboration(&a, &a, "").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let err = svc
            .create_collaboration(&a, "rsr-missing0", "")
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn duplicate_pair_conflicts_in_either_direction() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let b = seed_researcher(&svc, "Dr. B", "Oncology").await;
        svc.create_collaboration(&a, &b, "first").await.unwrap();

        for (from, to) in [(&a, &b), (&b, &a)] {
            let err = svc.create_collaboration(from, to, "again").await.unwrap_err();
            assert!(matches!(err, DatabaseError::Core(CoreError::Conflict(_))));
        }
    }

    #[tokio::test]
    async fn rejected_pair_is_reopened_in_place() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let b = seed_researcher(&svc, "Dr. B", "Oncology").await;
        let first = svc.create_collaboration(&a, &b, "first").await.unwrap();
        svc.respond_to_collaboration(&first.id, CollaborationStatus::Rejected)
            .await
            .unwrap();

        let reopened = svc.create_collaboration(&b, &a, "second").await.unwrap();
        assert_eq!(reopened.id, first.id);
        assert_eq!(reopened.status, CollaborationStatus::Pending);
        assert_eq!(reopened.requester_id, b);
        assert_eq!(reopened.target_id, a);
        assert_eq!(reopened.message, "second");
    }

    #[tokio::test]
    async fn respond_accepts_and_allows_flip() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let b = seed_researcher(&svc, "Dr. B", "Oncology").await;
        let req = svc.create_collaboration(&a, &b, "").await.unwrap();

        let accepted = svc
            .respond_to_collaboration(&req.id, CollaborationStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(accepted.status, CollaborationStatus::Accepted);

        let again = svc
            .respond_to_collaboration(&req.id, CollaborationStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(again.status, CollaborationStatus::Accepted);

        let rejected = svc
            .respond_to_collaboration(&req.id, CollaborationStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(rejected.status, CollaborationStatus::Rejected);
    }

    #[tokio::test]
    async fn respond_with_pending_is_invalid_transition() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let b = seed_researcher(&svc, "Dr. B", "Oncology").await;
        let req = svc.create_collaboration(&a, &b, "").await.unwrap();

        let err = svc
            .respond_to_collaboration(&req.id, CollaborationStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidTransition { ref from, ref to, .. })
                if from == "pending" && to == "pending"
        ));
        let unchanged = svc.get_collaboration(&req.id).await.unwrap();
        assert_eq!(unchanged.status, CollaborationStatus::Pending);
    }

    #[tokio::test]
    async fn respond_to_unknown_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .respond_to_collaboration("col-missing0", CollaborationStatus::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn between_is_symmetric() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let b = seed_researcher(&svc, "Dr. B", "Oncology").await;
        let c = seed_researcher(&svc, "Dr. C", "Oncology").await;
        let req = svc.create_collaboration(&a, &b, "").await.unwrap();

        assert_eq!(svc.collaboration_between(&b, &a).await.unwrap().unwrap().id, req.id);
        assert!(svc.collaboration_between(&a, &c).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn incoming_lists_newest_first_with_names() {
        let svc = test_service().await;
        let target = seed_researcher(&svc, "Dr. Target", "Oncology").await;
        let first = seed_researcher(&svc, "Dr. First", "Oncology").await;
        let second = seed_researcher(&svc, "Dr. Second", "Oncology").await;
        svc.create_collaboration(&first, &target, "").await.unwrap();
        svc.create_collaboration(&second, &target, "").await.unwrap();
        svc.create_collaboration(&target, &first, "").await.unwrap_err();

        let incoming = svc.incoming_collaborations(&target).await.unwrap();
        let names: Vec<_> = incoming.iter().map(|i| i.requester_name.as_str()).collect();
        assert_eq!(names, vec!["Dr. Second", "Dr. First"]);
        assert!(svc.incoming_collaborations(&first).await.unwrap().is_empty());
    }
}
