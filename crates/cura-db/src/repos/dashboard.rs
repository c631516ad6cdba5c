//! Dashboard and public profile aggregation.
//!
//! Both views are assembled from independent reads. Any failing read fails
//! the whole view; there is no partial body.

use cura_core::entities::Researcher;
use cura_core::responses::{
    CollaboratorSuggestion, DashboardResponse, ProfileResponse, Summarized,
};

use crate::error::DatabaseError;
use crate::service::CuraService;

impl CuraService {
    /// Everything the researcher dashboard shows for `researcher_id`.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown researcher; any query failure otherwise.
    pub async fn dashboard(&self, researcher_id: &str) -> Result<DashboardResponse, DatabaseError> {
        let researcher = self.get_researcher(researcher_id).await?;
        let limits = self.limits();
        let n = limits.dashboard_limit;
        let summary_chars = limits.summary_max_chars;

        let mut publications = self
            .publications_for_specialization(&researcher.specialization, n)
            .await?;
        if publications.is_empty() {
            publications = self.latest_publications(n).await?;
        }

        let mut clinical_trials = self
            .trials_for_condition(&researcher.specialization, n)
            .await?;
        if clinical_trials.is_empty() {
            clinical_trials = self.latest_trials(n).await?;
        }

        let collaborators = self.collaborator_suggestions(&researcher).await?;
        let incoming_requests = self.incoming_collaborations(&researcher.id).await?;
        let forums = self
            .forums_by_specialization(&researcher.specialization)
            .await?;

        Ok(DashboardResponse {
            publications: publications
                .into_iter()
                .map(|p| Summarized::publication(p, summary_chars))
                .collect(),
            clinical_trials: clinical_trials
                .into_iter()
                .map(|t| Summarized::trial(t, summary_chars))
                .collect(),
            collaborators,
            incoming_requests,
            researcher_forums: forums.researcher_forums,
            patient_forums: forums.patient_forums,
            researcher,
        })
    }

    /// Peers in the same specialization, each with the state of any request
    /// between them and `owner`.
    pub async fn collaborator_suggestions(
        &self,
        owner: &Researcher,
    ) -> Result<Vec<CollaboratorSuggestion>, DatabaseError> {
        let peers = self
            .researchers_with_specialization(
                &owner.specialization,
                &owner.id,
                self.limits().collaborator_limit,
            )
            .await?;

        let mut suggestions = Vec::with_capacity(peers.len());
        for peer in peers {
            let existing = self.collaboration_between(&owner.id, &peer.id).await?;
            suggestions.push(CollaboratorSuggestion {
                collaboration_status: existing.as_ref().map(|c| c.status),
                collaboration_id: existing.map(|c| c.id),
                researcher: peer,
            });
        }
        Ok(suggestions)
    }

    /// A researcher as seen by `viewer_id` (or anonymously).
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown researcher.
    pub async fn public_profile(
        &self,
        researcher_id: &str,
        viewer_id: Option<&str>,
    ) -> Result<ProfileResponse, DatabaseError> {
        let researcher = self.get_researcher(researcher_id).await?;
        let n = self.limits().profile_limit;

        let publications = self
            .publications_for_specialization(&researcher.specialization, n)
            .await?;
        let clinical_trials = self
            .trials_for_condition(&researcher.specialization, n)
            .await?;

        let existing = match viewer_id.map(str::trim).filter(|v| !v.is_empty()) {
            Some(viewer) if viewer != researcher.id => {
                self.collaboration_between(viewer, &researcher.id).await?
            }
            _ => None,
        };

        Ok(ProfileResponse {
            researcher,
            publications,
            clinical_trials,
            collaboration_status: existing.as_ref().map(|c| c.status),
            collaboration_id: existing.map(|c| c.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::catalog::{NewPublication, NewTrial};
    use crate::repos::forum::NewPost;
    use crate::test_support::helpers::{seed_researcher, test_service};
    use cura_core::enums::{AuthorRole, CollaborationStatus};
    use cura_core::errors::CoreError;
    use cura_core::responses::EMPTY_SUMMARY;
    use pretty_assertions::assert_eq;

    async fn add_publication(svc: &CuraService, title: &str, year: i32, specialization: &str) {
        svc.insert_publication(&NewPublication {
            title: title.into(),
            year: Some(year),
            specialization: Some(specialization.into()),
            ..NewPublication::default()
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn dashboard_for_unknown_researcher_is_not_found() {
        let svc = test_service().await;
        let err = svc.dashboard("rsr-missing0").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn dashboard_prefers_matching_publications() {
        let svc = test_service().await;
        let id = seed_researcher(&svc, "Dr. A", "Oncology").await;
        add_publication(&svc, "onco paper", 2020, "Clinical Oncology").await;
        add_publication(&svc, "cardio paper", 2024, "Cardiology").await;

        let dash = svc.dashboard(&id).await.unwrap();
        assert_eq!(dash.publications.len(), 1);
        assert_eq!(dash.publications[0].item.title, "onco paper");
        assert_eq!(dash.publications[0].summary, "onco paper");
    }

    #[tokio::test]
    async fn dashboard_falls_back_to_latest_catalog() {
        let svc = test_service().await;
        let id = seed_researcher(&svc, "Dr. A", "Dermatology").await;
        add_publication(&svc, "cardio paper", 2024, "Cardiology").await;
        svc.insert_trial(&NewTrial {
            title: "a".repeat(120),
            condition: Some("Cardiology".into()),
            ..NewTrial::default()
        })
        .await
        .unwrap();

        let dash = svc.dashboard(&id).await.unwrap();
        assert_eq!(dash.publications.len(), 1);
        assert_eq!(dash.clinical_trials.len(), 1);
        assert_eq!(dash.clinical_trials[0].summary.chars().count(), 103);
    }

    #[tokio::test]
    async fn dashboard_is_empty_but_valid_with_no_catalog() {
        let svc = test_service().await;
        let id = seed_researcher(&svc, "Dr. Lonely", "Virology").await;
        let dash = svc.dashboard(&id).await.unwrap();
        assert!(dash.publications.is_empty());
        assert!(dash.clinical_trials.is_empty());
        assert!(dash.collaborators.is_empty());
        assert!(dash.incoming_requests.is_empty());
        assert_eq!(dash.researcher.name, "Dr. Lonely");
    }

    #[test]
    fn empty_title_summary_placeholder() {
        let s = cura_core::responses::summarize("", 100);
        assert_eq!(s, EMPTY_SUMMARY);
    }

    #[tokio::test]
    async fn collaborators_carry_request_state() {
        let svc = test_service().await;
        let me = seed_researcher(&svc, "Dr. Me", "Oncology").await;
        let asked = seed_researcher(&svc, "Dr. Asked", "Oncology").await;
        let fresh = seed_researcher(&svc, "Dr. Fresh", "Oncology").await;
        seed_researcher(&svc, "Dr. Other", "Cardiology").await;
        let req = svc.create_collaboration(&asked, &me, "hello").await.unwrap();

        let dash = svc.dashboard(&me).await.unwrap();
        assert_eq!(dash.collaborators.len(), 2);
        let by_id = |id: &str| {
            dash.collaborators
                .iter()
                .find(|c| c.researcher.id == id)
                .unwrap()
                .clone()
        };
        assert_eq!(by_id(&asked).collaboration_status, Some(CollaborationStatus::Pending));
        assert_eq!(by_id(&asked).collaboration_id, Some(req.id.clone()));
        assert_eq!(by_id(&fresh).collaboration_status, None);

        assert_eq!(dash.incoming_requests.len(), 1);
        assert_eq!(dash.incoming_requests[0].requester_name, "Dr. Asked");
    }

    #[tokio::test]
    async fn dashboard_includes_specialization_forums() {
        let svc = test_service().await;
        let me = seed_researcher(&svc, "Dr. Me", "Neurology").await;
        svc.create_post(&NewPost {
            title: "Seizure question".into(),
            content: "Is this normal?".into(),
            specialization: Some("Neurology".into()),
            ..NewPost::default()
        })
        .await
        .unwrap();
        svc.create_post(&NewPost {
            title: "EEG datasets".into(),
            content: "Looking for shared data".into(),
            specialization: Some("Neurology".into()),
            author_role: Some(AuthorRole::Researcher),
            ..NewPost::default()
        })
        .await
        .unwrap();

        let dash = svc.dashboard(&me).await.unwrap();
        assert_eq!(dash.patient_forums.len(), 1);
        assert_eq!(dash.researcher_forums.len(), 1);
    }

    #[tokio::test]
    async fn profile_reports_viewer_relationship() {
        let svc = test_service().await;
        let owner = seed_researcher(&svc, "Dr. Owner", "Oncology").await;
        let viewer = seed_researcher(&svc, "Dr. Viewer", "Oncology").await;
        for i in 0..7 {
            add_publication(&svc, &format!("paper {i}"), 2010 + i, "Oncology").await;
        }

        let anon = svc.public_profile(&owner, None).await.unwrap();
        assert_eq!(anon.publications.len(), 5);
        assert_eq!(anon.publications[0].title, "paper 6");
        assert_eq!(anon.collaboration_status, None);

        let req = svc.create_collaboration(&viewer, &owner, "").await.unwrap();
        svc.respond_to_collaboration(&req.id, CollaborationStatus::Accepted)
            .await
            .unwrap();

        let seen = svc.public_profile(&owner, Some(&viewer)).await.unwrap();
        assert_eq!(seen.collaboration_status, Some(CollaborationStatus::Accepted));
        assert_eq!(seen.collaboration_id, Some(req.id));
    }

    #[tokio::test]
    async fn profile_without_matches_has_no_fallback() {
        let svc = test_service().await;
        let owner = seed_researcher(&svc, "Dr. Owner", "Virology").await;
        add_publication(&svc, "cardio", 2024, "Cardiology").await;
        let profile = svc.public_profile(&owner, Some("")).await.unwrap();
        assert!(profile.publications.is_empty());
    }
}
