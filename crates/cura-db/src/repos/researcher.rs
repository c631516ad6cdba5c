//! Researcher repository: setup, lookup, search, and partial update.

use chrono::Utc;

use cura_core::entities::Researcher;
use cura_core::errors::CoreError;
use cura_core::ids::PREFIX_RESEARCHER;

use crate::error::DatabaseError;
use crate::helpers::{opt_value, parse_datetime, parse_string_list, timestamp, to_json_list};
use crate::service::CuraService;
use crate::updates::researcher::ResearcherUpdate;

/// Default display values substituted for NULL columns on read.
pub const DEFAULT_NAME: &str = "Unknown Researcher";
pub const DEFAULT_SPECIALIZATION: &str = "General Research";
pub const DEFAULT_PLACE: &str = "N/A";

/// Columns for `FROM researchers r`, with NULL defaults applied.
pub(crate) const SELECT_COLS: &str = "r.id, \
     COALESCE(r.name, 'Unknown Researcher'), \
     COALESCE(r.email, ''), \
     COALESCE(r.specialization, 'General Research'), \
     r.research_interests, \
     COALESCE(r.institution, 'N/A'), \
     COALESCE(r.country, 'N/A'), \
     COALESCE(r.availability, 0), \
     COALESCE(r.orcid_link, ''), \
     COALESCE(r.researchgate_link, ''), \
     r.created_at";

/// Number of columns in [`SELECT_COLS`]; joined queries append after it.
pub(crate) const SELECT_COLS_LEN: i32 = 11;

pub(crate) fn row_to_researcher(row: &libsql::Row) -> Result<Researcher, DatabaseError> {
    Ok(Researcher {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        specialization: row.get(3)?,
        research_interests: parse_string_list(row.get::<Option<String>>(4)?.as_deref()),
        institution: row.get(5)?,
        country: row.get(6)?,
        availability: row.get::<i64>(7)? != 0,
        orcid_link: row.get(8)?,
        researchgate_link: row.get(9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

/// Input for [`CuraService::setup_researcher`].
#[derive(Debug, Clone, Default)]
pub struct NewResearcher {
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub research_interests: Vec<String>,
    pub institution: Option<String>,
    pub country: Option<String>,
    pub availability: bool,
    pub orcid_link: Option<String>,
    pub researchgate_link: Option<String>,
}

impl NewResearcher {
    /// Trim every field and check that the required ones are present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first missing field.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        let required = |field: &str, value: &str| {
            let value = value.trim();
            if value.is_empty() {
                Err(CoreError::missing_field(field))
            } else {
                Ok(value.to_string())
            }
        };
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Ok(Self {
            name: required("name", &self.name)?,
            email: required("email", &self.email)?,
            specialization: required("specialization", &self.specialization)?,
            research_interests: self
                .research_interests
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .map(String::from)
                .collect(),
            institution: optional(&self.institution),
            country: optional(&self.country),
            availability: self.availability,
            orcid_link: optional(&self.orcid_link),
            researchgate_link: optional(&self.researchgate_link),
        })
    }
}

impl CuraService {
    /// Create a researcher profile.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` when name, email, or specialization is blank.
    pub async fn setup_researcher(&self, new: &NewResearcher) -> Result<Researcher, DatabaseError> {
        let new = new.normalized()?;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_RESEARCHER).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO researchers (id, name, email, specialization, research_interests,
                    institution, country, availability, orcid_link, researchgate_link, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    new.email.as_str(),
                    new.specialization.as_str(),
                    to_json_list(&new.research_interests)?,
                    opt_value(new.institution.as_deref()),
                    opt_value(new.country.as_deref()),
                    i64::from(new.availability),
                    opt_value(new.orcid_link.as_deref()),
                    opt_value(new.researchgate_link.as_deref()),
                    timestamp(now)
                ],
            )
            .await?;

        tracing::info!(researcher_id = %id, specialization = %new.specialization, "researcher created");
        self.get_researcher(&id).await
    }

    /// # Errors
    ///
    /// `CoreError::NotFound` when no researcher has this ID.
    pub async fn get_researcher(&self, id: &str) -> Result<Researcher, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM researchers r WHERE r.id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("Researcher", id))?;
        row_to_researcher(&row)
    }

    pub async fn list_researchers(&self) -> Result<Vec<Researcher>, DatabaseError> {
        self.query_all(
            &format!("SELECT {SELECT_COLS} FROM researchers r ORDER BY r.created_at, r.rowid"),
            (),
            row_to_researcher,
        )
        .await
    }

    /// Case-insensitive substring search over name, specialization,
    /// institution, and country. A blank query returns everyone.
    pub async fn search_researchers(&self, query: &str) -> Result<Vec<Researcher>, DatabaseError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_researchers().await;
        }
        let pattern = format!("%{}%", query.to_lowercase());
        self.query_all(
            &format!(
                "SELECT {SELECT_COLS} FROM researchers r
                 WHERE LOWER(COALESCE(r.name, '')) LIKE ?1
                    OR LOWER(COALESCE(r.specialization, '')) LIKE ?1
                    OR LOWER(COALESCE(r.institution, '')) LIKE ?1
                    OR LOWER(COALESCE(r.country, '')) LIKE ?1
                 ORDER BY r.created_at, r.rowid"
            ),
            [pattern.as_str()],
            row_to_researcher,
        )
        .await
    }

    /// Apply a partial update; unset fields keep their value.
    ///
    /// Blank optional text clears the column so its read default applies.
    ///
    /// # Errors
    ///
    /// - `CoreError::Validation` when `name` or `specialization` is given but blank.
    /// - `CoreError::NotFound` when no researcher has this ID.
    pub async fn update_researcher(
        &self,
        researcher_id: &str,
        update: &ResearcherUpdate,
    ) -> Result<Researcher, DatabaseError> {
        if update.is_empty() {
            return self.get_researcher(researcher_id).await;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        for (column, value) in [("name", &update.name), ("specialization", &update.specialization)] {
            if let Some(value) = value {
                let value = value.trim();
                if value.is_empty() {
                    return Err(CoreError::missing_field(column).into());
                }
                sets.push(format!("{column} = ?{idx}"));
                params.push(value.to_string().into());
                idx += 1;
            }
        }

        let optional_fields = [
            ("institution", &update.institution),
            ("country", &update.country),
            ("orcid_link", &update.orcid_link),
            ("researchgate_link", &update.researchgate_link),
        ];
        for (column, value) in optional_fields {
            if let Some(value) = value {
                let value = value.trim();
                sets.push(format!("{column} = ?{idx}"));
                params.push(opt_value(Some(value).filter(|v| !v.is_empty())));
                idx += 1;
            }
        }
        if let Some(ref interests) = update.research_interests {
            sets.push(format!("research_interests = ?{idx}"));
            params.push(to_json_list(interests)?.into());
            idx += 1;
        }
        if let Some(availability) = update.availability {
            sets.push(format!("availability = ?{idx}"));
            params.push(i64::from(availability).into());
            idx += 1;
        }

        params.push(researcher_id.into());
        let sql = format!("UPDATE researchers SET {} WHERE id = ?{idx}", sets.join(", "));
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(CoreError::not_found("Researcher", researcher_id).into());
        }

        tracing::debug!(researcher_id, fields = sets.len(), "researcher updated");
        self.get_researcher(researcher_id).await
    }

    /// Researchers sharing `specialization` (after defaulting), excluding `exclude_id`.
    pub async fn researchers_with_specialization(
        &self,
        specialization: &str,
        exclude_id: &str,
        limit: u32,
    ) -> Result<Vec<Researcher>, DatabaseError> {
        self.query_all(
            &format!(
                "SELECT {SELECT_COLS} FROM researchers r
                 WHERE COALESCE(r.specialization, 'General Research') = ?1 AND r.id <> ?2
                 ORDER BY r.created_at, r.rowid
                 LIMIT {limit}"
            ),
            [specialization, exclude_id],
            row_to_researcher,
        )
        .await
    }

    pub async fn list_specializations(&self) -> Result<Vec<String>, DatabaseError> {
        self.query_all(
            "SELECT name FROM specializations ORDER BY id",
            (),
            |row| Ok(row.get::<String>(0)?),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_researcher, test_service};
    use crate::updates::researcher::ResearcherUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn setup_researcher_roundtrip() {
        let svc = test_service().await;
        let created = svc
            .setup_researcher(&NewResearcher {
                name: "  Dr. Priya Nair ".into(),
                email: "priya@example.org".into(),
                specialization: "Oncology".into(),
                research_interests: vec!["immunotherapy".into(), " ".into()],
                institution: Some("AIIMS Delhi".into()),
                availability: true,
                ..NewResearcher::default()
            })
            .await
            .unwrap();

        assert!(created.id.starts_with("rsr-"));
        assert_eq!(created.name, "Dr. Priya Nair");
        assert_eq!(created.research_interests, vec!["immunotherapy".to_string()]);
        assert_eq!(created.country, DEFAULT_PLACE);
        assert!(created.availability);

        let fetched = svc.get_researcher(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn setup_requires_name_email_specialization() {
        let svc = test_service().await;
        let err = svc
            .setup_researcher(&NewResearcher {
                name: "Dr. X".into(),
                email: "   ".into(),
                specialization: "Oncology".into(),
                ..NewResearcher::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(ref m)) if m.contains("email")));
        assert!(svc.list_researchers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn null_columns_read_back_with_defaults() {
        let svc = test_service().await;
        svc.db()
            .conn()
            .execute(
                "INSERT INTO researchers (id, created_at) VALUES ('rsr-00000001', datetime('now'))",
                (),
            )
            .await
            .unwrap();

        let r = svc.get_researcher("rsr-00000001").await.unwrap();
        assert_eq!(r.name, DEFAULT_NAME);
        assert_eq!(r.specialization, DEFAULT_SPECIALIZATION);
        assert_eq!(r.institution, DEFAULT_PLACE);
        assert_eq!(r.country, DEFAULT_PLACE);
        assert!(!r.availability);
        assert!(r.research_interests.is_empty());
        assert_eq!(r.orcid_link, "");
    }

    #[tokio::test]
    async fn get_unknown_researcher_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_researcher("rsr-missing0").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn update_researcher_partial() {
        let svc = test_service().await;
        let id = seed_researcher(&svc, "Dr. Sarah Thompson", "Cardiology").await;

        let update = ResearcherUpdateBuilder::new()
            .institution("Mayo Clinic")
            .research_interests(vec!["arrhythmia".into()])
            .availability(true)
            .build();
        let updated = svc.update_researcher(&id, &update).await.unwrap();

        assert_eq!(updated.name, "Dr. Sarah Thompson");
        assert_eq!(updated.specialization, "Cardiology");
        assert_eq!(updated.institution, "Mayo Clinic");
        assert_eq!(updated.research_interests, vec!["arrhythmia".to_string()]);
        assert!(updated.availability);
    }

    #[tokio::test]
    async fn empty_update_returns_current_row() {
        let svc = test_service().await;
        let id = seed_researcher(&svc, "Dr. A", "Neurology").await;
        let same = svc
            .update_researcher(&id, &ResearcherUpdate::default())
            .await
            .unwrap();
        assert_eq!(same.name, "Dr. A");
    }

    #[tokio::test]
    async fn blank_required_fields_are_rejected_on_update() {
        let svc = test_service().await;
        let id = seed_researcher(&svc, "Dr. Priya Nair", "Oncology").await;

        for update in [
            ResearcherUpdateBuilder::new().name("   ").build(),
            ResearcherUpdateBuilder::new().specialization("  ").build(),
        ] {
            let err = svc.update_researcher(&id, &update).await.unwrap_err();
            assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
        }

        let unchanged = svc.get_researcher(&id).await.unwrap();
        assert_eq!(unchanged.name, "Dr. Priya Nair");
        assert_eq!(unchanged.specialization, "Oncology");
    }

    #[tokio::test]
    async fn blank_optional_field_falls_back_to_default() {
        let svc = test_service().await;
        let id = seed_researcher(&svc, "Dr. A", "Neurology").await;
        svc.update_researcher(&id, &ResearcherUpdateBuilder::new().institution("Charité").build())
            .await
            .unwrap();

        let cleared = svc
            .update_researcher(&id, &ResearcherUpdateBuilder::new().institution(" ").build())
            .await
            .unwrap();
        assert_eq!(cleared.institution, "N/A");
    }

    #[tokio::test]
    async fn update_unknown_researcher_is_not_found() {
        let svc = test_service().await;
        let update = ResearcherUpdateBuilder::new().name("Nobody").build();
        let err = svc.update_researcher("rsr-missing0", &update).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn search_matches_across_fields_case_insensitively() {
        let svc = test_service().await;
        let a = seed_researcher(&svc, "Dr. Priya Nair", "Oncology").await;
        let b = seed_researcher(&svc, "Dr. Chen Wei", "Endocrinology").await;
        svc.update_researcher(&b, &ResearcherUpdateBuilder::new().country("China").build())
            .await
            .unwrap();

        let hits = svc.search_researchers("OLOGY").await.unwrap();
        let ids: Vec<_> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), b.as_str()]);

        let hits = svc.search_researchers("china").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, b);

        assert_eq!(svc.search_researchers("  ").await.unwrap().len(), 2);
        assert!(svc.search_researchers("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_specialization_excludes_self() {
        let svc = test_service().await;
        let me = seed_researcher(&svc, "Dr. A", "Oncology").await;
        let peer = seed_researcher(&svc, "Dr. B", "Oncology").await;
        seed_researcher(&svc, "Dr. C", "Cardiology").await;

        let peers = svc
            .researchers_with_specialization("Oncology", &me, 10)
            .await
            .unwrap();
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].id, peer);
    }

    #[tokio::test]
    async fn specializations_are_seeded_in_order() {
        let svc = test_service().await;
        let list = svc.list_specializations().await.unwrap();
        assert_eq!(list.first().map(String::as_str), Some("Oncology"));
        assert_eq!(list.len(), 10);
    }
}
