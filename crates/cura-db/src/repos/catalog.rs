//! Research catalog: publications, clinical trials, and experts.
//!
//! The catalog is read-only over HTTP. Rows arrive through
//! [`CuraService::import_catalog`], fed by the `curalink import` command.

use serde::Deserialize;

use cura_core::entities::{ClinicalTrial, Expert, Publication};
use cura_core::errors::CoreError;
use cura_core::ids::{PREFIX_EXPERT, PREFIX_PUBLICATION, PREFIX_TRIAL};
use cura_core::responses::RecommendationsResponse;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_value};
use crate::service::CuraService;

const PUBLICATION_COLS: &str = "id, COALESCE(title, ''), COALESCE(journal, ''), COALESCE(year, 0), \
     COALESCE(country, ''), COALESCE(url, ''), COALESCE(condition, ''), COALESCE(specialization, '')";

const TRIAL_COLS: &str = "id, trial_id, COALESCE(title, ''), phase, COALESCE(country, ''), \
     COALESCE(url, ''), status, COALESCE(condition, '')";

const EXPERT_COLS: &str = "id, name, COALESCE(specialization, ''), COALESCE(institution, ''), \
     COALESCE(country, ''), COALESCE(url, '')";

fn row_to_publication(row: &libsql::Row) -> Result<Publication, DatabaseError> {
    let year = row.get::<i64>(3)?;
    Ok(Publication {
        id: row.get(0)?,
        title: row.get(1)?,
        journal: row.get(2)?,
        year: i32::try_from(year)
            .map_err(|_| DatabaseError::InvalidState(format!("publication year out of range: {year}")))?,
        country: row.get(4)?,
        url: row.get(5)?,
        condition: row.get(6)?,
        specialization: row.get(7)?,
    })
}

fn row_to_trial(row: &libsql::Row) -> Result<ClinicalTrial, DatabaseError> {
    Ok(ClinicalTrial {
        id: row.get(0)?,
        trial_id: get_opt_string(row, 1)?,
        title: row.get(2)?,
        phase: get_opt_string(row, 3)?,
        country: row.get(4)?,
        url: row.get(5)?,
        status: get_opt_string(row, 6)?,
        condition: row.get(7)?,
    })
}

fn row_to_expert(row: &libsql::Row) -> Result<Expert, DatabaseError> {
    Ok(Expert {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
        institution: row.get(3)?,
        country: row.get(4)?,
        url: row.get(5)?,
    })
}

fn contains_pattern(value: &str) -> String {
    format!("%{}%", value.trim().to_lowercase())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewPublication {
    pub title: String,
    pub journal: Option<String>,
    pub year: Option<i32>,
    pub country: Option<String>,
    pub url: Option<String>,
    pub condition: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewTrial {
    #[serde(alias = "trialId")]
    pub trial_id: Option<String>,
    pub title: String,
    pub phase: Option<String>,
    pub country: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewExpert {
    pub name: String,
    pub specialization: Option<String>,
    pub institution: Option<String>,
    pub country: Option<String>,
    pub url: Option<String>,
}

/// A catalog file: `{"publications": [...], "clinical_trials": [...], "experts": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogImport {
    pub publications: Vec<NewPublication>,
    #[serde(alias = "clinicalTrials", alias = "trials")]
    pub clinical_trials: Vec<NewTrial>,
    pub experts: Vec<NewExpert>,
}

/// Row counts written by [`CuraService::import_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportCounts {
    pub publications: usize,
    pub clinical_trials: usize,
    pub experts: usize,
}

impl CuraService {
    pub async fn insert_publication(&self, new: &NewPublication) -> Result<Publication, DatabaseError> {
        if new.title.trim().is_empty() {
            return Err(CoreError::missing_field("title").into());
        }
        let id = self.db().generate_id(PREFIX_PUBLICATION).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO publications (id, title, journal, year, country, url, condition, specialization)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    new.title.trim(),
                    opt_value(new.journal.as_deref()),
                    new.year.map_or(libsql::Value::Null, |y| libsql::Value::Integer(i64::from(y))),
                    opt_value(new.country.as_deref()),
                    opt_value(new.url.as_deref()),
                    opt_value(new.condition.as_deref()),
                    opt_value(new.specialization.as_deref())
                ],
            )
            .await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PUBLICATION_COLS} FROM publications WHERE id = ?1"),
                [id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_publication(&row)
    }

    pub async fn insert_trial(&self, new: &NewTrial) -> Result<ClinicalTrial, DatabaseError> {
        if new.title.trim().is_empty() {
            return Err(CoreError::missing_field("title").into());
        }
        let id = self.db().generate_id(PREFIX_TRIAL).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO clinical_trials (id, trial_id, title, phase, country, url, status, condition)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    opt_value(new.trial_id.as_deref()),
                    new.title.trim(),
                    opt_value(new.phase.as_deref()),
                    opt_value(new.country.as_deref()),
                    opt_value(new.url.as_deref()),
                    opt_value(new.status.as_deref()),
                    opt_value(new.condition.as_deref())
                ],
            )
            .await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {TRIAL_COLS} FROM clinical_trials WHERE id = ?1"),
                [id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_trial(&row)
    }

    pub async fn insert_expert(&self, new: &NewExpert) -> Result<Expert, DatabaseError> {
        if new.name.trim().is_empty() {
            return Err(CoreError::missing_field("name").into());
        }
        let id = self.db().generate_id(PREFIX_EXPERT).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO experts (id, name, specialization, institution, country, url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    new.name.trim(),
                    opt_value(new.specialization.as_deref()),
                    opt_value(new.institution.as_deref()),
                    opt_value(new.country.as_deref()),
                    opt_value(new.url.as_deref())
                ],
            )
            .await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {EXPERT_COLS} FROM experts WHERE id = ?1"),
                [id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_expert(&row)
    }

    /// Insert every row of a catalog file inside one transaction.
    ///
    /// # Errors
    ///
    /// Any invalid row aborts the import and nothing is written.
    pub async fn import_catalog(&self, catalog: &CatalogImport) -> Result<ImportCounts, DatabaseError> {
        self.db().conn().execute("BEGIN", ()).await?;
        match self.import_rows(catalog).await {
            Ok(counts) => {
                self.db().conn().execute("COMMIT", ()).await?;
                tracing::info!(
                    publications = counts.publications,
                    clinical_trials = counts.clinical_trials,
                    experts = counts.experts,
                    "catalog imported"
                );
                Ok(counts)
            }
            Err(e) => {
                if let Err(rollback) = self.db().conn().execute("ROLLBACK", ()).await {
                    tracing::warn!(error = %rollback, "catalog import rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn import_rows(&self, catalog: &CatalogImport) -> Result<ImportCounts, DatabaseError> {
        for publication in &catalog.publications {
            self.insert_publication(publication).await?;
        }
        for trial in &catalog.clinical_trials {
            self.insert_trial(trial).await?;
        }
        for expert in &catalog.experts {
            self.insert_expert(expert).await?;
        }
        Ok(ImportCounts {
            publications: catalog.publications.len(),
            clinical_trials: catalog.clinical_trials.len(),
            experts: catalog.experts.len(),
        })
    }

    /// Publications whose specialization contains `specialization`, newest year first.
    pub async fn publications_for_specialization(
        &self,
        specialization: &str,
        limit: u32,
    ) -> Result<Vec<Publication>, DatabaseError> {
        self.query_all(
            &format!(
                "SELECT {PUBLICATION_COLS} FROM publications
                 WHERE LOWER(COALESCE(specialization, '')) LIKE ?1
                 ORDER BY year DESC, rowid DESC
                 LIMIT {limit}"
            ),
            [contains_pattern(specialization)],
            row_to_publication,
        )
        .await
    }

    /// Newest publications regardless of specialization.
    pub async fn latest_publications(&self, limit: u32) -> Result<Vec<Publication>, DatabaseError> {
        self.query_all(
            &format!(
                "SELECT {PUBLICATION_COLS} FROM publications
                 ORDER BY year DESC, rowid DESC
                 LIMIT {limit}"
            ),
            (),
            row_to_publication,
        )
        .await
    }

    /// Trials whose condition contains `condition`, most recently added first.
    pub async fn trials_for_condition(
        &self,
        condition: &str,
        limit: u32,
    ) -> Result<Vec<ClinicalTrial>, DatabaseError> {
        self.query_all(
            &format!(
                "SELECT {TRIAL_COLS} FROM clinical_trials
                 WHERE LOWER(COALESCE(condition, '')) LIKE ?1
                 ORDER BY rowid DESC
                 LIMIT {limit}"
            ),
            [contains_pattern(condition)],
            row_to_trial,
        )
        .await
    }

    /// Most recently added trials regardless of condition.
    pub async fn latest_trials(&self, limit: u32) -> Result<Vec<ClinicalTrial>, DatabaseError> {
        self.query_all(
            &format!("SELECT {TRIAL_COLS} FROM clinical_trials ORDER BY rowid DESC LIMIT {limit}"),
            (),
            row_to_trial,
        )
        .await
    }

    /// Publications, trials, and experts for a condition, optionally narrowed by country.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` when `condition` is blank.
    pub async fn recommendations(
        &self,
        condition: &str,
        country: Option<&str>,
    ) -> Result<RecommendationsResponse, DatabaseError> {
        let condition = condition.trim();
        if condition.is_empty() {
            return Err(CoreError::missing_field("condition").into());
        }
        let condition = contains_pattern(condition);
        // An absent country matches everything.
        let country = contains_pattern(country.map(str::trim).unwrap_or_default());
        let limit = self.limits().dashboard_limit;

        let publications = self
            .query_all(
                &format!(
                    "SELECT {PUBLICATION_COLS} FROM publications
                     WHERE LOWER(COALESCE(condition, '')) LIKE ?1
                       AND LOWER(COALESCE(country, '')) LIKE ?2
                     ORDER BY year DESC, rowid DESC
                     LIMIT {limit}"
                ),
                [condition.as_str(), country.as_str()],
                row_to_publication,
            )
            .await?;
        let clinical_trials = self
            .query_all(
                &format!(
                    "SELECT {TRIAL_COLS} FROM clinical_trials
                     WHERE LOWER(COALESCE(condition, '')) LIKE ?1
                       AND LOWER(COALESCE(country, '')) LIKE ?2
                     ORDER BY rowid DESC
                     LIMIT {limit}"
                ),
                [condition.as_str(), country.as_str()],
                row_to_trial,
            )
            .await?;
        let experts = self
            .query_all(
                &format!(
                    "SELECT {EXPERT_COLS} FROM experts
                     WHERE LOWER(COALESCE(specialization, '')) LIKE ?1
                       AND LOWER(COALESCE(country, '')) LIKE ?2
                     ORDER BY rowid
                     LIMIT {limit}"
                ),
                [condition.as_str(), country.as_str()],
                row_to_expert,
            )
            .await?;

        Ok(RecommendationsResponse {
            publications,
            clinical_trials,
            experts,
        })
    }
}
