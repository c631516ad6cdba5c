//! Service layer that owns the database handle and read limits.
//!
//! `CuraService` wraps `CuraDb` plus the `GeneralConfig` limits used by the
//! aggregate queries. All repo methods are implemented as `impl CuraService`.

use cura_config::GeneralConfig;

use crate::CuraDb;
use crate::error::DatabaseError;

pub struct CuraService {
    db: CuraDb,
    limits: GeneralConfig,
}

impl CuraService {
    /// Open a local database and wrap it.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `limits` - Row limits and summary length for dashboard/profile reads.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str, limits: GeneralConfig) -> Result<Self, DatabaseError> {
        let db = CuraDb::open_local(db_path).await?;
        Ok(Self { db, limits })
    }

    /// Create from an existing `CuraDb`.
    #[must_use]
    pub const fn from_db(db: CuraDb, limits: GeneralConfig) -> Self {
        Self { db, limits }
    }

    #[must_use]
    pub const fn db(&self) -> &CuraDb {
        &self.db
    }

    #[must_use]
    pub const fn limits(&self) -> &GeneralConfig {
        &self.limits
    }

    /// Run a query and collect every row through `map`.
    pub(crate) async fn query_all<T>(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
        map: impl Fn(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Vec<T>, DatabaseError> {
        let mut rows = self.db.conn().query(sql, params).await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(map(&row)?);
        }
        Ok(items)
    }
}
