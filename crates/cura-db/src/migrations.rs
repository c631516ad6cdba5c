//! Embedded schema migrations, applied in order on every open.
//!
//! Statements use `IF NOT EXISTS` / `OR IGNORE`, so re-running is a no-op.

use crate::CuraDb;
use crate::error::DatabaseError;

/// `(name, sql)` pairs in apply order.
const MIGRATIONS: &[(&str, &str)] = &[
    // 9 tables, 5 indexes
    ("001_initial", include_str!("../migrations/001_initial.sql")),
    // specialization picker seed rows
    (
        "002_specializations",
        include_str!("../migrations/002_specializations.sql"),
    ),
];

impl CuraDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for (name, sql) in MIGRATIONS {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tracing::debug!(migration = name, "migration applied");
        }
        Ok(())
    }
}
