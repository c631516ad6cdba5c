//! `curalink import`: load catalog rows from a JSON file.

use std::path::Path;

use anyhow::Context;

use cura_db::repos::catalog::{CatalogImport, ImportCounts};
use cura_db::service::CuraService;

/// Parse a catalog document.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid catalog document.
pub fn read_catalog(path: &Path) -> anyhow::Result<CatalogImport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid catalog JSON in {}", path.display()))
}

/// Read `path` and insert every row in one transaction.
///
/// # Errors
///
/// Fails on unreadable input or any database error; nothing is inserted then.
pub async fn import_file(service: &CuraService, path: &Path) -> anyhow::Result<ImportCounts> {
    let catalog = read_catalog(path)?;
    let counts = service
        .import_catalog(&catalog)
        .await
        .context("catalog import failed")?;
    tracing::info!(
        file = %path.display(),
        publications = counts.publications,
        clinical_trials = counts.clinical_trials,
        experts = counts.experts,
        "catalog imported"
    );
    Ok(counts)
}
