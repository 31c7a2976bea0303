//! Loads chapter catalogs from YAML.

use std::path::Path;

use serde::Deserialize;
use silicoquest_core::error::QuestError;
use tracing::info;

use crate::domain::catalog::ChapterCatalog;
use crate::domain::chapter::Chapter;

/// The eight SilicoQuest chapters shipped with the application.
const BUILTIN_CATALOG: &str = include_str!("../../data/chapters.yaml");

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    chapters: Vec<Chapter>,
}

/// Parses and validates a catalog from YAML source.
///
/// # Errors
///
/// Returns `QuestError::InvalidCatalog` if the YAML is malformed or the
/// chapters fail validation.
pub fn parse_catalog(source: &str) -> Result<ChapterCatalog, QuestError> {
    let document: CatalogDocument = serde_yaml::from_str(source)
        .map_err(|e| QuestError::InvalidCatalog(format!("catalog YAML is malformed: {e}")))?;
    let catalog = ChapterCatalog::new(document.chapters)?;
    info!(
        chapters = catalog.len(),
        fingerprint = catalog.fingerprint(),
        "chapter catalog loaded"
    );
    Ok(catalog)
}

/// Reads and validates a catalog from a YAML file.
///
/// # Errors
///
/// Returns `QuestError::InvalidCatalog` if the file cannot be read or its
/// content is invalid.
pub fn load_catalog_file(path: &Path) -> Result<ChapterCatalog, QuestError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        QuestError::InvalidCatalog(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_catalog(&source)
}

/// Returns the built-in SilicoQuest catalog.
///
/// # Errors
///
/// Returns `QuestError::InvalidCatalog` if the embedded catalog is invalid.
pub fn builtin_catalog() -> Result<ChapterCatalog, QuestError> {
    parse_catalog(BUILTIN_CATALOG)
}
