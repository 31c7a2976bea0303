//! JSON file implementation of the `ProgressStore` trait.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use silicoquest_core::error::QuestError;
use silicoquest_core::store::{ProgressSnapshot, ProgressStore};
use tracing::debug;

/// Stores the progress blob as a single JSON file.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a crash mid-write leaves the previous blob intact.
#[derive(Debug, Clone)]
pub struct JsonFileProgressStore {
    path: PathBuf,
}

impl JsonFileProgressStore {
    /// Creates a store backed by the file at `path`. The file need not exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProgressStore for JsonFileProgressStore {
    fn load(&self) -> Result<Option<ProgressSnapshot>, QuestError> {
        let blob = match fs::read_to_string(&self.path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(QuestError::Persistence(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };
        ProgressSnapshot::from_json(&blob).map(Some)
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), QuestError> {
        let blob = snapshot.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                QuestError::Persistence(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let temp = self.temp_path();
        fs::write(&temp, blob)
            .map_err(|e| QuestError::Persistence(format!("cannot write {}: {e}", temp.display())))?;
        fs::rename(&temp, &self.path).map_err(|e| {
            QuestError::Persistence(format!("cannot replace {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), "progress blob written");
        Ok(())
    }

    fn reset(&self) -> Result<(), QuestError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(QuestError::Persistence(format!(
                "cannot remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}
