//! Persistence of fixture records.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::CaptureError;
use super::exchange::FixtureRecord;

/// Writes fixture records under a single destination directory.
///
/// The destination is exclusively owned by the writer for the duration of a
/// run: directory creation and file replacement are its only effects, and
/// there are no append or merge semantics. A fixture file is always the
/// serialized form of the last exchange written under that name.
#[derive(Debug, Clone)]
pub struct FixtureWriter {
    destination: PathBuf,
    overwrite: bool,
}

impl FixtureWriter {
    /// Creates a writer for `destination`.
    ///
    /// With `overwrite` set, [`prepare`](Self::prepare) clears a
    /// pre-existing destination so the run starts from an empty directory.
    pub fn new(destination: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            destination: destination.into(),
            overwrite,
        }
    }

    /// The destination directory fixtures are written under.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Prepares the destination directory.
    ///
    /// Called once at run start, before the first write. Idempotent: an
    /// already existing destination is left alone unless the overwrite flag
    /// asks for it to be cleared first.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Io`] when the directory cannot be removed or
    /// created; this is fatal for the run.
    pub fn prepare(&self) -> Result<(), CaptureError> {
        if self.overwrite && self.destination.exists() {
            fs::remove_dir_all(&self.destination)?;
        }
        fs::create_dir_all(&self.destination)?;
        Ok(())
    }

    /// Serializes `record` as pretty-printed JSON under `file_name`,
    /// replacing any existing file at that path.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Json`] when the record cannot be serialized
    /// and [`CaptureError::Io`] when the file cannot be written.
    pub fn write(&self, file_name: &str, record: &FixtureRecord) -> Result<PathBuf, CaptureError> {
        let path = self.destination.join(file_name);
        let contents = serde_json::to_string_pretty(record)?;
        fs::write(&path, contents)?;
        debug!(path = %path.display(), "fixture written");
        Ok(path)
    }
}
