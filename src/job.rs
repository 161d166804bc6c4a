//! Recognition jobs
//!
//! A [`Job`] is one request's unit of recognition work: a scoped staging
//! directory, the staged image path, the requested language, and a start
//! instant for duration logging. The staging directory is removed when
//! the job is dropped, which ties cleanup to the request's scope instead
//! of to individual success or failure branches.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::TempDir;
use uuid::Uuid;

/// Fallback extension when the client filename carries none
const DEFAULT_EXTENSION: &str = "png";

/// One in-flight recognition job, owned by a single request task
pub struct Job {
    id: Uuid,
    dir: TempDir,
    staged: Option<PathBuf>,
    lang: Option<String>,
    started: Instant,
}

impl Job {
    /// Create a job with a fresh private staging directory
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            dir: tempfile::tempdir()?,
            staged: None,
            lang: None,
            started: Instant::now(),
        })
    }

    /// Job id, used for log correlation
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Pick the staging path for the uploaded image and record it.
    ///
    /// The extension is recovered from the client filename, falling back
    /// to `png` when the filename is absent, has no dot, or the suffix
    /// is not plain alphanumeric.
    pub fn stage_path(&mut self, client_filename: Option<&str>) -> PathBuf {
        let ext = extension_for(client_filename);
        let path = self.dir.path().join(format!("image.{ext}"));
        self.staged = Some(path.clone());
        path
    }

    /// Path of the staged image, if a `file` part has been received
    pub fn staged(&self) -> Option<&Path> {
        self.staged.as_deref()
    }

    /// Record the resolved user-facing language code
    pub fn set_lang(&mut self, code: &str) {
        self.lang = Some(code.to_string());
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Time since the job was admitted
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Extension from a client filename. The value ends up in a path on our
/// filesystem, so anything but plain alphanumerics falls back to `png`.
fn extension_for(filename: Option<&str>) -> &str {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(DEFAULT_EXTENSION)
}
