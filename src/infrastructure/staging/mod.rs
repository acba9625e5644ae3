use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Request-scoped temporary file storage.
///
/// Both EPUB extraction (the parser needs a real file, not a byte stream)
/// and synthesis output staging go through here. Every acquisition gets a
/// uniquely named file under the configured root, and removal happens in
/// the guard's `Drop` impl, so cleanup holds on success, failure and panic
/// alike. Unique names also keep concurrent requests from colliding.
pub struct Staging {
    root: PathBuf,
}

impl Staging {
    /// `root` falls back to the system temp directory when not configured.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root: root.unwrap_or_else(std::env::temp_dir),
        }
    }

    /// Write `bytes` to a fresh uniquely named file and hand back its guard.
    pub fn stage_bytes(&self, extension: &str, bytes: &[u8]) -> std::io::Result<StagedFile> {
        let mut file = tempfile::Builder::new()
            .prefix("audiobook-")
            .suffix(&format!(".{}", extension))
            .tempfile_in(&self.root)?;
        file.write_all(bytes)?;
        file.flush()?;

        tracing::debug!(
            path = %file.path().display(),
            size = bytes.len(),
            "staged temporary file"
        );

        Ok(StagedFile { inner: file })
    }
}

/// Guard over one staged file. The file is deleted when the guard drops.
pub struct StagedFile {
    inner: NamedTempFile,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}
