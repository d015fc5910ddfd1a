//! Disposable scratch file for header extraction.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// A temporary file holding a release body.
///
/// The file is removed when the value is dropped, including during unwinding.
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Creates a scratch file in the system temp directory containing `contents`.
    pub fn create(contents: &str) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("relbridge-release-")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;

        tracing::trace!("Scratch file created: {}", file.path().display());
        Ok(Self { file })
    }

    /// Path of the scratch file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        tracing::trace!("Scratch file released: {}", self.file.path().display());
    }
}
