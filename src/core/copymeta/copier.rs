//! Metadata copier trait and the exiftool-backed implementation.

use crate::error::CopierError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Marker exiftool prints for files it can't write
pub const UNKNOWN_FILE_TYPE: &str = "Unknown file type";

/// Something that can copy every metadata tag from one file onto another
///
/// Implement this trait to swap out the external tool (e.g., for testing).
pub trait MetadataCopier {
    /// Overwrite the metadata of `destination` with that of `source`
    ///
    /// Returns [`CopierError::UnknownFileType`] when the destination format
    /// is not supported; callers treat that as a skip.
    fn copy_tags(&self, source: &Path, destination: &Path) -> Result<(), CopierError>;
}

/// Runs `exiftool -overwrite_original -tagsFromFile <src> <dst>`
#[derive(Debug, Clone)]
pub struct ExifToolCopier {
    program: String,
}

impl ExifToolCopier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for ExifToolCopier {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

impl MetadataCopier for ExifToolCopier {
    fn copy_tags(&self, source: &Path, destination: &Path) -> Result<(), CopierError> {
        let output = Command::new(&self.program)
            .arg("-overwrite_original")
            .arg("-tagsFromFile")
            .arg(source)
            .arg(destination)
            .output()
            .map_err(|source| CopierError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(program = %self.program, output = %stdout.trim(), "copier output");
        }

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(classify_failure(&self.program, output.status, stderr))
    }
}

fn classify_failure(program: &str, status: std::process::ExitStatus, stderr: String) -> CopierError {
    if stderr.contains(UNKNOWN_FILE_TYPE) {
        CopierError::UnknownFileType
    } else {
        CopierError::Failed {
            program: program.to_string(),
            status,
            stderr,
        }
    }
}
