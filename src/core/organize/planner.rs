//! Destination naming for organised photos.

use crate::error::OrganizeError;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Highest `(n)` suffix tried before giving up
pub const MAX_DISAMBIGUATION: u32 = 99;

const EXTENSION: &str = "jpg";
const STEM_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Picks destination paths from capture times
pub struct OrganizePlanner;

impl OrganizePlanner {
    /// `YYYY-MM-DDTHH-MM-SS`
    pub fn file_stem(time: &NaiveDateTime) -> String {
        time.format(STEM_FORMAT).to_string()
    }

    /// `stem.jpg` for 0, `stem(n).jpg` otherwise
    pub fn candidate_path(dir: &Path, stem: &str, disambiguation: u32) -> PathBuf {
        if disambiguation == 0 {
            dir.join(format!("{}.{}", stem, EXTENSION))
        } else {
            dir.join(format!("{}({}).{}", stem, disambiguation, EXTENSION))
        }
    }

    /// First candidate for `time` in `dir` that doesn't exist yet.
    ///
    /// Tries the bare name and then `(1)` through `(99)`.
    pub fn unique_path(dir: &Path, time: &NaiveDateTime) -> Result<PathBuf, OrganizeError> {
        let stem = Self::file_stem(time);

        for disambiguation in 0..=MAX_DISAMBIGUATION {
            let candidate = Self::candidate_path(dir, &stem, disambiguation);
            if !candidate.exists() {
                return Ok(candidate);
            }
        }

        Err(OrganizeError::NoFreeName {
            dir: dir.to_path_buf(),
            stem,
            attempts: MAX_DISAMBIGUATION + 1,
        })
    }
}
