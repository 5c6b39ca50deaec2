//! Types for the organize module.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for an organise run
#[derive(Debug, Clone)]
pub struct OrganizeConfig {
    /// Directory to read photos from (not recursed into)
    pub source: PathBuf,
    /// Directory the renamed copies go to, created if missing
    pub destination: PathBuf,
    /// Added to every capture time before naming and patching
    pub shift: TimeDelta,
}

impl OrganizeConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            shift: TimeDelta::zero(),
        }
    }

    pub fn with_shift(mut self, shift: TimeDelta) -> Self {
        self.shift = shift;
        self
    }
}

/// A photo that was copied and re-stamped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrganizedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// `DateTimeOriginal` of the source
    pub original_time: NaiveDateTime,
    /// Shifted time written to the copy
    pub new_time: NaiveDateTime,
}

/// Why a file was left out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No EXIF segment in the file
    NoExif,
    /// EXIF present but without `DateTimeOriginal`
    NoCaptureTime,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoExif => write!(f, "no exif data"),
            SkipReason::NoCaptureTime => write!(f, "no capture time"),
        }
    }
}

/// A file that was skipped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of an organise run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeResult {
    pub files: Vec<OrganizedFile>,
    pub skipped: Vec<SkippedFile>,
    pub duration_ms: u64,
}

impl OrganizeResult {
    pub fn files_processed(&self) -> usize {
        self.files.len()
    }
}
