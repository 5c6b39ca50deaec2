//! # Error Module
//!
//! Error types for pix.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, tag names, what went wrong
//! - **Skippable vs fatal** - batch operations decide per variant

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum PixError {
    #[error("EXIF error: {0}")]
    Exif(#[from] ExifError),

    #[error("{path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: ExifError,
    },

    #[error("Organise error: {0}")]
    Organize(#[from] OrganizeError),

    #[error("Metadata copy error: {0}")]
    CopyMeta(#[from] CopyMetaError),

    #[error("Invalid time shift: {0}")]
    Shift(#[from] ShiftError),

    #[error("Output error: {0}")]
    Output(String),
}

/// Errors from locating, reading and patching EXIF data
#[derive(Error, Debug)]
pub enum ExifError {
    #[error("No EXIF data found")]
    NoExif,

    #[error("Malformed EXIF header at byte {offset}")]
    MalformedHeader { offset: u64 },

    #[error("Failed to parse EXIF data: {0}")]
    Parse(#[from] exif::Error),

    #[error("EXIF data has no Exif sub-IFD")]
    MissingExifIfd,

    #[error("Image does not have a tag named {tag:?}")]
    MissingTag { tag: String },

    #[error("Tag {tag} holds an invalid timestamp: {value:?}")]
    InvalidTimestamp { tag: String, value: String },

    #[error("Tag {tag} holds an invalid timezone offset: {value:?}")]
    InvalidOffset { tag: String, value: String },

    #[error("Replacement {new:?} is {} bytes but {old:?} is {} bytes", .new.len(), .old.len())]
    LengthMismatch { old: String, new: String },

    #[error("Failed to access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExifError {
    /// Attach a path to a bare I/O error
    pub(crate) fn at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> ExifError {
        let path = path.into();
        move |source| ExifError::File { path, source }
    }

    /// True when the image simply carries no capture time to work with
    pub fn is_missing_capture_time(&self) -> bool {
        matches!(
            self,
            ExifError::NoExif | ExifError::MissingExifIfd | ExifError::MissingTag { .. }
        )
    }
}

/// Errors that abort an organise batch
#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shifted capture time of {path} is out of range")]
    ShiftOutOfRange { path: PathBuf },

    #[error("No free file name for {stem} in {dir} after {attempts} attempts")]
    NoFreeName {
        dir: PathBuf,
        stem: String,
        attempts: u32,
    },

    #[error("{path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: ExifError,
    },
}

/// Errors that abort a copy-metadata batch
#[derive(Error, Debug)]
pub enum CopyMetaError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination file does not exist: {path}")]
    MissingDestination { path: PathBuf },

    #[error("Failed to copy EXIF metadata from {from} to {to}: {source}")]
    Copier {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: CopierError,
    },
}

/// Errors reported by a metadata copier
#[derive(Error, Debug)]
pub enum CopierError {
    #[error("Unknown file type")]
    UnknownFileType,

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Errors parsing a time shift such as `1h30m`
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShiftError {
    #[error("{input:?} is not a duration (expected e.g. 1h30m, -45s, 1.5h)")]
    Invalid { input: String },

    #[error("{input:?} is out of range")]
    OutOfRange { input: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PixError>;
