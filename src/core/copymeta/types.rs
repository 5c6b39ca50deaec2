//! Types for the copymeta module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a copy-metadata run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyMetaConfig {
    /// Directory holding the files whose metadata is copied
    pub source: PathBuf,
    /// Directory holding same-named files that receive it
    pub destination: PathBuf,
}

impl CopyMetaConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// A source/destination pair sharing a file name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataPair {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Result of a copy-metadata run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopyMetaResult {
    /// Pairs whose metadata was copied
    pub copied: Vec<MetadataPair>,
    /// Pairs the copier could not handle ("Unknown file type")
    pub skipped: Vec<MetadataPair>,
    pub duration_ms: u64,
}
