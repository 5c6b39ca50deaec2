//! Runs a copy-metadata batch.

use super::copier::MetadataCopier;
use super::types::*;
use crate::core::scanner::list_files;
use crate::error::{CopierError, CopyMetaError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Copies metadata between same-named files of two directories
pub struct CopyMetaExecutor;

impl CopyMetaExecutor {
    /// Copy metadata for every file in `config.source`.
    ///
    /// All destination files are checked before the copier runs even once.
    /// "Unknown file type" failures skip the pair; other failures stop the
    /// batch with earlier pairs already rewritten.
    pub fn execute<C, F>(
        config: &CopyMetaConfig,
        copier: &C,
        mut on_progress: F,
    ) -> Result<CopyMetaResult, CopyMetaError>
    where
        C: MetadataCopier + ?Sized,
        F: FnMut(usize, usize, &Path),
    {
        let start = Instant::now();

        let source = std::path::absolute(&config.source).map_err(|source| {
            CopyMetaError::ReadDirectory {
                path: config.source.clone(),
                source,
            }
        })?;
        let destination = std::path::absolute(&config.destination).map_err(|source| {
            CopyMetaError::CreateDirectory {
                path: config.destination.clone(),
                source,
            }
        })?;

        fs::create_dir_all(&destination).map_err(|source| CopyMetaError::CreateDirectory {
            path: destination.clone(),
            source,
        })?;

        let files = list_files(&source).map_err(|e| CopyMetaError::ReadDirectory {
            path: source.clone(),
            source: e,
        })?;

        let pairs = Self::pair_files(&files, &destination)?;
        let mut result = CopyMetaResult::default();

        for (i, pair) in pairs.into_iter().enumerate() {
            on_progress(i, files.len(), &pair.source);

            match copier.copy_tags(&pair.source, &pair.destination) {
                Ok(()) => {
                    info!(from = %pair.source.display(), to = %pair.destination.display(), "copied metadata");
                    result.copied.push(pair);
                }
                Err(CopierError::UnknownFileType) => {
                    warn!(path = %pair.source.display(), "skipping unknown file type");
                    result.skipped.push(pair);
                }
                Err(source) => {
                    return Err(CopyMetaError::Copier {
                        from: pair.source,
                        to: pair.destination,
                        source,
                    })
                }
            }
        }

        on_progress(files.len(), files.len(), &source);

        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// Match each source file with the same name in `destination`.
    ///
    /// Fails on the first source file with no counterpart.
    pub fn pair_files(files: &[PathBuf], destination: &Path) -> Result<Vec<MetadataPair>, CopyMetaError> {
        files
            .iter()
            .map(|file| {
                let name = file.file_name().unwrap_or_default();
                let target = destination.join(name);
                if !target.exists() {
                    return Err(CopyMetaError::MissingDestination { path: target });
                }
                Ok(MetadataPair {
                    source: file.clone(),
                    destination: target,
                })
            })
            .collect()
    }
}
