//! Runs an organise batch.

use super::planner::OrganizePlanner;
use super::types::*;
use crate::core::exif::{format_exif_datetime, ImageExif, EXIF_DATETIME_LEN};
use crate::core::scanner::list_files;
use crate::error::{ExifError, OrganizeError};
use chrono::NaiveDateTime;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Copies photos into a destination under timestamp names
pub struct OrganizeExecutor;

enum Outcome {
    Organized(OrganizedFile),
    Skipped(SkippedFile),
}

impl OrganizeExecutor {
    /// Organise every file of `config.source`, one at a time.
    ///
    /// Files without EXIF or without a capture time are skipped. Any other
    /// failure stops the batch; copies already made stay where they are.
    pub fn execute<F>(config: &OrganizeConfig, mut on_progress: F) -> Result<OrganizeResult, OrganizeError>
    where
        F: FnMut(usize, usize, &Path),
    {
        let start = Instant::now();

        let source = std::path::absolute(&config.source).map_err(|source| {
            OrganizeError::ReadDirectory {
                path: config.source.clone(),
                source,
            }
        })?;
        let destination = std::path::absolute(&config.destination).map_err(|source| {
            OrganizeError::CreateDirectory {
                path: config.destination.clone(),
                source,
            }
        })?;

        fs::create_dir_all(&destination).map_err(|source| OrganizeError::CreateDirectory {
            path: destination.clone(),
            source,
        })?;

        let files = list_files(&source).map_err(|e| OrganizeError::ReadDirectory {
            path: source.clone(),
            source: e,
        })?;

        let mut result = OrganizeResult::default();

        for (i, path) in files.iter().enumerate() {
            on_progress(i, files.len(), path);

            match Self::organize_file(path, &destination, config)? {
                Outcome::Organized(file) => result.files.push(file),
                Outcome::Skipped(file) => result.skipped.push(file),
            }
        }

        on_progress(files.len(), files.len(), &source);

        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    fn organize_file(
        path: &Path,
        destination: &Path,
        config: &OrganizeConfig,
    ) -> Result<Outcome, OrganizeError> {
        let original_time = match Self::read_capture_time(path) {
            Ok(time) => time,
            Err(e) if e.is_missing_capture_time() => {
                let reason = match e {
                    ExifError::NoExif => SkipReason::NoExif,
                    _ => SkipReason::NoCaptureTime,
                };
                warn!(path = %path.display(), %reason, "skipping file");
                return Ok(Outcome::Skipped(SkippedFile {
                    path: path.to_path_buf(),
                    reason,
                }));
            }
            Err(source) => {
                return Err(OrganizeError::Image {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        // The copy is restamped in place, so the new value must fit the old slot
        let new_time = original_time
            .checked_add_signed(config.shift)
            .filter(|time| format_exif_datetime(time).len() == EXIF_DATETIME_LEN)
            .ok_or_else(|| OrganizeError::ShiftOutOfRange {
                path: path.to_path_buf(),
            })?;

        let dest_path = OrganizePlanner::unique_path(destination, &new_time)?;
        info!(from = %path.display(), to = %dest_path.display(), "copying");

        copy_file(path, &dest_path).map_err(|source| OrganizeError::Copy {
            from: path.to_path_buf(),
            to: dest_path.clone(),
            source,
        })?;

        ImageExif::open(&dest_path)
            .and_then(|image| image.set_capture_time(new_time))
            .map_err(|source| OrganizeError::Image {
                path: dest_path.clone(),
                source,
            })?;

        Ok(Outcome::Organized(OrganizedFile {
            source: path.to_path_buf(),
            destination: dest_path,
            original_time,
            new_time,
        }))
    }

    fn read_capture_time(path: &Path) -> Result<NaiveDateTime, ExifError> {
        ImageExif::open(path)?.local_capture_time()
    }
}

/// Byte-for-byte copy into a freshly created file
fn copy_file(from: &Path, to: &Path) -> io::Result<u64> {
    let mut source = File::open(from)?;
    let mut destination = File::create(to)?;
    io::copy(&mut source, &mut destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exif::testing::{jpeg, jpeg_without_capture_time, jpeg_without_exif_ifd};
    use crate::core::exif::DATE_TIME_ORIGINAL;
    use chrono::TimeDelta;
    use tempfile::TempDir;

    fn setup() -> (TempDir, OrganizeConfig) {
        let temp = TempDir::new().unwrap();
        let config = OrganizeConfig::new(temp.path().join("in"), temp.path().join("out"));
        fs::create_dir_all(&config.source).unwrap();
        (temp, config)
    }

    #[test]
    fn test_execute_copies_and_renames() {
        let (_temp, config) = setup();
        let src_file = config.source.join("IMG_0001.jpg");
        fs::write(&src_file, jpeg("2023:06:18 11:28:22", None)).unwrap();

        let result = OrganizeExecutor::execute(&config, |_, _, _| {}).unwrap();

        assert_eq!(result.files_processed(), 1);
        let expected = config.destination.join("2023-06-18T11-28-22.jpg");
        assert_eq!(result.files[0].destination, expected);
        assert!(src_file.exists());
        assert_eq!(fs::read(&expected).unwrap(), fs::read(&src_file).unwrap());
    }

    #[test]
    fn test_execute_applies_shift() {
        let (_temp, config) = setup();
        let config = config.with_shift(TimeDelta::hours(-2));
        fs::write(
            config.source.join("a.jpg"),
            jpeg("2023:06:18 01:28:22", Some("+02:00")),
        )
        .unwrap();

        let result = OrganizeExecutor::execute(&config, |_, _, _| {}).unwrap();

        let expected = config.destination.join("2023-06-17T23-28-22.jpg");
        assert_eq!(result.files[0].destination, expected);
        let image = ImageExif::open(&expected).unwrap();
        assert_eq!(
            image.get_tag_value(DATE_TIME_ORIGINAL).unwrap(),
            "2023:06:17 23:28:22"
        );
        assert_eq!(image.timezone_offset().unwrap().local_minus_utc(), 7200);
    }

    #[test]
    fn test_execute_skips_files_without_exif() {
        let (_temp, config) = setup();
        fs::write(config.source.join("notes.txt"), b"no metadata here").unwrap();
        fs::write(config.source.join("b.jpg"), jpeg("2020:02:29 12:00:00", None)).unwrap();

        let result = OrganizeExecutor::execute(&config, |_, _, _| {}).unwrap();

        assert_eq!(result.files_processed(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::NoExif);
        assert!(config.destination.join("2020-02-29T12-00-00.jpg").exists());
    }

    #[test]
    fn test_execute_skips_files_without_capture_time() {
        let (_temp, config) = setup();
        fs::write(config.source.join("export.jpg"), jpeg_without_exif_ifd()).unwrap();
        fs::write(config.source.join("edited.jpg"), jpeg_without_capture_time()).unwrap();
        fs::write(config.source.join("c.jpg"), jpeg("2021:07:04 18:30:00", None)).unwrap();

        let result = OrganizeExecutor::execute(&config, |_, _, _| {}).unwrap();

        assert_eq!(result.files_processed(), 1);
        assert_eq!(result.skipped.len(), 2);
        assert!(result
            .skipped
            .iter()
            .all(|file| file.reason == SkipReason::NoCaptureTime));
        assert!(config.destination.join("2021-07-04T18-30-00.jpg").exists());
    }

    #[test]
    fn test_execute_rejects_shift_past_year_9999_before_copying() {
        let (_temp, config) = setup();
        let config = config.with_shift(TimeDelta::hours(2));
        fs::write(config.source.join("a.jpg"), jpeg("9999:12:31 23:00:00", None)).unwrap();

        let result = OrganizeExecutor::execute(&config, |_, _, _| {});

        assert!(matches!(
            result,
            Err(OrganizeError::ShiftOutOfRange { .. })
        ));
        assert_eq!(fs::read_dir(&config.destination).unwrap().count(), 0);
    }

    #[test]
    fn test_execute_disambiguates_same_timestamp() {
        let (_temp, config) = setup();
        fs::write(config.source.join("a.jpg"), jpeg("2024:01:01 00:00:00", None)).unwrap();
        fs::write(config.source.join("b.jpg"), jpeg("2024:01:01 00:00:00", None)).unwrap();

        let result = OrganizeExecutor::execute(&config, |_, _, _| {}).unwrap();

        assert_eq!(result.files_processed(), 2);
        assert!(config.destination.join("2024-01-01T00-00-00.jpg").exists());
        assert!(config.destination.join("2024-01-01T00-00-00(1).jpg").exists());
    }

    #[test]
    fn test_execute_reports_progress() {
        let (_temp, config) = setup();
        fs::write(config.source.join("a.jpg"), jpeg("2024:01:01 00:00:00", None)).unwrap();
        fs::write(config.source.join("b.txt"), b"x").unwrap();

        let mut calls = Vec::new();
        OrganizeExecutor::execute(&config, |done, total, _| calls.push((done, total))).unwrap();

        assert_eq!(calls.last(), Some(&(2, 2)));
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn test_execute_missing_source() {
        let temp = TempDir::new().unwrap();
        let config = OrganizeConfig::new("/nonexistent/photos", temp.path().join("out"));

        let result = OrganizeExecutor::execute(&config, |_, _, _| {});
        assert!(matches!(result, Err(OrganizeError::ReadDirectory { .. })));
    }
}
