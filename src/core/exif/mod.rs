//! # EXIF Module
//!
//! Reads and rewrites the capture time stored in a photo's EXIF data.
//!
//! ## Pieces
//! - `locator` - finds the TIFF header inside the file
//! - `reader` - tag lookup on top of the `exif` crate
//! - `patcher` - same-length, in-place value replacement
//!
//! An [`ImageExif`] is a snapshot of one file. Writing through it consumes
//! the snapshot and returns a fresh one read back from disk.
//!
//! ## Example
//! ```rust,ignore
//! let image = ImageExif::open("IMG_0001.jpg")?;
//! let taken = image.local_capture_time()?;
//! let image = image.set_capture_time(taken + TimeDelta::hours(1))?;
//! ```

mod locator;
mod patcher;
mod reader;
#[doc(hidden)]
pub mod testing;

pub use locator::{locate_exif, probe_header, ExifSegment, HeaderProbe, EXIF_SIGNATURE_LENGTH};
pub use patcher::{patch_timestamp, replace_value};
pub use reader::{
    format_exif_datetime, parse_exif_datetime, parse_offset, TagReader, DATE_TIME_ORIGINAL,
    EXIF_DATETIME_FORMAT, EXIF_DATETIME_LEN, OFFSET_TIME_ORIGINAL,
};

use crate::error::ExifError;
use chrono::{FixedOffset, NaiveDateTime};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// EXIF snapshot of one image file
pub struct ImageExif {
    path: PathBuf,
    offset: u64,
    tags: TagReader,
}

impl ImageExif {
    /// Locate and parse the EXIF data of the file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExifError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(ExifError::at(path))?;
        let segment = locate_exif(file)?;
        let tags = TagReader::new(segment.bytes)?;

        Ok(Self {
            path: path.to_path_buf(),
            offset: segment.offset,
            tags,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the EXIF segment within the file
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Raw EXIF bytes, from the TIFF header to the end of the file
    pub fn raw(&self) -> &[u8] {
        self.tags.raw()
    }

    pub fn get_tag_value(&self, name: &str) -> Result<String, ExifError> {
        self.tags.get_tag_value(name)
    }

    pub fn local_capture_time(&self) -> Result<NaiveDateTime, ExifError> {
        self.tags.local_capture_time()
    }

    pub fn timezone_offset(&self) -> Result<FixedOffset, ExifError> {
        self.tags.timezone_offset()
    }

    /// Capture time normalized to UTC
    pub fn get_capture_time(&self) -> Result<NaiveDateTime, ExifError> {
        self.tags.get_capture_time()
    }

    /// Rewrite `DateTimeOriginal` on disk and return the re-read snapshot
    pub fn set_capture_time(self, new_time: NaiveDateTime) -> Result<Self, ExifError> {
        let old = self.get_tag_value(DATE_TIME_ORIGINAL)?;
        let new = format_exif_datetime(&new_time);

        {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(&self.path)
                .map_err(ExifError::at(&self.path))?;
            patch_timestamp(&mut file, self.raw(), self.offset, &old, &new)?;
        }

        Self::open(self.path)
    }
}

impl std::fmt::Debug for ImageExif {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageExif")
            .field("path", &self.path)
            .field("offset", &self.offset)
            .field("len", &self.raw().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{
        jpeg, jpeg_in, jpeg_without_capture_time, jpeg_without_exif_ifd, ByteOrder,
        JPEG_EXIF_OFFSET,
    };
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_jpeg(dir: &TempDir, name: &str, datetime: &str, offset: Option<&str>) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, jpeg(datetime, offset)).unwrap();
        path
    }

    #[test]
    fn open_reads_offset_and_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = write_jpeg(&dir, "a.jpg", "2023:06:18 11:28:22", None);

        let image = ImageExif::open(&path).unwrap();
        assert_eq!(image.offset(), JPEG_EXIF_OFFSET);
        assert_eq!(
            image.get_tag_value(DATE_TIME_ORIGINAL).unwrap(),
            "2023:06:18 11:28:22"
        );
    }

    #[test]
    fn capture_time_subtracts_timezone_offset() {
        let dir = TempDir::new().unwrap();
        let path = write_jpeg(&dir, "a.jpg", "2023:06:18 11:28:22", Some("+02:00"));

        let image = ImageExif::open(&path).unwrap();
        assert_eq!(
            format_exif_datetime(&image.get_capture_time().unwrap()),
            "2023:06:18 09:28:22"
        );
        assert_eq!(
            format_exif_datetime(&image.local_capture_time().unwrap()),
            "2023:06:18 11:28:22"
        );
    }

    #[test]
    fn missing_offset_defaults_to_utc() {
        let dir = TempDir::new().unwrap();
        let path = write_jpeg(&dir, "a.jpg", "2023:06:18 11:28:22", None);

        let image = ImageExif::open(&path).unwrap();
        assert_eq!(image.timezone_offset().unwrap().local_minus_utc(), 0);
        assert_eq!(
            image.get_capture_time().unwrap(),
            image.local_capture_time().unwrap()
        );
    }

    #[test]
    fn missing_tag_is_reported_by_name() {
        let dir = TempDir::new().unwrap();
        let path = write_jpeg(&dir, "a.jpg", "2023:06:18 11:28:22", None);

        let image = ImageExif::open(&path).unwrap();
        match image.get_tag_value("LensModel") {
            Err(ExifError::MissingTag { tag }) => assert_eq!(tag, "LensModel"),
            other => panic!("expected MissingTag, got {:?}", other),
        }
    }

    #[test]
    fn set_capture_time_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = write_jpeg(&dir, "a.jpg", "2023:06:18 11:28:22", Some("+02:00"));
        let before = fs::read(&path).unwrap();

        let image = ImageExif::open(&path).unwrap();
        let new_time = parse_exif_datetime("2024:01:01 00:00:00").unwrap();
        let image = image.set_capture_time(new_time).unwrap();

        assert_eq!(
            image.get_tag_value(DATE_TIME_ORIGINAL).unwrap(),
            "2024:01:01 00:00:00"
        );
        assert_eq!(image.timezone_offset().unwrap().local_minus_utc(), 7200);

        let after = fs::read(&path).unwrap();
        assert_eq!(before.len(), after.len());
        assert_eq!(after, jpeg("2024:01:01 00:00:00", Some("+02:00")));
    }

    #[test]
    fn file_without_exif_is_no_exif() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.jpg");
        fs::write(&path, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

        assert!(matches!(ImageExif::open(&path), Err(ExifError::NoExif)));
    }

    #[test]
    fn ifd0_only_is_missing_exif_ifd() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.jpg");
        fs::write(&path, jpeg_without_exif_ifd()).unwrap();

        assert!(matches!(
            ImageExif::open(&path),
            Err(ExifError::MissingExifIfd)
        ));
    }

    #[test]
    fn exif_ifd_without_capture_time_is_missing_tag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(&path, jpeg_without_capture_time()).unwrap();

        let image = ImageExif::open(&path).unwrap();
        assert_eq!(image.timezone_offset().unwrap().local_minus_utc(), 3600);
        match image.local_capture_time() {
            Err(ExifError::MissingTag { tag }) => assert_eq!(tag, DATE_TIME_ORIGINAL),
            other => panic!("expected MissingTag, got {:?}", other),
        }
    }

    #[test]
    fn big_endian_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(
            &path,
            jpeg_in(ByteOrder::Big, "2021:03:04 05:06:07", Some("-05:00")),
        )
        .unwrap();

        let image = ImageExif::open(&path).unwrap();
        assert_eq!(image.offset(), JPEG_EXIF_OFFSET);
        assert_eq!(
            format_exif_datetime(&image.get_capture_time().unwrap()),
            "2021:03:04 10:06:07"
        );

        let new_time = parse_exif_datetime("2021:03:04 06:06:07").unwrap();
        let image = image.set_capture_time(new_time).unwrap();
        assert_eq!(
            image.get_tag_value(DATE_TIME_ORIGINAL).unwrap(),
            "2021:03:04 06:06:07"
        );
        assert_eq!(
            fs::read(&path).unwrap(),
            jpeg_in(ByteOrder::Big, "2021:03:04 06:06:07", Some("-05:00"))
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ImageExif::open("/nonexistent/photo.jpg").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/photo.jpg"));
    }
}
