//! Time difference between the capture times of two photos.

use crate::core::exif::ImageExif;
use crate::error::PixError;
use chrono::TimeDelta;
use std::path::Path;

/// Normalized capture time of `image1` minus that of `image2`
pub fn time_diff(image1: &Path, image2: &Path) -> Result<TimeDelta, PixError> {
    let time1 = capture_time(image1)?;
    let time2 = capture_time(image2)?;
    Ok(time1 - time2)
}

fn capture_time(path: &Path) -> Result<chrono::NaiveDateTime, PixError> {
    ImageExif::open(path)
        .and_then(|image| image.get_capture_time())
        .map_err(|source| PixError::Image {
            path: path.to_path_buf(),
            source,
        })
}
