//! Named tag lookup over a located EXIF segment.

use crate::error::ExifError;
use chrono::{FixedOffset, NaiveDateTime, TimeDelta};
use exif::{Context, Exif, Field, In, Reader, Value};

/// Tag holding the local capture time
pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
/// Tag holding the capture time's UTC offset
pub const OFFSET_TIME_ORIGINAL: &str = "OffsetTimeOriginal";

/// Format of EXIF timestamps
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
/// Byte length of a formatted EXIF timestamp with a four-digit year
pub const EXIF_DATETIME_LEN: usize = 19;

const DEFAULT_OFFSET: &str = "00:00";

/// Parsed tag tree of one EXIF segment
pub struct TagReader {
    exif: Exif,
}

impl TagReader {
    /// Parse raw EXIF bytes starting at the TIFF header
    pub fn new(raw: Vec<u8>) -> Result<Self, ExifError> {
        let exif = Reader::new().read_raw(raw)?;

        // The pointer entry itself is not kept, only the fields it leads to
        let has_exif_ifd = exif
            .fields()
            .any(|field| field.ifd_num == In::PRIMARY && field.tag.context() == Context::Exif);
        if !has_exif_ifd {
            return Err(ExifError::MissingExifIfd);
        }

        Ok(Self { exif })
    }

    /// The bytes this reader was built from
    pub fn raw(&self) -> &[u8] {
        self.exif.buf()
    }

    /// First value of the named tag in the Exif sub-IFD, as text
    pub fn get_tag_value(&self, name: &str) -> Result<String, ExifError> {
        let field = self
            .exif_fields()
            .find(|field| field.tag.to_string() == name)
            .ok_or_else(|| ExifError::MissingTag {
                tag: name.to_string(),
            })?;

        Ok(format_first(field))
    }

    /// `DateTimeOriginal` as written by the camera, without zone adjustment
    pub fn local_capture_time(&self) -> Result<NaiveDateTime, ExifError> {
        let value = self.get_tag_value(DATE_TIME_ORIGINAL)?;
        parse_exif_datetime(&value).ok_or_else(|| ExifError::InvalidTimestamp {
            tag: DATE_TIME_ORIGINAL.to_string(),
            value,
        })
    }

    /// `OffsetTimeOriginal`, or UTC when the tag is absent
    pub fn timezone_offset(&self) -> Result<FixedOffset, ExifError> {
        let value = match self.get_tag_value(OFFSET_TIME_ORIGINAL) {
            Ok(value) => value,
            Err(ExifError::MissingTag { .. }) => DEFAULT_OFFSET.to_string(),
            Err(e) => return Err(e),
        };

        parse_offset(&value).ok_or_else(|| ExifError::InvalidOffset {
            tag: OFFSET_TIME_ORIGINAL.to_string(),
            value,
        })
    }

    /// Capture time normalized to UTC by subtracting the recorded offset
    pub fn get_capture_time(&self) -> Result<NaiveDateTime, ExifError> {
        let local = self.local_capture_time()?;
        let offset = self.timezone_offset()?;
        Ok(local - TimeDelta::seconds(i64::from(offset.local_minus_utc())))
    }

    fn exif_fields(&self) -> impl Iterator<Item = &Field> {
        self.exif
            .fields()
            .filter(|field| field.ifd_num == In::PRIMARY && field.tag.context() == Context::Exif)
    }
}

/// Render the first element of a field's value
fn format_first(field: &Field) -> String {
    match field.value {
        Value::Ascii(ref vec) => vec
            .first()
            .map(|bytes| {
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .to_string()
            })
            .unwrap_or_default(),
        _ => field.display_value().to_string(),
    }
}

/// Parse `YYYY:MM:DD HH:MM:SS`
pub fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), EXIF_DATETIME_FORMAT).ok()
}

/// Format as `YYYY:MM:DD HH:MM:SS`
pub fn format_exif_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(EXIF_DATETIME_FORMAT).to_string()
}

/// Parse a signed `HH:MM` offset; the sign may be omitted for positive values
pub fn parse_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    let (sign, rest) = match *s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => (1, s),
    };

    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exif_datetime() {
        let dt = parse_exif_datetime("2023:06:18 11:28:22").unwrap();
        assert_eq!(format_exif_datetime(&dt), "2023:06:18 11:28:22");
    }

    #[test]
    fn rejects_dashed_datetime() {
        assert!(parse_exif_datetime("2023-06-18 11:28:22").is_none());
    }

    #[test]
    fn formatted_datetime_is_fixed_width() {
        let dt = parse_exif_datetime("2024:01:02 03:04:05").unwrap();
        assert_eq!(format_exif_datetime(&dt).len(), 19);
    }

    #[test]
    fn parses_offsets() {
        assert_eq!(parse_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_offset("-05:30").unwrap().local_minus_utc(), -19800);
        assert_eq!(parse_offset("00:00").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn rejects_bad_offsets() {
        assert!(parse_offset("").is_none());
        assert!(parse_offset("+2:00").is_none());
        assert!(parse_offset("+02:75").is_none());
        assert!(parse_offset("   :  ").is_none());
    }

    #[test]
    fn empty_raw_data_fails_to_parse() {
        assert!(matches!(TagReader::new(Vec::new()), Err(ExifError::Parse(_))));
    }
}
