//! Minimal JPEG files for tests.
//!
//! IFD0 always carries an `Orientation` entry. The Exif sub-IFD is optional
//! and holds only the ASCII tags it is given.

pub const TAG_ORIENTATION: u16 = 0x0112;
pub const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
pub const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
pub const TAG_OFFSET_TIME_ORIGINAL: u16 = 0x9011;

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;

/// Offset of the TIFF header in [`jpeg`] output
pub const JPEG_EXIF_OFFSET: u64 = 12;

/// Byte order of the TIFF structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

struct TiffWriter {
    order: ByteOrder,
    out: Vec<u8>,
}

impl TiffWriter {
    fn u16(&mut self, value: u16) {
        match self.order {
            ByteOrder::Little => self.out.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::Big => self.out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    fn u32(&mut self, value: u32) {
        match self.order {
            ByteOrder::Little => self.out.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::Big => self.out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    fn entry_header(&mut self, tag: u16, kind: u16, count: u32) {
        self.u16(tag);
        self.u16(kind);
        self.u32(count);
    }
}

fn ifd_len(entries: usize) -> u32 {
    2 + 12 * entries as u32 + 4
}

/// TIFF structure in the given byte order. `exif` lists the ASCII tags of
/// the Exif sub-IFD; `None` leaves the sub-IFD out entirely.
pub fn tiff_with(order: ByteOrder, exif: Option<&[(u16, &str)]>) -> Vec<u8> {
    let ifd0_entries = if exif.is_some() { 2 } else { 1 };
    let exif_ifd_start = 8 + ifd_len(ifd0_entries);
    let data_start = exif_ifd_start + exif.map_or(0, |tags| ifd_len(tags.len()));

    let mut w = TiffWriter {
        order,
        out: match order {
            ByteOrder::Little => b"II*\0".to_vec(),
            ByteOrder::Big => b"MM\0*".to_vec(),
        },
    };
    w.u32(8);

    w.u16(ifd0_entries as u16);
    w.entry_header(TAG_ORIENTATION, TYPE_SHORT, 1);
    w.u16(1);
    w.u16(0);
    if exif.is_some() {
        w.entry_header(TAG_EXIF_IFD_POINTER, TYPE_LONG, 1);
        w.u32(exif_ifd_start);
    }
    w.u32(0);

    if let Some(tags) = exif {
        let mut data = Vec::new();
        w.u16(tags.len() as u16);
        for (tag, value) in tags {
            let mut bytes = value.as_bytes().to_vec();
            bytes.push(0);
            w.entry_header(*tag, TYPE_ASCII, bytes.len() as u32);
            if bytes.len() <= 4 {
                bytes.resize(4, 0);
                w.out.extend_from_slice(&bytes);
            } else {
                w.u32(data_start + data.len() as u32);
                data.extend_from_slice(&bytes);
            }
        }
        w.u32(0);
        w.out.extend_from_slice(&data);
    }

    w.out
}

fn capture_tags<'a>(datetime: &'a str, offset: Option<&'a str>) -> Vec<(u16, &'a str)> {
    let mut tags = vec![(TAG_DATE_TIME_ORIGINAL, datetime)];
    if let Some(offset) = offset {
        tags.push((TAG_OFFSET_TIME_ORIGINAL, offset));
    }
    tags
}

/// Little-endian TIFF structure with `DateTimeOriginal` and, optionally,
/// `OffsetTimeOriginal` in the Exif sub-IFD
pub fn tiff(datetime: &str, offset: Option<&str>) -> Vec<u8> {
    tiff_with(ByteOrder::Little, Some(capture_tags(datetime, offset).as_slice()))
}

/// JPEG wrapper: SOI, APP1 "Exif" segment, a little scan data, EOI
pub fn wrap_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x11, 0x22, 0x33, 0xFF, 0xD9]);
    out
}

/// Little-endian JPEG with a capture time and optional offset
pub fn jpeg(datetime: &str, offset: Option<&str>) -> Vec<u8> {
    wrap_jpeg(&tiff(datetime, offset))
}

/// JPEG with a capture time in the given byte order
pub fn jpeg_in(order: ByteOrder, datetime: &str, offset: Option<&str>) -> Vec<u8> {
    wrap_jpeg(&tiff_with(order, Some(capture_tags(datetime, offset).as_slice())))
}

/// JPEG whose EXIF data stops at IFD0, as many edited exports have
pub fn jpeg_without_exif_ifd() -> Vec<u8> {
    wrap_jpeg(&tiff_with(ByteOrder::Little, None))
}

/// JPEG with an Exif sub-IFD that has an offset but no capture time
pub fn jpeg_without_capture_time() -> Vec<u8> {
    wrap_jpeg(&tiff_with(
        ByteOrder::Little,
        Some(&[(TAG_OFFSET_TIME_ORIGINAL, "+01:00")][..]),
    ))
}
