//! Finds the start of the EXIF (TIFF) structure inside an image byte stream.

use crate::error::ExifError;
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

/// Length of the TIFF header: byte order mark, magic number, first IFD offset
pub const EXIF_SIGNATURE_LENGTH: usize = 8;

const LITTLE_ENDIAN_SIGNATURE: [u8; 4] = *b"II*\0";
const BIG_ENDIAN_SIGNATURE: [u8; 4] = *b"MM\0*";

/// Raw EXIF bytes together with where they start in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifSegment {
    /// Byte offset of the TIFF header from the start of the stream
    pub offset: u64,
    /// Every byte from the header to the end of the stream
    pub bytes: Vec<u8>,
}

/// Outcome of probing one window of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProbe {
    /// Valid header; holds the offset of the first IFD
    Found { first_ifd_offset: u32 },
    /// No signature at this position
    NoSignature,
    /// Signature present but the header cannot be right
    Malformed,
}

/// Probe a window of at least [`EXIF_SIGNATURE_LENGTH`] bytes as a TIFF header
pub fn probe_header(window: &[u8]) -> HeaderProbe {
    if window.len() < EXIF_SIGNATURE_LENGTH {
        return HeaderProbe::NoSignature;
    }

    let mut offset_bytes = [0u8; 4];
    offset_bytes.copy_from_slice(&window[4..8]);

    let signature = &window[..4];
    let first_ifd_offset = if signature == LITTLE_ENDIAN_SIGNATURE {
        u32::from_le_bytes(offset_bytes)
    } else if signature == BIG_ENDIAN_SIGNATURE {
        u32::from_be_bytes(offset_bytes)
    } else {
        return HeaderProbe::NoSignature;
    };

    // The first IFD can't overlap the header it is declared in
    if (first_ifd_offset as usize) < EXIF_SIGNATURE_LENGTH {
        return HeaderProbe::Malformed;
    }

    HeaderProbe::Found { first_ifd_offset }
}

/// Scan a stream for the first EXIF header.
///
/// The stream is consumed one byte at a time until a window parses as a
/// header, then read to the end. Streams without a header yield
/// [`ExifError::NoExif`]; a signature with an impossible IFD offset yields
/// [`ExifError::MalformedHeader`].
pub fn locate_exif<R: Read>(reader: R) -> Result<ExifSegment, ExifError> {
    let mut reader = BufReader::new(reader);
    let mut window: Vec<u8> = Vec::with_capacity(EXIF_SIGNATURE_LENGTH);
    let mut discarded: u64 = 0;

    loop {
        if !fill_window(&mut reader, &mut window)? {
            return Err(ExifError::NoExif);
        }

        match probe_header(&window) {
            HeaderProbe::Found { first_ifd_offset } => {
                debug!(offset = discarded, first_ifd_offset, "found EXIF header");
                break;
            }
            HeaderProbe::NoSignature => {
                window.remove(0);
                discarded += 1;
            }
            HeaderProbe::Malformed => {
                return Err(ExifError::MalformedHeader { offset: discarded });
            }
        }
    }

    let mut bytes = window;
    reader.read_to_end(&mut bytes)?;

    Ok(ExifSegment {
        offset: discarded,
        bytes,
    })
}

/// Top the window up to the signature length. Returns false at end of stream.
fn fill_window<R: BufRead>(reader: &mut R, window: &mut Vec<u8>) -> Result<bool, ExifError> {
    while window.len() < EXIF_SIGNATURE_LENGTH {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(false);
        }
        let take = available.len().min(EXIF_SIGNATURE_LENGTH - window.len());
        window.extend_from_slice(&available[..take]);
        reader.consume(take);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: [u8; 8] = [b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];

    fn with_prefix(prefix: &[u8], tail: &[u8]) -> Vec<u8> {
        let mut data = prefix.to_vec();
        data.extend_from_slice(tail);
        data
    }

    #[test]
    fn probe_accepts_both_byte_orders() {
        assert_eq!(
            probe_header(&HEADER),
            HeaderProbe::Found {
                first_ifd_offset: 8
            }
        );
        assert_eq!(
            probe_header(b"MM\0*\0\0\0\x08"),
            HeaderProbe::Found {
                first_ifd_offset: 8
            }
        );
    }

    #[test]
    fn probe_rejects_other_bytes() {
        assert_eq!(probe_header(b"\xFF\xD8\xFF\xE1\0\0\0\0"), HeaderProbe::NoSignature);
        assert_eq!(probe_header(b"II*"), HeaderProbe::NoSignature);
    }

    #[test]
    fn probe_flags_offset_inside_header() {
        assert_eq!(probe_header(b"II*\0\x04\0\0\0"), HeaderProbe::Malformed);
    }

    #[test]
    fn header_at_start_skips_nothing() {
        let data = with_prefix(&[], &HEADER);
        let segment = locate_exif(Cursor::new(&data)).unwrap();
        assert_eq!(segment.offset, 0);
        assert_eq!(segment.bytes, data);
    }

    #[test]
    fn reports_exact_offset_and_remaining_bytes() {
        let tail = with_prefix(&HEADER, b"rest of the tiff structure");
        for k in [1usize, 7, 12, 300, 9000] {
            let prefix = vec![0xAB; k];
            let data = with_prefix(&prefix, &tail);
            let segment = locate_exif(Cursor::new(&data)).unwrap();
            assert_eq!(segment.offset, k as u64);
            assert_eq!(segment.bytes, tail);
        }
    }

    #[test]
    fn stream_without_header_is_no_exif() {
        let data = vec![0x42; 4096];
        let result = locate_exif(Cursor::new(&data));
        assert!(matches!(result, Err(ExifError::NoExif)));
    }

    #[test]
    fn short_and_empty_streams_are_no_exif() {
        assert!(matches!(locate_exif(Cursor::new(b"")), Err(ExifError::NoExif)));
        assert!(matches!(locate_exif(Cursor::new(b"II*\0")), Err(ExifError::NoExif)));
    }

    #[test]
    fn malformed_header_is_a_typed_error() {
        let data = with_prefix(b"junk", b"MM\0*\0\0\0\0more");
        let result = locate_exif(Cursor::new(&data));
        assert!(matches!(
            result,
            Err(ExifError::MalformedHeader { offset: 4 })
        ));
    }
}
