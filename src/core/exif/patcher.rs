//! In-place rewrite of a textual tag value inside the EXIF segment.

use crate::error::ExifError;
use std::io::{Seek, SeekFrom, Write};
use tracing::debug;

/// Replace every occurrence of `old` with `new` in `raw`.
///
/// Both values must be the same length, otherwise every offset after the
/// first replacement would shift and the TIFF structure would be corrupted.
pub fn replace_value(raw: &[u8], old: &str, new: &str) -> Result<(Vec<u8>, usize), ExifError> {
    if old.len() != new.len() {
        return Err(ExifError::LengthMismatch {
            old: old.to_string(),
            new: new.to_string(),
        });
    }

    let old = old.as_bytes();
    let new = new.as_bytes();
    let mut patched = raw.to_vec();
    let mut replaced = 0;

    if old.is_empty() {
        return Ok((patched, replaced));
    }

    let mut i = 0;
    while i + old.len() <= patched.len() {
        if &patched[i..i + old.len()] == old {
            patched[i..i + old.len()].copy_from_slice(new);
            replaced += 1;
            i += old.len();
        } else {
            i += 1;
        }
    }

    Ok((patched, replaced))
}

/// Patch `old` to `new` in `raw` and write the result back at `offset`.
///
/// Returns the number of occurrences replaced.
pub fn patch_timestamp<F: Write + Seek>(
    file: &mut F,
    raw: &[u8],
    offset: u64,
    old: &str,
    new: &str,
) -> Result<usize, ExifError> {
    let (patched, replaced) = replace_value(raw, old, new)?;
    debug_assert_eq!(patched.len(), raw.len());

    file.seek(SeekFrom::Start(offset))?;
    file.write_all(&patched)?;
    file.flush()?;

    debug!(offset, replaced, old, new, "patched EXIF timestamp");
    Ok(replaced)
}
