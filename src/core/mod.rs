//! # Core Module
//!
//! The photo handling engine, independent of the command line.
//!
//! ## Modules
//! - `exif` - Locates, reads and patches EXIF capture times
//! - `scanner` - Lists the files of a directory
//! - `organize` - Copies photos under timestamp names
//! - `copymeta` - Copies metadata between same-named files
//! - `timediff` - Compares the capture times of two photos
//! - `shift` - Parses and prints time shifts

pub mod copymeta;
pub mod exif;
pub mod organize;
pub mod scanner;
pub mod shift;
pub mod timediff;

// Re-export commonly used types
pub use copymeta::{CopyMetaConfig, CopyMetaExecutor, ExifToolCopier, MetadataCopier};
pub use self::exif::ImageExif;
pub use organize::{OrganizeConfig, OrganizeExecutor};
pub use shift::{format_shift, parse_shift};
pub use timediff::time_diff;
