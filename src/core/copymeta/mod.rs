//! Metadata copy module.
//!
//! Copies all metadata tags from each file in one directory onto the file
//! with the same name in another, through a pluggable [`MetadataCopier`].

mod copier;
mod executor;
mod types;

pub use copier::{ExifToolCopier, MetadataCopier, UNKNOWN_FILE_TYPE};
pub use executor::CopyMetaExecutor;
pub use types::*;
