//! Photo organization module.
//!
//! Copies photos into a flat destination directory, named after their
//! (optionally shifted) capture time, and stamps the shifted time into the
//! copy's EXIF data.

mod executor;
mod planner;
mod types;

pub use executor::OrganizeExecutor;
pub use planner::{OrganizePlanner, MAX_DISAMBIGUATION};
pub use types::*;
