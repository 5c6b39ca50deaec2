//! # pix
//!
//! Organises photos from multiple devices by their EXIF capture time.
//!
//! ## Commands
//! - `organise` - copy photos into one directory named by (shifted) capture time
//! - `timediff` - time between two photos, timezone-aware
//! - `copymeta` - copy metadata onto edited copies of photos
//!
//! ## Architecture
//! - `core` - EXIF handling and the batch operations
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{PixError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG`
/// overrides `default_level` when set.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed (e.g., by a test harness)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
