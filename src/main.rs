//! # pix CLI
//!
//! A tool for organising pics from multiple devices.
//!
//! ## Usage
//! ```bash
//! pix organise ~/Camera ~/Photos --shift=-1h30m
//! pix timediff phone.jpg camera.jpg
//! pix copymeta ~/Originals ~/Edited
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
