//! Command implementations.

pub mod config;
pub mod generate;
pub mod locate;

pub use self::config::execute_config;
pub use self::generate::execute_generate;
pub use self::locate::execute_locate;

use crate::error::{CliError, Result};
use std::io::Read;
use std::path::Path;

/// Read source text from `path`, or from stdin for `None` and `-`.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p).map_err(|e| {
            CliError::InvalidInput(format!("cannot read {}: {}", p.display(), e))
        }),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
