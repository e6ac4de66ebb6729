//! Statute file loading.
//!
//! Statute text arrives as locally stored UTF-8 files (consolidated
//! official texts, often exported with a BOM by the tooling that
//! produced them).

use std::fs;
use std::path::Path;

use crate::error::{ImportError, Result};

/// Read a statute text file, stripping a leading UTF-8 BOM if present.
pub fn load_statute_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
}
