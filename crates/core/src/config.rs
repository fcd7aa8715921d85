//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read process-wide environment variables;
//! they only see the [`crate::Library`] built from this configuration.

use crate::constants::{HEMATOLOGY_FILENAME, NEUROLOGY_FILENAME, TOPICS_DIR_NAME};
use crate::{CatalogError, CatalogResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    content_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// With `None`, the library is built from the content embedded in the binary. With a
    /// directory, that directory must look like a content directory (see
    /// [`validate_content_dir`]).
    pub fn new(content_dir: Option<PathBuf>) -> CatalogResult<Self> {
        if let Some(dir) = content_dir.as_deref() {
            validate_content_dir(dir)?;
        }

        Ok(Self { content_dir })
    }

    /// Configuration that always uses the embedded content.
    pub fn embedded() -> Self {
        Self { content_dir: None }
    }

    pub fn content_dir(&self) -> Option<&Path> {
        self.content_dir.as_deref()
    }
}

/// Check that `dir` contains both specialty documents and a `topics/` directory.
pub fn validate_content_dir(dir: &Path) -> CatalogResult<()> {
    if !dir.is_dir() {
        return Err(CatalogError::InvalidInput(format!(
            "content directory {} does not exist or is not a directory",
            dir.display()
        )));
    }

    for filename in [HEMATOLOGY_FILENAME, NEUROLOGY_FILENAME] {
        if !dir.join(filename).is_file() {
            return Err(CatalogError::InvalidInput(format!(
                "content directory {} is missing {filename}",
                dir.display()
            )));
        }
    }

    if !dir.join(TOPICS_DIR_NAME).is_dir() {
        return Err(CatalogError::InvalidInput(format!(
            "content directory {} is missing {TOPICS_DIR_NAME}/",
            dir.display()
        )));
    }

    Ok(())
}

/// Parse the content directory override from an optional environment value.
///
/// `None`, empty and whitespace-only values mean "use embedded content".
pub fn content_dir_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse a boolean feature flag such as `CATALOG_ENABLE_REFLECTION`.
///
/// Only `true` and `1` (case-insensitive) enable the flag.
pub fn flag_from_env_value(value: Option<String>) -> bool {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| v == "true" || v == "1")
}
