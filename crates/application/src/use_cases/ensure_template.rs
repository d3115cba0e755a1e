//! Ensure template use case.

use std::path::Path;

use replcheck_domain::DEFAULT_TEMPLATE;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::FileSystem;

/// Writes the default SAM template when none exists.
pub struct EnsureTemplate<'a, F> {
    fs: &'a F,
}

impl<'a, F: FileSystem> EnsureTemplate<'a, F> {
    /// Creates a new `EnsureTemplate` use case.
    #[must_use]
    pub const fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Returns `true` if a template was created, `false` if one existed.
    ///
    /// An existing file is never overwritten.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Template`] if the file cannot be written.
    pub async fn execute(&self, path: &Path) -> ApplicationResult<bool> {
        if self.fs.exists(path).await {
            return Ok(false);
        }

        self.fs
            .write_file(path, DEFAULT_TEMPLATE.as_bytes())
            .await
            .map_err(|source| ApplicationError::Template {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %path.display(), "wrote default template");
        Ok(true)
    }
}
