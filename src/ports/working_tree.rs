use std::path::Path;

use crate::domain::AppError;

/// Read access to the working directory's top level.
pub trait WorkingTree {
    /// Root of the working directory.
    fn root(&self) -> &Path;

    /// Names of the regular files directly under the root.
    fn top_level_files(&self) -> Result<Vec<String>, AppError>;
}
