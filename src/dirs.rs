//! Experiment directory setup

use std::fs;
use std::path::PathBuf;

use crate::Result;

/// Create every directory in `paths`, including missing parents.
///
/// Idempotent: directories that already exist are left untouched. The
/// first creation failure (e.g. permission denied, or a path occupied
/// by a regular file) is returned as-is.
pub fn create_dirs(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
