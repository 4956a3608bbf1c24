//! Init command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_init(dir: PathBuf, force: bool) -> Result<(), AppError> {
    let path = crate::app::api::init(&dir, force)?;
    println!("✅ Wrote {}", path.display());
    Ok(())
}
