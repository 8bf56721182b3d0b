use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::path::Path;

use crate::rating::CombinedRatingResult;

/// Save a rating result as JSON atomically
///
/// The file is either fully written or left untouched, never half-written.
pub fn save_result_json(path: &Path, result: &CombinedRatingResult) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, result).context("Failed to serialize rating result")?;

    file.commit()
        .with_context(|| format!("Failed to save rating result to {}", path.display()))?;

    Ok(())
}
