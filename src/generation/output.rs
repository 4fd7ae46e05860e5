//! Saving generated images as numbered PNG files.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::{ClayCeoError, Result};

/// Next free `{prefix}_{n}.png` in `dir`, where `n` is one more than the number of
/// existing files with that prefix. A missing directory counts as empty.
pub fn next_output_path(dir: impl AsRef<Path>, prefix: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let existing = match std::fs::read_dir(dir) {
        Ok(entries) => {
            let stem_prefix = format!("{}_", prefix);
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| {
                    let name = entry.file_name();
                    let name = name.to_string_lossy();
                    name.starts_with(&stem_prefix) && name.ends_with(".png")
                })
                .count()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
        Err(e) => return Err(ClayCeoError::file_access(dir, e)),
    };
    Ok(dir.join(format!("{}_{}.png", prefix, existing + 1)))
}

/// Write `bytes` to the next numbered file in `dir`, creating `dir` if needed.
#[instrument(skip_all, fields(dir = %dir.as_ref().display(), prefix = %prefix, byte_len = bytes.len()))]
pub fn save_image(dir: impl AsRef<Path>, prefix: &str, bytes: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| ClayCeoError::file_access(dir, e))?;
    let path = next_output_path(dir, prefix)?;
    std::fs::write(&path, bytes).map_err(|e| ClayCeoError::file_access(&path, e))?;
    info!(path = %path.display(), "Saved generated image");
    Ok(path)
}
