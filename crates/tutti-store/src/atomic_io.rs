use std::path::Path;

use crate::{StoreError, StoreResult};

/// Writes text using a temp file + rename so readers never observe a partially
/// written display state document.
pub fn write_text_atomic(path: &Path, content: &str) -> StoreResult<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Err(StoreError::InvalidDestination(path.display().to_string()));
    }

    let parent_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent_dir).map_err(|source| io_error(parent_dir, source))?;

    let temp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("display-state"),
        std::process::id(),
        unix_timestamp_nanos()
    );
    let temp_path = parent_dir.join(temp_name);
    std::fs::write(&temp_path, content).map_err(|source| io_error(&temp_path, source))?;
    if let Err(source) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(io_error(path, source));
    }
    Ok(())
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn unix_timestamp_nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}
