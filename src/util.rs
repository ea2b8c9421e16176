use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// Get current timestamp in ISO format.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Convert a string to a safe filename.
pub fn safe_filename(name: &str) -> String {
    const UNSAFE: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
    let mut result = name.to_string();
    for &c in UNSAFE {
        result = result.replace(c, "_");
    }
    result.trim().to_string()
}
