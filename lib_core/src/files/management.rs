use std::path::{Path, PathBuf};

use crate::constants::HOME;

/// Current user's home directory, taken from `$HOME`.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var(HOME)
        .ok()
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// True if something exists at `path`. Broken symlinks and paths that
/// cannot be inspected count as missing.
pub fn exists<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    path.as_ref().try_exists().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exists_reports_files_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("credentials");
        assert!(!exists(&file));
        std::fs::write(&file, "[default]\n").unwrap();
        assert!(exists(&file));
        assert!(exists(dir.path()));
    }
}
