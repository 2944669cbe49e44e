//! Storage configuration injected by the service layer.
//!
//! The original tool family grew up as a web service with platform-dependent
//! upload/processed directories resolved at startup. The library keeps that
//! boundary but inverts it: callers resolve the two directories however they
//! like (CLI flags, platform detection, a web framework's config) and hand
//! the core a plain [`StorageConfig`]. The core itself never inspects the
//! running platform or any environment variable.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Where uploaded inputs live and where processed outputs go.
///
/// Both directories are independent; nothing requires them to share a
/// parent. [`ensure_dirs`](StorageConfig::ensure_dirs) is the only method
/// with side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory the caller drops input PNGs into.
    pub upload_dir: PathBuf,
    /// Directory `process_file` writes `de8_`-prefixed outputs into.
    pub processed_dir: PathBuf,
}

impl StorageConfig {
    /// Build a config from two directories.
    pub fn new(upload_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            processed_dir: processed_dir.into(),
        }
    }

    /// Both directories rooted under a common parent, using the original
    /// tool's `uploads` / `processed` names.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(root.join("uploads"), root.join("processed"))
    }

    /// Create both directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.processed_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_uses_original_directory_names() {
        let cfg = StorageConfig::under("/srv/cards");
        assert_eq!(cfg.upload_dir, PathBuf::from("/srv/cards/uploads"));
        assert_eq!(cfg.processed_dir, PathBuf::from("/srv/cards/processed"));
    }

    #[test]
    fn ensure_dirs_creates_both() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cfg = StorageConfig::under(tmp.path());
        cfg.ensure_dirs().expect("ensure_dirs");
        assert!(cfg.upload_dir.is_dir());
        assert!(cfg.processed_dir.is_dir());
    }

    #[test]
    fn ensure_dirs_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cfg = StorageConfig::under(tmp.path());
        cfg.ensure_dirs().expect("first");
        cfg.ensure_dirs().expect("second");
    }
}
