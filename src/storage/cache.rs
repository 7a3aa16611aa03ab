use crate::core::config::Config;
use crate::core::error::Result;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Number of hex characters of the root digest used as the cache identifier
pub const IDENTIFIER_LEN: usize = 32;

/// Derive the cache identifier for a canonical search root.
///
/// The path must already be canonicalized; the identifier is a truncated
/// SHA256 of its string form.
pub fn cache_identifier(canonical_root: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_root.to_string_lossy().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..IDENTIFIER_LEN].to_string()
}

/// Get a path's modification time, or None if it cannot be read
pub fn get_modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// A per-root symbol index file inside the cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub identifier: String,
    pub path: PathBuf,
}

impl CacheEntry {
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn modified(&self) -> Option<SystemTime> {
        get_modified_time(&self.path)
    }

    /// Check whether the entry must be rebuilt for `root`.
    ///
    /// Only the root directory's own mtime is compared, so changes deep in
    /// the tree that leave the root untouched are not detected.
    pub fn is_stale(&self, root: &Path) -> bool {
        let Some(entry_time) = self.modified() else {
            return true;
        };
        match get_modified_time(root) {
            Some(root_time) => root_time > entry_time,
            None => true,
        }
    }
}

/// Directory of flat symbol index files, one per search root
#[derive(Debug, Clone)]
pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn open(config: &Config) -> Self {
        Self::new(config.cache_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the cache directory if it is missing
    pub fn ensure_directory(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Backing file for an identifier. Does not touch the filesystem.
    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.dir.join(identifier)
    }

    /// Cache entry for an already canonicalized root
    pub fn entry_for(&self, canonical_root: &Path) -> CacheEntry {
        let identifier = cache_identifier(canonical_root);
        CacheEntry {
            path: self.path_for(&identifier),
            identifier,
        }
    }

    /// Remove the whole cache directory. A missing directory is not an error.
    pub fn clear_all(&self) -> Result<()> {
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
