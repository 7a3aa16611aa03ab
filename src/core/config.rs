use super::error::{Error, Result};
use std::path::PathBuf;

/// File extensions treated as object files or archives (compared lowercase)
pub const DEFAULT_OBJECT_SUFFIXES: &[&str] = &["a", "o", "obj", "lib", "so", "dylib"];

/// Configuration for symgrep
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one index file per search root
    pub cache_dir: PathBuf,
    /// Program used to list defined symbols
    pub nm_program: String,
    /// Extensions of files handed to the symbol dumper
    pub object_suffixes: Vec<String>,
    /// Rebuild the index even when it looks fresh
    pub force_rebuild: bool,
}

impl Config {
    /// Get the default per-user cache directory
    pub fn default_cache_dir() -> Result<PathBuf> {
        dirs::cache_dir()
            .ok_or_else(|| Error::Config("Could not determine cache directory".to_string()))
            .map(|cache| cache.join("symgrep"))
    }

    /// Create a new configuration
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.unwrap_or_else(|| {
            Self::default_cache_dir().unwrap_or_else(|_| PathBuf::from(".symgrep-cache"))
        });

        Ok(Self {
            cache_dir,
            nm_program: "nm".to_string(),
            object_suffixes: DEFAULT_OBJECT_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            force_rebuild: false,
        })
    }

    pub fn with_nm_program(mut self, program: impl Into<String>) -> Self {
        self.nm_program = program.into();
        self
    }

    pub fn with_force_rebuild(mut self, force: bool) -> Self {
        self.force_rebuild = force;
        self
    }
}
