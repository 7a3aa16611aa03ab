use crate::core::error::{Error, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canonicalize a search root, requiring an existing directory
pub fn resolve_search_root(path: &Path) -> Result<PathBuf> {
    let canonical = path.canonicalize().map_err(|e| Error::Resolution {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !canonical.is_dir() {
        return Err(Error::Resolution {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(canonical)
}

/// Discover every object file or archive under `root`.
///
/// Unreadable entries are skipped; the walk is best effort.
pub fn discover_objects(root: &Path, suffixes: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    // Build trees are usually gitignored, so none of the standard filters apply
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
                if is_file && is_object_file(entry.path(), suffixes) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                debug!("skipping unreadable entry: {}", err);
            }
        }
    }

    files.sort();
    files
}

/// Check if a file is an object file or archive based on extension
pub fn is_object_file(path: &Path, suffixes: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            suffixes.iter().any(|s| *s == ext)
        })
        .unwrap_or(false)
}
