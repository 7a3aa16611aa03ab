use super::discovery::discover_objects;
use super::dump::SymbolDumper;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::storage::cache::CacheEntry;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of bringing a cache entry up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The entry was fresh and left untouched
    Fresh,
    /// The entry was truncated and rebuilt
    Rebuilt {
        files: usize,
        failed: usize,
        bytes: u64,
    },
}

impl BuildOutcome {
    pub fn was_rebuilt(&self) -> bool {
        matches!(self, BuildOutcome::Rebuilt { .. })
    }
}

/// Populates symbol index files by dumping every object under a root
pub struct IndexBuilder<D> {
    dumper: D,
    suffixes: Vec<String>,
    force: bool,
}

impl<D: SymbolDumper> IndexBuilder<D> {
    pub fn new(dumper: D, config: &Config) -> Self {
        Self {
            dumper,
            suffixes: config.object_suffixes.clone(),
            force: config.force_rebuild,
        }
    }

    /// Rebuild `entry` unless it is present and newer than `root`
    pub fn build_or_refresh(&self, root: &Path, entry: &CacheEntry) -> Result<BuildOutcome> {
        if !self.force && entry.exists() && !entry.is_stale(root) {
            info!("index for {} is fresh ({})", root.display(), entry.identifier);
            return Ok(BuildOutcome::Fresh);
        }
        self.rebuild(root, entry)
    }

    /// Truncate `entry` and fill it with the symbols of every object under `root`
    pub fn rebuild(&self, root: &Path, entry: &CacheEntry) -> Result<BuildOutcome> {
        info!("building symbol index for {}", root.display());

        let mut writer = BufWriter::new(File::create(&entry.path)?);
        let objects = discover_objects(root, &self.suffixes);

        let mut failed = 0;
        let mut bytes = 0u64;
        for object in &objects {
            match self.dumper.dump(object) {
                Ok(listing) => {
                    if listing.is_empty() {
                        continue;
                    }
                    writer.write_all(&listing)?;
                    bytes += listing.len() as u64;
                    if !listing.ends_with(b"\n") {
                        writer.write_all(b"\n")?;
                        bytes += 1;
                    }
                }
                Err(e) => {
                    debug!("{}", e);
                    failed += 1;
                }
            }
        }
        writer.flush()?;

        if failed > 0 && failed == objects.len() {
            warn!(
                "{} failed on all {} files under {}",
                self.dumper.name(),
                failed,
                root.display()
            );
        }
        info!(
            "indexed {} files ({} failed, {} bytes)",
            objects.len(),
            failed,
            bytes
        );

        Ok(BuildOutcome::Rebuilt {
            files: objects.len(),
            failed,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::storage::cache::IndexStore;
    use std::cell::Cell;
    use std::fs;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    /// Emits one symbol per file named after its stem; `bad*` files fail
    struct StemDumper {
        calls: Cell<usize>,
    }

    impl StemDumper {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl SymbolDumper for StemDumper {
        fn dump(&self, path: &Path) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            let stem = path.file_stem().unwrap().to_string_lossy().to_string();
            if stem.starts_with("bad") {
                return Err(Error::Scan {
                    path: path.to_path_buf(),
                    reason: "not an object".to_string(),
                });
            }
            Ok(format!("{}:0000000000000001 T {}", path.display(), stem).into_bytes())
        }

        fn name(&self) -> &str {
            "stem"
        }
    }

    fn setup() -> (TempDir, std::path::PathBuf, CacheEntry, Config) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir_all(&root).unwrap();
        let config = Config::new(Some(temp_dir.path().join("cache"))).unwrap();
        let store = IndexStore::open(&config);
        store.ensure_directory().unwrap();
        let entry = store.entry_for(&root);
        (temp_dir, root, entry, config)
    }

    #[test]
    fn test_build_collects_symbols() {
        let (_temp_dir, root, entry, config) = setup();
        fs::write(root.join("alpha.o"), "").unwrap();
        fs::write(root.join("beta.a"), "").unwrap();
        fs::write(root.join("readme.txt"), "").unwrap();

        let dumper = StemDumper::new();
        let builder = IndexBuilder::new(&dumper, &config);
        let outcome = builder.build_or_refresh(&root, &entry).unwrap();

        assert!(outcome.was_rebuilt());
        assert_eq!(dumper.calls.get(), 2);
        let content = fs::read_to_string(&entry.path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains(" T alpha"));
        assert!(content.contains(" T beta"));
    }

    #[test]
    fn test_second_build_is_cache_hit() {
        let (_temp_dir, root, entry, config) = setup();
        fs::write(root.join("alpha.o"), "").unwrap();

        let dumper = StemDumper::new();
        let builder = IndexBuilder::new(&dumper, &config);
        builder.build_or_refresh(&root, &entry).unwrap();
        let calls = dumper.calls.get();

        let outcome = builder.build_or_refresh(&root, &entry).unwrap();
        assert_eq!(outcome, BuildOutcome::Fresh);
        assert_eq!(dumper.calls.get(), calls);
    }

    #[test]
    fn test_stale_entry_is_rebuilt() {
        let (_temp_dir, root, entry, config) = setup();
        fs::write(root.join("alpha.o"), "").unwrap();

        let dumper = StemDumper::new();
        let builder = IndexBuilder::new(&dumper, &config);
        builder.build_or_refresh(&root, &entry).unwrap();

        fs::write(root.join("gamma.o"), "").unwrap();
        let later = SystemTime::now() + Duration::from_secs(60);
        File::open(&root).unwrap().set_modified(later).unwrap();

        let outcome = builder.build_or_refresh(&root, &entry).unwrap();
        assert!(outcome.was_rebuilt());
        let content = fs::read_to_string(&entry.path).unwrap();
        assert!(content.contains(" T gamma"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_force_rebuild_bypasses_freshness() {
        let (_temp_dir, root, entry, config) = setup();
        fs::write(root.join("alpha.o"), "").unwrap();

        let dumper = StemDumper::new();
        let builder = IndexBuilder::new(&dumper, &config.with_force_rebuild(true));
        builder.build_or_refresh(&root, &entry).unwrap();
        let outcome = builder.build_or_refresh(&root, &entry).unwrap();

        assert!(outcome.was_rebuilt());
        assert_eq!(dumper.calls.get(), 2);
    }

    #[test]
    fn test_failing_files_are_skipped() {
        let (_temp_dir, root, entry, config) = setup();
        fs::write(root.join("alpha.o"), "").unwrap();
        fs::write(root.join("bad.o"), "").unwrap();

        let dumper = StemDumper::new();
        let builder = IndexBuilder::new(&dumper, &config);
        let outcome = builder.build_or_refresh(&root, &entry).unwrap();

        match outcome {
            BuildOutcome::Rebuilt { files, failed, .. } => {
                assert_eq!(files, 2);
                assert_eq!(failed, 1);
            }
            BuildOutcome::Fresh => panic!("expected a rebuild"),
        }
        let content = fs::read_to_string(&entry.path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_empty_root_creates_empty_index() {
        let (_temp_dir, root, entry, config) = setup();

        let dumper = StemDumper::new();
        let builder = IndexBuilder::new(&dumper, &config);
        builder.build_or_refresh(&root, &entry).unwrap();

        assert!(entry.exists());
        assert_eq!(fs::read(&entry.path).unwrap().len(), 0);
    }
}
