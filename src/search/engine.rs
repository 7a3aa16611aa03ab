use super::groups::GroupRegistry;
use super::query::Query;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::indexing::builder::{BuildOutcome, IndexBuilder};
use crate::indexing::discovery::resolve_search_root;
use crate::indexing::dump::SymbolDumper;
use crate::storage::cache::{CacheEntry, IndexStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What happened to one group during a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The group had no patterns and no query was issued
    Skipped,
    /// The group could not be compiled; the reason was logged
    Failed(String),
    Ran { matches: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPass {
    pub group: String,
    pub outcome: PassOutcome,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub root: PathBuf,
    pub entry: CacheEntry,
    pub build: BuildOutcome,
    pub passes: Vec<GroupPass>,
}

impl SearchReport {
    pub fn total_matches(&self) -> usize {
        self.passes
            .iter()
            .map(|p| match p.outcome {
                PassOutcome::Ran { matches } => matches,
                _ => 0,
            })
            .sum()
    }

    /// Process exit status: 0, or 2 when any group failed to compile
    pub fn exit_status(&self) -> u8 {
        let failed = self
            .passes
            .iter()
            .any(|p| matches!(p.outcome, PassOutcome::Failed(_)));
        if failed {
            2
        } else {
            0
        }
    }

    pub fn pass(&self, group: &str) -> Option<&PassOutcome> {
        self.passes
            .iter()
            .find(|p| p.group == group)
            .map(|p| &p.outcome)
    }
}

/// Ties the index store, builder and query passes together
pub struct SymbolFinder<D> {
    store: IndexStore,
    builder: IndexBuilder<D>,
}

impl<D: SymbolDumper> SymbolFinder<D> {
    pub fn new(config: &Config, dumper: D) -> Self {
        Self {
            store: IndexStore::open(config),
            builder: IndexBuilder::new(dumper, config),
        }
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Remove every cached index
    pub fn clean(&self) -> Result<()> {
        debug!("clearing cache directory {}", self.store.dir().display());
        self.store.clear_all()
    }

    /// Resolve `root` and make sure its index is current
    pub fn prepare(&self, root: &Path) -> Result<(PathBuf, CacheEntry, BuildOutcome)> {
        let root = resolve_search_root(root)?;
        self.store.ensure_directory()?;
        let entry = self.store.entry_for(&root);
        let build = self.builder.build_or_refresh(&root, &entry)?;
        Ok((root, entry, build))
    }

    /// Run one pass per non-empty group over the index of `root`
    pub fn search<W: Write>(
        &self,
        root: &Path,
        registry: &GroupRegistry,
        out: &mut W,
    ) -> Result<SearchReport> {
        let (root, entry, build) = self.prepare(root)?;

        let mut passes = Vec::new();
        for group in registry.groups() {
            let outcome = if group.is_empty() {
                PassOutcome::Skipped
            } else {
                match Query::for_group(group) {
                    Ok(query) => {
                        debug!("group '{}' query: {}", group.name(), query.as_str());
                        let matches = query.run_file(&entry.path, out)?;
                        PassOutcome::Ran { matches }
                    }
                    Err(e) => {
                        warn!("skipping group '{}': {}", group.name(), e);
                        PassOutcome::Failed(e.to_string())
                    }
                }
            };
            passes.push(GroupPass {
                group: group.name().to_string(),
                outcome,
            });
        }
        out.flush()?;

        Ok(SearchReport {
            root,
            entry,
            build,
            passes,
        })
    }
}
