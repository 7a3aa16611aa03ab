// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
}

// Cache storage
pub mod storage {
    pub mod cache;
}

// Indexing pipeline
pub mod indexing {
    pub mod builder;
    pub mod discovery;
    pub mod dump;
}

// Pattern groups & queries
pub mod search {
    pub mod engine;
    pub mod groups;
    pub mod query;
}

// User interfaces
pub mod ui {
    pub mod cli;
}

// Re-export commonly used types
pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use indexing::builder::{BuildOutcome, IndexBuilder};
pub use indexing::discovery::{discover_objects, resolve_search_root};
pub use indexing::dump::{NmDumper, SymbolDumper};
pub use search::engine::{PassOutcome, SearchReport, SymbolFinder};
pub use search::groups::{GroupRegistry, PatternGroup, REGEX_GROUP, WORD_GROUP};
pub use search::query::Query;
pub use storage::cache::{cache_identifier, CacheEntry, IndexStore};
pub use ui::cli::Cli;
