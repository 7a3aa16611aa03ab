use crate::core::error::Result;
use crate::search::groups::{GroupRegistry, REGEX_GROUP, WORD_GROUP};
use clap::Parser;
use std::path::PathBuf;

/// symgrep - find which object files and archives define a symbol
#[derive(Parser, Debug)]
#[command(name = "symgrep")]
#[command(about = "Find which object files and archives under a directory define a symbol", long_about = None)]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Symbol names to match as whole words
    #[arg(value_name = "SYMBOL")]
    pub symbols: Vec<String>,

    /// Regular expression to match against symbol names (repeatable)
    #[arg(short = 'e', long = "regexp", value_name = "REGEX")]
    pub regexps: Vec<String>,

    /// Directory to search (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Remove all cached indexes before searching
    #[arg(short, long)]
    pub clean: bool,

    /// Rebuild the index for this directory even if it looks fresh
    #[arg(long)]
    pub rebuild: bool,

    /// Custom cache directory (default: per-user cache location)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Program used to list defined symbols
    #[arg(long, value_name = "PROGRAM", default_value = "nm")]
    pub nm: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Registry with the built-in groups filled from the command line
    pub fn pattern_groups(&self) -> Result<GroupRegistry> {
        let mut registry = GroupRegistry::with_builtin_groups()?;
        for symbol in &self.symbols {
            registry.add_pattern(WORD_GROUP, symbol.as_str())?;
        }
        for regexp in &self.regexps {
            registry.add_pattern(REGEX_GROUP, regexp.as_str())?;
        }
        Ok(registry)
    }

    pub fn has_patterns(&self) -> bool {
        !self.symbols.is_empty() || !self.regexps.is_empty()
    }
}
