use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown pattern group: {0}")]
    Lookup(String),

    #[error("Cannot resolve search root {}: {reason}", path.display())]
    Resolution { path: PathBuf, reason: String },

    #[error("Symbol dump failed for {}: {reason}", path.display())]
    Scan { path: PathBuf, reason: String },

    #[error("No patterns supplied for group '{0}'")]
    EmptyQuery(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
