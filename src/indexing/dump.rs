//! Symbol listing for object files and archives.

use crate::core::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Lists the defined symbols of one object file or archive.
///
/// Implementations return the raw listing, one record per line.
pub trait SymbolDumper {
    fn dump(&self, path: &Path) -> Result<Vec<u8>>;

    /// Name used in diagnostics
    fn name(&self) -> &str;
}

impl<T: SymbolDumper + ?Sized> SymbolDumper for &T {
    fn dump(&self, path: &Path) -> Result<Vec<u8>> {
        (**self).dump(path)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Runs `nm --defined-only -A` on each file
#[derive(Debug, Clone)]
pub struct NmDumper {
    program: String,
}

impl NmDumper {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for NmDumper {
    fn default() -> Self {
        Self::new("nm")
    }
}

impl SymbolDumper for NmDumper {
    fn dump(&self, path: &Path) -> Result<Vec<u8>> {
        let output = Command::new(&self.program)
            .arg("--defined-only")
            .arg("-A")
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| Error::Scan {
                path: path.to_path_buf(),
                reason: format!("failed to run {}: {}", self.program, e),
            })?;

        // Archives with one bad member still list the good ones, so stdout is
        // kept regardless of the exit status.
        if !output.status.success() && output.stdout.is_empty() {
            return Err(Error::Scan {
                path: path.to_path_buf(),
                reason: format!("{} exited with {}", self.program, output.status),
            });
        }

        Ok(output.stdout)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_program_is_scan_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("main.o");
        fs::write(&file, "not an object").unwrap();

        let dumper = NmDumper::new("symgrep-no-such-nm-program");
        let result = dumper.dump(&file);
        assert!(matches!(result, Err(Error::Scan { .. })));
    }

    #[test]
    fn test_default_program_name() {
        assert_eq!(NmDumper::default().name(), "nm");
    }
}
