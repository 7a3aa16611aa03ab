//! Compiles a pattern group into one regular expression and runs it over an
//! index file.

use super::groups::{validate_template, PatternGroup, PLACEHOLDER};
use crate::core::error::{Error, Result};
use regex::bytes::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Forces each expression to run to the end of the symbol token, which is the
/// last field of every index record.
pub const TOKEN_SUFFIX: &str = r"\S*$";

/// Build the match expression for one pattern
pub fn expression(template: &str, pattern: &str, literal: bool) -> String {
    let pattern = if literal {
        regex::escape(pattern)
    } else {
        pattern.to_string()
    };
    // Grouped so a top-level `|` in the pattern cannot escape the suffix
    let grouped = format!("(?:{})", pattern);
    format!("{}{}", template.replacen(PLACEHOLDER, &grouped, 1), TOKEN_SUFFIX)
}

/// A compiled union of match expressions
#[derive(Debug, Clone)]
pub struct Query {
    regex: Regex,
}

impl Query {
    /// Compile `patterns` against `template` into a single alternation
    pub fn compile(template: &str, patterns: &[String], literal: bool) -> Result<Self> {
        if patterns.is_empty() {
            return Err(Error::EmptyQuery(format!("template '{}'", template)));
        }
        validate_template(template)?;

        let alternation = patterns
            .iter()
            .map(|p| format!("(?:{})", expression(template, p, literal)))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            regex: Regex::new(&alternation)?,
        })
    }

    pub fn for_group(group: &PatternGroup) -> Result<Self> {
        if group.is_empty() {
            return Err(Error::EmptyQuery(format!("group '{}'", group.name())));
        }
        Self::compile(group.template(), group.patterns(), group.is_literal())
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, line: &[u8]) -> bool {
        self.regex.is_match(line)
    }

    /// Write every matching index line to `out`, returning the match count
    pub fn run<R: BufRead, W: Write>(&self, mut index: R, out: &mut W) -> Result<usize> {
        let mut matches = 0;
        let mut line = Vec::new();
        loop {
            line.clear();
            if index.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let record = trim_line_ending(&line);
            if self.is_match(record) {
                out.write_all(record)?;
                out.write_all(b"\n")?;
                matches += 1;
            }
        }
        Ok(matches)
    }

    pub fn run_file<W: Write>(&self, index_path: &Path, out: &mut W) -> Result<usize> {
        let reader = BufReader::new(File::open(index_path)?);
        self.run(reader, out)
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
