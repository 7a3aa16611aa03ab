//! Named groups of symbol patterns.
//!
//! Each group owns a match template with a single `{}` placeholder that turns
//! a raw pattern into a regular expression. Groups are defined first, filled
//! while arguments are processed, and only read while querying.

use crate::core::error::{Error, Result};

/// Placeholder replaced by each pattern in a group template
pub const PLACEHOLDER: &str = "{}";

/// Group of whole-word symbol names
pub const WORD_GROUP: &str = "word";
/// Group of raw regular expressions
pub const REGEX_GROUP: &str = "regex";

/// Half boundaries only look outward, so names starting or ending with
/// `.` or `$` still match as whole words.
pub const WORD_TEMPLATE: &str = r"\b{start-half}{}\b{end-half}";
pub const REGEX_TEMPLATE: &str = "{}";

/// Check that a template carries exactly one placeholder
pub fn validate_template(template: &str) -> Result<()> {
    match template.matches(PLACEHOLDER).count() {
        1 => Ok(()),
        0 => Err(Error::Config(format!(
            "template '{}' has no '{}' placeholder",
            template, PLACEHOLDER
        ))),
        n => Err(Error::Config(format!(
            "template '{}' has {} '{}' placeholders, expected one",
            template, n, PLACEHOLDER
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct PatternGroup {
    name: String,
    template: String,
    literal: bool,
    patterns: Vec<String>,
}

impl PatternGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether patterns are matched as literal text rather than regexes
    pub fn is_literal(&self) -> bool {
        self.literal
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Registry of pattern groups, kept in definition order
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: Vec<PatternGroup>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the whole-word group followed by the regex group
    pub fn with_builtin_groups() -> Result<Self> {
        let mut registry = Self::new();
        registry.define_literal_group(WORD_GROUP, WORD_TEMPLATE)?;
        registry.define_group(REGEX_GROUP, REGEX_TEMPLATE)?;
        Ok(registry)
    }

    /// Define a group whose patterns are regular expressions
    pub fn define_group(&mut self, name: &str, template: &str) -> Result<()> {
        self.insert(name, template, false)
    }

    /// Define a group whose patterns are escaped before substitution
    pub fn define_literal_group(&mut self, name: &str, template: &str) -> Result<()> {
        self.insert(name, template, true)
    }

    fn insert(&mut self, name: &str, template: &str, literal: bool) -> Result<()> {
        validate_template(template)?;
        if self.get(name).is_some() {
            return Err(Error::Config(format!("group '{}' is already defined", name)));
        }
        self.groups.push(PatternGroup {
            name: name.to_string(),
            template: template.to_string(),
            literal,
            patterns: Vec::new(),
        });
        Ok(())
    }

    pub fn add_pattern(&mut self, name: &str, pattern: impl Into<String>) -> Result<()> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.name == name)
            .ok_or_else(|| Error::Lookup(name.to_string()))?;
        group.patterns.push(pattern.into());
        Ok(())
    }

    pub fn is_empty(&self, name: &str) -> Result<bool> {
        self.get(name)
            .map(PatternGroup::is_empty)
            .ok_or_else(|| Error::Lookup(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&PatternGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &PatternGroup> {
        self.groups.iter()
    }
}
