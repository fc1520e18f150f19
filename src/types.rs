use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Unique tokens accumulated across all processed rows.
/// Sorted only for stable output; order carries no meaning.
pub type CategorySet = BTreeSet<String>;

/// A record with named string fields
pub trait Record {
    /// Look up a field by column name
    fn field(&self, name: &str) -> Option<&str>;
}

impl Record for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// How the exclusion list decides that a token is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExclusionPolicy {
    /// A token is dropped only when it matches every exclusion pattern.
    /// An empty exclusion list keeps nothing.
    #[default]
    MatchesEvery,
    /// A token is dropped when it matches any exclusion pattern.
    MatchesAny,
}

/// Parsed text rule before compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRule {
    /// Domain name, or `exclude` for the exclusion list
    pub target: String,
    /// Pattern source text
    pub pattern: String,
    /// Line number in the original text (for error reporting)
    pub line_num: usize,
}

impl TextRule {
    /// Whether this rule feeds the exclusion list
    pub fn is_exclusion(&self) -> bool {
        self.target == crate::config::EXCLUDE_TARGET
    }
}
