mod pattern;

pub use pattern::{Pattern, PatternList};

/// Patterns used to filter generic tokens out of the discovered categories
pub type ExclusionList = PatternList;

/// Trait for text matchers
pub trait TextMatcher: Send + Sync {
    /// Check if the text matches this matcher
    fn matches(&self, text: &str) -> bool;
}
