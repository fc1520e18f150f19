use regex::Regex;

use super::TextMatcher;
use crate::error::{ClassifierError, Result};

/// A single configured pattern, matched at the start of the input.
///
/// Plain words like `"AUP"` behave as prefixes; character classes and
/// alternation (`"([aA]|[uU])up"`) keep their regex meaning.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern. The compiled regex is anchored at the start only.
    pub fn new(source: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", source)).map_err(|e| {
            ClassifierError::Pattern {
                pattern: source.to_string(),
                source: e,
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern text as configured
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl TextMatcher for Pattern {
    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

/// Ordered, immutable list of patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    /// Compile every pattern up front; the first invalid one is reported.
    pub fn new<I, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = sources
            .into_iter()
            .map(|s| Pattern::new(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// True if at least one pattern matches `text`
    pub fn matches_any(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(text))
    }

    /// True if every pattern matches `text`. Vacuously true for an empty list.
    pub fn matches_all(&self, text: &str) -> bool {
        self.patterns.iter().all(|p| p.matches(text))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn sources(&self) -> Vec<&str> {
        self.patterns.iter().map(Pattern::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub(crate) fn extend(&mut self, other: PatternList) {
        self.patterns.extend(other.patterns);
    }
}

impl TextMatcher for PatternList {
    fn matches(&self, text: &str) -> bool {
        self.matches_any(text)
    }
}

impl<'a> IntoIterator for &'a PatternList {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
