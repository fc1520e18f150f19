use tracing::debug;

use crate::error::Result;
use crate::matcher::PatternList;

/// Ordered mapping from domain name to its pattern list.
///
/// Domains are visited in insertion order, so classification output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRuleTable {
    domains: Vec<(String, PatternList)>,
}

impl DomainRuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a table from `(domain, patterns)` pairs.
    pub fn from_rules(rules: &[(&str, &[&str])]) -> Result<Self> {
        let mut table = Self::new();
        for (domain, patterns) in rules {
            table.add_patterns(*domain, PatternList::new(*patterns)?);
        }
        Ok(table)
    }

    /// Append a domain (builder form of [`add_patterns`](Self::add_patterns))
    pub fn with_domain(mut self, domain: impl Into<String>, patterns: PatternList) -> Self {
        self.add_patterns(domain, patterns);
        self
    }

    /// Add patterns to a domain. An existing domain keeps its position and
    /// gets the new patterns appended.
    pub fn add_patterns(&mut self, domain: impl Into<String>, patterns: PatternList) {
        let domain = domain.into();
        match self.domains.iter_mut().find(|(name, _)| *name == domain) {
            Some((_, existing)) => existing.extend(patterns),
            None => self.domains.push((domain, patterns)),
        }
    }

    /// Pattern list for a domain
    pub fn patterns(&self, domain: &str) -> Option<&PatternList> {
        self.domains
            .iter()
            .find(|(name, _)| name == domain)
            .map(|(_, patterns)| patterns)
    }

    /// Domain names in classification order
    pub fn domains(&self) -> Vec<&str> {
        self.domains.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatternList)> {
        self.domains.iter().map(|(name, patterns)| (name.as_str(), patterns))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Classify topics into domain names.
    ///
    /// Domains are visited in table order and topics in input order; a domain
    /// is appended once for every topic that matches one of its patterns, so
    /// the result may repeat a domain.
    pub fn classify<S: AsRef<str>>(&self, topics: &[S]) -> Vec<String> {
        let mut result = Vec::new();
        for (domain, patterns) in &self.domains {
            for topic in topics {
                if patterns.matches_any(topic.as_ref()) {
                    result.push(domain.clone());
                }
            }
        }
        debug!(
            topics = topics.len(),
            matches = result.len(),
            "Classified topics"
        );
        result
    }

    /// Like [`classify`](Self::classify), but each matching domain appears once.
    pub fn classify_distinct<S: AsRef<str>>(&self, topics: &[S]) -> Vec<String> {
        self.domains
            .iter()
            .filter(|(_, patterns)| topics.iter().any(|t| patterns.matches_any(t.as_ref())))
            .map(|(domain, _)| domain.clone())
            .collect()
    }
}

/// Classify `topics` against `table`.
pub fn classify<S: AsRef<str>>(topics: &[S], table: &DomainRuleTable) -> Vec<String> {
    table.classify(topics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_domains;
    use crate::error::ClassifierError;

    #[test]
    fn test_case_sensitive_prefix() {
        let table = DomainRuleTable::from_rules(&[("FUA", &["RSA"]), ("AS", &["rsa"])]).unwrap();
        assert_eq!(table.classify(&["RSA restriction"]), vec!["FUA"]);
    }

    #[test]
    fn test_duplicates_per_topic() {
        let table = DomainRuleTable::from_rules(&[("FUA", &["[Cc]iam", "([aA]|[uU])up"])]).unwrap();
        assert_eq!(table.classify(&["ciam zone", "uup zone"]), vec!["FUA", "FUA"]);
    }

    #[test]
    fn test_domain_major_order() {
        let table = DomainRuleTable::from_rules(&[("B", &["x"]), ("A", &["x", "y"])]).unwrap();
        let result = table.classify(&["y1", "x1"]);
        assert_eq!(result, vec!["B", "A", "A"]);
    }

    #[test]
    fn test_one_entry_per_topic_not_per_pattern() {
        // All three patterns match "AUP"; the topic still counts once.
        let table = DomainRuleTable::from_rules(&[("FUA", &["A", "AU", "AUP"])]).unwrap();
        assert_eq!(table.classify(&["AUP"]), vec!["FUA"]);
    }

    #[test]
    fn test_empty_topics() {
        assert!(default_domains().classify::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table = DomainRuleTable::new();
        assert!(table.classify(&["dom", "RSA"]).is_empty());
    }

    #[test]
    fn test_default_table() {
        let result = default_domains().classify(&["tape drive", "Airspace", "AUP", "weather"]);
        assert_eq!(result, vec!["DOM+", "AS", "FUA"]);
    }

    #[test]
    fn test_match_is_not_substring() {
        let result = default_domains().classify(&["restricted airspace"]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_classify_distinct() {
        let table = DomainRuleTable::from_rules(&[("FUA", &["[Cc]iam", "([aA]|[uU])up"]), ("AS", &["rsa"])])
            .unwrap();
        assert_eq!(table.classify_distinct(&["ciam", "uup", "Ciam"]), vec!["FUA"]);
    }

    #[test]
    fn test_add_patterns_extends_existing_domain() {
        let mut table = DomainRuleTable::from_rules(&[("A", &["a"]), ("B", &["b"])]).unwrap();
        table.add_patterns("A", PatternList::new(["z"]).unwrap());
        assert_eq!(table.domains(), vec!["A", "B"]);
        assert_eq!(table.patterns("A").unwrap().sources(), vec!["a", "z"]);
        assert_eq!(table.classify(&["zeta"]), vec!["A"]);
    }

    #[test]
    fn test_invalid_pattern_fails_at_build() {
        let err = DomainRuleTable::from_rules(&[("X", &["(open"])]).unwrap_err();
        assert!(matches!(err, ClassifierError::Pattern { .. }));
    }

    #[test]
    fn test_free_function() {
        let table = DomainRuleTable::new().with_domain("DOM+", PatternList::new(["dom"]).unwrap());
        assert_eq!(classify(&["domain"], &table), vec!["DOM+"]);
    }

    #[test]
    fn test_result_length_counts_pairs() {
        let topics = ["dom", "tape", "rsa", "RSA", "ciam", "nothing"];
        let table = default_domains();
        let expected = table
            .iter()
            .map(|(_, patterns)| topics.iter().filter(|t| patterns.matches_any(t)).count())
            .sum::<usize>();
        assert_eq!(table.classify(&topics).len(), expected);
        assert_eq!(expected, 5);
    }
}
