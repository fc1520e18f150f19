//! Built-in exclusion list and domain rule table.

use once_cell::sync::Lazy;

use crate::classify::DomainRuleTable;
use crate::matcher::ExclusionList;

/// Generic path segments that carry no category information
pub const DEFAULT_EXCLUDED: &[&str] = &[
    "source", "sources", "test", "review", "business", "dbt", "spec", "cfmu", "model",
];

/// Domains and their topic patterns, in classification order
pub const DEFAULT_DOMAINS: &[(&str, &[&str])] = &[
    ("DOM+", &["dom", "tape"]),
    ("AS", &["[Aa]irspace?", "rsa"]),
    ("FUA", &["[Cc]iam", "([aA]|[uU])up", "AUP", "UUP", "RSA"]),
];

static EXCLUSIONS: Lazy<ExclusionList> = Lazy::new(|| {
    ExclusionList::new(DEFAULT_EXCLUDED).expect("DEFAULT_EXCLUDED: hardcoded pattern is invalid")
});

static DOMAINS: Lazy<DomainRuleTable> = Lazy::new(|| {
    DomainRuleTable::from_rules(DEFAULT_DOMAINS)
        .expect("DEFAULT_DOMAINS: hardcoded pattern is invalid")
});

/// The built-in exclusion list
pub fn default_exclusions() -> &'static ExclusionList {
    &EXCLUSIONS
}

/// The built-in domain rule table
pub fn default_domains() -> &'static DomainRuleTable {
    &DOMAINS
}
