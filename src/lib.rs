//! Taxonomy Classifier - category discovery and rule-based topic classification
//!
//! This library provides two small text-classification stages:
//! - Category discovery: split a slash-delimited taxonomy path column of a
//!   CSV dataset into tokens and keep the ones the exclusion list lets through
//! - Topic classification: map topic strings to domain labels using ordered
//!   per-domain pattern lists
//!
//! # Example
//!
//! ```rust
//! use taxonomy_classifier::{CategoryExtractor, CsvRowSource, RuleConfig};
//!
//! let data = "Id,Path\n0,header/copy\n1,aviation/airspace/rsa\n";
//! let config = RuleConfig::default();
//!
//! // Discover categories
//! let rows = CsvRowSource::from_reader(data.as_bytes()).unwrap();
//! let categories = CategoryExtractor::new(config.exclusions.clone())
//!     .extract(rows)
//!     .unwrap();
//! assert!(categories.contains("aviation"));
//!
//! // Classify topics
//! let domains = config.domains.classify(&["RSA restriction", "ciam zone"]);
//! assert_eq!(domains, vec!["FUA", "FUA"]);
//! ```
//!
//! # Pattern Semantics
//!
//! Every pattern is a regular expression matched at the start of the token
//! or topic, case-sensitively. `AUP` therefore matches `"AUP notice"` but not
//! `"the AUP"`, and `([aA]|[uU])up` matches `"aup"` and `"Uup"`.
//!
//! # Rule Syntax
//!
//! Rule files hold one `target(pattern)` per line. `exclude` feeds the
//! exclusion list; any other target names a domain. Comments take a whole
//! line, since patterns may contain `#`:
//!
//! ```rust
//! use taxonomy_classifier::RuleConfig;
//!
//! let text = "
//! ## exclusion list entry
//! exclude(source)
//! ## domain pattern
//! FUA([Cc]iam)
//! ";
//!
//! let config = RuleConfig::parse(text).unwrap();
//! assert_eq!(config.exclusions.sources(), vec!["source"]);
//! assert_eq!(config.domains.domains(), vec!["FUA"]);
//! ```

pub mod classify;
pub mod config;
pub mod defaults;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod source;
pub mod types;

// Re-export commonly used items
pub use classify::{classify, DomainRuleTable};
pub use config::{parse_rules, parse_rules_from_file, RuleConfig, EXCLUDE_TARGET};
pub use defaults::{default_domains, default_exclusions};
pub use error::{ClassifierError, Result};
pub use extract::{extract_categories, CategoryExtractor, DEFAULT_DELIMITER, DEFAULT_FIELD};
pub use matcher::{ExclusionList, Pattern, PatternList, TextMatcher};
pub use source::{CsvRecord, CsvRowSource};
pub use types::{CategorySet, ExclusionPolicy, Record, TextRule};
