use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::defaults::default_exclusions;
use crate::error::{ClassifierError, Result};
use crate::matcher::{ExclusionList, TextMatcher};
use crate::types::{CategorySet, ExclusionPolicy, Record};

/// Default column holding the taxonomy path
pub const DEFAULT_FIELD: &str = "Path";

/// Default path delimiter
pub const DEFAULT_DELIMITER: &str = "/";

/// Collects category tokens from the path field of a row sequence.
#[derive(Debug, Clone)]
pub struct CategoryExtractor {
    field: String,
    delimiter: String,
    skip_first_record: bool,
    exclusions: ExclusionList,
    policy: ExclusionPolicy,
}

impl Default for CategoryExtractor {
    fn default() -> Self {
        Self::new(default_exclusions().clone())
    }
}

impl CategoryExtractor {
    /// Create an extractor with the default field, delimiter and header skip
    pub fn new(exclusions: ExclusionList) -> Self {
        Self {
            field: DEFAULT_FIELD.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            skip_first_record: true,
            exclusions,
            policy: ExclusionPolicy::default(),
        }
    }

    /// Set the column to split
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Set the token separator
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Skip (or not) the first record the row source yields.
    ///
    /// On by default: a CSV reader has already consumed the header, so the
    /// first data record is dropped as well. Turn it off for sources that
    /// yield only data.
    pub fn with_skip_first_record(mut self, skip: bool) -> Self {
        self.skip_first_record = skip;
        self
    }

    pub fn with_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn exclusions(&self) -> &ExclusionList {
        &self.exclusions
    }

    /// Extract the category set from `rows`.
    ///
    /// Any error aborts extraction and the partial set is dropped; use
    /// [`extract_into`](Self::extract_into) to keep it.
    pub fn extract<I, R>(&self, rows: I) -> Result<CategorySet>
    where
        I: IntoIterator<Item = Result<R>>,
        R: Record,
    {
        let mut categories = CategorySet::new();
        self.extract_into(rows, &mut categories)?;
        Ok(categories)
    }

    /// Extract into a caller-owned set, returning the number of rows processed.
    ///
    /// Tokens from rows handled before an error stay in `categories`.
    pub fn extract_into<I, R>(&self, rows: I, categories: &mut CategorySet) -> Result<usize>
    where
        I: IntoIterator<Item = Result<R>>,
        R: Record,
    {
        if self.delimiter.is_empty() {
            return Err(ClassifierError::Parse("Empty path delimiter".to_string()));
        }

        let mut rows = rows.into_iter();
        let mut record = 0;

        if self.skip_first_record {
            match rows.next() {
                Some(first) => {
                    record += 1;
                    first?;
                    trace!("Skipped first record");
                }
                None => return Ok(0),
            }
        }

        let mut processed = 0;
        for row in rows {
            record += 1;
            let row = row?;
            let value = row
                .field(&self.field)
                .ok_or_else(|| ClassifierError::MissingField {
                    field: self.field.clone(),
                    record,
                })?;

            let tokens: BTreeSet<&str> = value.split(self.delimiter.as_str()).collect();
            self.collect_tokens(&tokens, categories);
            processed += 1;
        }

        debug!(
            rows = processed,
            categories = categories.len(),
            "Category extraction finished"
        );
        Ok(processed)
    }

    fn collect_tokens(&self, tokens: &BTreeSet<&str>, categories: &mut CategorySet) {
        match self.policy {
            ExclusionPolicy::MatchesEvery => {
                // Kept once any single pattern fails to match, so a token is
                // only dropped when it matches all of them.
                for pattern in &self.exclusions {
                    for token in tokens {
                        if !pattern.matches(token) {
                            categories.insert((*token).to_string());
                        }
                    }
                }
            }
            ExclusionPolicy::MatchesAny => {
                for token in tokens {
                    if !self.exclusions.matches_any(token) {
                        categories.insert((*token).to_string());
                    }
                }
            }
        }
    }
}

/// Extract categories with an explicit field, delimiter and exclusion list.
pub fn extract_categories<I, R>(
    rows: I,
    field: &str,
    delimiter: &str,
    exclusions: &ExclusionList,
) -> Result<CategorySet>
where
    I: IntoIterator<Item = Result<R>>,
    R: Record,
{
    CategoryExtractor::new(exclusions.clone())
        .with_field(field)
        .with_delimiter(delimiter)
        .extract(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(path: &str) -> Result<HashMap<String, String>> {
        let mut r = HashMap::new();
        r.insert("Path".to_string(), path.to_string());
        Ok(r)
    }

    fn set(items: &[&str]) -> CategorySet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn exclusions(patterns: &[&str]) -> ExclusionList {
        ExclusionList::new(patterns).unwrap()
    }

    #[test]
    fn test_aviation_path() {
        let extractor = CategoryExtractor::new(exclusions(&["source", "test"]));
        let rows = vec![row("header/row"), row("aviation/airspace/rsa")];
        let result = extractor.extract(rows).unwrap();
        assert_eq!(result, set(&["aviation", "airspace", "rsa"]));
    }

    #[test]
    fn test_first_record_is_skipped() {
        let extractor = CategoryExtractor::new(exclusions(&["x"]));
        let rows = vec![row("skipped/tokens"), row("kept")];
        let result = extractor.extract(rows).unwrap();
        assert_eq!(result, set(&["kept"]));
    }

    #[test]
    fn test_skip_disabled() {
        let extractor = CategoryExtractor::new(exclusions(&["x"])).with_skip_first_record(false);
        let rows = vec![row("first"), row("second")];
        let result = extractor.extract(rows).unwrap();
        assert_eq!(result, set(&["first", "second"]));
    }

    #[test]
    fn test_token_matching_one_pattern_is_still_kept() {
        // "test" matches only the "test" pattern, so "source" keeps it.
        let extractor = CategoryExtractor::new(exclusions(&["source", "test"]))
            .with_skip_first_record(false);
        let result = extractor.extract(vec![row("test/source/data")]).unwrap();
        assert_eq!(result, set(&["test", "source", "data"]));
    }

    #[test]
    fn test_token_matching_every_pattern_is_dropped() {
        // "sources" matches both "source" and "sources" as prefixes.
        let extractor = CategoryExtractor::new(exclusions(&["source", "sources"]))
            .with_skip_first_record(false);
        let result = extractor.extract(vec![row("sources/source/aviation")]).unwrap();
        assert_eq!(result, set(&["source", "aviation"]));
    }

    #[test]
    fn test_empty_exclusion_list_keeps_nothing() {
        let extractor =
            CategoryExtractor::new(ExclusionList::default()).with_skip_first_record(false);
        let result = extractor.extract(vec![row("aviation/airspace")]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_match_any_policy() {
        let extractor = CategoryExtractor::new(exclusions(&["source", "test"]))
            .with_skip_first_record(false)
            .with_policy(ExclusionPolicy::MatchesAny);
        let result = extractor
            .extract(vec![row("test/sources/aviation")])
            .unwrap();
        assert_eq!(result, set(&["aviation"]));
    }

    #[test]
    fn test_match_any_with_empty_list_keeps_everything() {
        let extractor = CategoryExtractor::new(ExclusionList::default())
            .with_skip_first_record(false)
            .with_policy(ExclusionPolicy::MatchesAny);
        let result = extractor.extract(vec![row("a/b")]).unwrap();
        assert_eq!(result, set(&["a", "b"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let extractor = CategoryExtractor::new(exclusions(&["x"])).with_skip_first_record(false);
        let result = extractor
            .extract(vec![row("a/a/b"), row("b/c")])
            .unwrap();
        assert_eq!(result, set(&["a", "b", "c"]));
    }

    #[test]
    fn test_custom_field_and_delimiter() {
        let mut r = HashMap::new();
        r.insert("Topic".to_string(), "fua;ciam".to_string());
        let extractor = CategoryExtractor::new(exclusions(&["x"]))
            .with_field("Topic")
            .with_delimiter(";")
            .with_skip_first_record(false);
        let result = extractor.extract(vec![Ok(r)]).unwrap();
        assert_eq!(result, set(&["fua", "ciam"]));
    }

    #[test]
    fn test_missing_field() {
        let mut r = HashMap::new();
        r.insert("Other".to_string(), "a/b".to_string());
        let extractor = CategoryExtractor::new(exclusions(&["x"]));
        let err = extractor.extract(vec![row("header"), Ok(r)]).unwrap_err();
        match err {
            ClassifierError::MissingField { field, record } => {
                assert_eq!(field, "Path");
                assert_eq!(record, 2);
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_row_propagates() {
        let extractor = CategoryExtractor::new(exclusions(&["x"])).with_skip_first_record(false);
        let rows: Vec<Result<HashMap<String, String>>> = vec![
            row("a"),
            Err(ClassifierError::MalformedRow {
                record: 2,
                message: "bad".into(),
            }),
            row("b"),
        ];
        let err = extractor.extract(rows).unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedRow { record: 2, .. }));
    }

    #[test]
    fn test_extract_into_keeps_partial_results() {
        let extractor = CategoryExtractor::new(exclusions(&["x"])).with_skip_first_record(false);
        let rows: Vec<Result<HashMap<String, String>>> = vec![
            row("a/b"),
            Err(ClassifierError::MalformedRow {
                record: 2,
                message: "bad".into(),
            }),
        ];
        let mut categories = CategorySet::new();
        assert!(extractor.extract_into(rows, &mut categories).is_err());
        assert_eq!(categories, set(&["a", "b"]));
    }

    #[test]
    fn test_empty_source() {
        let extractor = CategoryExtractor::default();
        let rows: Vec<Result<HashMap<String, String>>> = Vec::new();
        assert!(extractor.extract(rows).unwrap().is_empty());
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let extractor = CategoryExtractor::default().with_delimiter("");
        let result = extractor.extract(vec![row("a")]);
        assert!(matches!(result, Err(ClassifierError::Parse(_))));
    }

    #[test]
    fn test_idempotent() {
        let extractor = CategoryExtractor::default();
        let paths = ["h", "aviation/airspace/rsa", "model/review", "dbt/source"];
        let first = extractor.extract(paths.iter().map(|p| row(p))).unwrap();
        let second = extractor.extract(paths.iter().map(|p| row(p))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_free_function() {
        let rows = vec![row("h"), row("aviation/airspace/rsa")];
        let result = extract_categories(rows, "Path", "/", &exclusions(&["source", "test"])).unwrap();
        assert_eq!(result.len(), 3);
    }
}
