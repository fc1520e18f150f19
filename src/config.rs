use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::classify::DomainRuleTable;
use crate::defaults::{default_domains, default_exclusions};
use crate::error::{ClassifierError, Result};
use crate::matcher::{ExclusionList, PatternList};
use crate::types::TextRule;

/// Target name reserved for exclusion list entries
pub const EXCLUDE_TARGET: &str = "exclude";

/// Regex pattern for parsing rule lines
/// Format: target(pattern). The pattern runs to the last closing parenthesis.
static RULE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([\w.+\-]+)\s*\((.*)\)$").expect("RULE_PATTERN: hardcoded regex is invalid")
});

/// Parse rules from text.
///
/// ```text
/// # comment
/// exclude(source)
/// FUA([Cc]iam)
/// FUA(([aA]|[uU])up)
/// ```
pub fn parse_rules(text: &str) -> Result<Vec<TextRule>> {
    let mut rules = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line.trim();

        // Patterns may contain '#', so only whole-line comments are stripped
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        rules.push(parse_single_rule(line, line_num)?);
    }

    Ok(rules)
}

/// Parse rules from a file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<TextRule>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        ClassifierError::Parse(format!(
            "Failed to read rules file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_rules(&text)
}

fn parse_single_rule(line: &str, line_num: usize) -> Result<TextRule> {
    let captures = RULE_PATTERN
        .captures(line)
        .ok_or_else(|| ClassifierError::ParseAtLine {
            line: line_num,
            message: format!("Invalid rule format: {}", line),
        })?;

    let (Some(target), Some(pattern)) = (captures.get(1), captures.get(2)) else {
        return Err(ClassifierError::ParseAtLine {
            line: line_num,
            message: format!("Invalid rule format: {}", line),
        });
    };

    let pattern = pattern.as_str().trim();
    if pattern.is_empty() {
        return Err(ClassifierError::ParseAtLine {
            line: line_num,
            message: "Empty pattern".to_string(),
        });
    }

    Ok(TextRule {
        target: target.as_str().to_string(),
        pattern: pattern.to_string(),
        line_num,
    })
}

/// Compiled exclusion list and domain rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub exclusions: ExclusionList,
    pub domains: DomainRuleTable,
}

impl Default for RuleConfig {
    /// The built-in tables
    fn default() -> Self {
        Self {
            exclusions: default_exclusions().clone(),
            domains: default_domains().clone(),
        }
    }
}

impl RuleConfig {
    /// Compile parsed rules. Domains keep the order of their first rule.
    pub fn from_rules(rules: &[TextRule]) -> Result<Self> {
        let mut exclusions = ExclusionList::default();
        let mut domains = DomainRuleTable::new();

        for rule in rules {
            let patterns = compile_rule_pattern(rule)?;
            if rule.is_exclusion() {
                exclusions.extend(patterns);
            } else {
                domains.add_patterns(rule.target.as_str(), patterns);
            }
        }

        debug!(
            exclusions = exclusions.len(),
            domains = domains.len(),
            "Compiled rule config"
        );
        Ok(Self {
            exclusions,
            domains,
        })
    }

    /// Parse and compile rule text
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_rules(&parse_rules(text)?)
    }

    /// Parse and compile a rule file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_rules(&parse_rules_from_file(path)?)
    }
}

fn compile_rule_pattern(rule: &TextRule) -> Result<PatternList> {
    PatternList::new([rule.pattern.as_str()]).map_err(|e| ClassifierError::ParseAtLine {
        line: rule.line_num,
        message: e.to_string(),
    })
}
