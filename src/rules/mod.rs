//! Rule model and static rule profiles
//!
//! A rule is a named detection unit: a regex pattern plus metadata
//! (category, severity, message, suggested fix). Rules are immutable
//! data, declared once in static tables and grouped into profiles.

mod profiles;

pub use profiles::{
    all_source_rules, cache_consistency_rules, runtime_compatibility_rules,
    schema_dialect_rules, secret_detection_rules,
};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Severity level of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Info: advisory, no action required
    Info,
    /// Warning: should be fixed, does not block
    Warning,
    /// Critical: blocks the check gate
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

impl Severity {
    /// Parse a severity name as given on the command line
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "warning" | "warn" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

/// Category of a rule (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    /// Use of a host API that does not exist in the worker runtime
    PlatformApiMisuse,
    /// Pattern that assumes stronger consistency than the platform gives
    ConsistencyAntiPattern,
    /// Credential or secret material exposed in source
    SecretExposure,
    /// SQL that uses another dialect's syntax
    SchemaDialectError,
    /// Declared schema missing an expected column or index
    SchemaGap,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleCategory::PlatformApiMisuse => "platform-api-misuse",
            RuleCategory::ConsistencyAntiPattern => "consistency-anti-pattern",
            RuleCategory::SecretExposure => "secret-exposure",
            RuleCategory::SchemaDialectError => "schema-dialect-error",
            RuleCategory::SchemaGap => "schema-gap",
        };
        write!(f, "{}", name)
    }
}

impl RuleCategory {
    /// Parse a category name as given on the command line
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "platform-api-misuse" => Some(RuleCategory::PlatformApiMisuse),
            "consistency-anti-pattern" => Some(RuleCategory::ConsistencyAntiPattern),
            "secret-exposure" => Some(RuleCategory::SecretExposure),
            "schema-dialect-error" => Some(RuleCategory::SchemaDialectError),
            "schema-gap" => Some(RuleCategory::SchemaGap),
            _ => None,
        }
    }
}

/// A single detection rule
///
/// The regex crate has no lookaround, so rules that mean "X without Y on
/// the same line" carry a second pattern in `unless`: a line that matches
/// both produces no violation.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable identifier, reported as `code` in JSON output
    pub id: &'static str,
    /// Category of the rule
    pub category: RuleCategory,
    /// Severity assigned to every violation of this rule
    pub severity: Severity,
    /// Pattern whose match constitutes a violation
    pub pattern: Regex,
    /// Suppressing pattern: no violation on lines that also match this
    pub unless: Option<Regex>,
    /// Human description of what is wrong
    pub message: &'static str,
    /// Suggested remediation
    pub fix: &'static str,
}

impl Rule {
    /// Evaluate this rule against one line, returning the byte offset of
    /// the first match if the rule fires
    pub fn first_match(&self, line: &str) -> Option<usize> {
        let m = self.pattern.find(line)?;
        if let Some(ref unless) = self.unless {
            if unless.is_match(line) {
                return None;
            }
        }
        Some(m.start())
    }
}

/// A named, ordered collection of rules applied together for one scan
#[derive(Debug, Clone)]
pub struct RuleProfile {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl RuleProfile {
    /// Look up a profile by its command-line name
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "runtime-compatibility" => Some(runtime_compatibility_rules()),
            "cache-consistency" => Some(cache_consistency_rules()),
            "secret-detection" => Some(secret_detection_rules()),
            "schema-dialect" => Some(schema_dialect_rules()),
            "all" => Some(all_source_rules()),
            _ => None,
        }
    }

    /// Names accepted by [`RuleProfile::by_name`]
    pub fn names() -> &'static [&'static str] {
        &[
            "all",
            "runtime-compatibility",
            "cache-consistency",
            "secret-detection",
            "schema-dialect",
        ]
    }
}

/// A single reported instance of a rule matching a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Path of the file the violation was found in
    pub file: String,
    /// 1-based line number
    pub line: usize,
    /// Byte offset of the match within the line, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Offending text, trimmed and truncated
    pub snippet: String,
    /// Rule identifier
    pub code: String,
    /// Rule category
    #[serde(rename = "type")]
    pub category: RuleCategory,
    /// Severity of the violation
    pub severity: Severity,
    /// Human description
    pub message: String,
    /// Suggested remediation
    pub fix: String,
    /// Extra free text, e.g. a table name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Maximum length of a reported snippet
const SNIPPET_MAX: usize = 120;

impl Violation {
    /// Create a violation from a rule firing on one line
    pub fn from_rule(rule: &Rule, file: &str, line: usize, column: usize, text: &str) -> Self {
        Self {
            file: file.to_string(),
            line,
            column: Some(column),
            snippet: truncate_snippet(text),
            code: rule.id.to_string(),
            category: rule.category,
            severity: rule.severity,
            message: rule.message.to_string(),
            fix: rule.fix.to_string(),
            context: None,
        }
    }

    /// Attach extra context (e.g. a table name)
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }
}

/// Trim and truncate a source line for display
fn truncate_snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= SNIPPET_MAX {
        return trimmed.to_string();
    }
    let mut end = SNIPPET_MAX;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("critical"), Some(Severity::Critical));
        assert_eq!(Severity::parse("WARN"), Some(Severity::Warning));
        assert_eq!(Severity::parse("bogus"), None);
    }

    #[test]
    fn test_profile_lookup() {
        for name in RuleProfile::names() {
            let profile = RuleProfile::by_name(name).unwrap();
            assert!(!profile.rules.is_empty(), "profile {} is empty", name);
        }
        assert!(RuleProfile::by_name("nope").is_none());
    }

    #[test]
    fn test_every_rule_has_message_and_fix() {
        for name in RuleProfile::names() {
            for rule in RuleProfile::by_name(name).unwrap().rules {
                assert!(!rule.message.is_empty(), "rule {} has no message", rule.id);
                assert!(!rule.fix.is_empty(), "rule {} has no fix", rule.id);
            }
        }
    }

    #[test]
    fn test_unless_suppresses_match() {
        let rule = Rule {
            id: "test_drop",
            category: RuleCategory::SchemaDialectError,
            severity: Severity::Warning,
            pattern: Regex::new(r"(?i)\bdrop\s+table\b").unwrap(),
            unless: Some(Regex::new(r"(?i)if\s+exists").unwrap()),
            message: "drop",
            fix: "add IF EXISTS",
        };
        assert!(rule.first_match("DROP TABLE users;").is_some());
        assert!(rule.first_match("DROP TABLE IF EXISTS users;").is_none());
    }

    #[test]
    fn test_snippet_truncation() {
        let long = "x".repeat(200);
        let snippet = truncate_snippet(&long);
        assert!(snippet.len() <= SNIPPET_MAX + 3);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_violation_serializes_category_as_type() {
        let mut profile = runtime_compatibility_rules();
        let rule = profile.rules.remove(0);
        let v = Violation::from_rule(&rule, "a.ts", 1, 0, "bad line");
        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("type").is_some());
        assert!(json.get("category").is_none());
        assert_eq!(json["line"], 1);
    }
}
