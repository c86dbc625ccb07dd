//! Schema validation
//!
//! Checks a parsed schema model against the declarative expectation
//! table and emits the same [`Violation`] shape the lexical engine
//! produces, so one report formatter serves both analysis modes.

use super::rules::rule_for;
use super::{parse_sql, SchemaModel};
use crate::engine::PatternEngine;
use crate::rules::{schema_dialect_rules, RuleCategory, Severity, Violation};

/// Validate a schema model against the static expectation table
///
/// `file` names the source the model came from and is carried into the
/// violations for reporting.
pub fn validate_schema(model: &SchemaModel, file: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    for table in &model.tables {
        let Some(rule) = rule_for(&table.name) else {
            // no expectations declared for this table
            continue;
        };

        for column in rule.required_columns {
            if !table.has_column(column) {
                violations.push(gap(
                    file,
                    Severity::Critical,
                    "missing_required_column",
                    format!("Table '{}' is missing required column '{}'", table.name, column),
                    format!("ALTER TABLE {} ADD COLUMN {} TEXT;", table.name, column),
                    &table.name,
                ));
            }
        }

        for column in rule.recommended_columns {
            if !table.has_column(column) {
                violations.push(gap(
                    file,
                    Severity::Warning,
                    "missing_recommended_column",
                    format!(
                        "Table '{}' is missing recommended column '{}'",
                        table.name, column
                    ),
                    format!("ALTER TABLE {} ADD COLUMN {} TEXT;", table.name, column),
                    &table.name,
                ));
            }
        }

        let existing = model.indexes_on(&table.name);
        for index_rule in rule.required_indexes {
            let covered = existing.iter().any(|idx| idx.covers(index_rule.columns));
            if covered {
                continue;
            }
            let severity = if index_rule.optional {
                Severity::Info
            } else {
                Severity::Warning
            };
            let column_list = index_rule.columns.join(", ");
            violations.push(gap(
                file,
                severity,
                "missing_index",
                format!(
                    "Table '{}' has no index on ({}): {}",
                    table.name, column_list, index_rule.reason
                ),
                format!(
                    "CREATE INDEX idx_{}_{} ON {} ({});",
                    table.name,
                    index_rule.columns.join("_"),
                    table.name,
                    column_list
                ),
                &table.name,
            ));
        }
    }

    violations
}

/// Full analysis of one DDL file: dialect line rules through the shared
/// engine, then shape validation of the parsed model
pub fn analyze_sql(file: &str, text: &str) -> Vec<Violation> {
    let engine = PatternEngine::new(schema_dialect_rules());
    let mut violations = engine.scan_text(file, text);
    let model = parse_sql(text);
    violations.extend(validate_schema(&model, file));
    violations
}

fn gap(
    file: &str,
    severity: Severity,
    code: &str,
    message: String,
    fix: String,
    table: &str,
) -> Violation {
    Violation {
        file: file.to_string(),
        line: 1,
        column: None,
        snippet: String::new(),
        code: code.to_string(),
        category: RuleCategory::SchemaGap,
        severity,
        message,
        fix,
        context: Some(table.to_string()),
    }
}
