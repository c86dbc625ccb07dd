//! Schema analysis
//!
//! Parses the target database's DDL dialect into table/index models and
//! validates those models against a declarative expectation table. Only
//! schema shape is extracted; data statements and migration semantics
//! are out of scope.

mod parser;
mod rules;
mod validator;

pub use parser::parse_sql;
pub use rules::{schema_rules, IndexRule, SchemaRule};
pub use validator::{analyze_sql, validate_schema};

use serde::{Deserialize, Serialize};

/// One parsed `CREATE TABLE` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Lower-cased table name
    pub name: String,
    /// Ordered `(name, declared type)` pairs; constraint-only lines are
    /// not columns
    pub columns: Vec<(String, String)>,
    /// Original statement text, kept for diagnostics
    pub raw: String,
}

impl ParsedTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(col, _)| col == name)
    }
}

/// One parsed `CREATE INDEX` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIndex {
    pub name: String,
    /// Lower-cased table the index is on
    pub table: String,
    /// Ordered column names
    pub columns: Vec<String>,
    pub unique: bool,
}

impl ParsedIndex {
    /// Order-independent column-set comparison
    pub fn covers(&self, columns: &[&str]) -> bool {
        if self.columns.len() != columns.len() {
            return false;
        }
        columns.iter().all(|c| self.columns.iter().any(|have| have == c))
    }
}

/// Tables and indexes parsed from one file or one aggregated directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaModel {
    pub tables: Vec<ParsedTable>,
    pub indexes: Vec<ParsedIndex>,
}

impl SchemaModel {
    /// Fold another file's model into this one for a directory scan
    pub fn merge(&mut self, other: SchemaModel) {
        self.tables.extend(other.tables);
        self.indexes.extend(other.indexes);
    }

    pub fn table(&self, name: &str) -> Option<&ParsedTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Indexes defined on the given table
    pub fn indexes_on(&self, table: &str) -> Vec<&ParsedIndex> {
        self.indexes.iter().filter(|i| i.table == table).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_covers_is_order_independent() {
        let index = ParsedIndex {
            name: "idx".to_string(),
            table: "sessions".to_string(),
            columns: vec!["user_id".to_string(), "expires_at".to_string()],
            unique: false,
        };
        assert!(index.covers(&["expires_at", "user_id"]));
        assert!(!index.covers(&["user_id"]));
        assert!(!index.covers(&["user_id", "expires_at", "token"]));
    }

    #[test]
    fn test_merge_aggregates_both_halves() {
        let mut model = parse_sql("CREATE TABLE a (id TEXT);");
        model.merge(parse_sql(
            "CREATE TABLE b (id TEXT); CREATE INDEX idx_b ON b (id);",
        ));
        assert_eq!(model.tables.len(), 2);
        assert_eq!(model.indexes.len(), 1);
        assert!(model.table("b").is_some());
        assert_eq!(model.indexes_on("b").len(), 1);
    }
}
