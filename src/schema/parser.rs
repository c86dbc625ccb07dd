//! DDL dialect parser
//!
//! Hand-written parser for the schema subset the platform tooling emits:
//! `CREATE TABLE [IF NOT EXISTS] name (...)` and
//! `CREATE [UNIQUE] INDEX [IF NOT EXISTS] name ON table (...)`.
//! Comments are stripped, statements split on semicolons, and each
//! statement tried against both forms independently; anything else
//! (INSERT, ALTER, ...) is ignored. Identifiers are lower-cased because
//! the target dialect is case-insensitive.

use super::{ParsedIndex, ParsedTable, SchemaModel};
use regex::Regex;

/// Parse DDL text into a schema model; never errors
pub fn parse_sql(sql: &str) -> SchemaModel {
    let table_re = Regex::new(
        r#"(?is)^\s*create\s+table\s+(?:if\s+not\s+exists\s+)?["'`\[]?([A-Za-z_][\w]*)["'`\]]?\s*\("#,
    )
    .expect("table pattern compiles");
    let index_re = Regex::new(
        r#"(?is)^\s*create\s+(unique\s+)?index\s+(?:if\s+not\s+exists\s+)?["'`\[]?([A-Za-z_][\w]*)["'`\]]?\s+on\s+["'`\[]?([A-Za-z_][\w]*)["'`\]]?\s*\(([^)]*)\)"#,
    )
    .expect("index pattern compiles");

    let stripped = strip_comments(sql);
    let mut model = SchemaModel::default();

    for statement in stripped.split(';') {
        if statement.trim().is_empty() {
            continue;
        }
        if let Some(caps) = table_re.captures(statement) {
            let name = caps[1].to_lowercase();
            let body = body_of(statement).unwrap_or_default();
            model.tables.push(ParsedTable {
                name,
                columns: parse_columns(&body),
                raw: statement.trim().to_string(),
            });
            continue;
        }
        if let Some(caps) = index_re.captures(statement) {
            model.indexes.push(ParsedIndex {
                name: caps[2].to_lowercase(),
                table: caps[3].to_lowercase(),
                columns: caps[4]
                    .split(',')
                    .map(unquote_identifier)
                    .filter(|c| !c.is_empty())
                    .collect(),
                unique: caps.get(1).is_some(),
            });
        }
        // neither form: not a schema statement, skip
    }
    model
}

/// Remove `--` line comments and `/* */` block comments
fn strip_comments(sql: &str) -> String {
    let block = Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern compiles");
    let without_blocks = block.replace_all(sql, " ");
    without_blocks
        .lines()
        .map(|line| line.split("--").next().unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text between the outermost parentheses of a statement
fn body_of(statement: &str) -> Option<String> {
    let start = statement.find('(')?;
    let end = statement.rfind(')')?;
    (start < end).then(|| statement[start + 1..end].to_string())
}

/// Leading tokens that mark a table-level constraint rather than a column
const CONSTRAINT_TOKENS: &[&str] = &["primary", "foreign", "unique", "check", "constraint"];

/// Split a CREATE TABLE body on top-level commas and keep column lines
fn parse_columns(body: &str) -> Vec<(String, String)> {
    let mut columns = Vec::new();
    for part in split_top_level(body) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let mut tokens = part.split_whitespace();
        let Some(first) = tokens.next() else { continue };
        if CONSTRAINT_TOKENS.contains(&first.to_lowercase().as_str()) {
            continue;
        }
        let name = unquote_identifier(first);
        let declared_type = tokens.next().map(|t| t.to_uppercase()).unwrap_or_default();
        columns.push((name, declared_type));
    }
    columns
}

/// Split on commas not nested inside parentheses (CHECK(...), DECIMAL(10,2))
fn split_top_level(body: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in body.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
}

/// Lower-case an identifier and drop any quoting characters
fn unquote_identifier(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`' | '[' | ']'))
        .to_lowercase()
}
