//! Declarative schema expectations
//!
//! Each rule binds column and index expectations to one table name.
//! Tables without a rule are not analyzed for gaps. Like the lexical
//! rule tables, this is immutable data constructed once at startup.

/// A required index: column set, the reason it matters, and whether its
/// absence is only advisory
#[derive(Debug, Clone)]
pub struct IndexRule {
    pub columns: &'static [&'static str],
    pub reason: &'static str,
    pub optional: bool,
}

/// Expectations for one table, looked up by lower-cased name
#[derive(Debug, Clone)]
pub struct SchemaRule {
    pub table: &'static str,
    pub required_columns: &'static [&'static str],
    pub recommended_columns: &'static [&'static str],
    pub required_indexes: &'static [IndexRule],
}

/// Expectation table for the conventional application schema
pub fn schema_rules() -> Vec<SchemaRule> {
    vec![
        SchemaRule {
            table: "users",
            required_columns: &["id", "created_at"],
            recommended_columns: &["updated_at"],
            required_indexes: &[IndexRule {
                columns: &["email"],
                reason: "login looks users up by email",
                optional: false,
            }],
        },
        SchemaRule {
            table: "sessions",
            required_columns: &["id", "user_id", "expires_at"],
            recommended_columns: &["created_at"],
            required_indexes: &[
                IndexRule {
                    columns: &["user_id", "expires_at"],
                    reason: "session cleanup scans by user and expiry",
                    optional: false,
                },
                IndexRule {
                    columns: &["expires_at"],
                    reason: "bulk expiry sweeps scan by expiry alone",
                    optional: true,
                },
            ],
        },
        SchemaRule {
            table: "events",
            required_columns: &["id", "created_at"],
            recommended_columns: &["actor", "kind"],
            required_indexes: &[IndexRule {
                columns: &["created_at"],
                reason: "event queries are time-ranged",
                optional: false,
            }],
        },
        SchemaRule {
            table: "api_keys",
            required_columns: &["id", "user_id", "key_hash", "created_at"],
            recommended_columns: &["revoked_at", "last_used_at"],
            required_indexes: &[IndexRule {
                columns: &["key_hash"],
                reason: "every authenticated request looks keys up by hash",
                optional: false,
            }],
        },
    ]
}

/// Find the rule for a table, if one exists
pub fn rule_for(table: &str) -> Option<SchemaRule> {
    schema_rules().into_iter().find(|r| r.table == table)
}
