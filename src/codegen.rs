//! Type declaration generation
//!
//! Turns a binding registry into a TypeScript-style `interface Env`
//! block: one field per binding, grouped by category with a comment
//! header per group. Output is deterministic for a given registry
//! (category groups in first-appearance order, insertion order within
//! a group), so generated output can be diffed across runs.

use crate::bindings::{BindingCategory, BindingRegistry};

/// Generate the `interface Env` declaration block
pub fn generate_env_interface(registry: &BindingRegistry) -> String {
    let mut out = String::new();
    out.push_str("interface Env {\n");

    for category in categories_in_order(registry) {
        out.push_str(&format!("  // {}\n", category.group_label()));
        for record in registry.iter().filter(|r| r.category == category) {
            out.push_str(&format!("  {}: {};\n", record.name, category.ts_type()));
        }
    }

    out.push_str("}\n");
    out
}

/// Categories present in the registry, ordered by first appearance
fn categories_in_order(registry: &BindingRegistry) -> Vec<BindingCategory> {
    let mut seen = Vec::new();
    for record in registry.iter() {
        if !seen.contains(&record.category) {
            seen.push(record.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::{parse_manifest, BindingRecord};

    #[test]
    fn test_two_bindings_two_fields_in_declaration_order() {
        let mut registry = BindingRegistry::default();
        registry.push(BindingRecord::new("CACHE", BindingCategory::KvStore));
        registry.push(BindingRecord::new("DB", BindingCategory::Database));

        let block = generate_env_interface(&registry);
        let cache_pos = block.find("CACHE: KeyValueStore;").unwrap();
        let db_pos = block.find("DB: RelationalDatabase;").unwrap();
        assert!(cache_pos < db_pos);
        assert_eq!(block.matches(": ").count(), 2);
    }

    #[test]
    fn test_vars_are_string_typed() {
        let mut registry = BindingRegistry::default();
        registry.push(BindingRecord::new("API_BASE", BindingCategory::Var));
        let block = generate_env_interface(&registry);
        assert!(block.contains("  API_BASE: string;"));
        assert!(block.contains("// Variables"));
    }

    #[test]
    fn test_groups_carry_comment_headers() {
        let mut registry = BindingRegistry::default();
        registry.push(BindingRecord::new("CACHE", BindingCategory::KvStore));
        registry.push(BindingRecord::new("SESSIONS", BindingCategory::KvStore));
        registry.push(BindingRecord::new("DB", BindingCategory::Database));

        let block = generate_env_interface(&registry);
        assert_eq!(block.matches("// Key-value namespaces").count(), 1);
        assert_eq!(block.matches("// Relational databases").count(), 1);
        // both KV fields sit under one header
        let header = block.find("// Key-value namespaces").unwrap();
        let db_header = block.find("// Relational databases").unwrap();
        let sessions = block.find("SESSIONS:").unwrap();
        assert!(header < sessions && sessions < db_header);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let manifest = r#"
[[kv_namespaces]]
binding = "CACHE"
id = "a"

[vars]
MODE = "production"
"#;
        let registry = parse_manifest(manifest);
        let first = generate_env_interface(&registry);
        let second = generate_env_interface(&registry);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_registry_yields_empty_interface() {
        let block = generate_env_interface(&BindingRegistry::default());
        assert_eq!(block, "interface Env {\n}\n");
    }
}
