//! Binding cross-reference
//!
//! Compares the names declared in a manifest's binding registry against
//! the `env.IDENTIFIER` access expressions found in source code, and
//! reports the two disjoint gaps: declared-but-never-used and
//! used-but-not-declared. Matching is name-only; it does not check that
//! a use site treats the binding as its declared category.

use crate::bindings::BindingRegistry;
use crate::walker::SourceWalker;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Result of cross-referencing one registry against one source tree
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XrefReport {
    /// Declared in the manifest, never accessed in source
    pub declared_unused: Vec<String>,
    /// Accessed in source, missing from the manifest
    pub used_undeclared: Vec<String>,
    /// Declared more than once in the manifest
    pub duplicate_declarations: Vec<String>,
}

impl XrefReport {
    pub fn is_clean(&self) -> bool {
        self.declared_unused.is_empty()
            && self.used_undeclared.is_empty()
            && self.duplicate_declarations.is_empty()
    }
}

/// Collect every `env.IDENTIFIER` access across the walked files
pub fn collect_used_names(walker: &SourceWalker) -> Vec<String> {
    // generalizes "namespace-dot-identifier": the env parameter is the
    // only namespace worker code reaches bindings through
    let access = Regex::new(r"\benv\.([A-Za-z_][A-Za-z0-9_]*)").expect("access pattern compiles");

    let mut used: Vec<String> = Vec::new();
    for path in walker.walk() {
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                debug!("skipping unreadable file {:?}: {}", path, e);
                continue;
            }
        };
        for captures in access.captures_iter(&text) {
            let name = captures[1].to_string();
            if !used.contains(&name) {
                used.push(name);
            }
        }
    }
    used
}

/// Cross-reference a registry against the walked source tree
pub fn cross_reference(registry: &BindingRegistry, walker: &SourceWalker) -> XrefReport {
    let used = collect_used_names(walker);
    cross_reference_names(registry, &used)
}

/// Pure core: compare declared names against a collected use set
pub fn cross_reference_names(registry: &BindingRegistry, used: &[String]) -> XrefReport {
    let declared = registry.names();

    let declared_unused = declared
        .iter()
        .filter(|name| !used.iter().any(|u| u == *name))
        .map(|name| name.to_string())
        .collect();

    let used_undeclared = used
        .iter()
        .filter(|name| !declared.contains(&name.as_str()))
        .cloned()
        .collect();

    XrefReport {
        declared_unused,
        used_undeclared,
        duplicate_declarations: registry
            .duplicates()
            .into_iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::{BindingCategory, BindingRecord};
    use std::fs;

    fn registry(names: &[&str]) -> BindingRegistry {
        let mut registry = BindingRegistry::default();
        for name in names {
            registry.push(BindingRecord::new(name, BindingCategory::KvStore));
        }
        registry
    }

    #[test]
    fn test_sets_are_disjoint() {
        let registry = registry(&["CACHE", "DB"]);
        let used = vec!["DB".to_string(), "QUEUE".to_string()];
        let report = cross_reference_names(&registry, &used);
        assert_eq!(report.declared_unused, vec!["CACHE"]);
        assert_eq!(report.used_undeclared, vec!["QUEUE"]);
        for name in &report.declared_unused {
            assert!(!report.used_undeclared.contains(name));
        }
    }

    #[test]
    fn test_clean_when_names_line_up() {
        let registry = registry(&["CACHE"]);
        let used = vec!["CACHE".to_string()];
        assert!(cross_reference_names(&registry, &used).is_clean());
    }

    #[test]
    fn test_collect_used_names_from_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(
            dir.path().join("src/index.ts"),
            "const v = await env.CACHE.get(k);\nawait env.DB.prepare(q).run();\nenv.CACHE.delete(k);\n",
        )
        .unwrap();

        let walker = SourceWalker::new(dir.path(), &["ts"]);
        let used = collect_used_names(&walker);
        assert_eq!(used, vec!["CACHE", "DB"]);
    }

    #[test]
    fn test_duplicates_surface_in_report() {
        let registry = registry(&["CACHE", "CACHE"]);
        let report = cross_reference_names(&registry, &["CACHE".to_string()]);
        assert_eq!(report.duplicate_declarations, vec!["CACHE"]);
        assert!(!report.is_clean());
    }
}
