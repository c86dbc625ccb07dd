//! Binding model
//!
//! A binding is a declared reference, in the worker manifest, to an
//! external resource that code accesses by name on the env object.

mod parser;

pub use parser::parse_manifest;

use serde::{Deserialize, Serialize};

/// Resource category of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingCategory {
    /// Eventually-consistent key-value namespace
    KvStore,
    /// Object (blob) bucket
    ObjectStore,
    /// Relational (SQL) database
    Database,
    /// Coordination primitive with strongly-consistent storage
    DurableObject,
    /// Reference to another deployed service
    Service,
    /// Message queue producer
    Queue,
    /// Vector similarity index
    VectorIndex,
    /// Model inference binding
    Inference,
    /// Plain scalar variable
    Var,
}

impl BindingCategory {
    /// Target-language type emitted for this category
    pub fn ts_type(&self) -> &'static str {
        match self {
            BindingCategory::KvStore => "KeyValueStore",
            BindingCategory::ObjectStore => "ObjectStore",
            BindingCategory::Database => "RelationalDatabase",
            BindingCategory::DurableObject => "CoordinationNamespace",
            BindingCategory::Service => "ServiceHandle",
            BindingCategory::Queue => "Queue",
            BindingCategory::VectorIndex => "VectorIndex",
            BindingCategory::Inference => "InferenceClient",
            BindingCategory::Var => "string",
        }
    }

    /// Comment header used when grouping generated fields
    pub fn group_label(&self) -> &'static str {
        match self {
            BindingCategory::KvStore => "Key-value namespaces",
            BindingCategory::ObjectStore => "Object store buckets",
            BindingCategory::Database => "Relational databases",
            BindingCategory::DurableObject => "Durable objects",
            BindingCategory::Service => "Service bindings",
            BindingCategory::Queue => "Queues",
            BindingCategory::VectorIndex => "Vector indexes",
            BindingCategory::Inference => "Inference bindings",
            BindingCategory::Var => "Variables",
        }
    }
}

impl std::fmt::Display for BindingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.group_label())
    }
}

/// One declared external resource reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingRecord {
    /// Identifier code uses on the env object
    pub name: String,
    pub category: BindingCategory,
    /// Category-specific attribute: namespace id, bucket name, database
    /// name, class name, service name, queue name or index name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl BindingRecord {
    pub fn new(name: &str, category: BindingCategory) -> Self {
        Self {
            name: name.to_string(),
            category,
            resource: None,
        }
    }

    pub fn with_resource(mut self, resource: &str) -> Self {
        self.resource = Some(resource.to_string());
        self
    }
}

/// Insertion-ordered set of bindings parsed from one manifest
///
/// Uniqueness on `name` is expected but not enforced; duplicates are
/// surfaced by [`BindingRegistry::duplicates`] rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingRegistry {
    pub records: Vec<BindingRecord>,
}

impl BindingRegistry {
    pub fn push(&mut self, record: BindingRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindingRecord> {
        self.records.iter()
    }

    /// Names declared by any record
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Names declared more than once, in first-occurrence order
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut dups: Vec<&str> = Vec::new();
        for record in &self.records {
            let name = record.name.as_str();
            if seen.contains(&name) {
                if !dups.contains(&name) {
                    dups.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        dups
    }
}
