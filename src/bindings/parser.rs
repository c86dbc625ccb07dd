//! Manifest dialect parser
//!
//! Parses the subset of the worker manifest format that declares
//! bindings: `[section]` and `[[section]]` headers plus `key = value`
//! pairs with quoted-string, boolean and bare-word values. The manifest
//! is emitted by trusted tooling, so unknown or malformed lines are
//! ignored rather than rejected.

use super::{BindingCategory, BindingRecord, BindingRegistry};
use std::collections::HashMap;

/// A parsed right-hand-side value
#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Str(String),
    Bool(bool),
}

impl Value {
    fn as_str(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
        }
    }
}

/// Parse manifest text into a binding registry
///
/// Line-oriented and stateful: a current-section pointer plus an
/// accumulating item map. Entering any new header flushes the
/// in-progress `[[...]]` item into the registry.
pub fn parse_manifest(text: &str) -> BindingRegistry {
    let mut registry = BindingRegistry::default();
    let mut section = String::new();
    let mut in_array_item = false;
    let mut item: HashMap<String, Value> = HashMap::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = array_header(line) {
            flush_item(&section, in_array_item, &mut item, &mut registry);
            section = normalize_section(name);
            in_array_item = true;
            continue;
        }
        if let Some(name) = table_header(line) {
            flush_item(&section, in_array_item, &mut item, &mut registry);
            section = normalize_section(name);
            in_array_item = false;
            continue;
        }

        let Some((key, value)) = key_value(line) else {
            // not a header and not a key/value pair: ignored by design
            continue;
        };

        if in_array_item {
            item.insert(key, value);
        } else if section == "vars" {
            registry.push(BindingRecord::new(&key, BindingCategory::Var));
        } else if section == "ai" && (key == "binding" || key == "name") {
            registry.push(BindingRecord::new(&value.as_str(), BindingCategory::Inference));
        }
    }
    flush_item(&section, in_array_item, &mut item, &mut registry);

    registry
}

/// `[[section]]` header, returning the inner name
fn array_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("[[")?.strip_suffix("]]")?.trim();
    (!inner.is_empty()).then_some(inner)
}

/// `[section]` header, returning the inner name
fn table_header(line: &str) -> Option<&str> {
    if line.starts_with("[[") {
        return None;
    }
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    (!inner.is_empty()).then_some(inner)
}

/// Flatten dotted section names so `durable_objects.bindings` and
/// `queues.producers` key the same registry buckets everywhere
fn normalize_section(name: &str) -> String {
    name.replace('.', "_")
}

/// Parse one `key = value` line; malformed lines yield None
fn key_value(line: &str) -> Option<(String, Value)> {
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(' ') {
        return None;
    }
    Some((key.to_string(), parse_value(rest.trim())))
}

/// Strip quotes, recognize the literal tokens `true`/`false`, and fall
/// back to the bare word with any trailing comment removed
fn parse_value(raw: &str) -> Value {
    for quote in ['"', '\''] {
        if let Some(stripped) = raw.strip_prefix(quote) {
            if let Some(end) = stripped.find(quote) {
                return Value::Str(stripped[..end].to_string());
            }
            return Value::Str(stripped.to_string());
        }
    }
    let bare = raw.split('#').next().unwrap_or(raw).trim();
    match bare {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::Str(other.to_string()),
    }
}

/// Move a completed `[[...]]` item into the registry bucket its section
/// names; items with no recognizable name are dropped silently
fn flush_item(
    section: &str,
    in_array_item: bool,
    item: &mut HashMap<String, Value>,
    registry: &mut BindingRegistry,
) {
    if !in_array_item || item.is_empty() {
        item.clear();
        return;
    }

    let name = item
        .get("binding")
        .or_else(|| item.get("name"))
        .map(Value::as_str);
    let Some(name) = name else {
        item.clear();
        return;
    };

    let attr = |key: &str| item.get(key).map(Value::as_str);

    let record = match section {
        "kv_namespaces" => Some(build_record(&name, BindingCategory::KvStore, attr("id"))),
        "r2_buckets" => Some(build_record(
            &name,
            BindingCategory::ObjectStore,
            attr("bucket_name"),
        )),
        "d1_databases" => Some(build_record(
            &name,
            BindingCategory::Database,
            attr("database_name").or_else(|| attr("database_id")),
        )),
        "durable_objects_bindings" => Some(build_record(
            &name,
            BindingCategory::DurableObject,
            attr("class_name"),
        )),
        "services" => Some(build_record(&name, BindingCategory::Service, attr("service"))),
        "queues_producers" => Some(build_record(&name, BindingCategory::Queue, attr("queue"))),
        "vectorize" => Some(build_record(
            &name,
            BindingCategory::VectorIndex,
            attr("index_name"),
        )),
        "ai" => Some(build_record(&name, BindingCategory::Inference, None)),
        _ => None,
    };

    if let Some(record) = record {
        registry.push(record);
    }
    item.clear();
}

fn build_record(name: &str, category: BindingCategory, resource: Option<String>) -> BindingRecord {
    let mut record = BindingRecord::new(name, category);
    if let Some(resource) = resource {
        record = record.with_resource(&resource);
    }
    record
}
