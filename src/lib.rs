//! edgelint - static analysis and type generation for edge-worker projects
//!
//! This library walks a project tree, applies declarative rule profiles
//! to source code, parses the worker manifest and SQL schema dialects,
//! validates the parsed models, and renders unified reports plus
//! generated type declarations for the binding environment.

pub mod bindings;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod engine;
pub mod report;
pub mod rules;
pub mod schema;
pub mod walker;
pub mod xref;

/// Re-export commonly used types
pub use bindings::{BindingCategory, BindingRecord, BindingRegistry};
pub use engine::{PatternEngine, ScanError, ScanOutcome};
pub use report::ScanReport;
pub use rules::{Rule, RuleCategory, RuleProfile, Severity, Violation};
pub use schema::{ParsedIndex, ParsedTable, SchemaModel};
pub use walker::SourceWalker;

/// Application-wide error type
pub use anyhow::Result;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "edgelint";
