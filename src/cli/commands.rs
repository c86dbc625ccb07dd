//! Command implementations

use crate::bindings::parse_manifest;
use crate::codegen::generate_env_interface;
use crate::config::ProjectConfig;
use crate::engine::PatternEngine;
use crate::report::ScanReport;
use crate::rules::{RuleCategory, RuleProfile, Severity, Violation};
use crate::schema::analyze_sql;
use crate::walker::SourceWalker;
use crate::xref::{cross_reference, XrefReport};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::{BindingsArgs, CheckArgs, GenerateArgs, OutputFormat, ScanArgs, SchemaArgs};

/// Run a lexical scan and print the full report; never fails on findings
pub fn scan(root: &Path, args: &ScanArgs, format: OutputFormat) -> Result<()> {
    let report = run_scan(root, &args.profile)?;

    let min_severity = match args.min_severity.as_deref() {
        Some(s) => Some(
            Severity::parse(s).with_context(|| format!("unknown severity: {}", s))?,
        ),
        None => None,
    };
    let categories = parse_categories(&args.category)?;
    let report = report.filtered(min_severity, &categories);

    print_report(&report, format)?;
    Ok(())
}

/// Run the gate: print only critical findings and a pass/fail line.
/// Returns whether the gate passed.
pub fn check(root: &Path, args: &CheckArgs, format: OutputFormat) -> Result<bool> {
    let report = run_scan(root, &args.profile)?;
    let (passed, summary) = report.gate();

    if !passed {
        let critical = report.critical_only();
        print_report(&critical, format)?;
    }
    match format {
        OutputFormat::Text => println!("{}", summary),
        OutputFormat::Json => {}
    }
    Ok(passed)
}

/// Parse and validate every DDL file under the schema directory
pub fn schema(root: &Path, args: &SchemaArgs, format: OutputFormat) -> Result<()> {
    let config = ProjectConfig::load_or_default(root)?;
    let dir_name = args.dir.as_deref().unwrap_or(&config.schema_dir);
    let dir = root.join(dir_name);
    if !dir.exists() {
        anyhow::bail!("schema directory does not exist: {:?}", dir);
    }

    let walker = SourceWalker::new(&dir, &["sql"]).with_skip_dirs(&config.skip_dirs);
    let mut files_scanned = 0usize;
    let mut violations: Vec<Violation> = Vec::new();
    for path in walker.walk() {
        let Ok(text) = std::fs::read_to_string(&path) else {
            continue;
        };
        files_scanned += 1;
        violations.extend(analyze_sql(&path.display().to_string(), &text));
    }
    info!("validated {} schema file(s)", files_scanned);

    let report = ScanReport::new(&dir.display().to_string(), files_scanned, violations);
    print_report(&report, format)?;
    Ok(())
}

/// Cross-reference manifest bindings against env accesses in source
pub fn bindings(root: &Path, args: &BindingsArgs, format: OutputFormat) -> Result<()> {
    let config = ProjectConfig::load_or_default(root)?;
    let registry = load_registry(root, args.manifest.as_deref(), &config)?;

    let walker = SourceWalker::new(root, &config.extensions()).with_skip_dirs(&config.skip_dirs);
    let report = cross_reference(&registry, &walker);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_xref_text(&report, registry.len()),
    }
    Ok(())
}

/// Emit the generated Env interface block; in `--check` mode, compare
/// against the output file instead and return whether it is current
pub fn generate(root: &Path, args: &GenerateArgs) -> Result<bool> {
    let config = ProjectConfig::load_or_default(root)?;
    let registry = load_registry(root, args.manifest.as_deref(), &config)?;
    let block = generate_env_interface(&registry);

    match (&args.output, args.check) {
        (Some(output), true) => {
            let path = root.join(output);
            let existing = std::fs::read_to_string(&path).unwrap_or_default();
            if existing == block {
                println!("PASS: {} is up to date", output);
                Ok(true)
            } else {
                println!("FAIL: {} is stale; regenerate it", output);
                Ok(false)
            }
        }
        (Some(output), false) => {
            let path = root.join(output);
            std::fs::write(&path, &block)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Wrote {} binding field(s) to {}", registry.len(), output);
            Ok(true)
        }
        (None, _) => {
            print!("{}", block);
            Ok(true)
        }
    }
}

fn run_scan(root: &Path, profile_name: &str) -> Result<ScanReport> {
    let config = ProjectConfig::load_or_default(root)?;
    let profile = RuleProfile::by_name(profile_name).with_context(|| {
        format!(
            "unknown profile '{}'; expected one of: {}",
            profile_name,
            RuleProfile::names().join(", ")
        )
    })?;
    info!("scanning {:?} with profile {}", root, profile.name);

    let walker = SourceWalker::new(root, &config.extensions()).with_skip_dirs(&config.skip_dirs);
    let engine = PatternEngine::new(profile);
    let outcome = engine.scan_path(root, &walker)?;
    Ok(ScanReport::new(
        &root.display().to_string(),
        outcome.files_scanned,
        outcome.violations,
    ))
}

fn load_registry(
    root: &Path,
    manifest_arg: Option<&str>,
    config: &ProjectConfig,
) -> Result<crate::bindings::BindingRegistry> {
    let manifest = root.join(manifest_arg.unwrap_or(&config.manifest_path));
    let text = std::fs::read_to_string(&manifest)
        .with_context(|| format!("Failed to read manifest: {:?}", manifest))?;
    Ok(parse_manifest(&text))
}

fn parse_categories(raw: &[String]) -> Result<Vec<RuleCategory>> {
    raw.iter()
        .map(|s| RuleCategory::parse(s).with_context(|| format!("unknown category: {}", s)))
        .collect()
}

fn print_report(report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print!("{}", report.to_text()),
    }
    Ok(())
}

fn print_xref_text(report: &XrefReport, declared: usize) {
    println!("Binding cross-reference ({} declared)", declared);

    if report.is_clean() {
        println!("\nAll bindings line up with source usage.");
        return;
    }
    if !report.declared_unused.is_empty() {
        println!("\nDeclared but never used:");
        for name in &report.declared_unused {
            println!("  - {}", name);
        }
    }
    if !report.used_undeclared.is_empty() {
        println!("\nUsed but not declared:");
        for name in &report.used_undeclared {
            println!("  - {}", name);
        }
    }
    if !report.duplicate_declarations.is_empty() {
        println!("\nDeclared more than once:");
        for name in &report.duplicate_declarations {
            println!("  - {}", name);
        }
    }
}
