//! CLI interface using clap
//!
//! Provides the command-line interface for edgelint

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};

/// edgelint - static analysis and type generation for edge-worker projects
#[derive(Parser, Debug)]
#[command(name = "edgelint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the project root (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub path: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan source files against a rule profile (always exits 0)
    Scan(ScanArgs),

    /// Gate on critical violations (exits non-zero if any are found)
    Check(CheckArgs),

    /// Parse and validate the SQL schema files
    Schema(SchemaArgs),

    /// Cross-reference manifest bindings against source usage
    Bindings(BindingsArgs),

    /// Generate the Env interface block from the manifest
    Generate(GenerateArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Rule profile to apply (all, runtime-compatibility,
    /// cache-consistency, secret-detection, schema-dialect)
    #[arg(short = 'r', long, default_value = "all")]
    pub profile: String,

    /// Drop violations below this severity (critical, warning, info)
    #[arg(long)]
    pub min_severity: Option<String>,

    /// Only report these categories (repeatable)
    #[arg(short, long)]
    pub category: Vec<String>,
}

/// Arguments for check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Rule profile to apply
    #[arg(short = 'r', long, default_value = "all")]
    pub profile: String,
}

/// Arguments for schema command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Directory holding DDL files (defaults to the configured
    /// schema directory)
    #[arg(short, long)]
    pub dir: Option<String>,
}

/// Arguments for bindings command
#[derive(Parser, Debug)]
pub struct BindingsArgs {
    /// Manifest file (defaults to the configured manifest path)
    #[arg(short, long)]
    pub manifest: Option<String>,
}

/// Arguments for generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Manifest file (defaults to the configured manifest path)
    #[arg(short, long)]
    pub manifest: Option<String>,

    /// Write the generated block to this file instead of stdout
    #[arg(long)]
    pub output: Option<String>,

    /// Compare against --output instead of writing; fails when stale
    #[arg(long, requires = "output")]
    pub check: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["edgelint", "scan", "--profile", "secret-detection"]);
        assert!(matches!(cli.command, Commands::Scan(_)));

        if let Commands::Scan(args) = cli.command {
            assert_eq!(args.profile, "secret-detection");
        }
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["edgelint", "check"]);
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.profile, "all");
        }
    }

    #[test]
    fn test_repeatable_category_filter() {
        let cli = Cli::parse_from([
            "edgelint",
            "scan",
            "-c",
            "secret-exposure",
            "-c",
            "platform-api-misuse",
        ]);
        if let Commands::Scan(args) = cli.command {
            assert_eq!(args.category.len(), 2);
        }
    }

    #[test]
    fn test_generate_check_requires_output() {
        let result = Cli::try_parse_from(["edgelint", "generate", "--check"]);
        assert!(result.is_err());
    }
}
