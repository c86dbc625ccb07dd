//! edgelint - static analysis and type generation for edge-worker projects
//!
//! The full commands (scan, schema, bindings, generate) report findings
//! and exit 0; the gate commands (check, generate --check) exit 1 when
//! they fail, for use in CI workflows.

use anyhow::Result;
use clap::Parser;
use edgelint::cli::{bindings, check, generate, scan, schema, Cli, Commands};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Get project root
    let root = Path::new(&cli.path);

    // Execute command
    let passed = match cli.command {
        Commands::Scan(args) => {
            scan(root, &args, cli.format)?;
            true
        }

        Commands::Check(args) => check(root, &args, cli.format)?,

        Commands::Schema(args) => {
            schema(root, &args, cli.format)?;
            true
        }

        Commands::Bindings(args) => {
            bindings(root, &args, cli.format)?;
            true
        }

        Commands::Generate(args) => generate(root, &args)?,
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}
