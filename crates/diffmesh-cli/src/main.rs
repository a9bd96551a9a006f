//! diffmesh: command-line front end for the growth mesh pipeline.
//!
//! Loads OBJ seed meshes, normalizes them into the canonical frame, reports
//! open boundaries and runs TOML-configured pipelines.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=diffmesh=info` - Operation logging, including bounding boxes
//! - `RUST_LOG=diffmesh=debug` - Counts and buffer fills
//! - `RUST_LOG=diffmesh::timing=debug` - Performance timing
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=diffmesh=info diffmesh normalize seed.obj -o seed-normalized.obj
//! diffmesh --format json boundary seed-normalized.obj
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{boundary, info, normalize, run};

/// diffmesh - prepare meshes for differential growth.
#[derive(Parser)]
#[command(name = "diffmesh")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh statistics and bounds
    Info {
        /// Input OBJ file
        input: PathBuf,
    },

    /// Fit a mesh into the canonical frame and write it as OBJ
    Normalize {
        /// Input OBJ file
        input: PathBuf,

        /// Output OBJ file
        #[arg(short, long)]
        output: PathBuf,

        /// Per-axis scale applied after the unit fit
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [1.0, 1.0, 1.0])]
        scale: Vec<f64>,

        /// Per-axis translation applied after scaling
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.5, 0.5, 0.5])]
        translate: Vec<f64>,

        /// Object name for the `o` line (defaults to the output file stem)
        #[arg(long)]
        name: Option<String>,

        /// Export buffer capacity, must exceed the vertex and triangle counts
        #[arg(long, default_value_t = diffmesh::DEFAULT_CAPACITY)]
        capacity: usize,
    },

    /// List vertices on the open boundary of a mesh
    Boundary {
        /// Input OBJ file
        input: PathBuf,
    },

    /// Run a pipeline described by a TOML file
    Run {
        /// Pipeline configuration file
        config: PathBuf,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "diffmesh=info",
            2 => "diffmesh=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Info { input } => info::run(input, &cli),
        Commands::Normalize {
            input,
            output,
            scale,
            translate,
            name,
            capacity,
        } => normalize::run(
            input,
            output,
            scale,
            translate,
            name.as_deref(),
            *capacity,
            &cli,
        ),
        Commands::Boundary { input } => boundary::run(input, &cli),
        Commands::Run { config } => run::run(config, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            if let Some(mesh_err) = e.downcast_ref::<diffmesh::MeshError>() {
                eprintln!("{}: {}", "Error".red().bold(), mesh_err);
                eprintln!("  {}: {}", "Code".cyan(), mesh_err.code());
                eprintln!(
                    "  {}: {}",
                    "Suggestion".green(),
                    mesh_err.recovery_suggestion()
                );
                if let Some(location) = mesh_err.location() {
                    eprintln!("  {}: {}", "Location".yellow(), location);
                }
            } else {
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
