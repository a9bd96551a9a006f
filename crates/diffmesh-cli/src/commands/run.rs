//! diffmesh run command - execute a TOML pipeline configuration.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use diffmesh::{Pipeline, PipelineConfig};
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct RunResult {
    name: Option<String>,
    input: String,
    output: String,
    object_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    divisor: Option<f64>,
    vertices: usize,
    triangles: usize,
}

pub fn run(config_path: &Path, cli: &Cli) -> Result<()> {
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    let config = PipelineConfig::from_toml_file(config_path)
        .with_context(|| format!("Failed to read pipeline config {:?}", config_path))?
        .resolve_paths(base);

    output::info(
        &format!("Running pipeline {}", config.name.as_deref().unwrap_or("unnamed")),
        cli.format,
        cli.quiet,
    );

    let result = Pipeline::run_config(&config)
        .with_context(|| format!("Pipeline {:?} failed", config_path))?;

    let summary = RunResult {
        name: config.name.clone(),
        input: config.input.display().to_string(),
        output: config.output.display().to_string(),
        object_name: config.object_name(),
        divisor: result.normalization.as_ref().map(|n| n.divisor),
        vertices: result.export.vertices,
        triangles: result.export.triangles,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&summary, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::success(
                    &format!("Wrote {}", summary.output),
                    cli.format,
                    cli.quiet,
                );
                println!("  {}: {}", "Input".cyan(), summary.input);
                println!("  {}: {}", "Object".cyan(), summary.object_name);
                if let Some(d) = summary.divisor {
                    println!("  {}: {:.8}", "Divisor".cyan(), d);
                }
                println!(
                    "  {}: {} vertices, {} triangles",
                    "Size".cyan(),
                    summary.vertices,
                    summary.triangles
                );
            }
        }
    }

    Ok(())
}
