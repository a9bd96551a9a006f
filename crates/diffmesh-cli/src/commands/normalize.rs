//! diffmesh normalize command - fit a mesh into the canonical frame.

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use diffmesh::{Mesh, NormalizeParams, export_obj};
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct NormalizeOutput {
    input: String,
    output: String,
    name: String,
    divisor: f64,
    original_min: [f64; 3],
    original_max: [f64; 3],
    min: [f64; 3],
    max: [f64; 3],
    vertices: usize,
    triangles: usize,
}

fn triple(values: &[f64], flag: &str) -> Result<[f64; 3]> {
    match values {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => bail!("--{} takes exactly three values, got {}", flag, values.len()),
    }
}

pub fn run(
    input: &Path,
    output_path: &Path,
    scale: &[f64],
    translate: &[f64],
    name: Option<&str>,
    capacity: usize,
    cli: &Cli,
) -> Result<()> {
    let params = NormalizeParams {
        scale: triple(scale, "scale")?,
        translate: triple(translate, "translate")?,
    };

    let mut mesh =
        Mesh::load(input).with_context(|| format!("Failed to load mesh from {:?}", input))?;

    output::info(
        &format!(
            "Normalizing {} vertices (scale {:?}, translate {:?})",
            mesh.vertex_count(),
            params.scale,
            params.translate
        ),
        cli.format,
        cli.quiet,
    );

    let summary = mesh
        .normalize(&params)
        .with_context(|| format!("Failed to normalize {:?}", input))?;

    let name = name.map(str::to_string).unwrap_or_else(|| {
        output_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh")
            .to_string()
    });

    let engine = mesh.to_halfedge()?;
    let stats = export_obj(&engine, &name, output_path, capacity)
        .with_context(|| format!("Failed to write mesh to {:?}", output_path))?;

    let o = &summary.original_bounds;
    let b = &summary.bounds;
    let result = NormalizeOutput {
        input: input.display().to_string(),
        output: output_path.display().to_string(),
        name,
        divisor: summary.divisor,
        original_min: [o.min.x, o.min.y, o.min.z],
        original_max: [o.max.x, o.max.y, o.max.z],
        min: [b.min.x, b.min.y, b.min.z],
        max: [b.max.x, b.max.y, b.max.z],
        vertices: stats.vertices,
        triangles: stats.triangles,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::success(
                    &format!("Normalized {} to {}", input.display(), output_path.display()),
                    cli.format,
                    cli.quiet,
                );
                println!("  {}: {:.8}", "Divisor".cyan(), result.divisor);
                println!("  {}: {}", "Original".cyan(), o);
                println!("  {}: {}", "Rescaled".cyan(), b);
                println!(
                    "  {}: {} vertices, {} triangles",
                    "Written".cyan(),
                    result.vertices,
                    result.triangles
                );
            }
        }
    }

    Ok(())
}
