//! diffmesh boundary command - list vertices on open boundary edges.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use diffmesh::{HalfedgeTopology, Mesh, surface_vertices};
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct BoundaryResult {
    path: String,
    halfedges: usize,
    boundary_vertices: usize,
    vertices: Vec<u32>,
}

pub fn run(input: &Path, cli: &Cli) -> Result<()> {
    let mesh =
        Mesh::load(input).with_context(|| format!("Failed to load mesh from {:?}", input))?;
    let engine = mesh
        .to_halfedge()
        .with_context(|| format!("Failed to build halfedges for {:?}", input))?;

    let set = surface_vertices(&engine);
    let result = BoundaryResult {
        path: input.display().to_string(),
        halfedges: engine.henum(),
        boundary_vertices: set.len(),
        vertices: set.to_sorted_vec(),
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                if result.vertices.is_empty() {
                    output::success("Closed surface, no boundary vertices", cli.format, cli.quiet);
                } else {
                    println!(
                        "{}: {} of {} halfedge endpoints",
                        "Boundary vertices".cyan(),
                        result.boundary_vertices,
                        result.halfedges
                    );
                    let ids: Vec<String> = result.vertices.iter().map(u32::to_string).collect();
                    println!("  {}", ids.join(" "));
                }
            }
        }
    }

    Ok(())
}
