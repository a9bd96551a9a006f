//! diffmesh info command - display mesh statistics.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use diffmesh::Mesh;
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct MeshInfo {
    path: String,
    vertices: usize,
    faces: usize,
    triangulated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<BoundsInfo>,
}

#[derive(Serialize)]
struct BoundsInfo {
    min: [f64; 3],
    max: [f64; 3],
    extents: [f64; 3],
    max_extent: f64,
}

pub fn run(input: &Path, cli: &Cli) -> Result<()> {
    let mesh =
        Mesh::load(input).with_context(|| format!("Failed to load mesh from {:?}", input))?;

    let bounds = mesh.bounds().map(|b| {
        let e = b.extents();
        BoundsInfo {
            min: [b.min.x, b.min.y, b.min.z],
            max: [b.max.x, b.max.y, b.max.z],
            extents: [e.x, e.y, e.z],
            max_extent: b.max_extent(),
        }
    });

    let info = MeshInfo {
        path: input.display().to_string(),
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        triangulated: mesh.is_triangulated(),
        bounds,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&info, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "Mesh Information".bold().underline());
                println!("  {}: {}", "File".cyan(), input.display());
                println!("  {}: {}", "Vertices".cyan(), info.vertices);
                println!("  {}: {}", "Faces".cyan(), info.faces);
                println!(
                    "  {}: {}",
                    "Triangulated".cyan(),
                    if info.triangulated { "yes" } else { "no" }
                );

                if let Some(ref b) = info.bounds {
                    for (axis, i) in [("x", 0), ("y", 1), ("z", 2)] {
                        println!(
                            "  {} {}: {:.8} .. {:.8} (extent {:.8})",
                            "Bounds".cyan(),
                            axis,
                            b.min[i],
                            b.max[i],
                            b.extents[i]
                        );
                    }
                    println!("  {}: {:.8}", "Max extent".cyan(), b.max_extent);
                }
            }
        }
    }

    Ok(())
}
