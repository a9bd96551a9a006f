//! Canonical-frame normalization.
//!
//! A mesh is fitted into the unit cube along its longest axis by a single
//! isotropic divisor, then optionally stretched per axis and translated:
//!
//! ```text
//! p' = (p / max(dx, dy, dz)) * scale + translate
//! ```
//!
//! The isotropic step never changes the ratio `dx:dy:dz`; a non-uniform
//! `scale` does so deliberately.

use nalgebra::Vector3;
use tracing::{debug, info};

use crate::bounds::BoundingBox;
use crate::error::{MeshError, MeshResult};
use crate::tracing_ext::{OperationTimer, log_bounds};
use crate::types::Mesh;

/// Per-axis scale and translation applied after the isotropic fit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "pipeline-config",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "pipeline-config", serde(default))]
pub struct NormalizeParams {
    /// Multiplier per axis.
    pub scale: [f64; 3],
    /// Offset per axis.
    pub translate: [f64; 3],
}

impl Default for NormalizeParams {
    /// Unit scale, centred on `(0.5, 0.5, 0.5)`.
    fn default() -> Self {
        Self {
            scale: [1.0, 1.0, 1.0],
            translate: [0.5, 0.5, 0.5],
        }
    }
}

impl NormalizeParams {
    /// Isotropic fit only: unit scale and no translation.
    pub fn identity() -> Self {
        Self {
            scale: [1.0, 1.0, 1.0],
            translate: [0.0, 0.0, 0.0],
        }
    }

    /// Set the per-axis scale.
    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale = [x, y, z];
        self
    }

    /// Set the per-axis translation.
    pub fn with_translate(mut self, x: f64, y: f64, z: f64) -> Self {
        self.translate = [x, y, z];
        self
    }
}

/// Outcome of a normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeResult {
    /// Largest extent of the input mesh, the isotropic divisor.
    pub divisor: f64,
    /// Bounding box before normalization.
    pub original_bounds: BoundingBox,
    /// Bounding box after normalization.
    pub bounds: BoundingBox,
}

/// Normalize `mesh` in place.
///
/// Fails with [`MeshError::EmptyMesh`] if the mesh has no vertices and with
/// [`MeshError::DegenerateMesh`] if every vertex coincides. The mesh is left
/// untouched on error.
///
/// # Example
///
/// ```
/// use diffmesh::{Mesh, NormalizeParams, Vertex, normalize_mesh};
///
/// let mut mesh = Mesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(2.0, 1.0, 1.0));
///
/// let result = normalize_mesh(&mut mesh, &NormalizeParams::identity()).unwrap();
/// assert_eq!(result.divisor, 2.0);
/// assert_eq!(mesh.vertices[1].to_array(), [1.0, 0.5, 0.5]);
/// ```
pub fn normalize_mesh(mesh: &mut Mesh, params: &NormalizeParams) -> MeshResult<NormalizeResult> {
    let _timer = OperationTimer::new("normalize");

    let original_bounds = mesh
        .bounds()
        .ok_or_else(|| MeshError::empty_mesh("cannot normalize a mesh without vertices"))?;
    log_bounds("original", &original_bounds);

    let divisor = original_bounds.max_extent();
    if !(divisor.is_finite() && divisor > 0.0) {
        let d = original_bounds.extents();
        return Err(MeshError::DegenerateMesh {
            extents: [d.x, d.y, d.z],
        });
    }
    debug!(divisor, "Isotropic divisor");

    for vertex in &mut mesh.vertices {
        vertex.position.coords /= divisor;
    }
    mesh.scale_axes(Vector3::from(params.scale));
    mesh.translate(Vector3::from(params.translate));

    let bounds = mesh
        .bounds()
        .ok_or_else(|| MeshError::empty_mesh("mesh lost its vertices during normalization"))?;
    log_bounds("rescaled", &bounds);
    info!(
        vertices = mesh.vertex_count(),
        divisor = format!("{:.8}", divisor),
        "Mesh normalized"
    );

    Ok(NormalizeResult {
        divisor,
        original_bounds,
        bounds,
    })
}
