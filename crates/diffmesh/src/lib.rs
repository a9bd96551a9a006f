//! Mesh ingest, normalization and export for differential growth simulations.
//!
//! This crate sits between mesh files on disk and a halfedge growth engine.
//! It loads an OBJ seed mesh, fits it into a canonical frame, hands it to the
//! engine and writes the engine's state back out as OBJ.
//!
//! # Features
//!
//! - **OBJ I/O**: Vertex/face subset reader, triangle writer with atomic file replacement
//! - **Normalization**: Isotropic fit to the unit cube, then per-axis scale and translate
//! - **Engine boundary**: Traits for halfedge topology queries and buffer export
//! - **Boundary extraction**: Vertex set on the open boundary of a surface
//! - **Sampling**: Random directions of fixed length for growth perturbations
//!
//! # Coordinate Frame
//!
//! Normalization divides every coordinate by the largest bounding box extent,
//! so the longest axis spans exactly 1.0 and aspect ratios are preserved. The
//! default parameters then shift the mesh by 0.5 on every axis:
//!
//! ```text
//! p' = (p / max(dx, dy, dz)) * scale + translate
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use diffmesh::{HalfedgeMesh, Mesh, NormalizeParams};
//!
//! let mut mesh = Mesh::load("seed.obj").unwrap();
//! mesh.normalize(&NormalizeParams::default()).unwrap();
//!
//! let engine = HalfedgeMesh::from_mesh(&mesh).unwrap();
//! diffmesh::export_obj(&engine, "seed", "grown.obj".as_ref(), 1_000_000).unwrap();
//! ```
//!
//! # Engine Integration
//!
//! A growth engine exposes its state through two traits:
//!
//! - [`HalfedgeTopology`]: halfedge count, boundary test and edge endpoints
//! - [`BufferSource`]: fills caller-owned vertex and triangle buffers
//!
//! [`HalfedgeMesh`] implements both for a static triangle mesh.
//!
//! ```
//! use diffmesh::{HalfedgeMesh, Mesh, Vertex, surface_vertices};
//!
//! let mut mesh = Mesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push(vec![0, 1, 2, 3]);
//!
//! let engine = HalfedgeMesh::from_mesh(&mesh).unwrap();
//! assert_eq!(surface_vertices(&engine).len(), 4);
//! ```
//!
//! # Error Handling
//!
//! Operations return `MeshResult<T>`, which is `Result<T, MeshError>`.
//!
//! ```
//! use diffmesh::{Mesh, MeshError};
//!
//! match Mesh::load("nonexistent.obj") {
//!     Ok(_) => println!("Loaded successfully"),
//!     Err(MeshError::IoRead { path, source }) => {
//!         println!("Failed to read {:?}: {}", path, source);
//!     }
//!     Err(MeshError::ParseError { line, details, .. }) => {
//!         println!("Line {}: {}", line, details);
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

mod bounds;
mod error;
mod types;

pub mod boundary;
pub mod engine;
pub mod halfedge;
pub mod normalize;
pub mod obj;
pub mod pipeline;
pub mod sampling;
pub mod tracing_ext;

/// Export buffer capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

// Re-export core types at crate root
pub use bounds::BoundingBox;
pub use error::{ErrorCode, MeshError, MeshLocation, MeshResult, RecoverySuggestion};
pub use types::{Face, Mesh, Vertex};

pub use boundary::{EdgeSet, surface_vertices};
pub use engine::{BufferSource, EdgeEnds, ExportBuffers, HalfedgeTopology};
pub use halfedge::{Halfedge, HalfedgeMesh};
pub use normalize::{NormalizeParams, NormalizeResult, normalize_mesh};
pub use obj::{ExportStats, export_obj, load_obj, parse_obj, save_buffers, save_obj, write_obj};
pub use pipeline::{Pipeline, PipelineResult};
pub use sampling::random_unit_vectors;

// Pipeline serialization (requires pipeline-config feature)
#[cfg(feature = "pipeline-config")]
pub use pipeline::{PipelineConfig, PipelineConfigError};

pub use tracing_ext::{OperationTimer, log_bounds, log_io_operation, log_mesh_stats};

// Convenience methods on Mesh
impl Mesh {
    /// Load a mesh from an OBJ file.
    pub fn load(path: impl AsRef<std::path::Path>) -> MeshResult<Self> {
        obj::load_obj(path.as_ref())
    }

    /// Save a triangulated mesh as OBJ under object name `name`.
    pub fn save_obj(&self, name: &str, path: impl AsRef<std::path::Path>) -> MeshResult<ExportStats> {
        obj::save_obj(self, name, path.as_ref())
    }

    /// Normalize in place. See [`normalize_mesh`].
    ///
    /// # Example
    ///
    /// ```
    /// use diffmesh::{Mesh, NormalizeParams, Vertex};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
    /// mesh.vertices.push(Vertex::from_coords(4.0, 2.0, 0.0));
    ///
    /// mesh.normalize(&NormalizeParams::identity()).unwrap();
    /// assert_eq!(mesh.vertices[1].to_array(), [1.0, 0.5, 0.0]);
    /// ```
    pub fn normalize(&mut self, params: &NormalizeParams) -> MeshResult<NormalizeResult> {
        normalize::normalize_mesh(self, params)
    }

    /// Build the halfedge engine for this mesh.
    pub fn to_halfedge(&self) -> MeshResult<HalfedgeMesh> {
        HalfedgeMesh::from_mesh(self)
    }
}
