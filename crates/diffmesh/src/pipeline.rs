//! Pipeline API for the ingest -> normalize -> export chain.
//!
//! ```no_run
//! use diffmesh::{NormalizeParams, Pipeline};
//!
//! let result = Pipeline::load("seed.obj")
//!     .unwrap()
//!     .normalize(&NormalizeParams::default())
//!     .unwrap()
//!     .export("seed", "seed-normalized.obj", 1_000_000)
//!     .unwrap();
//!
//! println!("Wrote {} vertices", result.export.vertices);
//! ```

use std::path::{Path, PathBuf};

use crate::boundary::{EdgeSet, surface_vertices};
use crate::error::MeshResult;
use crate::halfedge::HalfedgeMesh;
use crate::normalize::{NormalizeParams, NormalizeResult, normalize_mesh};
use crate::obj::{ExportStats, export_obj, load_obj};
use crate::types::Mesh;

// =========================================================================
// Pipeline Configuration (Serialization)
// =========================================================================

/// A serializable pipeline run.
///
/// # Example TOML
///
/// ```toml
/// name = "growth-seed"
/// input = "seed.obj"
/// output = "seed-normalized.obj"
/// object_name = "seed"
/// capacity = 1000000
///
/// [normalize]
/// scale = [1.0, 1.0, 1.0]
/// translate = [0.5, 0.5, 0.5]
/// ```
///
/// Relative paths are resolved by the caller, see
/// [`PipelineConfig::resolve_paths`].
#[cfg(feature = "pipeline-config")]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Optional name for this run.
    #[serde(default)]
    pub name: Option<String>,
    /// Mesh to load.
    pub input: PathBuf,
    /// Where to write the normalized mesh.
    pub output: PathBuf,
    /// Name written on the `o` line. Defaults to the output file stem.
    #[serde(default)]
    pub object_name: Option<String>,
    /// Export buffer capacity.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Normalization parameters.
    #[serde(default)]
    pub normalize: NormalizeParams,
}

#[cfg(feature = "pipeline-config")]
fn default_capacity() -> usize {
    crate::DEFAULT_CAPACITY
}

#[cfg(feature = "pipeline-config")]
impl PipelineConfig {
    /// Create a configuration with default normalization and capacity.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            name: None,
            input: input.into(),
            output: output.into(),
            object_name: None,
            capacity: default_capacity(),
            normalize: NormalizeParams::default(),
        }
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PipelineConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&contents)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Make relative `input` and `output` paths relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.input.is_relative() {
            self.input = base.join(&self.input);
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
        self
    }

    /// Object name for the `o` line.
    pub fn object_name(&self) -> String {
        self.object_name.clone().unwrap_or_else(|| {
            self.output
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("mesh")
                .to_string()
        })
    }
}

/// Errors from loading or saving a pipeline configuration.
#[cfg(feature = "pipeline-config")]
#[derive(Debug, thiserror::Error)]
pub enum PipelineConfigError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML did not match the schema.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

// =========================================================================
// Pipeline
// =========================================================================

/// Result of a completed pipeline.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The mesh as exported.
    pub mesh: Mesh,
    /// Normalization summary, if the pipeline normalized.
    pub normalization: Option<NormalizeResult>,
    /// Export summary.
    pub export: ExportStats,
}

/// A mesh moving through ingest, normalization and export.
#[derive(Debug, Clone)]
pub struct Pipeline {
    mesh: Mesh,
    source: Option<PathBuf>,
    normalization: Option<NormalizeResult>,
}

impl Pipeline {
    /// Start from a mesh file.
    pub fn load(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            mesh: load_obj(path)?,
            source: Some(path.to_path_buf()),
            normalization: None,
        })
    }

    /// Start from an in-memory mesh.
    pub fn from_mesh(mesh: Mesh) -> Self {
        Self {
            mesh,
            source: None,
            normalization: None,
        }
    }

    /// Normalize into the canonical frame.
    pub fn normalize(mut self, params: &NormalizeParams) -> MeshResult<Self> {
        self.normalization = Some(normalize_mesh(&mut self.mesh, params)?);
        Ok(self)
    }

    /// Current mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// File the mesh was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Normalization summary, if [`normalize`](Self::normalize) ran.
    pub fn normalization(&self) -> Option<&NormalizeResult> {
        self.normalization.as_ref()
    }

    /// Build the in-process halfedge engine for the current mesh.
    pub fn engine(&self) -> MeshResult<HalfedgeMesh> {
        HalfedgeMesh::from_mesh(&self.mesh)
    }

    /// Vertices on the open boundary of the current mesh.
    pub fn boundary_vertices(&self) -> MeshResult<EdgeSet> {
        Ok(surface_vertices(&self.engine()?))
    }

    /// Export through the halfedge engine to `path`.
    pub fn export(
        self,
        name: &str,
        path: impl AsRef<Path>,
        capacity: usize,
    ) -> MeshResult<PipelineResult> {
        let engine = self.engine()?;
        let export = export_obj(&engine, name, path.as_ref(), capacity)?;
        Ok(PipelineResult {
            mesh: self.mesh,
            normalization: self.normalization,
            export,
        })
    }

    /// Run a full configuration: load, normalize, export.
    #[cfg(feature = "pipeline-config")]
    pub fn run_config(config: &PipelineConfig) -> MeshResult<PipelineResult> {
        tracing::info!(
            name = config.name.as_deref().unwrap_or("unnamed"),
            input = %config.input.display(),
            output = %config.output.display(),
            "Running pipeline"
        );
        Self::load(&config.input)?
            .normalize(&config.normalize)?
            .export(&config.object_name(), &config.output, config.capacity)
    }
}
