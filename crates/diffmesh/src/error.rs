//! Error types for mesh ingest, normalization and export.
//!
//! Every error carries:
//! - A machine-readable code (`MESH-XXXX`)
//! - Context about where it happened (file and line, face, buffer)
//! - A recovery suggestion
//!
//! # Error Codes
//!
//! - `MESH-1xxx`: I/O errors (reading, writing, parsing)
//! - `MESH-2xxx`: Mesh data errors (indices, empty or degenerate geometry)
//! - `MESH-3xxx`: Engine hand-off errors (export buffer capacity)
//!
//! # Example
//!
//! ```
//! use diffmesh::{ErrorCode, MeshError};
//!
//! let err = MeshError::capacity_exceeded("vertices", 1000, 1000);
//! assert_eq!(err.code(), ErrorCode::CapacityExceeded);
//! assert_eq!(err.code().as_str(), "MESH-3001");
//! ```

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // I/O errors (1xxx)
    /// MESH-1001: Failed to read file
    IoRead = 1001,
    /// MESH-1002: Failed to write file
    IoWrite = 1002,
    /// MESH-1003: Malformed vertex or face record
    ParseError = 1003,

    // Mesh data errors (2xxx)
    /// MESH-2001: Face references a vertex that does not exist
    InvalidVertexIndex = 2001,
    /// MESH-2002: Mesh has no vertices
    EmptyMesh = 2002,
    /// MESH-2003: Bounding box has zero extent on every axis
    DegenerateMesh = 2003,
    /// MESH-2004: Face is not a triangle where one is required
    NonTriangularFace = 2004,

    // Engine hand-off errors (3xxx)
    /// MESH-3001: Engine output does not fit the caller's buffer
    CapacityExceeded = 3001,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `MESH-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IoRead => "MESH-1001",
            ErrorCode::IoWrite => "MESH-1002",
            ErrorCode::ParseError => "MESH-1003",
            ErrorCode::InvalidVertexIndex => "MESH-2001",
            ErrorCode::EmptyMesh => "MESH-2002",
            ErrorCode::DegenerateMesh => "MESH-2003",
            ErrorCode::NonTriangularFace => "MESH-2004",
            ErrorCode::CapacityExceeded => "MESH-3001",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recovery suggestions for mesh errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Fix or re-export the source file.
    FixSourceFile { hint: String },
    /// Check the environment (paths, permissions).
    CheckEnvironment { checks: Vec<String> },
    /// Adjust call parameters.
    AdjustParameters { parameters: Vec<(String, String)> },
    /// Triangulate the mesh before the operation.
    Triangulate,
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverySuggestion::FixSourceFile { hint } => {
                write!(f, "Fix the source file: {}", hint)
            }
            RecoverySuggestion::CheckEnvironment { checks } => {
                write!(f, "Check: {}", checks.join(", "))
            }
            RecoverySuggestion::AdjustParameters { parameters } => {
                let params: Vec<String> = parameters
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v))
                    .collect();
                write!(f, "Try adjusting: {}", params.join(", "))
            }
            RecoverySuggestion::Triangulate => {
                write!(f, "Triangulate the mesh before exporting it")
            }
        }
    }
}

/// Location information for mesh errors.
#[derive(Debug, Clone)]
pub enum MeshLocation {
    /// Error at a specific face.
    Face { index: usize },
    /// Error in a file, optionally at a specific line.
    File { path: PathBuf, line: Option<usize> },
    /// Error in a named export buffer.
    Buffer { name: &'static str },
}

impl std::fmt::Display for MeshLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshLocation::Face { index } => write!(f, "face {}", index),
            MeshLocation::File { path, line } => match line {
                Some(l) => write!(f, "{}:{}", path.display(), l),
                None => write!(f, "{}", path.display()),
            },
            MeshLocation::Buffer { name } => write!(f, "{} buffer", name),
        }
    }
}

/// Errors that can occur in the mesh pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum MeshError {
    /// Error reading from a file.
    #[error("failed to read mesh from {path}")]
    #[diagnostic(
        code(mesh::io::read),
        help("Check that the file exists and is readable")
    )]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing to a file.
    #[error("failed to write mesh to {path}")]
    #[diagnostic(
        code(mesh::io::write),
        help("Check that the directory exists and is writable")
    )]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed vertex or face record.
    #[error("failed to parse {path} at line {line}: {details} (`{text}`)")]
    #[diagnostic(
        code(mesh::parse::error),
        help("Vertex lines need three numbers (`v x y z`), face lines need at least three 1-based indices (`f 1 2 3`)")
    )]
    ParseError {
        path: PathBuf,
        line: usize,
        text: String,
        details: String,
    },

    /// Face index out of range.
    #[error(
        "invalid vertex index: face {face_index} references vertex {vertex_index}, but mesh only has {vertex_count} vertices"
    )]
    #[diagnostic(
        code(mesh::data::vertex_index),
        help("Face indices are 1-based in the file and must not exceed the number of `v` lines")
    )]
    InvalidVertexIndex {
        face_index: usize,
        vertex_index: u32,
        vertex_count: usize,
    },

    /// Mesh has no vertices.
    #[error("mesh is empty: {details}")]
    #[diagnostic(
        code(mesh::data::empty),
        help("The file must contain at least one `v` line")
    )]
    EmptyMesh { details: String },

    /// Zero bounding-box extent, normalization is undefined.
    #[error(
        "degenerate mesh: bounding box extents are ({:.3e}, {:.3e}, {:.3e})",
        .extents[0],
        .extents[1],
        .extents[2]
    )]
    #[diagnostic(
        code(mesh::data::degenerate),
        help("All vertices coincide, so there is no extent to normalize by")
    )]
    DegenerateMesh { extents: [f64; 3] },

    /// Face with a vertex count other than three.
    #[error("face {face_index} has {len} vertices, expected a triangle")]
    #[diagnostic(code(mesh::data::non_triangular))]
    NonTriangularFace { face_index: usize, len: usize },

    /// Engine output would not fit the caller's buffer.
    #[error("{buffer} buffer overflow: engine reported {count} records for capacity {capacity}")]
    #[diagnostic(
        code(mesh::engine::capacity),
        help("Export capacity must be strictly greater than the engine's record count")
    )]
    CapacityExceeded {
        buffer: &'static str,
        count: usize,
        capacity: usize,
    },
}

impl MeshError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MeshError::IoRead { .. } => ErrorCode::IoRead,
            MeshError::IoWrite { .. } => ErrorCode::IoWrite,
            MeshError::ParseError { .. } => ErrorCode::ParseError,
            MeshError::InvalidVertexIndex { .. } => ErrorCode::InvalidVertexIndex,
            MeshError::EmptyMesh { .. } => ErrorCode::EmptyMesh,
            MeshError::DegenerateMesh { .. } => ErrorCode::DegenerateMesh,
            MeshError::NonTriangularFace { .. } => ErrorCode::NonTriangularFace,
            MeshError::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
        }
    }

    /// Returns a recovery suggestion for this error.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            MeshError::IoRead { .. } => RecoverySuggestion::CheckEnvironment {
                checks: vec!["file exists".into(), "file permissions".into()],
            },
            MeshError::IoWrite { .. } => RecoverySuggestion::CheckEnvironment {
                checks: vec!["directory exists".into(), "write permissions".into()],
            },
            MeshError::ParseError { line, .. } => RecoverySuggestion::FixSourceFile {
                hint: format!("correct or remove line {}", line),
            },
            MeshError::InvalidVertexIndex { .. } => RecoverySuggestion::FixSourceFile {
                hint: "face indices must refer to existing vertices".into(),
            },
            MeshError::EmptyMesh { .. } => RecoverySuggestion::FixSourceFile {
                hint: "the file contains no vertices".into(),
            },
            MeshError::DegenerateMesh { .. } => RecoverySuggestion::FixSourceFile {
                hint: "the mesh collapses to a single point".into(),
            },
            MeshError::NonTriangularFace { .. } => RecoverySuggestion::Triangulate,
            MeshError::CapacityExceeded { count, .. } => RecoverySuggestion::AdjustParameters {
                parameters: vec![("capacity".into(), format!("greater than {}", count))],
            },
        }
    }

    /// Returns location information if available.
    pub fn location(&self) -> Option<MeshLocation> {
        match self {
            MeshError::ParseError { path, line, .. } => Some(MeshLocation::File {
                path: path.clone(),
                line: Some(*line),
            }),
            MeshError::IoRead { path, .. } | MeshError::IoWrite { path, .. } => {
                Some(MeshLocation::File {
                    path: path.clone(),
                    line: None,
                })
            }
            MeshError::InvalidVertexIndex { face_index, .. }
            | MeshError::NonTriangularFace { face_index, .. } => Some(MeshLocation::Face {
                index: *face_index,
            }),
            MeshError::CapacityExceeded { buffer, .. } => {
                Some(MeshLocation::Buffer { name: *buffer })
            }
            _ => None,
        }
    }

    // Constructor helpers for common error patterns

    /// Create an IoRead error.
    pub fn io_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeshError::IoRead {
            path: path.into(),
            source,
        }
    }

    /// Create an IoWrite error.
    pub fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeshError::IoWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a ParseError for a specific line.
    pub fn parse_error(
        path: impl Into<PathBuf>,
        line: usize,
        text: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        MeshError::ParseError {
            path: path.into(),
            line,
            text: text.into(),
            details: details.into(),
        }
    }

    /// Create an InvalidVertexIndex error.
    pub fn invalid_vertex_index(face_index: usize, vertex_index: u32, vertex_count: usize) -> Self {
        MeshError::InvalidVertexIndex {
            face_index,
            vertex_index,
            vertex_count,
        }
    }

    /// Create an EmptyMesh error.
    pub fn empty_mesh(details: impl Into<String>) -> Self {
        MeshError::EmptyMesh {
            details: details.into(),
        }
    }

    /// Create a CapacityExceeded error.
    pub fn capacity_exceeded(buffer: &'static str, count: usize, capacity: usize) -> Self {
        MeshError::CapacityExceeded {
            buffer,
            count,
            capacity,
        }
    }
}
