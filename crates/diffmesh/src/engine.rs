//! Capability interface of the growth engine.
//!
//! The differential growth simulation owns a halfedge mesh that this crate
//! never constructs or mutates. It is consumed through two narrow traits:
//!
//! - [`HalfedgeTopology`]: halfedge count, boundary classification and the
//!   vertex pair of each halfedge. Consumed by
//!   [`surface_vertices`](crate::surface_vertices).
//! - [`BufferSource`]: fills caller-owned vertex and triangle buffers.
//!   Consumed by [`ExportBuffers::fill_from`] and
//!   [`export_obj`](crate::export_obj).
//!
//! [`HalfedgeMesh`](crate::HalfedgeMesh) implements both for an in-process
//! mesh; tests implement them with small mocks.

use tracing::{debug, trace};

use crate::error::{MeshError, MeshResult};

/// Starting buffer length for engines that give no count hints.
const INITIAL_FILL_LEN: usize = 1024;

/// Ordered vertex pair of a halfedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeEnds {
    /// Vertex the halfedge leaves.
    pub first: u32,
    /// Vertex the halfedge points to.
    pub last: u32,
}

impl EdgeEnds {
    /// Create a vertex pair.
    #[inline]
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }
}

/// Halfedge queries exposed by the engine.
///
/// Halfedge ids are dense in `[0, henum())`.
pub trait HalfedgeTopology {
    /// Number of halfedges.
    fn henum(&self) -> usize;

    /// True if the halfedge lies on the open boundary of the mesh.
    fn is_surface_edge(&self, he: usize) -> bool;

    /// Vertex pair of the halfedge.
    fn edge_ends(&self, he: usize) -> EdgeEnds;
}

/// Buffer-fill operations exposed by the engine.
///
/// The fill methods write at most `buf.len()` records and return the number of
/// records the engine holds. A return value larger than `buf.len()` means the
/// output was truncated.
pub trait BufferSource {
    /// Copy vertex coordinates into `buf`.
    fn fill_vertices(&self, buf: &mut [[f64; 3]]) -> usize;

    /// Copy triangle vertex indices (0-based) into `buf`.
    fn fill_triangles(&self, buf: &mut [[u32; 3]]) -> usize;

    /// Vertex count if the engine can report it before filling.
    fn vertex_count_hint(&self) -> Option<usize> {
        None
    }

    /// Triangle count if the engine can report it before filling.
    fn triangle_count_hint(&self) -> Option<usize> {
        None
    }
}

/// Caller-owned export buffers with a fixed capacity.
///
/// A reported count equal to the capacity cannot be told apart from a
/// truncated fill, so capacity must be strictly greater than the number of
/// records the engine holds.
#[derive(Debug, Clone)]
pub struct ExportBuffers {
    capacity: usize,
    vertices: Vec<[f64; 3]>,
    triangles: Vec<[u32; 3]>,
}

impl ExportBuffers {
    /// Create empty buffers that accept fewer than `capacity` records each.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Buffer capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupied vertex records.
    #[inline]
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    /// Occupied triangle records.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Fill both buffers from `source`.
    ///
    /// Buffers are sized from the engine's count hints when it has them and
    /// grown to the reported count otherwise, never past `capacity`. On error
    /// both buffers are left empty.
    pub fn fill_from<S: BufferSource + ?Sized>(&mut self, source: &S) -> MeshResult<()> {
        self.vertices.clear();
        self.triangles.clear();

        self.check("vertices", source.vertex_count_hint())?;
        self.check("triangles", source.triangle_count_hint())?;

        let vertices = self.fill_buffer(
            "vertices",
            source.vertex_count_hint(),
            [0.0; 3],
            |buf| source.fill_vertices(buf),
        )?;
        let vnum = vertices.len();

        let triangles = self.fill_buffer(
            "triangles",
            source.triangle_count_hint(),
            [0; 3],
            |buf| source.fill_triangles(buf),
        )?;
        let tnum = triangles.len();

        for (i, tri) in triangles.iter().enumerate() {
            if let Some(&bad) = tri.iter().find(|&&v| v as usize >= vnum) {
                return Err(MeshError::invalid_vertex_index(i, bad, vnum));
            }
        }

        debug!(
            vertices = vnum,
            triangles = tnum,
            capacity = self.capacity,
            "Filled export buffers"
        );

        self.vertices = vertices;
        self.triangles = triangles;
        Ok(())
    }

    /// Run `fill` until the buffer holds every record the engine reports.
    ///
    /// The reported count is checked against `capacity` after every pass, so
    /// the buffer never grows to `capacity` or beyond.
    fn fill_buffer<T: Copy>(
        &self,
        buffer: &'static str,
        hint: Option<usize>,
        zero: T,
        fill: impl Fn(&mut [T]) -> usize,
    ) -> MeshResult<Vec<T>> {
        let initial = hint.unwrap_or(INITIAL_FILL_LEN).min(self.capacity);
        let mut buf = vec![zero; initial];

        loop {
            let count = fill(&mut buf);
            self.check(buffer, Some(count))?;
            if count <= buf.len() {
                buf.truncate(count);
                return Ok(buf);
            }
            trace!(buffer, count, len = buf.len(), "Growing export buffer");
            buf.resize(count, zero);
        }
    }

    fn check(&self, buffer: &'static str, count: Option<usize>) -> MeshResult<()> {
        match count {
            Some(count) if count >= self.capacity => {
                Err(MeshError::capacity_exceeded(buffer, count, self.capacity))
            }
            _ => Ok(()),
        }
    }
}
