//! Boundary vertex extraction from a halfedge engine.

use hashbrown::HashSet;
use tracing::debug;

use crate::engine::HalfedgeTopology;

/// Deduplicated set of vertex ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    vertices: HashSet<u32>,
}

impl EdgeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex id, returning false if it was already present.
    pub fn insert(&mut self, vertex: u32) -> bool {
        self.vertices.insert(vertex)
    }

    /// Number of distinct vertex ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the set holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True if `vertex` is in the set.
    #[inline]
    pub fn contains(&self, vertex: u32) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Iterate over the ids in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertices.iter().copied()
    }

    /// Ids in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.iter().collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<u32> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}

impl Extend<u32> for EdgeSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.vertices.extend(iter);
    }
}

/// Collect both end vertices of every boundary halfedge.
///
/// This is a read-only query over `engine`; the result does not depend on
/// the order halfedge ids are visited in.
///
/// # Example
///
/// ```
/// use diffmesh::{HalfedgeMesh, Mesh, Vertex, surface_vertices};
///
/// let mut mesh = Mesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push(vec![0, 1, 2]);
///
/// let engine = HalfedgeMesh::from_mesh(&mesh).unwrap();
/// assert_eq!(surface_vertices(&engine).to_sorted_vec(), vec![0, 1, 2]);
/// ```
pub fn surface_vertices<T: HalfedgeTopology + ?Sized>(engine: &T) -> EdgeSet {
    let henum = engine.henum();
    let mut set = EdgeSet::new();
    let mut boundary_halfedges = 0usize;

    for he in 0..henum {
        if engine.is_surface_edge(he) {
            let ends = engine.edge_ends(he);
            set.insert(ends.first);
            set.insert(ends.last);
            boundary_halfedges += 1;
        }
    }

    debug!(
        halfedges = henum,
        boundary_halfedges,
        boundary_vertices = set.len(),
        "Extracted surface vertices"
    );
    set
}
