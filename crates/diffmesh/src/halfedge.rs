//! In-process halfedge mesh.
//!
//! [`HalfedgeMesh`] implements the engine traits for a static triangle mesh.
//! It lets the pipeline run end to end without the growth engine attached
//! (boundary extraction on an input file, identity export) and serves as the
//! reference engine in tests.

use hashbrown::HashMap;
use nalgebra::Point3;
use tracing::{debug, warn};

use crate::engine::{BufferSource, EdgeEnds, HalfedgeTopology};
use crate::error::{MeshError, MeshResult};
use crate::types::Mesh;

/// A directed edge of one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halfedge {
    /// Start and end vertex.
    pub ends: EdgeEnds,
    /// Opposite halfedge in the neighbouring triangle, if any.
    pub twin: Option<usize>,
    /// Triangle this halfedge belongs to.
    pub face: usize,
}

/// Triangle mesh with halfedge connectivity.
///
/// Triangle `t` owns halfedges `3t`, `3t + 1` and `3t + 2`.
#[derive(Debug, Clone)]
pub struct HalfedgeMesh {
    positions: Vec<Point3<f64>>,
    triangles: Vec<[u32; 3]>,
    halfedges: Vec<Halfedge>,
}

impl HalfedgeMesh {
    /// Build connectivity for `mesh`.
    ///
    /// Polygon faces are fan-triangulated around their first vertex. Faces with
    /// fewer than three vertices and out-of-range indices are rejected.
    pub fn from_mesh(mesh: &Mesh) -> MeshResult<Self> {
        if let Some((face_index, vertex_index)) = mesh.first_invalid_index() {
            return Err(MeshError::invalid_vertex_index(
                face_index,
                vertex_index,
                mesh.vertex_count(),
            ));
        }

        let mut triangles = Vec::with_capacity(mesh.face_count());
        for (i, face) in mesh.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::NonTriangularFace {
                    face_index: i,
                    len: face.len(),
                });
            }
            for k in 1..face.len() - 1 {
                triangles.push([face[0], face[k], face[k + 1]]);
            }
        }

        let positions = mesh.vertices.iter().map(|v| v.position).collect();
        Ok(Self::from_triangles(positions, triangles))
    }

    /// Build connectivity for already-triangulated data.
    ///
    /// Indices must be in range for `positions`. Twins are paired only across
    /// manifold edges: a directed edge used by more than one triangle, and a
    /// collapsed edge from a degenerate triangle, get no twin and count as
    /// boundary. Twin links are always mutual.
    pub fn from_triangles(positions: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        let mut halfedges = Vec::with_capacity(triangles.len() * 3);
        // `None` marks a directed edge seen more than once.
        let mut directed: HashMap<(u32, u32), Option<usize>> =
            HashMap::with_capacity(triangles.len() * 3);
        let mut duplicates = 0usize;

        for (face, tri) in triangles.iter().enumerate() {
            for k in 0..3 {
                let ends = EdgeEnds::new(tri[k], tri[(k + 1) % 3]);
                let id = halfedges.len();
                directed
                    .entry((ends.first, ends.last))
                    .and_modify(|slot| {
                        *slot = None;
                        duplicates += 1;
                    })
                    .or_insert(Some(id));
                halfedges.push(Halfedge {
                    ends,
                    twin: None,
                    face,
                });
            }
        }

        for he in &mut halfedges {
            if he.ends.first == he.ends.last {
                continue;
            }
            let own = directed.get(&(he.ends.first, he.ends.last)).copied().flatten();
            let reverse = directed.get(&(he.ends.last, he.ends.first)).copied().flatten();
            if own.is_some() {
                he.twin = reverse;
            }
        }

        if duplicates > 0 {
            warn!(
                duplicates,
                "Directed edge shared by more than one triangle (non-manifold or inconsistent winding)"
            );
        }

        let mesh = Self {
            positions,
            triangles,
            halfedges,
        };
        debug!(
            vertices = mesh.positions.len(),
            triangles = mesh.triangles.len(),
            halfedges = mesh.halfedges.len(),
            boundary_halfedges = mesh.boundary_halfedges().count(),
            "Built halfedge mesh"
        );
        mesh
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Halfedge records.
    #[inline]
    pub fn halfedges(&self) -> &[Halfedge] {
        &self.halfedges
    }

    /// Triangles as 0-based vertex index triples.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Ids of halfedges without a twin.
    pub fn boundary_halfedges(&self) -> impl Iterator<Item = usize> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .filter(|(_, he)| he.twin.is_none())
            .map(|(i, _)| i)
    }
}

impl HalfedgeTopology for HalfedgeMesh {
    fn henum(&self) -> usize {
        self.halfedges.len()
    }

    fn is_surface_edge(&self, he: usize) -> bool {
        self.halfedges[he].twin.is_none()
    }

    fn edge_ends(&self, he: usize) -> EdgeEnds {
        self.halfedges[he].ends
    }
}

impl BufferSource for HalfedgeMesh {
    fn fill_vertices(&self, buf: &mut [[f64; 3]]) -> usize {
        for (slot, p) in buf.iter_mut().zip(&self.positions) {
            *slot = [p.x, p.y, p.z];
        }
        self.positions.len()
    }

    fn fill_triangles(&self, buf: &mut [[u32; 3]]) -> usize {
        for (slot, tri) in buf.iter_mut().zip(&self.triangles) {
            *slot = *tri;
        }
        self.triangles.len()
    }

    fn vertex_count_hint(&self) -> Option<usize> {
        Some(self.positions.len())
    }

    fn triangle_count_hint(&self) -> Option<usize> {
        Some(self.triangles.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExportBuffers;
    use crate::{Vertex, surface_vertices};

    fn square() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.faces.push(vec![0, 1, 2]);
        mesh.faces.push(vec![0, 2, 3]);
        mesh
    }

    fn tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
        mesh.faces.push(vec![0, 2, 1]);
        mesh.faces.push(vec![0, 1, 3]);
        mesh.faces.push(vec![1, 2, 3]);
        mesh.faces.push(vec![2, 0, 3]);
        mesh
    }

    #[test]
    fn test_square_twins() {
        let he = HalfedgeMesh::from_mesh(&square()).unwrap();
        assert_eq!(he.henum(), 6);

        // Diagonal 2->0 (tri 0) pairs with 0->2 (tri 1)
        assert_eq!(he.halfedges()[2].ends, EdgeEnds::new(2, 0));
        assert_eq!(he.halfedges()[2].twin, Some(3));
        assert_eq!(he.halfedges()[3].twin, Some(2));
        assert_eq!(he.boundary_halfedges().count(), 4);
    }

    #[test]
    fn test_closed_mesh_has_no_boundary() {
        let he = HalfedgeMesh::from_mesh(&tetrahedron()).unwrap();
        assert_eq!(he.henum(), 12);
        assert!(surface_vertices(&he).is_empty());
    }

    #[test]
    fn test_open_tetrahedron_boundary() {
        let mut mesh = tetrahedron();
        mesh.faces.remove(0);
        let he = HalfedgeMesh::from_mesh(&mesh).unwrap();
        assert_eq!(surface_vertices(&he).to_sorted_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_polygon_is_fan_triangulated() {
        let mut mesh = square();
        mesh.faces = vec![vec![0, 1, 2, 3]];
        let he = HalfedgeMesh::from_mesh(&mesh).unwrap();
        assert_eq!(he.triangles(), &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(he.triangle_count(), 2);
    }

    #[test]
    fn test_rejects_bad_faces() {
        let mut mesh = square();
        mesh.faces.push(vec![0, 1]);
        assert!(matches!(
            HalfedgeMesh::from_mesh(&mesh),
            Err(MeshError::NonTriangularFace { face_index: 2, len: 2 })
        ));

        let mut mesh = square();
        mesh.faces.push(vec![0, 1, 9]);
        assert!(matches!(
            HalfedgeMesh::from_mesh(&mesh),
            Err(MeshError::InvalidVertexIndex { vertex_index: 9, .. })
        ));
    }

    #[test]
    fn test_identity_fill() {
        let he = HalfedgeMesh::from_mesh(&square()).unwrap();
        let mut buffers = ExportBuffers::with_capacity(16);
        buffers.fill_from(&he).unwrap();
        assert_eq!(buffers.vertices()[2], [1.0, 1.0, 0.0]);
        assert_eq!(buffers.triangles(), &[[0, 1, 2], [0, 2, 3]]);
    }

    fn assert_twins_mutual(he: &HalfedgeMesh) {
        for (i, h) in he.halfedges().iter().enumerate() {
            if let Some(t) = h.twin {
                assert_ne!(t, i, "halfedge {} is its own twin", i);
                assert_eq!(he.halfedges()[t].twin, Some(i), "twin of {} is not mutual", i);
            }
        }
    }

    #[test]
    fn test_degenerate_triangle_has_no_self_twin() {
        let positions = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let he = HalfedgeMesh::from_triangles(positions, vec![[0, 0, 1]]);

        assert_eq!(he.halfedges()[0].ends, EdgeEnds::new(0, 0));
        assert_eq!(he.halfedges()[0].twin, None);
        assert!(he.is_surface_edge(0));
        assert_twins_mutual(&he);
    }

    #[test]
    fn test_non_manifold_edge_is_left_unpaired() {
        let positions = (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        // Edge 0-1 is shared by three triangles; 1->0 appears twice
        let he = HalfedgeMesh::from_triangles(positions, vec![[0, 1, 2], [1, 0, 3], [1, 0, 4]]);

        for (i, h) in he.halfedges().iter().enumerate() {
            let on_shared = matches!((h.ends.first, h.ends.last), (0, 1) | (1, 0));
            if on_shared {
                assert_eq!(h.twin, None, "halfedge {} on the shared edge was paired", i);
            }
        }
        assert_twins_mutual(&he);
        assert_eq!(surface_vertices(&he).to_sorted_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_manifold_meshes_have_mutual_twins() {
        assert_twins_mutual(&HalfedgeMesh::from_mesh(&square()).unwrap());
        assert_twins_mutual(&HalfedgeMesh::from_mesh(&tetrahedron()).unwrap());
    }
}
