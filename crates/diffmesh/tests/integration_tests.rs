//! End-to-end integration tests for diffmesh.
//!
//! These tests exercise the full chain from load -> normalize -> engine ->
//! export, plus boundary extraction, through files on disk.

use diffmesh::{
    BufferSource, EdgeEnds, ExportBuffers, HalfedgeMesh, HalfedgeTopology, Mesh, MeshError,
    NormalizeParams, Vertex, export_obj, load_obj, surface_vertices,
};
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Create a closed cube with 12 triangles.
fn create_test_cube(size: f64) -> Mesh {
    let mut mesh = Mesh::new();

    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0)); // 0
    mesh.vertices.push(Vertex::from_coords(size, 0.0, 0.0)); // 1
    mesh.vertices.push(Vertex::from_coords(size, size, 0.0)); // 2
    mesh.vertices.push(Vertex::from_coords(0.0, size, 0.0)); // 3
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, size)); // 4
    mesh.vertices.push(Vertex::from_coords(size, 0.0, size)); // 5
    mesh.vertices.push(Vertex::from_coords(size, size, size)); // 6
    mesh.vertices.push(Vertex::from_coords(0.0, size, size)); // 7

    // Bottom, top, front, back, left, right; CCW from outside
    for f in [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ] {
        mesh.faces.push(f.to_vec());
    }

    mesh
}

/// Cube with the top face removed.
fn create_open_cube(size: f64) -> Mesh {
    let mut mesh = create_test_cube(size);
    mesh.faces.remove(3);
    mesh.faces.remove(2);
    mesh
}

fn write_obj_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".obj").unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn assert_close(a: [f64; 3], b: [f64; 3], tol: f64) {
    for i in 0..3 {
        assert!((a[i] - b[i]).abs() <= tol, "{:?} != {:?}", a, b);
    }
}

// =============================================================================
// Example scenarios
// =============================================================================

#[test]
fn test_unit_tetra_identity_normalize() {
    let file = write_obj_file("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\n");

    let mut mesh = load_obj(file.path()).unwrap();
    assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);

    let bounds = mesh.bounds().unwrap();
    assert_eq!(bounds.extents(), nalgebra::Vector3::new(1.0, 1.0, 1.0));

    let before = mesh.clone();
    let result = mesh.normalize(&NormalizeParams::identity()).unwrap();
    assert_eq!(result.divisor, 1.0);
    assert_eq!(mesh, before);
}

#[test]
fn test_longest_axis_halved() {
    let file = write_obj_file("v 0 0 0\nv 2 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\nf 1 3 4\n");

    let mut mesh = load_obj(file.path()).unwrap();
    let result = mesh.normalize(&NormalizeParams::identity()).unwrap();

    assert_eq!(result.divisor, 2.0);
    assert_eq!(mesh.vertices[1].to_array(), [1.0, 0.0, 0.0]);
    assert_eq!(mesh.vertices[2].to_array(), [0.0, 0.5, 0.0]);

    let extents = mesh.bounds().unwrap().extents();
    assert_eq!(extents.x, 1.0);
    assert_eq!(extents.y, 0.5);
}

#[test]
fn test_scripted_engine_boundary() {
    struct SixHalfedges;

    impl HalfedgeTopology for SixHalfedges {
        fn henum(&self) -> usize {
            6
        }

        fn is_surface_edge(&self, he: usize) -> bool {
            he % 2 == 0
        }

        fn edge_ends(&self, he: usize) -> EdgeEnds {
            match he {
                0 => EdgeEnds::new(0, 1),
                2 => EdgeEnds::new(1, 2),
                4 => EdgeEnds::new(2, 0),
                _ => EdgeEnds::new(7, 8),
            }
        }
    }

    let set = surface_vertices(&SixHalfedges);
    assert_eq!(set.to_sorted_vec(), vec![0, 1, 2]);
}

#[test]
fn test_short_vertex_line_is_parse_error() {
    let file = write_obj_file("# seed\nv 0 0 0\nv 1.0 2.0\nv 0 1 0\n");

    match load_obj(file.path()) {
        Err(MeshError::ParseError { line, text, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(text, "v 1.0 2.0");
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

// =============================================================================
// Round trips through disk
// =============================================================================

#[test]
fn test_load_normalize_export_reload() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cube.obj");
    let output = dir.path().join("cube-normalized.obj");

    create_test_cube(4.0).save_obj("cube", &input).unwrap();

    let mut mesh = Mesh::load(&input).unwrap();
    mesh.normalize(&NormalizeParams::default()).unwrap();
    let engine = mesh.to_halfedge().unwrap();
    let stats = export_obj(&engine, "cube", &output, 100).unwrap();
    assert_eq!(stats.vertices, 8);
    assert_eq!(stats.triangles, 12);

    let reloaded = Mesh::load(&output).unwrap();
    assert_eq!(reloaded.faces, mesh.faces);
    for (a, b) in reloaded.vertices.iter().zip(&mesh.vertices) {
        assert_close(a.to_array(), b.to_array(), 1e-6);
    }

    // Unit cube shifted by 0.5 on every axis
    let bounds = reloaded.bounds().unwrap();
    assert_close([bounds.min.x, bounds.min.y, bounds.min.z], [0.5; 3], 1e-6);
    assert_close([bounds.max.x, bounds.max.y, bounds.max.z], [1.5; 3], 1e-6);
}

#[test]
fn test_export_file_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tri.obj");

    let mut mesh = Mesh::new();
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
    mesh.faces.push(vec![0, 1, 2]);

    export_obj(&mesh.to_halfedge().unwrap(), "tri", &path, 4).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "o tri\n\
         v 0.000000 0.000000 0.000000\n\
         v 1.000000 0.000000 0.000000\n\
         v 0.000000 1.000000 0.000000\n\
         s off\n\
         f 1 2 3\n"
    );
}

#[test]
fn test_polygon_input_exports_triangles() {
    let file = write_obj_file("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1/1/1 2/2/1 3/3/1 4/4/1\n");
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("quad.obj");

    let mesh = load_obj(file.path()).unwrap();
    assert_eq!(mesh.faces, vec![vec![0, 1, 2, 3]]);
    assert!(matches!(
        mesh.save_obj("quad", &out),
        Err(MeshError::NonTriangularFace { face_index: 0, len: 4 })
    ));

    let stats = export_obj(&mesh.to_halfedge().unwrap(), "quad", &out, 8).unwrap();
    assert_eq!(stats.triangles, 2);
    let reloaded = load_obj(&out).unwrap();
    assert_eq!(reloaded.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
}

// =============================================================================
// Capacity and failure handling
// =============================================================================

#[test]
fn test_capacity_must_exceed_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cube.obj");
    let engine = HalfedgeMesh::from_mesh(&create_test_cube(1.0)).unwrap();

    // 12 triangles: capacity 12 is an ambiguous exact fit and is rejected
    let err = export_obj(&engine, "cube", &path, 12).unwrap_err();
    assert!(matches!(
        err,
        MeshError::CapacityExceeded {
            buffer: "triangles",
            count: 12,
            capacity: 12
        }
    ));
    assert!(!path.exists());

    assert!(export_obj(&engine, "cube", &path, 13).is_ok());
}

#[test]
fn test_oversized_capacity_exports_normally() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cube.obj");
    let engine = HalfedgeMesh::from_mesh(&create_test_cube(1.0)).unwrap();

    let stats = export_obj(&engine, "cube", &path, usize::MAX / 4).unwrap();
    assert_eq!(stats.vertices, 8);
    assert_eq!(stats.triangles, 12);
    assert_eq!(load_obj(&path).unwrap().face_count(), 12);
}

#[test]
fn test_failed_export_keeps_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.obj");
    std::fs::write(&path, "o previous\n").unwrap();

    let engine = HalfedgeMesh::from_mesh(&create_test_cube(1.0)).unwrap();
    assert!(export_obj(&engine, "cube", &path, 2).is_err());

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "o previous\n");
}

#[test]
fn test_export_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.obj");
    let engine = HalfedgeMesh::from_mesh(&create_test_cube(1.0)).unwrap();

    let err = export_obj(&engine, "cube", &path, 100).unwrap_err();
    assert!(matches!(err, MeshError::IoWrite { .. }));
}

#[test]
fn test_missing_input_is_io_error() {
    let err = load_obj(Path::new("/definitely/not/here.obj")).unwrap_err();
    assert!(matches!(err, MeshError::IoRead { .. }));
    assert_eq!(err.code().as_str(), "MESH-1001");
}

#[test]
fn test_face_index_out_of_range() {
    let file = write_obj_file("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n");
    assert!(matches!(
        load_obj(file.path()),
        Err(MeshError::InvalidVertexIndex {
            face_index: 0,
            vertex_index: 3,
            vertex_count: 3
        })
    ));
}

#[test]
fn test_degenerate_file() {
    let file = write_obj_file("v 1 1 1\nv 1 1 1\nv 1 1 1\nf 1 2 3\n");
    let mut mesh = load_obj(file.path()).unwrap();
    let before = mesh.clone();

    assert!(matches!(
        mesh.normalize(&NormalizeParams::default()),
        Err(MeshError::DegenerateMesh { .. })
    ));
    assert_eq!(mesh, before);
}

// =============================================================================
// Boundary extraction on real meshes
// =============================================================================

#[test]
fn test_closed_cube_has_no_boundary() {
    let engine = HalfedgeMesh::from_mesh(&create_test_cube(1.0)).unwrap();
    assert_eq!(engine.henum(), 36);
    assert!(surface_vertices(&engine).is_empty());
}

#[test]
fn test_open_cube_boundary_is_top_rim() {
    let engine = HalfedgeMesh::from_mesh(&create_open_cube(1.0)).unwrap();
    assert_eq!(surface_vertices(&engine).to_sorted_vec(), vec![4, 5, 6, 7]);
}

#[test]
fn test_buffers_from_custom_source() {
    /// Engine without count hints holding a single triangle.
    struct OneTriangle;

    impl BufferSource for OneTriangle {
        fn fill_vertices(&self, buf: &mut [[f64; 3]]) -> usize {
            let data = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
            for (slot, v) in buf.iter_mut().zip(data) {
                *slot = v;
            }
            data.len()
        }

        fn fill_triangles(&self, buf: &mut [[u32; 3]]) -> usize {
            if let Some(slot) = buf.first_mut() {
                *slot = [0, 1, 2];
            }
            1
        }
    }

    let mut buffers = ExportBuffers::with_capacity(8);
    buffers.fill_from(&OneTriangle).unwrap();
    assert_eq!(buffers.vertices().len(), 3);
    assert_eq!(buffers.triangles(), &[[0, 1, 2]]);

    let mut tight = ExportBuffers::with_capacity(3);
    assert!(matches!(
        tight.fill_from(&OneTriangle),
        Err(MeshError::CapacityExceeded { buffer: "vertices", .. })
    ));
}
