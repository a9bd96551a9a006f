//! OBJ-style text mesh reading and writing.
//!
//! Only the subset the growth pipeline needs is understood:
//!
//! | Prefix | Read | Write | Fields |
//! |--------|------|-------|--------|
//! | `#`    | skipped | - | comment |
//! | `v`    | yes  | yes   | `x y z` |
//! | `f`    | yes  | yes   | 1-based vertex indices (`i`, `i/t`, `i//n`, `i/t/n`) |
//! | `o`    | skipped | yes | object name |
//! | `s`    | skipped | yes | always `off` |
//!
//! Any other record (`vn`, `vt`, `g`, `usemtl`, ...) is ignored on read.
//!
//! Files are written to a sibling temporary file and renamed into place once
//! the body has been flushed, so a failed export never leaves a partial file
//! at the destination. Replacing a file keeps its permissions.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, trace};

use crate::engine::{BufferSource, ExportBuffers};
use crate::error::{MeshError, MeshResult};
use crate::tracing_ext::{OperationTimer, log_io_operation, log_mesh_stats};
use crate::types::{Face, Mesh, Vertex};

/// Summary of a completed export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    /// Vertex records written.
    pub vertices: usize,
    /// Triangle records written.
    pub triangles: usize,
}

// =============================================================================
// Reading
// =============================================================================

/// Load a mesh from an OBJ file.
///
/// Face indices are converted to 0-based and checked against the vertex
/// count.
pub fn load_obj(path: &Path) -> MeshResult<Mesh> {
    let _timer = OperationTimer::new("load_obj");
    info!("Loading mesh from {:?}", path);

    let file = File::open(path).map_err(|e| {
        log_io_operation("load_obj", path, false);
        MeshError::io_read(path, e)
    })?;
    let mesh = parse_obj(BufReader::new(file), path)?;

    if let Some((face_index, vertex_index)) = mesh.first_invalid_index() {
        return Err(MeshError::invalid_vertex_index(
            face_index,
            vertex_index,
            mesh.vertex_count(),
        ));
    }

    log_io_operation("load_obj", path, true);
    log_mesh_stats(&mesh, "loaded");
    Ok(mesh)
}

/// Parse OBJ text from a reader.
///
/// `source` is only used for error reporting. Face indices are converted to
/// 0-based but not range-checked; [`load_obj`] does that.
pub fn parse_obj<R: BufRead>(reader: R, source: &Path) -> MeshResult<Mesh> {
    let mut mesh = Mesh::new();
    let mut skipped = 0usize;

    let mut reader = reader;
    let mut bytes = Vec::new();
    let mut line_no = 0usize;

    loop {
        bytes.clear();
        let n = reader
            .read_until(b'\n', &mut bytes)
            .map_err(|e| MeshError::io_read(source, e))?;
        if n == 0 {
            break;
        }
        line_no += 1;

        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            None | Some(b'#') => continue,
            Some(_) => {}
        }

        // Invalid UTF-8 on a `v` or `f` line fails the number parse below.
        let decoded = String::from_utf8_lossy(&bytes);
        let line = decoded.trim_end_matches(|c: char| c == '\n' || c == '\r');

        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };

        match tag {
            "v" => {
                let vertex = parse_vertex(tokens)
                    .map_err(|details| MeshError::parse_error(source, line_no, line, details))?;
                mesh.vertices.push(vertex);
            }
            "f" => {
                let face = parse_face(tokens)
                    .map_err(|details| MeshError::parse_error(source, line_no, line, details))?;
                mesh.faces.push(face);
            }
            other => {
                trace!(line = line_no, record = other, "Skipping OBJ record");
                skipped += 1;
            }
        }
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        skipped_records = skipped,
        "OBJ parsed"
    );

    Ok(mesh)
}

fn parse_vertex<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Vertex, String> {
    let coords = tokens
        .map(|t| {
            t.parse::<f64>()
                .map_err(|_| format!("non-numeric vertex coordinate '{}'", t))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match coords.as_slice() {
        [x, y, z, ..] => Ok(Vertex::from_coords(*x, *y, *z)),
        _ => Err(format!(
            "vertex needs 3 coordinates, found {}",
            coords.len()
        )),
    }
}

fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Face, String> {
    let face = tokens.map(parse_face_index).collect::<Result<Face, _>>()?;
    if face.len() < 3 {
        return Err(format!("face needs at least 3 vertices, found {}", face.len()));
    }
    Ok(face)
}

/// Parse one face token into a 0-based vertex index.
fn parse_face_index(token: &str) -> Result<u32, String> {
    let position = token.split('/').next().unwrap_or(token);
    let index: i64 = position
        .parse()
        .map_err(|_| format!("non-integer face index '{}'", token))?;

    if index < 1 {
        return Err(format!("face index {} is not a positive 1-based index", index));
    }
    u32::try_from(index - 1).map_err(|_| format!("face index {} is out of range", index))
}

// =============================================================================
// Writing
// =============================================================================

/// Write an OBJ body (`o`, `v` lines, `s off`, `f` lines) to `writer`.
///
/// Triangle indices are 0-based in memory and written 1-based.
pub fn write_obj<W: Write>(
    writer: &mut W,
    name: &str,
    vertices: &[[f64; 3]],
    triangles: &[[u32; 3]],
) -> std::io::Result<()> {
    writeln!(writer, "o {}", name)?;

    for [x, y, z] in vertices {
        writeln!(writer, "v {:.6} {:.6} {:.6}", x, y, z)?;
    }

    writeln!(writer, "s off")?;

    for &[a, b, c] in triangles {
        writeln!(
            writer,
            "f {} {} {}",
            u64::from(a) + 1,
            u64::from(b) + 1,
            u64::from(c) + 1
        )?;
    }

    Ok(())
}

/// Fill export buffers from an engine and write them to `path`.
///
/// `capacity` must be strictly greater than the engine's vertex and triangle
/// counts, otherwise [`MeshError::CapacityExceeded`] is returned and nothing is
/// written.
pub fn export_obj<S: BufferSource + ?Sized>(
    source: &S,
    name: &str,
    path: &Path,
    capacity: usize,
) -> MeshResult<ExportStats> {
    let mut buffers = ExportBuffers::with_capacity(capacity);
    buffers.fill_from(source)?;
    save_buffers(&buffers, name, path)
}

/// Write already-filled export buffers to `path`.
pub fn save_buffers(buffers: &ExportBuffers, name: &str, path: &Path) -> MeshResult<ExportStats> {
    let _timer = OperationTimer::new("save_obj");
    info!(
        "Storing mesh {:?} to {:?}: {} vertices, {} triangles",
        name,
        path,
        buffers.vertices().len(),
        buffers.triangles().len()
    );

    write_atomically(path, |w| {
        write_obj(w, name, buffers.vertices(), buffers.triangles())
    })?;

    Ok(ExportStats {
        vertices: buffers.vertices().len(),
        triangles: buffers.triangles().len(),
    })
}

/// Write a triangle mesh directly, without an engine in between.
///
/// Fails with [`MeshError::NonTriangularFace`] if any face is not a triangle.
pub fn save_obj(mesh: &Mesh, name: &str, path: &Path) -> MeshResult<ExportStats> {
    let _timer = OperationTimer::new("save_obj");

    let triangles = triangles_of(mesh)?;
    let vertices: Vec<[f64; 3]> = mesh.vertices.iter().map(Vertex::to_array).collect();

    write_atomically(path, |w| write_obj(w, name, &vertices, &triangles))?;

    Ok(ExportStats {
        vertices: vertices.len(),
        triangles: triangles.len(),
    })
}

fn triangles_of(mesh: &Mesh) -> MeshResult<Vec<[u32; 3]>> {
    mesh.faces
        .iter()
        .enumerate()
        .map(|(i, face)| match face.as_slice() {
            &[a, b, c] => Ok([a, b, c]),
            other => Err(MeshError::NonTriangularFace {
                face_index: i,
                len: other.len(),
            }),
        })
        .collect()
}

/// Run `body` against a buffered temp file next to `path`, then rename it
/// onto `path`. The temp file is removed if anything fails.
///
/// A replaced file keeps its permissions; a new one gets the process default.
fn write_atomically<F>(path: &Path, body: F) -> MeshResult<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> std::io::Result<()>,
{
    let fail = |e: std::io::Error| {
        log_io_operation("save_obj", path, false);
        MeshError::io_write(path, e)
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".diffmesh-").suffix(".tmp");
    // Same mode `File::create` would give, still subject to the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(fail)?;
    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms).map_err(fail)?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        body(&mut writer).map_err(fail)?;
        writer.flush().map_err(fail)?;
    }
    tmp.as_file().sync_all().map_err(fail)?;
    tmp.persist(path).map_err(|e| fail(e.error))?;

    log_io_operation("save_obj", path, true);
    Ok(())
}
