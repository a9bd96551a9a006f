#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Write;
use tempfile::NamedTempFile;

fuzz_target!(|data: &[u8]| {
    let mut file = match NamedTempFile::with_suffix(".obj") {
        Ok(f) => f,
        Err(_) => return,
    };

    if file.write_all(data).is_err() {
        return;
    }

    // Loading must never panic, and anything that loads must survive the
    // rest of the pipeline without panicking either.
    let Ok(mut mesh) = diffmesh::load_obj(file.path()) else {
        return;
    };
    let _ = mesh.normalize(&diffmesh::NormalizeParams::default());
    if let Ok(engine) = mesh.to_halfedge() {
        let _ = diffmesh::surface_vertices(&engine);
        let mut buffers = diffmesh::ExportBuffers::with_capacity(1024);
        let _ = buffers.fill_from(&engine);
    }
});
