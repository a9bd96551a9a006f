//! Tracing helpers for mesh operations.
//!
//! Enable output by installing a subscriber in your application:
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // RUST_LOG=diffmesh=debug for bounding boxes and record counts
//! ```
//!
//! # Targets
//!
//! - `diffmesh::timing`: operation start and elapsed time, inside a
//!   `mesh_operation` span carrying the operation name
//! - `diffmesh::mesh_state`: vertex/face counts and bounding boxes
//! - `diffmesh::io`: file reads and writes

use std::time::Instant;
use tracing::span::EnteredSpan;
use tracing::{debug, info, info_span, trace, warn};

use crate::bounds::BoundingBox;

/// Scope guard for one mesh operation.
///
/// Enters a `mesh_operation` span for its lifetime, so every event logged
/// while it is alive carries the operation name, and logs the elapsed time
/// when dropped.
///
/// ```rust,ignore
/// fn load() {
///     let _timer = OperationTimer::new("load_obj");
///     // events here are recorded inside the `load_obj` span
/// } // elapsed_ms logged here
/// ```
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    // Dropped after `Drop::drop`, so the completion event is still in the span.
    _entered: EnteredSpan,
}

impl OperationTimer {
    /// Enter the span for `name` and start the clock.
    pub fn new(name: &'static str) -> Self {
        let entered = info_span!("mesh_operation", operation = name).entered();
        trace!(target: "diffmesh::timing", "Operation started");
        Self {
            name,
            start: Instant::now(),
            _entered: entered,
        }
    }

    /// Elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        info!(
            target: "diffmesh::timing",
            operation = self.name,
            elapsed_ms = self.elapsed_ms(),
            "Operation finished"
        );
    }
}

/// Log vertex and face counts plus the bounding box at debug level.
pub fn log_mesh_stats(mesh: &crate::Mesh, context: &str) {
    match mesh.bounds() {
        Some(bounds) => {
            let d = bounds.extents();
            debug!(
                target: "diffmesh::mesh_state",
                context = context,
                vertices = mesh.vertex_count(),
                faces = mesh.face_count(),
                dimensions = format!("{:.4} x {:.4} x {:.4}", d.x, d.y, d.z),
                "Mesh state"
            );
        }
        None => debug!(
            target: "diffmesh::mesh_state",
            context = context,
            vertices = 0,
            faces = mesh.face_count(),
            "Mesh state (empty)"
        ),
    }
}

/// Log per-axis min, max and extent of a bounding box at info level.
pub fn log_bounds(context: &str, bounds: &BoundingBox) {
    let d = bounds.extents();
    for (axis, min, max, dst) in [
        ("x", bounds.min.x, bounds.max.x, d.x),
        ("y", bounds.min.y, bounds.max.y, d.y),
        ("z", bounds.min.z, bounds.max.z, d.z),
    ] {
        info!(
            target: "diffmesh::mesh_state",
            context = context,
            axis = axis,
            min = format!("{:.8}", min),
            max = format!("{:.8}", max),
            extent = format!("{:.8}", dst),
            "Bounds"
        );
    }
}

/// Log a file I/O operation.
pub fn log_io_operation(operation: &str, path: &std::path::Path, success: bool) {
    if success {
        info!(
            target: "diffmesh::io",
            operation = operation,
            path = path.display().to_string(),
            "I/O operation completed"
        );
    } else {
        warn!(
            target: "diffmesh::io",
            operation = operation,
            path = path.display().to_string(),
            "I/O operation failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mesh, Vertex};

    #[test]
    fn test_operation_timer() {
        let timer = OperationTimer::new("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 10.0);
    }

    #[test]
    fn test_timer_scopes_events_to_its_span() {
        use tracing::Span;

        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            assert!(Span::current().metadata().is_none());

            let timer = OperationTimer::new("normalize");
            let name = Span::current().metadata().map(|m| m.name());
            assert_eq!(name, Some("mesh_operation"));

            drop(timer);
            assert!(Span::current().metadata().is_none());
        });
    }

    #[test]
    fn test_log_helpers_accept_empty_and_populated_meshes() {
        log_mesh_stats(&Mesh::new(), "empty");

        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 2.0, 3.0));
        log_mesh_stats(&mesh, "two points");
        log_bounds("two points", &mesh.bounds().unwrap());
    }
}
