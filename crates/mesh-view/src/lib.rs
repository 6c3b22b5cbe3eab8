//! STL decoding and camera framing for mesh viewers.
//!
//! This crate turns the bytes of an STL file (binary or ASCII) into
//! renderer-agnostic buffers and the data needed to frame them:
//!
//! - **Detection**: binary vs ASCII from the 80-byte header
//! - **Decoding**: fixed binary records, or a tolerant ASCII facet scanner
//! - **Normals**: smooth per-vertex normals synthesized from geometry
//! - **Framing**: bounding volume, center, and a one-shot camera fit
//!
//! # Example
//!
//! ```no_run
//! use mesh_view::{MeshViewer, ViewerConfig};
//!
//! let mut viewer = MeshViewer::new(ViewerConfig::default());
//! viewer
//!     .load_path("model.stl".as_ref(), |ratio| println!("{:.0}%", ratio * 100.0))
//!     .unwrap();
//!
//! if let Some(plan) = viewer.camera_plan() {
//!     println!("camera at {:?} looking at {:?}", plan.position, plan.look_at);
//! }
//! ```

mod error;
mod types;

pub mod ascii;
pub mod binary;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod detect;
pub mod io;
pub mod normals;
pub mod report;
pub mod viewer;

// Re-export core types at crate root
pub use error::{MeshError, MeshResult};
pub use types::{MeshBuffers, Triangle};

// Re-export commonly used items
pub use ascii::decode_ascii;
pub use binary::decode_binary;
pub use bounds::BoundingVolume;
pub use camera::{fit_camera, CameraFitPlan, CameraFitPlanner};
pub use config::ViewerConfig;
pub use detect::{detect_encoding, RawInput, StlEncoding};
pub use io::{check_selection, decode_stl, read_with_progress, FileSelection};
pub use normals::compute_vertex_normals;
pub use report::{report_mesh, MeshReport};
pub use viewer::{LoadStatus, LoadTicket, LoadedMesh, MeshViewer};

// Convenience methods on MeshBuffers
impl MeshBuffers {
    /// Decode STL bytes with default settings.
    pub fn from_stl_bytes(bytes: &[u8]) -> MeshResult<Self> {
        io::decode_stl(RawInput::new(bytes), &ViewerConfig::default())
    }

    /// Compute the bounding volume, or None if empty.
    pub fn bounds(&self) -> Option<BoundingVolume> {
        BoundingVolume::from_points(&self.positions)
    }

    /// Summarize the mesh.
    pub fn report(&self) -> MeshReport {
        report::report_mesh(self)
    }
}
