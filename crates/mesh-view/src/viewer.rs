//! Viewer session: the load pipeline's boundary with the UI and renderer.
//!
//! A load is split into [`MeshViewer::select`] (validate the pick, take a
//! ticket) and [`MeshViewer::complete`] (hand over the bytes once the read
//! finishes). Only the newest ticket may install a mesh, so a slow read that
//! finishes after a newer selection is discarded.

use std::fs::File;
use std::path::Path;

use tracing::{info, warn};

use crate::bounds::BoundingVolume;
use crate::camera::{CameraFitPlan, CameraFitPlanner};
use crate::config::ViewerConfig;
use crate::detect::RawInput;
use crate::error::{MeshError, MeshResult};
use crate::io::{check_selection, decode_stl, read_with_progress, FileSelection};
use crate::report::{log_report, report_mesh};
use crate::MeshBuffers;

/// Everything the renderer needs for one mesh. Replaced as a whole.
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub name: String,
    pub buffers: MeshBuffers,
    /// None for an empty mesh.
    pub bounds: Option<BoundingVolume>,
    /// None for an empty mesh.
    pub camera: Option<CameraFitPlan>,
}

/// Handle for one in-flight load. Consumed by [`MeshViewer::complete`].
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    name: String,
}

impl LoadTicket {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of completing a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The new mesh is now current.
    Installed,
    /// A newer selection was made, or this load already completed; the
    /// result was dropped.
    Superseded,
    /// Reading or decoding failed; the previous mesh is still current.
    Failed(String),
}

/// Holds the currently displayed mesh and arbitrates concurrent loads.
#[derive(Debug, Default)]
pub struct MeshViewer {
    config: ViewerConfig,
    planner: CameraFitPlanner,
    generation: u64,
    /// Generation of the last load that reached `complete`.
    settled: u64,
    current: Option<LoadedMesh>,
    last_error: Option<String>,
}

impl MeshViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            planner: CameraFitPlanner::new(config.clone()),
            config,
            generation: 0,
            settled: 0,
            current: None,
            last_error: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The installed mesh, if any.
    pub fn current(&self) -> Option<&LoadedMesh> {
        self.current.as_ref()
    }

    /// Camera plan of the installed mesh.
    pub fn camera_plan(&self) -> Option<&CameraFitPlan> {
        self.current.as_ref().and_then(|m| m.camera.as_ref())
    }

    /// Message for the most recent failed selection or load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of accepted selections so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validate a selection and start a load.
    ///
    /// Rejected selections leave the session untouched apart from the error
    /// message; any in-flight load stays valid.
    pub fn select(&mut self, selection: &FileSelection) -> MeshResult<LoadTicket> {
        if let Err(e) = check_selection(selection) {
            warn!("Rejected selection: {}", e);
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        self.generation += 1;
        info!("Loading {} (load #{})", selection.name, self.generation);

        Ok(LoadTicket {
            generation: self.generation,
            name: selection.name.clone(),
        })
    }

    /// Finish a load with the outcome of its read.
    pub fn complete(&mut self, ticket: LoadTicket, read: MeshResult<Vec<u8>>) -> LoadStatus {
        if ticket.generation != self.generation {
            info!(
                "Discarding {} (load #{}): superseded by load #{}",
                ticket.name, ticket.generation, self.generation
            );
            return LoadStatus::Superseded;
        }
        if ticket.generation == self.settled {
            warn!("Discarding {} (load #{}): already completed", ticket.name, ticket.generation);
            return LoadStatus::Superseded;
        }
        self.settled = ticket.generation;

        match read.and_then(|bytes| self.build(&ticket.name, &bytes)) {
            Ok(loaded) => {
                self.current = Some(loaded);
                self.last_error = None;
                LoadStatus::Installed
            }
            Err(e) => {
                warn!("Failed to load {}: {}", ticket.name, e);
                let message = e.to_string();
                self.last_error = Some(message.clone());
                LoadStatus::Failed(message)
            }
        }
    }

    /// Select, read and complete a file on disk in one call.
    pub fn load_path(
        &mut self,
        path: &Path,
        on_progress: impl FnMut(f32),
    ) -> MeshResult<LoadStatus> {
        let ticket = self.select(&FileSelection::from_path(path))?;

        let read = File::open(path)
            .map_err(|source| MeshError::ReadFailure {
                name: ticket.name.clone(),
                source,
            })
            .and_then(|file| {
                let total = file.metadata().ok().map(|m| m.len());
                read_with_progress(
                    &ticket.name,
                    file,
                    total,
                    self.config.read_chunk_size,
                    on_progress,
                )
            });

        Ok(self.complete(ticket, read))
    }

    /// Re-frame the installed mesh on explicit request.
    pub fn refit_camera(&mut self) -> Option<&CameraFitPlan> {
        let mesh = self.current.as_mut()?;
        mesh.camera = self.planner.mesh_loaded(mesh.bounds.as_ref());
        mesh.camera.as_ref()
    }

    /// Decode and frame; nothing is installed here.
    fn build(&mut self, name: &str, bytes: &[u8]) -> MeshResult<LoadedMesh> {
        let buffers = decode_stl(RawInput::new(bytes), &self.config)?;

        let report = report_mesh(&buffers);
        log_report(&report);

        let camera = self.planner.mesh_loaded(report.bounds.as_ref());

        Ok(LoadedMesh {
            name: name.to_string(),
            buffers,
            bounds: report.bounds,
            camera,
        })
    }
}
