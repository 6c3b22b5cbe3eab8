//! Viewer configuration.
//!
//! With the `config` feature the struct can be read from and written to TOML
//! or JSON. Missing keys take their default values.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "config")]
use crate::error::{MeshError, MeshResult};

/// Tunables for loading and framing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ViewerConfig {
    /// Camera distance as a multiple of the largest mesh dimension.
    pub fit_distance_factor: f32,

    /// Direction from the mesh center toward the camera. Normalized at use;
    /// a zero vector falls back to `[1, 1, 1]`.
    pub view_direction: [f32; 3],

    /// Treat ASCII input with no readable facets as an error instead of an
    /// empty mesh.
    pub reject_empty_text: bool,

    /// Bytes read per chunk; one progress report is emitted per chunk.
    pub read_chunk_size: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fit_distance_factor: 2.5,
            view_direction: [1.0, 1.0, 1.0],
            reject_empty_text: false,
            read_chunk_size: 64 * 1024,
        }
    }
}

#[cfg(feature = "config")]
impl ViewerConfig {
    /// Parse from a TOML string.
    pub fn from_toml(s: &str) -> MeshResult<Self> {
        toml::from_str(s).map_err(|e| MeshError::Config {
            details: e.to_string(),
        })
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> MeshResult<String> {
        toml::to_string_pretty(self).map_err(|e| MeshError::Config {
            details: e.to_string(),
        })
    }

    /// Parse from a JSON string.
    pub fn from_json(s: &str) -> MeshResult<Self> {
        serde_json::from_str(s).map_err(|e| MeshError::Config {
            details: e.to_string(),
        })
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> MeshResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MeshError::Config {
            details: e.to_string(),
        })
    }
}
