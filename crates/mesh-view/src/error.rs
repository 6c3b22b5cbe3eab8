//! Error types for loading and framing meshes.

use thiserror::Error;

/// Result type alias for mesh loading operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while selecting, reading or decoding an STL file.
///
/// The `Display` output of every variant is suitable for showing to a user.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The selected file is not recognized as STL.
    #[error("unsupported file {name:?}: expected a .stl file or model/stl media type")]
    UnsupportedSelection {
        name: String,
        media_type: Option<String>,
    },

    /// Reading the file's bytes did not complete.
    #[error("failed to read {name}: {source}")]
    ReadFailure {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Binary header declares more triangles than the buffer holds.
    #[error(
        "truncated binary STL: header declares {declared_triangles} triangles \
         ({expected_len} bytes) but only {actual_len} bytes are present"
    )]
    TruncatedInput {
        declared_triangles: u32,
        expected_len: u64,
        actual_len: u64,
    },

    /// ASCII input contained no well-formed facets.
    #[error("ASCII STL contains no readable facets")]
    MalformedText,

    /// Configuration could not be parsed or serialized.
    #[error("invalid viewer configuration: {details}")]
    Config { details: String },
}

impl MeshError {
    /// True for failures that happen before any bytes are decoded.
    pub fn is_selection_error(&self) -> bool {
        matches!(self, MeshError::UnsupportedSelection { .. })
    }
}
