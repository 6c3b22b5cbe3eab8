//! File selection, byte reading and STL decoding.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::ascii::decode_ascii_bytes;
use crate::binary::decode_binary;
use crate::config::ViewerConfig;
use crate::detect::{RawInput, StlEncoding};
use crate::error::{MeshError, MeshResult};
use crate::MeshBuffers;

/// Media type registered for STL.
pub const STL_MEDIA_TYPE: &str = "model/stl";

/// A file the user picked, before any bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    /// File name as shown to the user.
    pub name: String,

    /// Declared media type, if the host supplied one.
    pub media_type: Option<String>,
}

impl FileSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Selection for a path on disk, named by its file name.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name)
    }

    fn has_stl_extension(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"))
    }

    fn has_stl_media_type(&self) -> bool {
        self.media_type.as_deref().is_some_and(|m| {
            m.split(';')
                .next()
                .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(STL_MEDIA_TYPE))
        })
    }
}

/// Accept `.stl` names (any case) or the `model/stl` media type.
pub fn check_selection(selection: &FileSelection) -> MeshResult<()> {
    if selection.has_stl_extension() || selection.has_stl_media_type() {
        Ok(())
    } else {
        Err(MeshError::UnsupportedSelection {
            name: selection.name.clone(),
            media_type: selection.media_type.clone(),
        })
    }
}

/// Read everything from `reader`, reporting progress after each chunk.
///
/// `on_progress` receives a ratio in `[0, 1]`; intermediate ratios are only
/// reported when `total_len` is known. A final `1.0` is reported on success.
pub fn read_with_progress<R: Read>(
    name: &str,
    mut reader: R,
    total_len: Option<u64>,
    chunk_size: usize,
    mut on_progress: impl FnMut(f32),
) -> MeshResult<Vec<u8>> {
    let read_failure = |source| MeshError::ReadFailure {
        name: name.to_string(),
        source,
    };

    let capacity = total_len.and_then(|n| usize::try_from(n).ok()).unwrap_or(0);
    let mut bytes = Vec::with_capacity(capacity);
    let mut chunk = vec![0u8; chunk_size.max(1)];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_failure(e)),
        };
        bytes.extend_from_slice(&chunk[..n]);

        if let Some(total) = total_len.filter(|&t| t > 0) {
            on_progress((bytes.len() as f64 / total as f64).min(1.0) as f32);
        }
    }

    on_progress(1.0);
    debug!("Read {} bytes from {}", bytes.len(), name);

    Ok(bytes)
}

/// Decode STL bytes, auto-detecting the encoding.
pub fn decode_stl(input: RawInput<'_>, config: &ViewerConfig) -> MeshResult<MeshBuffers> {
    let encoding = input.encoding();

    let positions = match encoding {
        StlEncoding::Binary => decode_binary(input.bytes())?,
        StlEncoding::Ascii => {
            let positions = decode_ascii_bytes(input.bytes());
            if positions.is_empty() {
                if config.reject_empty_text {
                    return Err(MeshError::MalformedText);
                }
                warn!("ASCII STL has no readable facets; accepting empty mesh");
            }
            positions
        }
    };

    let buffers = MeshBuffers::from_positions(positions);

    info!(
        "Decoded {:?} STL: {} triangles",
        encoding,
        buffers.triangle_count()
    );

    Ok(buffers)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailAfter {
        remaining: usize,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.remaining == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "stream dropped",
                ));
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(b'x');
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_selection_by_extension() {
        assert!(check_selection(&FileSelection::new("part.stl")).is_ok());
        assert!(check_selection(&FileSelection::new("PART.STL")).is_ok());
        assert!(check_selection(&FileSelection::new("dir.v2/part.Stl")).is_ok());
    }

    #[test]
    fn test_selection_by_media_type() {
        let sel = FileSelection::new("download").with_media_type("model/stl");
        assert!(check_selection(&sel).is_ok());
        let sel = FileSelection::new("blob").with_media_type("Model/STL; charset=binary");
        assert!(check_selection(&sel).is_ok());
    }

    #[test]
    fn test_selection_rejected() {
        for sel in [
            FileSelection::new("part.obj"),
            FileSelection::new("stl"),
            FileSelection::new("part.stl.zip"),
            FileSelection::new("image.png").with_media_type("image/png"),
        ] {
            let err = check_selection(&sel).expect_err("should reject");
            assert!(err.is_selection_error());
        }
    }

    #[test]
    fn test_read_reports_progress() {
        let data = vec![7u8; 10];
        let mut ratios = Vec::new();
        let bytes = read_with_progress("t.stl", &data[..], Some(10), 4, |r| ratios.push(r))
            .expect("should read");

        assert_eq!(bytes, data);
        assert_eq!(ratios, vec![0.4, 0.8, 1.0, 1.0]);
    }

    #[test]
    fn test_read_unknown_length_reports_only_completion() {
        let data = vec![1u8; 10];
        let mut ratios = Vec::new();
        read_with_progress("t.stl", &data[..], None, 3, |r| ratios.push(r)).expect("should read");
        assert_eq!(ratios, vec![1.0]);
    }

    #[test]
    fn test_read_failure() {
        let mut ratios = Vec::new();
        let err = read_with_progress("t.stl", FailAfter { remaining: 5 }, Some(10), 2, |r| {
            ratios.push(r)
        })
        .expect_err("should fail");

        assert!(matches!(err, MeshError::ReadFailure { .. }));
        assert!(!ratios.contains(&1.0));
    }

    #[test]
    fn test_decode_empty_ascii() {
        let input = RawInput::new(b"solid nothing\nendsolid nothing\n");
        let buffers = decode_stl(input, &ViewerConfig::default()).expect("accepted");
        assert!(buffers.is_empty());

        let strict = ViewerConfig {
            reject_empty_text: true,
            ..ViewerConfig::default()
        };
        assert!(matches!(
            decode_stl(input, &strict),
            Err(MeshError::MalformedText)
        ));
    }

    #[test]
    fn test_decode_declared_binary() {
        let mut bytes = b"solid but actually binary".to_vec();
        bytes.resize(84, 0);
        let buffers = decode_stl(RawInput::binary(&bytes), &ViewerConfig::default())
            .expect("zero-triangle binary");
        assert!(buffers.is_empty());
    }
}
