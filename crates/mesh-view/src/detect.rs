//! Binary/ASCII classification of raw STL bytes.

use tracing::debug;

/// Length of the binary STL header, and of the prefix inspected for `solid`.
pub const HEADER_LEN: usize = 80;

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlEncoding {
    Binary,
    Ascii,
}

/// Bytes of one uploaded file, optionally already known to be binary.
#[derive(Debug, Clone, Copy)]
pub struct RawInput<'a> {
    bytes: &'a [u8],
    declared_binary: bool,
}

impl<'a> RawInput<'a> {
    /// Untyped bytes; the encoding is sniffed from the header.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            declared_binary: false,
        }
    }

    /// Bytes that arrived as a typed binary buffer; always decoded as binary.
    pub fn binary(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            declared_binary: true,
        }
    }

    /// The underlying bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Classify this input.
    pub fn encoding(&self) -> StlEncoding {
        if self.declared_binary {
            StlEncoding::Binary
        } else {
            detect_encoding(self.bytes)
        }
    }
}

/// Classify bytes as ASCII or binary STL.
///
/// The first 80 bytes are read as single-byte characters and trimmed; only a
/// prefix of `solid` means ASCII. A binary file whose header happens to start
/// with `solid` is misclassified: the format has no reliable discriminator.
pub fn detect_encoding(bytes: &[u8]) -> StlEncoding {
    let prefix = &bytes[..bytes.len().min(HEADER_LEN)];
    let header: String = prefix.iter().map(|&b| char::from(b)).collect();

    let encoding = if header.trim().starts_with("solid") {
        StlEncoding::Ascii
    } else {
        StlEncoding::Binary
    };

    debug!("Detected {:?} STL from {} header bytes", encoding, prefix.len());
    encoding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_prefix_is_ascii() {
        assert_eq!(detect_encoding(b"solid cube\nfacet normal"), StlEncoding::Ascii);
        assert_eq!(detect_encoding(b"  \r\n\tsolid"), StlEncoding::Ascii);
    }

    #[test]
    fn test_other_headers_are_binary() {
        let mut header = vec![0u8; 84];
        header[..6].copy_from_slice(b"binary");
        assert_eq!(detect_encoding(&header), StlEncoding::Binary);
        assert_eq!(detect_encoding(b""), StlEncoding::Binary);
        // Case-sensitive, like the file format convention
        assert_eq!(detect_encoding(b"SOLID part"), StlEncoding::Binary);
    }

    #[test]
    fn test_only_first_80_bytes_are_inspected() {
        let mut bytes = vec![b' '; 100];
        bytes[85..90].copy_from_slice(b"solid");
        assert_eq!(detect_encoding(&bytes), StlEncoding::Binary);
    }

    #[test]
    fn test_binary_header_starting_with_solid_is_misread() {
        let mut bytes = vec![0u8; 134];
        bytes[..11].copy_from_slice(b"solid-works");
        bytes[80] = 1;
        assert_eq!(detect_encoding(&bytes), StlEncoding::Ascii);
    }

    #[test]
    fn test_declared_binary_skips_sniffing() {
        let input = RawInput::binary(b"solid looks like text");
        assert_eq!(input.encoding(), StlEncoding::Binary);
        assert_eq!(RawInput::new(b"solid x").encoding(), StlEncoding::Ascii);
    }
}
