//! ASCII STL decoding.
//!
//! Text is scanned as whitespace-delimited tokens against the facet grammar:
//!
//! ```text
//! facet normal <f> <f> <f>
//!   outer loop
//!     vertex <f> <f> <f>
//!     vertex <f> <f> <f>
//!     vertex <f> <f> <f>
//!   endloop
//! endfacet
//! ```
//!
//! Keywords are case-insensitive. Anything that does not complete the grammar
//! (the `solid`/`endsolid` wrapper, comments, broken facets) is skipped.

use nalgebra::Point3;
use tracing::{debug, warn};

/// One step of the facet grammar.
#[derive(Debug, Clone, Copy)]
enum Piece {
    Keyword(&'static str),
    Normal,
    Coord,
}

use Piece::{Coord, Keyword, Normal};

#[rustfmt::skip]
const FACET: [Piece; 21] = [
    Keyword("facet"), Keyword("normal"), Normal, Normal, Normal,
    Keyword("outer"), Keyword("loop"),
    Keyword("vertex"), Coord, Coord, Coord,
    Keyword("vertex"), Coord, Coord, Coord,
    Keyword("vertex"), Coord, Coord, Coord,
    Keyword("endloop"),
    Keyword("endfacet"),
];

/// Check for a decimal literal: optional sign, digits with an optional
/// fraction, optional exponent. Rejects `inf`, `nan` and hex forms.
fn is_decimal_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

fn parse_number(token: &str) -> Option<f32> {
    if is_decimal_literal(token) {
        token.parse().ok()
    } else {
        None
    }
}

/// Incremental matcher over the token stream.
struct FacetMatcher {
    step: usize,
    coords: [f32; 9],
    filled: usize,
    /// Facets that started but did not complete.
    abandoned: usize,
}

impl FacetMatcher {
    fn new() -> Self {
        Self {
            step: 0,
            coords: [0.0; 9],
            filled: 0,
            abandoned: 0,
        }
    }

    fn accepts(&mut self, token: &str) -> bool {
        match FACET[self.step] {
            Keyword(word) => token.eq_ignore_ascii_case(word),
            Normal => parse_number(token).is_some(),
            Coord => match parse_number(token) {
                Some(value) => {
                    self.coords[self.filled] = value;
                    self.filled += 1;
                    true
                }
                None => false,
            },
        }
    }

    /// Feed one token; returns the triangle's nine coordinates when a facet
    /// completes.
    fn feed(&mut self, token: &str) -> Option<[f32; 9]> {
        if self.accepts(token) {
            self.step += 1;
            if self.step == FACET.len() {
                self.step = 0;
                self.filled = 0;
                return Some(self.coords);
            }
            return None;
        }

        // Restart; the offending token may itself open the next facet
        if self.step > 0 {
            self.abandoned += 1;
        }
        self.filled = 0;
        self.step = if token.eq_ignore_ascii_case("facet") { 1 } else { 0 };
        None
    }
}

/// Decode ASCII STL text into a position buffer.
///
/// Every complete facet contributes its three vertices in textual order; the
/// facet normal is validated but discarded. Text without any complete facet
/// yields an empty buffer.
pub fn decode_ascii(text: &str) -> Vec<Point3<f32>> {
    let mut matcher = FacetMatcher::new();
    let mut positions = Vec::new();

    for token in text.split_whitespace() {
        if let Some(c) = matcher.feed(token) {
            positions.push(Point3::new(c[0], c[1], c[2]));
            positions.push(Point3::new(c[3], c[4], c[5]));
            positions.push(Point3::new(c[6], c[7], c[8]));
        }
    }

    if matcher.step > 0 {
        matcher.abandoned += 1;
    }
    if matcher.abandoned > 0 {
        warn!("Skipped {} malformed facets in ASCII STL", matcher.abandoned);
    }
    debug!("ASCII STL: {} facets", positions.len() / 3);

    positions
}

/// Decode ASCII STL bytes, replacing invalid UTF-8 sequences.
pub fn decode_ascii_bytes(bytes: &[u8]) -> Vec<Point3<f32>> {
    decode_ascii(&String::from_utf8_lossy(bytes))
}
