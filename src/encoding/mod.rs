//! Text encoding detection and normalization for CSV templates.
//!
//! A [`CharsetDetector`] makes a statistical guess from the head of the
//! file; the [`EncodingNormalizer`] turns that guess into one of the two
//! accepted [`CanonicalEncoding`]s or rejects the file.

pub mod detector;
pub mod normalize;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use detector::{CharsetDetector, CharsetMatch, StatisticalCharsetDetector};
pub use normalize::EncodingNormalizer;

/// The encodings a CSV template may be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalEncoding {
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "UTF-8 (with BOM)")]
    Utf8WithBom,
}

impl CanonicalEncoding {
    /// Display label, `"UTF-8"` or `"UTF-8 (with BOM)"`.
    pub const fn label(self) -> &'static str {
        match self {
            CanonicalEncoding::Utf8 => "UTF-8",
            CanonicalEncoding::Utf8WithBom => "UTF-8 (with BOM)",
        }
    }

    /// Map a detector charset name onto a canonical encoding, if it is one.
    ///
    /// Comparison ignores ASCII case. `UTF-8-SIG` is the common name for
    /// UTF-8 with a signature.
    pub fn from_charset_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("UTF-8") {
            Some(CanonicalEncoding::Utf8)
        } else if name.eq_ignore_ascii_case("UTF-8-SIG")
            || name.eq_ignore_ascii_case(CanonicalEncoding::Utf8WithBom.label())
        {
            Some(CanonicalEncoding::Utf8WithBom)
        } else {
            None
        }
    }
}

impl fmt::Display for CanonicalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
