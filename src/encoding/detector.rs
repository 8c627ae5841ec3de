//! Charset detection.

use chardetng::EncodingDetector;
use serde::{Deserialize, Serialize};

/// A detector's best guess for a byte sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetMatch {
    /// Charset name as the detector reports it (e.g. `"EUC-KR"`)
    pub name: String,
    /// 0-100; zero means "no usable match"
    pub confidence: u8,
}

impl CharsetMatch {
    pub fn new<S: Into<String>>(name: S, confidence: u8) -> Self {
        Self {
            name: name.into(),
            confidence: confidence.min(100),
        }
    }
}

/// Guesses the charset of a byte sample.
pub trait CharsetDetector {
    /// Best match for `sample`, or `None` when nothing can be said.
    fn detect(&self, sample: &[u8]) -> Option<CharsetMatch>;
}

impl<T: CharsetDetector + ?Sized> CharsetDetector for &T {
    fn detect(&self, sample: &[u8]) -> Option<CharsetMatch> {
        (**self).detect(sample)
    }
}

/// Confidence reported when the sample contained non-ASCII bytes.
const NON_ASCII_CONFIDENCE: u8 = 90;
/// Confidence reported for pure ASCII, which every candidate decodes alike.
const ASCII_CONFIDENCE: u8 = 10;

/// [`CharsetDetector`] backed by `chardetng`.
///
/// UTF-8 is allowed as a guess; no top-level-domain hint is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticalCharsetDetector;

impl StatisticalCharsetDetector {
    pub fn new() -> Self {
        Self
    }
}

impl CharsetDetector for StatisticalCharsetDetector {
    fn detect(&self, sample: &[u8]) -> Option<CharsetMatch> {
        if sample.is_empty() {
            return None;
        }

        let mut detector = EncodingDetector::new();
        let saw_non_ascii = detector.feed(sample, true);
        let encoding = detector.guess(None, true);
        let confidence = if saw_non_ascii {
            NON_ASCII_CONFIDENCE
        } else {
            ASCII_CONFIDENCE
        };

        Some(CharsetMatch::new(encoding.name(), confidence))
    }
}
