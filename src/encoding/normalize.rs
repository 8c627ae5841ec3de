//! Reduce a charset guess to an accepted encoding.
//!
//! Order of evidence:
//!
//! 1. A UTF-8 byte-order mark wins over anything the detector said
//! 2. No guess at all is a failure
//! 3. A guess that already names UTF-8 is taken as is
//! 4. Any other guess is checked by decoding the whole file strictly as
//!    UTF-8; statistical detectors often mistake short UTF-8 files for a
//!    legacy code page

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use encoding_rs::{DecoderResult, UTF_8};
use tracing::debug;

use super::CanonicalEncoding;
use crate::common::bom;
use crate::common::config::DEFAULT_DECODE_BUFFER_SIZE;
use crate::common::error::{Result, ValidationError};
use crate::common::sample;

/// Bytes inspected for a byte-order mark.
const BOM_PROBE_BYTES: usize = 4;

/// Turns a detected charset name into a [`CanonicalEncoding`].
#[derive(Debug, Clone)]
pub struct EncodingNormalizer {
    buffer_size: usize,
}

impl Default for EncodingNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_DECODE_BUFFER_SIZE)
    }
}

impl EncodingNormalizer {
    /// Normalizer whose strict decode reads `buffer_size` bytes at a time.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(16),
        }
    }

    /// Decide the encoding of the file at `path` given the detector's guess.
    pub fn normalize(&self, detected: Option<&str>, path: &Path) -> Result<CanonicalEncoding> {
        let head = match sample::read_head(path, BOM_PROBE_BYTES) {
            Ok(head) => head,
            Err(err) => {
                debug!(error = %err, "could not read head for BOM check");
                return Err(match detected {
                    Some(name) => ValidationError::EncodingInvalid(name.to_string()),
                    None => ValidationError::EncodingUndetermined,
                });
            },
        };
        if bom::has_utf8_bom(head.as_bytes()) {
            return Ok(CanonicalEncoding::Utf8WithBom);
        }

        let name = detected.ok_or(ValidationError::EncodingUndetermined)?;
        if let Some(encoding) = CanonicalEncoding::from_charset_name(name) {
            return Ok(encoding);
        }

        let strict = File::open(path).and_then(|file| self.is_strict_utf8(file));
        match strict {
            Ok(true) => {
                debug!(detected = name, "strict UTF-8 decode overrides detector guess");
                Ok(CanonicalEncoding::Utf8)
            },
            Ok(false) => Err(ValidationError::EncodingInvalid(name.to_string())),
            Err(err) => {
                debug!(error = %err, "strict UTF-8 decode failed to read");
                Err(ValidationError::EncodingInvalid(name.to_string()))
            },
        }
    }

    /// Whether everything `reader` yields is well-formed UTF-8.
    ///
    /// Streams in fixed-size chunks; sequences split across chunk
    /// boundaries are carried over by the decoder.
    pub fn is_strict_utf8<R: Read>(&self, mut reader: R) -> io::Result<bool> {
        let mut decoder = UTF_8.new_decoder_without_bom_handling();
        let mut input = vec![0u8; self.buffer_size];
        // Worst case expands every input byte to three output bytes
        let mut output = String::with_capacity(self.buffer_size * 3 + 16);

        loop {
            let read = match reader.read(&mut input) {
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            let last = read == 0;
            let mut chunk = &input[..read];

            loop {
                output.clear();
                let (result, consumed) =
                    decoder.decode_to_string_without_replacement(chunk, &mut output, last);
                chunk = &chunk[consumed..];
                match result {
                    DecoderResult::InputEmpty => break,
                    DecoderResult::Malformed(_, _) => return Ok(false),
                    DecoderResult::OutputFull => continue,
                }
            }

            if last {
                return Ok(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::io::Cursor;

    fn normalize(bytes: &[u8], detected: Option<&str>) -> Result<CanonicalEncoding> {
        let file = fixtures::temp_file(bytes, "data.csv");
        EncodingNormalizer::default().normalize(detected, file.path())
    }

    #[test]
    fn test_bom_wins() {
        let got = normalize(b"\xEF\xBB\xBFa,b\n", Some("EUC-KR")).unwrap();
        assert_eq!(got, CanonicalEncoding::Utf8WithBom);
        let got = normalize(b"\xEF\xBB\xBFa,b\n", None).unwrap();
        assert_eq!(got, CanonicalEncoding::Utf8WithBom);
    }

    #[test]
    fn test_no_guess() {
        assert!(matches!(
            normalize(b"a,b\n", None),
            Err(ValidationError::EncodingUndetermined)
        ));
    }

    #[test]
    fn test_utf8_names() {
        assert_eq!(normalize(b"a,b\n", Some("utf-8")).unwrap(), CanonicalEncoding::Utf8);
        assert_eq!(
            normalize(b"a,b\n", Some("UTF-8-SIG")).unwrap(),
            CanonicalEncoding::Utf8WithBom
        );
    }

    #[test]
    fn test_strict_decode_overrides_guess() {
        let got = normalize("naïve,café\n".as_bytes(), Some("windows-1252")).unwrap();
        assert_eq!(got, CanonicalEncoding::Utf8);
    }

    #[test]
    fn test_invalid_utf8_reports_detected_name() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("이름,나이\n홍길동,30\n");
        match normalize(&bytes, Some("EUC-KR")) {
            Err(ValidationError::EncodingInvalid(name)) => assert_eq!(name, "EUC-KR"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = EncodingNormalizer::default()
            .normalize(Some("EUC-KR"), Path::new("/no/such/file.csv"));
        assert!(matches!(result, Err(ValidationError::EncodingInvalid(_))));
    }

    #[test]
    fn test_sequences_split_across_chunks() {
        let text = "가".repeat(100);
        let normalizer = EncodingNormalizer::new(16);
        assert!(normalizer.is_strict_utf8(Cursor::new(text.as_bytes())).unwrap());

        let mut truncated = text.into_bytes();
        truncated.pop();
        assert!(!normalizer.is_strict_utf8(Cursor::new(truncated)).unwrap());
    }
}
