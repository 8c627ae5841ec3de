//! Validator configuration.
//!
//! The defaults match what the upload pipeline has always used; callers that
//! keep settings in a file can deserialize a [`ValidatorConfig`] with any
//! serde format, missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

/// Head bytes inspected by the delimiter/line-break heuristic.
pub const DEFAULT_CSV_SNIFF_BYTES: usize = 4096;
/// Head bytes handed to the charset detector.
pub const DEFAULT_CHARSET_SAMPLE_BYTES: usize = 1_000_000;
/// Chunk size of the whole-file UTF-8 confirmation pass.
pub const DEFAULT_DECODE_BUFFER_SIZE: usize = 8192;
/// Name prefix of scratch copies made from uploaded streams.
pub const DEFAULT_TEMP_PREFIX: &str = "upload-";

/// Tunables for [`TemplateValidator`](crate::TemplateValidator).
///
/// # Examples
///
/// ```rust
/// use tabgate::ValidatorConfig;
///
/// let config = ValidatorConfig::new()
///     .with_charset_sample_bytes(64 * 1024)
///     .with_temp_prefix("tpl-");
/// assert_eq!(config.csv_sniff_bytes, 4096);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Bytes sampled for CSV content sniffing and MIME detection
    pub csv_sniff_bytes: usize,
    /// Bytes sampled for charset detection
    pub charset_sample_bytes: usize,
    /// Buffer size of the streaming UTF-8 decode
    pub decode_buffer_size: usize,
    /// Prefix for scratch copies of uploads
    pub temp_prefix: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            csv_sniff_bytes: DEFAULT_CSV_SNIFF_BYTES,
            charset_sample_bytes: DEFAULT_CHARSET_SAMPLE_BYTES,
            decode_buffer_size: DEFAULT_DECODE_BUFFER_SIZE,
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Create a configuration with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_csv_sniff_bytes(mut self, bytes: usize) -> Self {
        self.csv_sniff_bytes = bytes.max(1);
        self
    }

    #[inline]
    pub fn with_charset_sample_bytes(mut self, bytes: usize) -> Self {
        self.charset_sample_bytes = bytes.max(1);
        self
    }

    /// Set the decode chunk size. Values below 16 bytes are raised to 16.
    #[inline]
    pub fn with_decode_buffer_size(mut self, bytes: usize) -> Self {
        self.decode_buffer_size = bytes.max(16);
        self
    }

    #[inline]
    pub fn with_temp_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.temp_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{"charset_sample_bytes": 2048}"#).unwrap();
        assert_eq!(config.charset_sample_bytes, 2048);
        assert_eq!(config.csv_sniff_bytes, DEFAULT_CSV_SNIFF_BYTES);
        assert_eq!(config.temp_prefix, DEFAULT_TEMP_PREFIX);
    }

    #[test]
    fn test_builder_clamps() {
        let config = ValidatorConfig::new()
            .with_decode_buffer_size(0)
            .with_csv_sniff_bytes(0);
        assert_eq!(config.decode_buffer_size, 16);
        assert_eq!(config.csv_sniff_bytes, 1);
    }
}
