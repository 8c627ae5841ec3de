//! Template validation entry point.
//!
//! [`TemplateValidator`] ties the pieces together for one file:
//!
//! 1. sniff the MIME type and refine generic OOXML containers
//! 2. classify the file as CSV, Excel or unsupported
//! 3. CSV: settle the encoding and make sure there is a line to read;
//!    Excel: run the shallow structural check for the extension
//!
//! Every entry point returns a [`ValidationResult`]; failures never escape
//! as errors or panics.
//!
//! # Example
//!
//! ```rust,no_run
//! use tabgate::{MemoryUpload, TemplateValidator};
//!
//! let validator = TemplateValidator::new();
//! let upload = MemoryUpload::new(b"name,age\nkim,30\n".to_vec()).with_filename("people.csv");
//! let result = validator.validate_upload(&upload);
//! assert!(result.is_ok());
//! println!("{}", result);
//! ```

mod cleanup;
mod result;
mod upload;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use chrono::Local;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use self::cleanup::{RemoveOnDrop, discard_temp};
use crate::common::config::ValidatorConfig;
use crate::common::error::{Result, ValidationError};
use crate::common::{mime, sample};
use crate::detection::{FileType, MimeSniffer, SignatureSniffer, TypeClassifier, detect_mime};
use crate::encoding::{CharsetDetector, EncodingNormalizer, StatisticalCharsetDetector};
use crate::excel::ExcelStructuralValidator;

pub use result::ValidationResult;
pub use upload::{MemoryUpload, PathUpload, UploadedFile};

/// Validates CSV and Excel template uploads.
///
/// The MIME sniffer and charset detector are pluggable; the defaults are
/// [`SignatureSniffer`] and [`StatisticalCharsetDetector`]. A validator
/// holds no per-call state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct TemplateValidator<M = SignatureSniffer, C = StatisticalCharsetDetector> {
    config: ValidatorConfig,
    sniffer: M,
    charset_detector: C,
    classifier: TypeClassifier,
    normalizer: EncodingNormalizer,
    excel: ExcelStructuralValidator,
}

impl Default for TemplateValidator {
    fn default() -> Self {
        Self::with_config(ValidatorConfig::default())
    }
}

impl TemplateValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator using the default collaborators tuned by `config`.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            sniffer: SignatureSniffer::new().with_head_bytes(config.csv_sniff_bytes),
            charset_detector: StatisticalCharsetDetector::new(),
            classifier: TypeClassifier::new(config.csv_sniff_bytes),
            normalizer: EncodingNormalizer::new(config.decode_buffer_size),
            excel: ExcelStructuralValidator::new(),
            config,
        }
    }
}

impl<M, C> TemplateValidator<M, C> {
    /// Replace the MIME sniffer.
    pub fn with_sniffer<S: MimeSniffer>(self, sniffer: S) -> TemplateValidator<S, C> {
        TemplateValidator {
            config: self.config,
            sniffer,
            charset_detector: self.charset_detector,
            classifier: self.classifier,
            normalizer: self.normalizer,
            excel: self.excel,
        }
    }

    /// Replace the charset detector.
    pub fn with_charset_detector<D: CharsetDetector>(self, detector: D) -> TemplateValidator<M, D> {
        TemplateValidator {
            config: self.config,
            sniffer: self.sniffer,
            charset_detector: detector,
            classifier: self.classifier,
            normalizer: self.normalizer,
            excel: self.excel,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

impl<M: MimeSniffer, C: CharsetDetector> TemplateValidator<M, C> {
    /// Validate an uploaded stream.
    ///
    /// The content is copied to a scratch file that is removed before this
    /// returns, whatever the outcome.
    pub fn validate_upload(&self, upload: &dyn UploadedFile) -> ValidationResult {
        let filename = upload.original_filename();
        if upload.is_empty() {
            return self.report(Err(ValidationError::EmptyInput), filename);
        }

        let temp = match self.copy_to_temp(upload) {
            Ok(temp) => temp,
            Err(err) => return self.report(Err(err.into()), filename),
        };
        let outcome = self.run(temp.path(), filename);
        discard_temp(temp);
        self.report(outcome, filename)
    }

    /// Validate a file on disk uploaded as `original_name`.
    ///
    /// With `delete_after` the file is removed on every exit path. A missing
    /// or zero-length file is reported as empty.
    pub fn validate_path<P: AsRef<Path>>(
        &self,
        path: P,
        original_name: Option<&str>,
        delete_after: bool,
    ) -> ValidationResult {
        let path = path.as_ref();
        let _guard = RemoveOnDrop::new(path, delete_after);
        let outcome = match fs::metadata(path) {
            Ok(meta) if meta.len() > 0 => self.run(path, original_name),
            _ => Err(ValidationError::EmptyInput),
        };
        self.report(outcome, original_name)
    }

    /// [`validate_path`](Self::validate_path) without deleting the file.
    pub fn validate_file<P: AsRef<Path>>(
        &self,
        path: P,
        original_name: Option<&str>,
    ) -> ValidationResult {
        self.validate_path(path, original_name, false)
    }

    fn run(&self, path: &Path, filename: Option<&str>) -> Result<ValidationResult> {
        let mime_type = detect_mime(&self.sniffer, path, filename);
        match self.classifier.classify(path, &mime_type, filename) {
            Some(FileType::Csv) => self.check_csv(path, mime_type),
            Some(FileType::Excel) => {
                self.excel.validate(path, mime::extension(filename))?;
                Ok(ValidationResult::excel(mime_type))
            },
            None => Err(ValidationError::UnsupportedType(mime_type)),
        }
    }

    fn check_csv(&self, path: &Path, mime_type: String) -> Result<ValidationResult> {
        let detected = self.detect_charset(path);
        debug!(detected = ?detected, "charset guess");
        let encoding = self.normalizer.normalize(detected.as_deref(), path)?;

        // A lone BOM still decodes to a line
        let mut reader = BufReader::new(File::open(path)?);
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(ValidationError::CsvContentEmpty);
        }

        Ok(ValidationResult::csv(mime_type, encoding))
    }

    /// Detector guess for the head of the file; zero confidence is no guess.
    fn detect_charset(&self, path: &Path) -> Option<String> {
        let head = sample::read_head(path, self.config.charset_sample_bytes).ok()?;
        self.charset_detector
            .detect(head.as_bytes())
            .filter(|found| found.confidence > 0)
            .map(|found| found.name)
    }

    fn copy_to_temp(&self, upload: &dyn UploadedFile) -> io::Result<NamedTempFile> {
        let prefix = format!(
            "{}{}",
            self.config.temp_prefix,
            Local::now().format("%Y%m%d%H%M%S%3f")
        );
        let mut temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(temp_suffix(upload.original_filename()))
            .tempfile()?;

        let mut reader = upload.open()?;
        let copied = io::copy(&mut reader, &mut temp)?;
        temp.flush()?;
        debug!(path = %temp.path().display(), copied, "spooled upload");
        Ok(temp)
    }

    fn report(&self, outcome: Result<ValidationResult>, filename: Option<&str>) -> ValidationResult {
        match outcome {
            Ok(result) => {
                info!(
                    filename,
                    file_type = ?result.file_type(),
                    encoding = ?result.encoding(),
                    mime = result.mime_type(),
                    "template accepted"
                );
                result
            },
            Err(err) => {
                warn!(filename, kind = ?err.kind(), error = %err, "template rejected");
                ValidationResult::from(err)
            },
        }
    }
}

/// Extension of the original name, kept only when it is a plain word.
fn temp_suffix(filename: Option<&str>) -> &str {
    let ext = mime::extension(filename);
    if ext.len() > 1 && ext[1..].bytes().all(|b| b.is_ascii_alphanumeric()) {
        ext
    } else {
        ""
    }
}
