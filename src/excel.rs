//! Shallow structural checks for Excel workbooks.
//!
//! The check proves a workbook can be opened, not that its cells make sense:
//!
//! - `.xlsx`: the OPC package resolves to a workbook part with at least one
//!   sheet, and the first sheet's member can be opened (its content is not
//!   read)
//! - `.xls`: the compound file has a `Workbook` stream whose BIFF records
//!   are framed correctly from BOF to EOF
//! - anything else: the container signature picks one of the two checks

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::common::error::{Result, ValidationError};
use crate::detection::signature;
use crate::ole::xls::{self, ANY_BIFF_STREAMS, BIFF8_STREAMS};
use crate::ooxml::xlsx::{Workbook, XlsxError, XlsxResult};

/// Sub-format an extension selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcelFlavor {
    Xlsx,
    Xls,
    /// Decided from the file signature
    Autodetect,
}

impl ExcelFlavor {
    /// Flavor for an extension such as `".XLSX"` (leading dot included).
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case(".xlsx") {
            ExcelFlavor::Xlsx
        } else if extension.eq_ignore_ascii_case(".xls") {
            ExcelFlavor::Xls
        } else {
            ExcelFlavor::Autodetect
        }
    }
}

/// Runs the structural check matching the original filename's extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelStructuralValidator;

impl ExcelStructuralValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check the workbook at `path`; `extension` includes the leading dot.
    pub fn validate(&self, path: &Path, extension: &str) -> Result<()> {
        match ExcelFlavor::from_extension(extension) {
            ExcelFlavor::Xlsx => {
                let sheets = check_xlsx(open(path)?)?;
                debug!(sheets, "xlsx structure ok");
            },
            ExcelFlavor::Xls => {
                let summary = xls::check_workbook(open(path)?, BIFF8_STREAMS)?;
                debug!(version = ?summary.version, records = summary.records, "xls structure ok");
            },
            ExcelFlavor::Autodetect => self.validate_autodetect(path)?,
        }
        Ok(())
    }

    /// Pick the check from the container signature.
    ///
    /// Failures are reported as generic Excel errors, whatever the sub-format.
    fn validate_autodetect(&self, path: &Path) -> Result<()> {
        let mut reader = open(path)?;
        let mut head = [0u8; 8];
        let len = read_up_to(&mut reader, &mut head)?;
        reader.seek(SeekFrom::Start(0))?;
        let head = &head[..len];

        if signature::is_ole2(head) {
            let summary = xls::check_workbook(reader, ANY_BIFF_STREAMS)
                .map_err(|err| ValidationError::ExcelFormat(err.to_string()))?;
            debug!(version = ?summary.version, "autodetected xls structure ok");
            Ok(())
        } else if signature::is_zip(head) {
            check_xlsx(reader).map_err(|err| ValidationError::ExcelFormat(err.to_string()))?;
            debug!("autodetected xlsx structure ok");
            Ok(())
        } else {
            Err(ValidationError::ExcelFormat(
                "neither an OLE2 nor an OOXML stream".to_string(),
            ))
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

/// Read until `buf` is full or the input ends; returns the bytes read.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {},
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// Open the first sheet and close it again; returns the sheet count.
fn check_xlsx<R: Read + Seek>(reader: R) -> XlsxResult<usize> {
    let mut workbook = Workbook::from_reader(reader)?;
    if workbook.sheets().is_empty() {
        return Err(XlsxError::NoWorksheet);
    }
    drop(workbook.open_sheet(0)?);
    Ok(workbook.sheets().len())
}
