//! Structural checks for legacy Excel (.xls) workbooks.
//!
//! An `.xls` file is an OLE2 compound file whose `Workbook` stream (`Book`
//! for BIFF5 files) holds a BIFF record sequence. [`check_workbook`] opens
//! the container, pulls that stream and walks its records.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::fs::File;
//! use tabgate::ole::xls::{check_workbook, BIFF8_STREAMS};
//!
//! let summary = check_workbook(File::open("report.xls")?, BIFF8_STREAMS)?;
//! println!("{:?} with {} records", summary.version, summary.records);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod records;

use std::io::{Read, Seek};

use tracing::debug;

use crate::ole::OleFile;

pub use error::{XlsError, XlsResult};
pub use records::{BiffVersion, BofRecord, RecordCounter, RecordListener, process_records};

/// Stream names a BIFF8 workbook is stored under.
pub const BIFF8_STREAMS: &[&str] = &["Workbook"];

/// Stream names accepted when the BIFF generation is not known up front.
pub const ANY_BIFF_STREAMS: &[&str] = &["Workbook", "Book"];

/// Outcome of a successful workbook walk.
#[derive(Debug, Clone, Copy)]
pub struct WorkbookSummary {
    pub version: BiffVersion,
    /// Total records walked across all substreams
    pub records: usize,
    /// BOUNDSHEET records seen
    pub sheets: usize,
}

/// Open the compound file in `reader` and walk the first stream of
/// `stream_names` that exists.
pub fn check_workbook<R: Read + Seek>(
    reader: R,
    stream_names: &[&str],
) -> XlsResult<WorkbookSummary> {
    let mut ole = OleFile::open(reader)?;

    let name = stream_names
        .iter()
        .copied()
        .find(|name| ole.exists(&[name]))
        .ok_or(XlsError::MissingWorkbookStream)?;
    let stream = ole.open_stream(&[name])?;
    debug!(stream = name, len = stream.len(), "walking BIFF records");

    let mut counter = RecordCounter::default();
    let bof = process_records(&stream, &mut counter)?;

    Ok(WorkbookSummary {
        version: bof.version,
        records: counter.records,
        sheets: counter.sheets,
    })
}
