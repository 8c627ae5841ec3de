//! BIFF record walking for XLS workbook streams
//!
//! A `Workbook` stream is a flat sequence of records, each a 4-byte header
//! (type + length) followed by its payload. Substreams open with a BOF
//! record and close with an EOF record. Nothing here decodes cell data;
//! the walk only proves that the framing holds together.

use crate::ole::xls::error::{XlsError, XlsResult};

/// Size of a record header in bytes
pub const RECORD_HEADER_SIZE: usize = 4;

/// BOF record identifiers, newest first
pub const BOF_BIFF8: u16 = 0x0809;
pub const BOF_BIFF4: u16 = 0x0409;
pub const BOF_BIFF3: u16 = 0x0209;
pub const BOF_BIFF2: u16 = 0x0009;

/// EOF record identifier
pub const EOF: u16 = 0x000A;

/// BOUNDSHEET record identifier (one per worksheet in the globals substream)
pub const BOUNDSHEET: u16 = 0x0085;

/// Whether `record_type` is any BOF variant.
#[inline]
pub fn is_bof(record_type: u16) -> bool {
    matches!(record_type, BOF_BIFF8 | BOF_BIFF4 | BOF_BIFF3 | BOF_BIFF2)
}

/// BIFF record header (4 bytes: type + length)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub record_type: u16,
    pub data_len: u16,
}

impl RecordHeader {
    /// Parse a record header from the first four bytes of `bytes`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let header = bytes.get(..RECORD_HEADER_SIZE)?;
        Some(RecordHeader {
            record_type: u16::from_le_bytes([header[0], header[1]]),
            data_len: u16::from_le_bytes([header[2], header[3]]),
        })
    }
}

/// A BIFF record borrowed from the stream buffer
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub header: RecordHeader,
    /// Offset of the header within the stream
    pub offset: usize,
    pub data: &'a [u8],
}

/// Iterator over BIFF records in a stream buffer
///
/// Yields at most one error, after which iteration ends. A tail shorter than
/// a header is accepted when it is zero padding.
pub struct RecordIter<'a> {
    data: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> RecordIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        RecordIter {
            data,
            pos: 0,
            failed: false,
        }
    }

    /// Offset of the next record header
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether every byte not yet consumed is zero.
    pub fn rest_is_padding(&self) -> bool {
        self.data[self.pos..].iter().all(|&b| b == 0)
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = XlsResult<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.data.len() {
            return None;
        }

        let rest = &self.data[self.pos..];
        let Some(header) = RecordHeader::parse(rest) else {
            if self.rest_is_padding() {
                self.pos = self.data.len();
                return None;
            }
            self.failed = true;
            return Some(Err(XlsError::UnexpectedEndOfStream(format!(
                "{} stray bytes at offset {}",
                rest.len(),
                self.pos
            ))));
        };

        let start = RECORD_HEADER_SIZE;
        let end = start + header.data_len as usize;
        if end > rest.len() {
            self.failed = true;
            return Some(Err(XlsError::UnexpectedEndOfStream(format!(
                "record 0x{:04X} at offset {} declares {} bytes, {} available",
                header.record_type,
                self.pos,
                header.data_len,
                rest.len() - start
            ))));
        }

        let record = Record {
            header,
            offset: self.pos,
            data: &rest[start..end],
        };
        self.pos += end;
        Some(Ok(record))
    }
}

/// BIFF versions supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiffVersion {
    Biff2 = 0x0200,
    Biff3 = 0x0300,
    Biff4 = 0x0400,
    Biff5 = 0x0500,
    Biff8 = 0x0600,
}

impl BiffVersion {
    pub fn from_bof_version(version: u16) -> Option<Self> {
        match version {
            0x0200 | 0x0002 | 0x0007 => Some(BiffVersion::Biff2),
            0x0300 => Some(BiffVersion::Biff3),
            0x0400 => Some(BiffVersion::Biff4),
            0x0500 => Some(BiffVersion::Biff5),
            0x0600 => Some(BiffVersion::Biff8),
            _ => None,
        }
    }
}

/// BOF (Beginning of File) record
#[derive(Debug, Clone, Copy)]
pub struct BofRecord {
    pub version: BiffVersion,
    /// Substream type (0x0005 workbook globals, 0x0010 worksheet, ...)
    pub substream: u16,
}

impl BofRecord {
    /// Parse the payload of a BOF record of type `record_type`.
    ///
    /// BIFF2-4 encode the version in the record identifier itself; BIFF5 and
    /// later share 0x0809 and carry it in the payload.
    pub fn parse(record_type: u16, data: &[u8]) -> XlsResult<Self> {
        if data.len() < 4 {
            return Err(XlsError::InvalidRecord {
                record_type,
                message: format!("BOF payload is {} bytes, need 4", data.len()),
            });
        }

        let raw_version = u16::from_le_bytes([data[0], data[1]]);
        let substream = u16::from_le_bytes([data[2], data[3]]);

        let version = match record_type {
            BOF_BIFF2 => BiffVersion::Biff2,
            BOF_BIFF3 => BiffVersion::Biff3,
            BOF_BIFF4 => BiffVersion::Biff4,
            _ => BiffVersion::from_bof_version(raw_version)
                .ok_or(XlsError::UnsupportedBiffVersion(raw_version))?,
        };

        Ok(BofRecord { version, substream })
    }
}

/// Receives every record of a walk.
///
/// Returning an error aborts the walk with that error.
pub trait RecordListener {
    fn on_record(&mut self, _record: &Record<'_>) -> XlsResult<()> {
        Ok(())
    }
}

/// Listener that tallies records and worksheet declarations.
#[derive(Debug, Default)]
pub struct RecordCounter {
    pub records: usize,
    pub sheets: usize,
}

impl RecordListener for RecordCounter {
    fn on_record(&mut self, record: &Record<'_>) -> XlsResult<()> {
        self.records += 1;
        if record.header.record_type == BOUNDSHEET {
            self.sheets += 1;
        }
        Ok(())
    }
}

/// Walk every record of `stream`, feeding each one to `listener`.
///
/// The stream must open with a BOF record and every substream must be
/// closed by an EOF record. Zero padding after the last EOF is tolerated.
/// Returns the BOF of the first substream.
pub fn process_records<L: RecordListener + ?Sized>(
    stream: &[u8],
    listener: &mut L,
) -> XlsResult<BofRecord> {
    if stream.is_empty() {
        return Err(XlsError::EmptyStream);
    }

    let mut iter = RecordIter::new(stream);
    let first = match iter.next() {
        Some(record) => record?,
        None => return Err(XlsError::EmptyStream),
    };
    if !is_bof(first.header.record_type) {
        return Err(XlsError::MissingBof(first.header.record_type));
    }
    let bof = BofRecord::parse(first.header.record_type, first.data)?;
    listener.on_record(&first)?;

    let mut depth = 1usize;
    while depth > 0 || !iter.rest_is_padding() {
        let record = match iter.next() {
            Some(record) => record?,
            None => break,
        };
        let record_type = record.header.record_type;
        if is_bof(record_type) {
            depth += 1;
        } else if record_type == EOF {
            depth = depth.checked_sub(1).ok_or_else(|| XlsError::InvalidRecord {
                record_type,
                message: format!("EOF without matching BOF at offset {}", record.offset),
            })?;
        }
        listener.on_record(&record)?;
    }

    if depth > 0 {
        return Err(XlsError::UnexpectedEndOfStream(
            "missing EOF record".to_string(),
        ));
    }

    Ok(bof)
}
