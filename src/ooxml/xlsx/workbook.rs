use crate::ooxml::opc::constants::content_type;
use crate::ooxml::opc::{OpcError, OpcPackage, PackURI};
use crate::ooxml::xlsx::error::{XlsxError, XlsxResult};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::debug;

// Pre-allocate typical capacity for worksheets
const INITIAL_SHEETS_CAPACITY: usize = 16;

/// A `<sheet>` entry of `workbook.xml`, resolved to its part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub name: String,
    pub sheet_id: Option<u32>,
    /// Relationship ID from the workbook part (`r:id`)
    pub r_id: String,
    pub partname: PackURI,
}

/// The workbook part of an opened SpreadsheetML package.
pub struct Workbook<R: Read + Seek> {
    package: OpcPackage<R>,
    partname: PackURI,
    sheets: Vec<SheetRef>,
}

impl Workbook<BufReader<File>> {
    /// Open the workbook stored in the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        Self::new(OpcPackage::open(path)?)
    }
}

impl<R: Read + Seek> Workbook<R> {
    /// Locate and parse the workbook part of `package`.
    ///
    /// The part is reached through the package `officeDocument`
    /// relationship and must carry a SpreadsheetML workbook content type.
    pub fn new(mut package: OpcPackage<R>) -> XlsxResult<Self> {
        let partname = package.main_document_rel()?.target_partname()?;

        let declared = package.content_type(&partname)?;
        if !content_type::SML_WORKBOOK_MAIN.iter().any(|ct| *ct == declared) {
            return Err(OpcError::UnexpectedContentType {
                partname: partname.to_string(),
                content_type: declared.to_string(),
            }
            .into());
        }

        let workbook_xml = package.blob(&partname)?;
        let entries = parse_sheet_entries(&workbook_xml)?;
        let rels = package.part_rels(&partname)?;

        let mut sheets = Vec::with_capacity(entries.len());
        for (name, sheet_id, r_id) in entries {
            let rel = match rels.get(&r_id) {
                Some(rel) => rel,
                None => return Err(XlsxError::DanglingSheet { name, r_id }),
            };
            let sheet_partname = rel.target_partname()?;
            sheets.push(SheetRef {
                name,
                sheet_id,
                r_id,
                partname: sheet_partname,
            });
        }
        debug!(workbook = %partname, sheets = sheets.len(), "parsed workbook part");

        Ok(Self {
            package,
            partname,
            sheets,
        })
    }

    /// Open the package in `reader` and locate its workbook.
    pub fn from_reader(reader: R) -> XlsxResult<Self> {
        Self::new(OpcPackage::from_reader(reader)?)
    }

    /// Part name of the workbook part.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Sheets in workbook order.
    #[inline]
    pub fn sheets(&self) -> &[SheetRef] {
        &self.sheets
    }

    /// Open the sheet at `index` for streaming reads.
    pub fn open_sheet(&mut self, index: usize) -> XlsxResult<impl Read + '_> {
        let sheet = self
            .sheets
            .get(index)
            .ok_or(if self.sheets.is_empty() {
                XlsxError::NoWorksheet
            } else {
                XlsxError::SheetIndex(index)
            })?;
        Ok(self.package.open_part(&sheet.partname)?)
    }
}

/// Extract `(name, sheetId, r:id)` of every `<sheet>` element.
///
/// Entries without a relationship ID are skipped.
fn parse_sheet_entries(xml: &[u8]) -> XlsxResult<Vec<(String, Option<u32>, String)>> {
    let mut entries = Vec::with_capacity(INITIAL_SHEETS_CAPACITY);
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let mut name = String::new();
                    let mut sheet_id = None;
                    let mut r_id = None;

                    for attr in e.attributes() {
                        let attr = attr.map_err(OpcError::from)?;
                        // `r:id` may be bound to either the transitional or
                        // the strict relationships namespace
                        match (attr.key.prefix().is_some(), attr.key.local_name().as_ref()) {
                            (false, b"name") => {
                                name = attr.unescape_value().map_err(OpcError::from)?.to_string();
                            },
                            (false, b"sheetId") => {
                                sheet_id = attr
                                    .unescape_value()
                                    .map_err(OpcError::from)?
                                    .parse::<u32>()
                                    .ok();
                            },
                            (true, b"id") => {
                                r_id = Some(
                                    attr.unescape_value().map_err(OpcError::from)?.to_string(),
                                );
                            },
                            _ => {},
                        }
                    }

                    if let Some(r_id) = r_id {
                        entries.push((name, sheet_id, r_id));
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OpcError::XmlError(format!("Workbook parse error: {}", e)).into());
            },
            _ => {},
        }
        buf.clear();
    }

    Ok(entries)
}
