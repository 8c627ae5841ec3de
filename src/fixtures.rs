//! Builders for the small workbooks, packages and files used by unit tests.

use std::io::{Cursor, Write};

use tempfile::NamedTempFile;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ole::consts::{ENDOFCHAIN, FATSECT, FREESECT, MAGIC, NOSTREAM, STGTY_ROOT, STGTY_STREAM};
use crate::ole::xls::records::{BOF_BIFF8, EOF};
use crate::ooxml::opc::constants::content_type as ct;

const SECTOR: usize = 512;

/// Write `bytes` to a temp file whose suffix matches the extension of `name`.
pub fn temp_file(bytes: &[u8], name: &str) -> NamedTempFile {
    let suffix = crate::common::mime::extension(Some(name));
    let mut file = tempfile::Builder::new()
        .prefix("fixture-")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// Deflated zip with the given members, in order.
pub fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn content_types_xml(main_ct: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="{rels}"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="{main_ct}"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="{sheet}"/>
</Types>"#,
        rels = ct::OPC_RELATIONSHIPS,
        sheet = ct::SML_WORKSHEET,
    )
}

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Sheet1" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#;

pub const EMPTY_WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets/>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

const SHEET_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="inlineStr"><is><t>name</t></is></c><c r="B1" t="inlineStr"><is><t>age</t></is></c></row>
    <row r="2"><c r="A2" t="inlineStr"><is><t>kim</t></is></c><c r="B2"><v>30</v></c></row>
  </sheetData>
</worksheet>"#;

fn xlsx_package(workbook: &str, with_sheet: bool) -> Vec<u8> {
    let content_types = content_types_xml(ct::SML_SHEET_MAIN);
    let mut entries: Vec<(&str, &[u8])> = vec![
        ("[Content_Types].xml", content_types.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("xl/workbook.xml", workbook.as_bytes()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
    ];
    if with_sheet {
        entries.push(("xl/worksheets/sheet1.xml", SHEET_XML.as_bytes()));
    }
    zip_with(&entries)
}

/// Minimal workbook with one inline-string sheet.
pub fn xlsx_bytes() -> Vec<u8> {
    xlsx_package(WORKBOOK_XML, true)
}

pub fn xlsx_bytes_with_workbook(workbook_xml: &str) -> Vec<u8> {
    xlsx_package(workbook_xml, true)
}

/// Workbook whose sheet relationship points at a member that is not there.
pub fn xlsx_bytes_without_sheet_part() -> Vec<u8> {
    xlsx_package(WORKBOOK_XML, false)
}

/// Workbook whose sheet member carries a wrong CRC-32.
///
/// Both the local header and the central directory record are patched, so
/// only a full read of the member notices.
pub fn xlsx_bytes_with_bad_sheet_crc() -> Vec<u8> {
    const LOCAL: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
    const CENTRAL: [u8; 4] = [0x50, 0x4B, 0x01, 0x02];
    let name = b"xl/worksheets/sheet1.xml";

    let mut bytes = xlsx_bytes();
    let mut patched = 0;
    for pos in 0..bytes.len().saturating_sub(name.len()) {
        if &bytes[pos..pos + name.len()] != name {
            continue;
        }
        let crc_offset = if pos >= 46 && bytes[pos - 46..pos - 42] == CENTRAL {
            pos - 46 + 16
        } else if pos >= 30 && bytes[pos - 30..pos - 26] == LOCAL {
            pos - 30 + 14
        } else {
            continue;
        };
        for byte in &mut bytes[crc_offset..crc_offset + 4] {
            *byte ^= 0xFF;
        }
        patched += 1;
    }
    assert_eq!(patched, 2, "sheet member headers not found");
    bytes
}

/// Word document package, the classic file renamed to `.xlsx`.
pub fn docx_bytes() -> Vec<u8> {
    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;
    let document = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body><w:p><w:r><w:t>hello</w:t></w:r></w:p></w:body>
</w:document>"#;
    zip_with(&[
        ("[Content_Types].xml", content_types.as_bytes()),
        ("_rels/.rels", rels.as_bytes()),
        ("word/document.xml", document.as_bytes()),
    ])
}

fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// One 128-byte directory entry with explicit sibling and child links.
pub fn directory_entry(
    name: &str,
    entry_type: u8,
    (left, right, child): (u32, u32, u32),
    start: u32,
    size: u64,
) -> [u8; 128] {
    let mut entry = [0u8; 128];
    let units: Vec<u16> = name.encode_utf16().collect();
    for (i, unit) in units.iter().enumerate() {
        put_u16(&mut entry, i * 2, *unit);
    }
    put_u16(&mut entry, 64, ((units.len() + 1) * 2) as u16);
    entry[66] = entry_type;
    entry[67] = 1;
    put_u32(&mut entry, 68, left);
    put_u32(&mut entry, 72, right);
    put_u32(&mut entry, 76, child);
    put_u32(&mut entry, 116, start);
    entry[120..128].copy_from_slice(&size.to_le_bytes());
    entry
}

/// Version 3 compound file holding one top-level stream `name`.
///
/// Layout: header, one FAT sector, one directory sector, then the stream.
/// The payload must reach the mini stream cutoff so it lives in the FAT.
pub fn compound_file(name: &str, payload: &[u8]) -> Vec<u8> {
    assert!(payload.len() >= 4096, "payload would belong to the mini stream");
    let stream_sectors = payload.len().div_ceil(SECTOR);
    assert!(stream_sectors + 2 <= SECTOR / 4, "payload needs more than one FAT sector");

    let mut header = [0u8; SECTOR];
    header[..8].copy_from_slice(MAGIC);
    put_u16(&mut header, 0x18, 0x003E);
    put_u16(&mut header, 0x1A, 3);
    put_u16(&mut header, 0x1C, 0xFFFE);
    put_u16(&mut header, 0x1E, 9);
    put_u16(&mut header, 0x20, 6);
    put_u32(&mut header, 0x2C, 1);
    put_u32(&mut header, 0x30, 1);
    put_u32(&mut header, 0x38, 4096);
    put_u32(&mut header, 0x3C, ENDOFCHAIN);
    put_u32(&mut header, 0x44, ENDOFCHAIN);
    for i in 0..109 {
        put_u32(&mut header, 0x4C + i * 4, FREESECT);
    }
    put_u32(&mut header, 0x4C, 0);

    let mut fat = [0u8; SECTOR];
    for i in 0..SECTOR / 4 {
        put_u32(&mut fat, i * 4, FREESECT);
    }
    put_u32(&mut fat, 0, FATSECT);
    put_u32(&mut fat, 4, ENDOFCHAIN);
    for i in 0..stream_sectors {
        let sector = 2 + i;
        let next = if i + 1 == stream_sectors { ENDOFCHAIN } else { (sector + 1) as u32 };
        put_u32(&mut fat, sector * 4, next);
    }

    let mut directory = [0u8; SECTOR];
    directory[..128].copy_from_slice(&directory_entry("Root Entry", STGTY_ROOT, (NOSTREAM, NOSTREAM, 1), ENDOFCHAIN, 0));
    directory[128..256].copy_from_slice(&directory_entry(
        name,
        STGTY_STREAM,
        (NOSTREAM, NOSTREAM, NOSTREAM),
        2,
        payload.len() as u64,
    ));
    for slot in 2..4 {
        let offset = slot * 128;
        put_u32(&mut directory, offset + 68, NOSTREAM);
        put_u32(&mut directory, offset + 72, NOSTREAM);
        put_u32(&mut directory, offset + 76, NOSTREAM);
    }

    let mut bytes = Vec::with_capacity(SECTOR * (3 + stream_sectors));
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&fat);
    bytes.extend_from_slice(&directory);
    bytes.extend_from_slice(payload);
    bytes.resize(SECTOR * (3 + stream_sectors), 0);
    bytes
}

/// Version 3 compound file made of a directory and nothing else.
///
/// `entries[0]` is the root. Layout: header, the FAT sectors, then the
/// directory sectors chained in order. Unused directory slots are empty.
pub fn compound_file_with_directory(entries: &[[u8; 128]]) -> Vec<u8> {
    let per_sector = SECTOR / 128;
    let dir_sectors = entries.len().div_ceil(per_sector).max(1);
    let mut fat_sectors = 1;
    while fat_sectors * (SECTOR / 4) < fat_sectors + dir_sectors {
        fat_sectors += 1;
    }
    assert!(fat_sectors <= 109, "directory needs a DIFAT");

    let mut header = [0u8; SECTOR];
    header[..8].copy_from_slice(MAGIC);
    put_u16(&mut header, 0x18, 0x003E);
    put_u16(&mut header, 0x1A, 3);
    put_u16(&mut header, 0x1C, 0xFFFE);
    put_u16(&mut header, 0x1E, 9);
    put_u16(&mut header, 0x20, 6);
    put_u32(&mut header, 0x2C, fat_sectors as u32);
    put_u32(&mut header, 0x30, fat_sectors as u32);
    put_u32(&mut header, 0x38, 4096);
    put_u32(&mut header, 0x3C, ENDOFCHAIN);
    put_u32(&mut header, 0x44, ENDOFCHAIN);
    for i in 0..109 {
        let sector = if i < fat_sectors { i as u32 } else { FREESECT };
        put_u32(&mut header, 0x4C + i * 4, sector);
    }

    let mut fat = vec![0u8; fat_sectors * SECTOR];
    for i in 0..fat.len() / 4 {
        let next = if i < fat_sectors {
            FATSECT
        } else if i + 1 < fat_sectors + dir_sectors {
            (i + 1) as u32
        } else if i + 1 == fat_sectors + dir_sectors {
            ENDOFCHAIN
        } else {
            FREESECT
        };
        put_u32(&mut fat, i * 4, next);
    }

    let mut directory = vec![0u8; dir_sectors * SECTOR];
    for slot in 0..dir_sectors * per_sector {
        let offset = slot * 128;
        match entries.get(slot) {
            Some(entry) => directory[offset..offset + 128].copy_from_slice(entry),
            None => {
                put_u32(&mut directory, offset + 68, NOSTREAM);
                put_u32(&mut directory, offset + 72, NOSTREAM);
                put_u32(&mut directory, offset + 76, NOSTREAM);
            },
        }
    }

    let mut bytes = Vec::with_capacity(SECTOR * (1 + fat_sectors + dir_sectors));
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&fat);
    bytes.extend_from_slice(&directory);
    bytes
}

/// Directory where entry `i` links to `i + 1` through `link`.
///
/// Entries are named `Entry1`, `Entry2`, ... and the last one ends the chain.
pub fn chained_directory(count: usize, link: fn(u32) -> (u32, u32, u32)) -> Vec<[u8; 128]> {
    let mut entries = vec![directory_entry(
        "Root Entry",
        STGTY_ROOT,
        (NOSTREAM, NOSTREAM, 1),
        ENDOFCHAIN,
        0,
    )];
    for i in 1..=count {
        let links = if i == count {
            (NOSTREAM, NOSTREAM, NOSTREAM)
        } else {
            link(i as u32 + 1)
        };
        entries.push(directory_entry(&format!("Entry{}", i), STGTY_STREAM, links, ENDOFCHAIN, 0));
    }
    entries
}

fn push_record(stream: &mut Vec<u8>, record_type: u16, data: &[u8]) {
    stream.extend_from_slice(&record_type.to_le_bytes());
    stream.extend_from_slice(&(data.len() as u16).to_le_bytes());
    stream.extend_from_slice(data);
}

fn biff_prefix() -> Vec<u8> {
    let mut stream = Vec::new();
    let mut bof = [0u8; 16];
    put_u16(&mut bof, 0, 0x0600);
    put_u16(&mut bof, 2, 0x0005);
    push_record(&mut stream, BOF_BIFF8, &bof);
    // WRITEACCESS records pad the stream past the mini stream cutoff
    for _ in 0..40 {
        push_record(&mut stream, 0x005C, &[0x20; 112]);
    }
    stream
}

/// Workbook globals substream: BOF, padding records, EOF.
pub fn biff_stream() -> Vec<u8> {
    let mut stream = biff_prefix();
    push_record(&mut stream, EOF, &[]);
    stream
}

/// BIFF stream whose last record claims more data than the stream holds.
pub fn biff_stream_truncated() -> Vec<u8> {
    let mut stream = biff_prefix();
    stream.extend_from_slice(&0x0208u16.to_le_bytes());
    stream.extend_from_slice(&200u16.to_le_bytes());
    stream.extend_from_slice(&[0u8; 10]);
    stream
}

pub fn xls_bytes() -> Vec<u8> {
    compound_file("Workbook", &biff_stream())
}
