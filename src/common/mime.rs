//! MIME type strings and filename-extension globs.

use phf::phf_map;

/// Legacy Excel workbook (.xls).
pub const XLS: &str = "application/vnd.ms-excel";
/// Excel workbook (.xlsx).
pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Macro-enabled Excel workbook (.xlsm).
pub const XLSM: &str = "application/vnd.ms-excel.sheet.macroenabled.12";
/// Word document (.docx).
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// PowerPoint presentation (.pptx).
pub const PPTX: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
/// Legacy Word document (.doc).
pub const MSWORD: &str = "application/msword";
/// Legacy PowerPoint presentation (.ppt).
pub const MSPOWERPOINT: &str = "application/vnd.ms-powerpoint";

pub const TEXT_CSV: &str = "text/csv";
pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_TSV: &str = "text/tab-separated-values";

/// Zip archive that carries an OPC `[Content_Types].xml` but whose document
/// kind has not been resolved yet.
pub const OOXML_CONTAINER: &str = "application/x-tika-ooxml";
/// OLE2 compound file whose document kind has not been resolved.
pub const OLE2_CONTAINER: &str = "application/x-tika-msoffice";
pub const ZIP: &str = "application/zip";
/// Fallback when nothing more specific is known.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Lower-case filename extension (without the dot) to MIME type.
static GLOBS: phf::Map<&'static str, &'static str> = phf_map! {
    "csv" => TEXT_CSV,
    "tsv" => TEXT_TSV,
    "txt" => TEXT_PLAIN,
    "xls" => XLS,
    "xlsx" => XLSX,
    "xlsm" => XLSM,
    "docx" => DOCX,
    "pptx" => PPTX,
    "doc" => MSWORD,
    "ppt" => MSPOWERPOINT,
    "zip" => ZIP,
};

/// Look up the MIME type registered for the extension of `filename`.
pub fn glob(filename: Option<&str>) -> Option<&'static str> {
    let name = filename?;
    let (_, ext) = name.rsplit_once('.')?;
    GLOBS.get(ext.to_ascii_lowercase().as_str()).copied()
}

/// Whether `mime` is a `text/*` type.
#[inline]
pub fn is_text(mime: &str) -> bool {
    mime.len() > 5
        && mime
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("text/"))
}

/// Whether `mime` names a zip container that still needs its manifest read.
pub fn is_generic_container(mime: &str) -> bool {
    mime.eq_ignore_ascii_case(OOXML_CONTAINER) || mime.eq_ignore_ascii_case(ZIP)
}

/// The extension of `filename` including the leading dot, or `""`.
pub fn extension(filename: Option<&str>) -> &str {
    filename
        .and_then(|name| name.rfind('.').map(|idx| &name[idx..]))
        .unwrap_or("")
}
