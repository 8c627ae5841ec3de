//! Constant values related to the Open Packaging Convention.
//!
//! Content types and relationship type URIs needed to find the workbook part
//! of a SpreadsheetML package and tell it apart from other OOXML documents.

/// Content type URIs (like MIME-types) that specify a part's format
pub mod content_type {
    // SpreadsheetML content types
    pub const SML_SHEET_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
    pub const SML_SHEET_MACRO_ENABLED_MAIN: &str =
        "application/vnd.ms-excel.sheet.macroEnabled.main+xml";
    pub const SML_TEMPLATE_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.template.main+xml";
    pub const SML_TEMPLATE_MACRO_ENABLED_MAIN: &str =
        "application/vnd.ms-excel.template.macroEnabled.main+xml";
    pub const SML_WORKSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";

    /// Workbook part content types a spreadsheet package may declare
    pub const SML_WORKBOOK_MAIN: &[&str] = &[
        SML_SHEET_MAIN,
        SML_SHEET_MACRO_ENABLED_MAIN,
        SML_TEMPLATE_MAIN,
        SML_TEMPLATE_MACRO_ENABLED_MAIN,
    ];

    pub const OPC_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}

/// Substrings of a `[Content_Types].xml` manifest that identify the main
/// document kind of a package.
pub mod manifest_marker {
    pub const SPREADSHEET: &str = "spreadsheetml.sheet.main+xml";
    pub const WORDPROCESSING: &str = "wordprocessingml.document.main+xml";
    pub const PRESENTATION: &str = "presentationml.presentation.main+xml";
}

/// Open XML relationship target modes
pub mod target_mode {
    /// Internal relationship target mode (default)
    pub const INTERNAL: &str = "Internal";

    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs used in OPC packages
pub mod relationship_type {
    // Office document
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Strict Open XML flavor of [`OFFICE_DOCUMENT`]
    pub const OFFICE_DOCUMENT_STRICT: &str =
        "http://purl.oclc.org/ooxml/officeDocument/relationships/officeDocument";

    // Workbook parts
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
    pub const WORKSHEET_STRICT: &str =
        "http://purl.oclc.org/ooxml/officeDocument/relationships/worksheet";

    /// Whether `reltype` points at the main document part.
    #[inline]
    pub fn is_office_document(reltype: &str) -> bool {
        reltype == OFFICE_DOCUMENT || reltype == OFFICE_DOCUMENT_STRICT
    }

    /// Whether `reltype` points at a worksheet part.
    #[inline]
    pub fn is_worksheet(reltype: &str) -> bool {
        reltype == WORKSHEET || reltype == WORKSHEET_STRICT
    }
}
