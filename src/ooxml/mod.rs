//! Office Open XML (OOXML) package reading.
//!
//! Two layers:
//!
//! 1. **OPC Layer** (`opc`): zip members, content types and relationships
//! 2. **SpreadsheetML** (`xlsx`): the workbook part and its sheets
pub mod opc;
pub mod xlsx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};
