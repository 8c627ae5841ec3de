//! Excel (.xlsx) workbook access.
//!
//! Just enough of SpreadsheetML to locate the workbook part, enumerate its
//! sheets and open one of them:
//!
//! ```rust,no_run
//! use tabgate::ooxml::xlsx::Workbook;
//!
//! let mut workbook = Workbook::open("report.xlsx")?;
//! for sheet in workbook.sheets() {
//!     println!("{} -> {}", sheet.name, sheet.partname);
//! }
//! let _first = workbook.open_sheet(0)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod workbook;

pub use error::{XlsxError, XlsxResult};
pub use workbook::{SheetRef, Workbook};
