//! `erpreport-export`: renders an [`Overview`](erpreport_core::Overview) into
//! downloadable report formats.
//!
//! Renderers are pure: no IO beyond writing into an in-memory buffer, no remote
//! calls, no fallback logic. They receive an already-resolved overview and fail
//! only when the target format cannot encode it.

pub mod error;
mod layout;
pub mod pdf;
pub mod renderer;
pub mod spreadsheet;

pub use error::{RenderError, SpreadsheetParseError};
pub use pdf::PdfRenderer;
pub use renderer::{Disposition, ExportFormat, RenderedReport, ReportRenderer};
pub use spreadsheet::{SHEET_NAME, SpreadsheetRenderer, parse_spreadsheet};
