use erpreport_core::Overview;

use crate::error::RenderError;

/// Base name of every exported file.
pub const REPORT_FILE_STEM: &str = "ERP_Report";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Paginated document (PDF).
    Document,
    /// Spreadsheet workbook (XLSX).
    Spreadsheet,
}

/// How a browser should treat the download.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Document => "document",
            ExportFormat::Spreadsheet => "spreadsheet",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Document => "application/pdf",
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Document => "pdf",
            ExportFormat::Spreadsheet => "xlsx",
        }
    }

    pub fn disposition(&self) -> Disposition {
        match self {
            ExportFormat::Document => Disposition::Inline,
            ExportFormat::Spreadsheet => Disposition::Attachment,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{REPORT_FILE_STEM}.{}", self.extension())
    }

    /// Value for the `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        let kind = match self.disposition() {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        };
        format!("{kind}; filename={}", self.file_name())
    }
}

impl core::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encodes an overview into one export format.
pub trait ReportRenderer: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn render(&self, overview: &Overview) -> Result<Vec<u8>, RenderError>;
}

/// Rendered bytes plus what the transport needs to serve them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl RenderedReport {
    pub fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn content_disposition(&self) -> String {
        self.format.content_disposition()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
