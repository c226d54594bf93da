use thiserror::Error;

use crate::renderer::ExportFormat;

/// The chosen format could not encode a (valid) overview.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{format} encoding failed: {message}")]
    Encoding { format: ExportFormat, message: String },
}

impl RenderError {
    pub fn encoding(format: ExportFormat, message: impl Into<String>) -> Self {
        Self::Encoding {
            format,
            message: message.into(),
        }
    }

    pub fn format(&self) -> ExportFormat {
        match self {
            RenderError::Encoding { format, .. } => *format,
        }
    }
}

/// A spreadsheet export could not be read back into an overview.
#[derive(Debug, Error)]
pub enum SpreadsheetParseError {
    #[error("malformed workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("no value found for {0:?}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {label:?}")]
    InvalidValue { label: &'static str, value: String },
}
