//! Overview exposure façade.
//!
//! Sequences "build overview, then render" for exports so a report always
//! reflects one consistent snapshot. Holds no fallback logic of its own; that
//! lives entirely in [`ResilientAggregator`].

use std::str::FromStr;
use std::sync::Arc;

use erpreport_core::{FinanceSummary, HrSummary, InventorySummary, Overview};
use erpreport_export::{ExportFormat, PdfRenderer, RenderError, RenderedReport, ReportRenderer, SpreadsheetRenderer};
use thiserror::Error;

use crate::aggregator::ResilientAggregator;

/// What to do when the document (PDF) renderer fails.
///
/// Spreadsheet failures always propagate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DocumentFailurePolicy {
    /// Surface the failure to the caller.
    #[default]
    Propagate,
    /// Log the failure and serve an empty document.
    Suppress,
}

#[derive(Debug, Error)]
#[error("unknown document failure policy {0:?} (expected \"propagate\" or \"suppress\")")]
pub struct UnknownPolicy(pub String);

impl FromStr for DocumentFailurePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "propagate" => Ok(DocumentFailurePolicy::Propagate),
            "suppress" => Ok(DocumentFailurePolicy::Suppress),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// The only failure an overview caller can observe.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render {format} report")]
    Render {
        format: ExportFormat,
        #[source]
        source: RenderError,
    },
}

impl ExportError {
    pub fn format(&self) -> ExportFormat {
        match self {
            ExportError::Render { format, .. } => *format,
        }
    }
}

/// A renderer was installed in the slot of another format.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("a {actual} renderer cannot serve {expected} exports")]
pub struct FormatMismatch {
    pub expected: ExportFormat,
    pub actual: ExportFormat,
}

impl From<RenderError> for ExportError {
    fn from(source: RenderError) -> Self {
        ExportError::Render {
            format: source.format(),
            source,
        }
    }
}

#[derive(Clone)]
pub struct OverviewService {
    aggregator: ResilientAggregator,
    document: Arc<dyn ReportRenderer>,
    spreadsheet: Arc<dyn ReportRenderer>,
    document_policy: DocumentFailurePolicy,
}

impl OverviewService {
    /// PDF + XLSX renderers, document failures propagated.
    pub fn new(aggregator: ResilientAggregator) -> Self {
        Self {
            aggregator,
            document: Arc::new(PdfRenderer::new()),
            spreadsheet: Arc::new(SpreadsheetRenderer::new()),
            document_policy: DocumentFailurePolicy::default(),
        }
    }

    pub fn with_document_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Result<Self, FormatMismatch> {
        self.document = expect_format(ExportFormat::Document, renderer)?;
        Ok(self)
    }

    pub fn with_spreadsheet_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Result<Self, FormatMismatch> {
        self.spreadsheet = expect_format(ExportFormat::Spreadsheet, renderer)?;
        Ok(self)
    }

    pub fn with_document_failure_policy(mut self, policy: DocumentFailurePolicy) -> Self {
        self.document_policy = policy;
        self
    }

    pub async fn build_overview(&self) -> Overview {
        self.aggregator.build_overview().await
    }

    pub async fn finance_summary(&self) -> FinanceSummary {
        self.aggregator.finance_summary().await
    }

    pub async fn hr_summary(&self) -> HrSummary {
        self.aggregator.hr_summary().await
    }

    pub async fn inventory_summary(&self) -> InventorySummary {
        self.aggregator.inventory_summary().await
    }

    pub fn render_document(&self, overview: &Overview) -> Result<RenderedReport, ExportError> {
        let format = self.document.format();
        match self.document.render(overview) {
            Ok(bytes) => Ok(RenderedReport::new(format, bytes)),
            Err(err) if self.document_policy == DocumentFailurePolicy::Suppress => {
                tracing::error!(error = %err, "document rendering failed; serving empty document");
                Ok(RenderedReport::new(format, Vec::new()))
            }
            Err(err) => {
                tracing::error!(error = %err, "document rendering failed");
                Err(err.into())
            }
        }
    }

    pub fn render_spreadsheet(&self, overview: &Overview) -> Result<RenderedReport, ExportError> {
        let bytes = self.spreadsheet.render(overview).inspect_err(|err| {
            tracing::error!(error = %err, "spreadsheet rendering failed");
        })?;
        Ok(RenderedReport::new(self.spreadsheet.format(), bytes))
    }

    pub async fn export_document(&self) -> Result<RenderedReport, ExportError> {
        let overview = self.build_overview().await;
        self.render_document(&overview)
    }

    pub async fn export_spreadsheet(&self) -> Result<RenderedReport, ExportError> {
        let overview = self.build_overview().await;
        self.render_spreadsheet(&overview)
    }
}

fn expect_format(
    expected: ExportFormat,
    renderer: Arc<dyn ReportRenderer>,
) -> Result<Arc<dyn ReportRenderer>, FormatMismatch> {
    let actual = renderer.format();
    if actual == expected {
        Ok(renderer)
    } else {
        Err(FormatMismatch { expected, actual })
    }
}

impl core::fmt::Debug for OverviewService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverviewService")
            .field("aggregator", &self.aggregator)
            .field("document_policy", &self.document_policy)
            .finish_non_exhaustive()
    }
}
