//! Single-page PDF report: a centred title, three sections with blue headers
//! and one line per figure, then the generation timestamp.
//!
//! Text is set in the standard Helvetica faces, which only cover printable
//! ASCII; anything else is rejected before a page is built.

use erpreport_core::Overview;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};

use crate::error::RenderError;
use crate::layout::{self, GENERATED_AT, REPORT_TITLE};
use crate::renderer::{ExportFormat, ReportRenderer};

/// US Letter.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 25.4;

const TITLE_SIZE: f32 = 18.0;
const HEADER_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;

/// Vertical advance per line kind, in millimetres.
const TITLE_LEADING: f32 = 10.6;
const HEADER_LEADING: f32 = 7.1;
const BODY_LEADING: f32 = 5.3;
const SECTION_GAP: f32 = 4.2;

const PT_TO_MM: f32 = 0.3528;

enum Line {
    Title(String),
    Header(String),
    Body(String),
    Gap,
}

#[derive(Debug, Default, Copy, Clone)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Document
    }

    fn render(&self, overview: &Overview) -> Result<Vec<u8>, RenderError> {
        let lines = lines(overview);
        for line in &lines {
            if let Line::Title(text) | Line::Header(text) | Line::Body(text) = line {
                check_encodable(text)?;
            }
        }

        let (doc, page, layer) = PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH.into()), Mm(PAGE_HEIGHT.into()), "Report");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
        let canvas = doc.get_page(page).get_layer(layer);

        draw(&canvas, &lines, &regular, &bold)?;

        let bytes = doc.save_to_bytes().map_err(pdf_error)?;
        tracing::debug!(bytes = bytes.len(), "rendered pdf report");
        Ok(bytes)
    }
}

fn lines(overview: &Overview) -> Vec<Line> {
    let mut lines = vec![Line::Title(REPORT_TITLE.to_string()), Line::Gap];
    for section in layout::sections(overview) {
        lines.push(Line::Header(section.title.to_string()));
        for (label, value) in section.rows {
            lines.push(Line::Body(format!("{label}: {value}")));
        }
        lines.push(Line::Gap);
    }
    lines.push(Line::Body(format!(
        "{GENERATED_AT}: {}",
        layout::timestamp(overview.generated_at_utc())
    )));
    lines
}

fn draw(
    canvas: &PdfLayerReference,
    lines: &[Line],
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) -> Result<(), RenderError> {
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        let (font, size, leading, blue, text) = match line {
            Line::Title(t) => (bold, TITLE_SIZE, TITLE_LEADING, false, t),
            Line::Header(t) => (bold, HEADER_SIZE, HEADER_LEADING, true, t),
            Line::Body(t) => (regular, BODY_SIZE, BODY_LEADING, false, t),
            Line::Gap => {
                y -= SECTION_GAP;
                continue;
            }
        };

        if y < MARGIN {
            return Err(RenderError::encoding(
                ExportFormat::Document,
                "report does not fit on a single page",
            ));
        }

        let x = match line {
            // Helvetica-Bold averages roughly 0.55em per glyph.
            Line::Title(_) => ((PAGE_WIDTH - text.len() as f32 * size * 0.55 * PT_TO_MM) / 2.0).max(MARGIN),
            _ => MARGIN,
        };

        let fill = if blue { (0.0, 0.0, 1.0) } else { (0.0, 0.0, 0.0) };
        canvas.set_fill_color(Color::Rgb(Rgb::new(fill.0, fill.1, fill.2, None)));
        canvas.use_text(text.as_str(), size.into(), Mm(x.into()), Mm(y.into()), font);
        y -= leading;
    }

    Ok(())
}

/// Standard fonts use WinAnsi; only printable ASCII is accepted.
fn check_encodable(text: &str) -> Result<(), RenderError> {
    match text.chars().find(|c| !matches!(c, ' '..='~')) {
        Some(other) => Err(RenderError::encoding(
            ExportFormat::Document,
            format!("character {other:?} cannot be encoded with a standard font"),
        )),
        None => Ok(()),
    }
}

fn pdf_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::encoding(ExportFormat::Document, err.to_string())
}
