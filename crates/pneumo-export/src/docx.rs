use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};
use pneumo_forms::display::DisplayColor;

use crate::error::ExportError;
use crate::summary::{Summary, SummaryEntry};

const BODY_FONT: &str = "Calibri";
const BODY_SIZE_PT: usize = 11;

/// Generate a DOCX document from a record summary: the title as Heading 1,
/// one Heading 2 per group and one `label : value` paragraph per entry.
pub fn generate_docx(summary: &Summary) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", 16))
        .add_style(heading_style("Heading2", "heading 2", 13))
        .add_paragraph(heading(&summary.title, "Heading1"));

    for group in &summary.groups {
        docx = docx.add_paragraph(heading(&group.title, "Heading2"));
        for entry in &group.entries {
            docx = docx.add_paragraph(entry_paragraph(entry));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // half-points
        .bold()
}

fn heading(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new().style(style_id).add_run(Run::new().add_text(text))
}

fn entry_paragraph(entry: &SummaryEntry) -> Paragraph {
    let label = body_run(&format!("{} : ", entry.label)).bold();
    let mut value = body_run(&entry.value);
    if let Some(hex) = color_hex(entry.color) {
        value = value.color(hex).bold();
    }
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(label)
        .add_run(value)
}

fn body_run(text: &str) -> Run {
    Run::new()
        .add_text(text)
        .size(BODY_SIZE_PT * 2)
        .fonts(RunFonts::new().ascii(BODY_FONT).hi_ansi(BODY_FONT))
}

fn color_hex(color: DisplayColor) -> Option<&'static str> {
    match color {
        DisplayColor::Neutral => None,
        DisplayColor::Info => Some("1F6FB2"),
        DisplayColor::Warning => Some("B26B00"),
        DisplayColor::Danger => Some("B3261E"),
    }
}
