//! Fixed-layout PDF rendering with printpdf built-in fonts.
//!
//! US letter, 1" margins, 11pt body. Every list field of the document is
//! reproduced in order with no truncation; content that overflows a page
//! continues on a fresh one.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::models::guide::GuideDocument;
use crate::render::RenderError;

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;

const LINE_ADVANCE_MM: f32 = 5.5;
const SECTION_GAP_MM: f32 = 4.0;
/// Conservative character budget for 11pt Helvetica inside the margins.
const WRAP_COLS: usize = 88;

/// Renders the guide into PDF bytes. Pure function of its inputs apart from
/// the creation timestamp the PDF library stamps into document metadata.
pub fn render_pdf(doc: &GuideDocument, subject: &str) -> Result<Vec<u8>, RenderError> {
    let (pdf, page, layer) = PdfDocument::new(
        subject,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );

    let body_font = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(engine_failure)?;
    let bold_font = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(engine_failure)?;

    let mut writer = PageWriter {
        pdf: &pdf,
        layer: pdf.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    writer.line(subject, TITLE_SIZE, &bold_font);
    writer.gap(SECTION_GAP_MM);
    writer.paragraph(&doc.greeting, &body_font);

    writer.heading("Your Key Strengths", &bold_font);
    for strength in &doc.key_strengths {
        writer.bullet(strength, &body_font);
    }

    writer.heading("Areas to Focus On", &bold_font);
    for area in &doc.areas_to_focus {
        writer.bullet(area, &body_font);
    }

    writer.heading("Actionable Steps", &bold_font);
    for (index, step) in doc.actionable_steps.iter().enumerate() {
        writer.line(
            &format!("{}. {}", index + 1, step.title),
            BODY_SIZE,
            &bold_font,
        );
        writer.paragraph(&step.description, &body_font);
    }

    writer.heading("Conversation Starters", &bold_font);
    for starter in &doc.conversation_starters {
        writer.bullet(starter, &body_font);
    }

    writer.gap(SECTION_GAP_MM);
    writer.paragraph(&doc.closing_remark, &body_font);

    pdf.save_to_bytes().map_err(engine_failure)
}

fn engine_failure(err: impl std::fmt::Display) -> RenderError {
    RenderError::EngineFailure(err.to_string())
}

/// Tracks the write position and starts a new page when the cursor would
/// cross the bottom margin.
struct PageWriter<'a> {
    pdf: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        if self.y < MARGIN_MM {
            let (page, layer) = self
                .pdf
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.pdf.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= LINE_ADVANCE_MM;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn heading(&mut self, text: &str, font: &IndirectFontRef) {
        self.gap(SECTION_GAP_MM);
        self.line(text, HEADING_SIZE, font);
    }

    fn paragraph(&mut self, text: &str, font: &IndirectFontRef) {
        for line in wrap_text(text, WRAP_COLS) {
            self.line(&line, BODY_SIZE, font);
        }
    }

    fn bullet(&mut self, text: &str, font: &IndirectFontRef) {
        let mut lines = wrap_text(text, WRAP_COLS - 2).into_iter();
        if let Some(first) = lines.next() {
            self.line(&format!("\u{2022} {first}"), BODY_SIZE, font);
        }
        for rest in lines {
            self.line(&format!("  {rest}"), BODY_SIZE, font);
        }
    }
}

/// Greedy word wrap. Words longer than the budget get a line of their own
/// rather than being cut.
fn wrap_text(text: &str, cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= cols {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
