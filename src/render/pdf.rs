//! Paginated PDF report.
//!
//! One page per section with a bold title and a bordered table of fixed
//! column widths. Rows that do not fit above the bottom margin continue on a
//! new page. Text uses the standard Helvetica fonts with WinAnsi encoding, so
//! no font has to be embedded; text outside WinAnsi is refused.

use std::io::BufWriter;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

use super::{Renderer, create_output};
use crate::error::{Error, Result};
use crate::export::{ColumnRole, Section, SectionKind};

const PT_PER_MM: f32 = 72.0 / 25.4;

/// A4 portrait, in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

/// Layout in millimetres
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    pub margin: f32,
    pub bottom_margin: f32,
    pub row_height: f32,
    pub title_size: f32,
    pub header_size: f32,
    pub body_size: f32,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            margin: 10.0,
            bottom_margin: 15.0,
            row_height: 10.0,
            title_size: 14.0,
            header_size: 12.0,
            body_size: 11.0,
        }
    }
}

/// Column width in millimetres
fn column_width(role: ColumnRole) -> f32 {
    match role {
        ColumnRole::Index => 15.0,
        ColumnRole::Chapter => 40.0,
        ColumnRole::Word => 60.0,
        ColumnRole::Count => 30.0,
        ColumnRole::Translation => 80.0,
    }
}

/// Encoding of both report fonts
const FONT_ENCODING: &str = "WinAnsiEncoding";

/// Encode text for the report fonts.
///
/// Text must survive the WinAnsi table unchanged. A character with no
/// WinAnsi slot (the U+FB01 ligature, non-Latin scripts) is a render error.
fn win_ansi(text: &str) -> Result<Vec<u8>> {
    let bytes = Document::encode_text(Some(FONT_ENCODING), text);
    if Document::decode_text(Some(FONT_ENCODING), &bytes) == text {
        return Ok(bytes);
    }
    let unsupported: Vec<String> = text
        .chars()
        .filter(|c| {
            let s = c.to_string();
            Document::decode_text(Some(FONT_ENCODING), &Document::encode_text(Some(FONT_ENCODING), &s)) != s
        })
        .map(|c| format!("U+{:04X}", c as u32))
        .collect();
    Err(Error::Render(format!(
        "'{}' contains characters the PDF fonts cannot encode ({}); use docx, xlsx or json output",
        text,
        unsupported.join(", ")
    )))
}

fn real(x: f32) -> Object {
    Object::Real(x.into())
}

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Content streams under construction, with a cursor measured in mm from the top
struct PageWriter<'r> {
    layout: &'r PdfRenderer,
    pages: Vec<Vec<Operation>>,
    cursor: f32,
}

impl<'r> PageWriter<'r> {
    fn new(layout: &'r PdfRenderer) -> Self {
        Self {
            layout,
            pages: Vec::new(),
            cursor: 0.0,
        }
    }

    fn add_page(&mut self) {
        self.pages.push(vec![Operation::new("w", vec![real(0.57)])]);
        self.cursor = self.layout.margin;
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Break the page if `height` mm no longer fits
    fn reserve(&mut self, height: f32) {
        let limit = PAGE_HEIGHT / PT_PER_MM - self.layout.bottom_margin;
        if self.pages.is_empty() || self.cursor + height > limit {
            self.add_page();
        }
    }

    fn text(&mut self, font: Font, size: f32, x_mm: f32, baseline_mm: f32, text: &str) -> Result<()> {
        let encoded = win_ansi(text)?;
        let x = x_mm * PT_PER_MM;
        let y = PAGE_HEIGHT - baseline_mm * PT_PER_MM;
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.resource().into(), real(size)]));
        ops.push(Operation::new("Td", vec![real(x), real(y)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encoded, StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn rect(&mut self, x_mm: f32, top_mm: f32, w_mm: f32, h_mm: f32) {
        let x = x_mm * PT_PER_MM;
        let y = PAGE_HEIGHT - (top_mm + h_mm) * PT_PER_MM;
        let ops = self.ops();
        ops.push(Operation::new(
            "re",
            vec![real(x), real(y), real(w_mm * PT_PER_MM), real(h_mm * PT_PER_MM)],
        ));
        ops.push(Operation::new("S", vec![]));
    }

    /// One bordered row at the cursor
    fn row(&mut self, widths: &[f32], cells: &[String], font: Font, size: f32) -> Result<()> {
        let h = self.layout.row_height;
        self.reserve(h);
        let top = self.cursor;
        // Baseline roughly centred in the cell
        let baseline = top + h / 2.0 + size * 0.35 / PT_PER_MM;
        let mut x = self.layout.margin;
        for (w, cell) in widths.iter().zip(cells) {
            self.rect(x, top, *w, h);
            self.text(font, size, x + 1.0, baseline, cell)?;
            x += w;
        }
        self.cursor += h;
        Ok(())
    }

    fn line(&mut self, text: &str, size: f32) -> Result<()> {
        let h = self.layout.row_height * 0.7;
        self.reserve(h);
        let baseline = self.cursor + h / 2.0 + size * 0.35 / PT_PER_MM;
        let x = self.layout.margin;
        self.text(Font::Regular, size, x, baseline, text)?;
        self.cursor += h;
        Ok(())
    }

    fn section(&mut self, section: &Section) -> Result<()> {
        let layout = self.layout;
        self.add_page();

        if let Some(title) = &section.title {
            let h = layout.row_height;
            let baseline = self.cursor + h / 2.0 + layout.title_size * 0.35 / PT_PER_MM;
            self.text(Font::Bold, layout.title_size, layout.margin, baseline, title)?;
            self.cursor += h + 5.0;
        }

        match section.kind {
            SectionKind::Table => {
                let widths: Vec<f32> = section.columns.iter().map(|c| column_width(*c)).collect();
                let header: Vec<String> = section.columns.iter().map(|c| c.label().to_string()).collect();
                self.row(&widths, &header, Font::Bold, layout.header_size)?;
                for row in &section.rows {
                    let cells: Vec<String> = row.iter().map(|c| c.display()).collect();
                    self.row(&widths, &cells, Font::Regular, layout.body_size)?;
                }
            }
            SectionKind::List => {
                for row in &section.rows {
                    let cells: Vec<String> = row.iter().map(|c| c.display()).collect();
                    self.line(&cells.join(" "), layout.body_size)?;
                }
            }
        }
        Ok(())
    }
}

impl PdfRenderer {
    /// Lay out sections into per-page operation lists
    fn layout_pages(&self, sections: &[Section]) -> Result<Vec<Vec<Operation>>> {
        let mut writer = PageWriter::new(self);
        for section in sections {
            writer.section(section)?;
        }
        if writer.pages.is_empty() {
            writer.add_page();
        }
        Ok(writer.pages)
    }

    fn build_document(&self, sections: &[Section]) -> Result<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => FONT_ENCODING,
        });
        let bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => FONT_ENCODING,
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in self.layout_pages(sections)? {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| Error::Render(format!("PDF content encoding failed: {}", e)))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();
        Ok(doc)
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, sections: &[Section], path: &Path) -> Result<()> {
        let mut doc = self.build_document(sections)?;
        let mut writer = BufWriter::new(create_output(path)?);
        doc.save_to(&mut writer)
            .map_err(|e| Error::output_write(path, std::io::Error::other(e.to_string())))?;
        tracing::debug!("Wrote {} pages to {}", doc.get_pages().len(), path.display());
        Ok(())
    }
}
