//! Word document writer.
//!
//! Each section becomes a level-1 heading followed by a bordered, fixed-layout
//! table (or one paragraph per row for list sections). Body text is Arial 11.

use std::path::Path;

use docx_rs::{
    Docx, HeightRule, Paragraph, Run, RunFonts, Style, StyleType, Table, TableCell,
    TableCellMargins, TableLayoutType, TableRow, WidthType,
};

use super::{Renderer, create_output};
use crate::error::{Error, Result};
use crate::export::{ColumnRole, Section, SectionKind};

/// Defaults: Arial 11, 120-twip cell margins, 800-twip minimum row height
#[derive(Debug, Clone)]
pub struct DocxRenderer {
    pub font: String,
    /// Half-points (22 = 11pt)
    pub font_size: usize,
    /// Half-points
    pub heading_size: usize,
    pub cell_margin: usize,
    pub min_row_height: f32,
}

impl Default for DocxRenderer {
    fn default() -> Self {
        Self {
            font: "Arial".to_string(),
            font_size: 22,
            heading_size: 28,
            cell_margin: 120,
            min_row_height: 800.0,
        }
    }
}

/// Paragraph style id of section titles
const HEADING_STYLE: &str = "Heading1";

/// Fixed column width for a role, in twips (1440 per inch)
fn column_width(role: ColumnRole) -> usize {
    match role {
        ColumnRole::Index => 1008,
        ColumnRole::Chapter | ColumnRole::Word => 2160,
        ColumnRole::Count => 1584,
        ColumnRole::Translation => 4320,
    }
}

impl DocxRenderer {
    fn heading_style(&self) -> Style {
        Style::new(HEADING_STYLE, StyleType::Paragraph)
            .name("Heading 1")
            .bold()
            .size(self.heading_size)
            .outline_lvl(0)
    }

    fn text_cell(&self, text: &str, width: usize, bold: bool) -> TableCell {
        let mut run = Run::new().add_text(text);
        if bold {
            run = run.bold();
        }
        TableCell::new()
            .add_paragraph(Paragraph::new().add_run(run))
            .width(width, WidthType::Dxa)
    }

    fn table(&self, section: &Section) -> Table {
        let widths: Vec<usize> = section.columns.iter().map(|c| column_width(*c)).collect();

        let header = TableRow::new(
            section
                .columns
                .iter()
                .zip(&widths)
                .map(|(role, w)| self.text_cell(role.label(), *w, true))
                .collect(),
        );

        let mut rows = vec![header];
        for row in &section.rows {
            let cells = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| self.text_cell(&cell.display(), *w, false))
                .collect();
            rows.push(
                TableRow::new(cells)
                    .row_height(self.min_row_height)
                    .height_rule(HeightRule::AtLeast),
            );
        }

        let m = self.cell_margin;
        Table::new(rows)
            .set_grid(widths)
            .layout(TableLayoutType::Fixed)
            .margins(TableCellMargins::new().margin(m, m, m, m))
    }
}

impl Renderer for DocxRenderer {
    fn render(&self, sections: &[Section], path: &Path) -> Result<()> {
        let mut docx = Docx::new()
            .default_fonts(RunFonts::new().ascii(&self.font).hi_ansi(&self.font))
            .default_size(self.font_size)
            .add_style(self.heading_style());

        for section in sections {
            if let Some(title) = &section.title {
                docx = docx.add_paragraph(
                    Paragraph::new()
                        .style(HEADING_STYLE)
                        .add_run(Run::new().add_text(title)),
                );
            }
            match section.kind {
                SectionKind::Table => docx = docx.add_table(self.table(section)),
                SectionKind::List => {
                    for row in &section.rows {
                        let line: Vec<String> = row.iter().map(|c| c.display()).collect();
                        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line.join(" "))));
                    }
                }
            }
            // Space between chapters
            docx = docx.add_paragraph(Paragraph::new());
        }

        let file = create_output(path)?;
        docx.build()
            .pack(file)
            .map_err(|e| Error::Render(format!("DOCX packaging failed: {}", e)))?;
        tracing::debug!("Wrote {} sections to {}", sections.len(), path.display());
        Ok(())
    }
}
