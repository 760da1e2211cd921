//! Excel spreadsheet writer.

use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::Renderer;
use crate::error::{Error, Result};
use crate::export::{Cell, Section, SectionKind};

/// Longest sheet name Excel accepts
const MAX_SHEET_NAME: usize = 31;

/// One worksheet per section: bold header row, data rows, columns sized to
/// their content and capped at `max_column_width` characters.
#[derive(Debug, Clone)]
pub struct XlsxRenderer {
    pub max_column_width: usize,
}

impl Default for XlsxRenderer {
    fn default() -> Self {
        Self { max_column_width: 50 }
    }
}

fn xlsx_error(path: &Path, e: XlsxError) -> Error {
    match e {
        XlsxError::IoError(io) => Error::output_write(path, io),
        other => Error::Render(format!("XLSX: {}", other)),
    }
}

/// Sheet name derived from the section title, unique within the workbook
fn sheet_name(section: &Section, index: usize, used: &mut HashSet<String>) -> String {
    let base: String = section
        .title
        .as_deref()
        .unwrap_or("Words")
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    let name = if base.is_empty() || used.contains(&base) {
        format!("Sheet{}", index + 1)
    } else {
        base
    };
    used.insert(name.clone());
    name
}

impl XlsxRenderer {
    /// Content width of each column, in characters
    fn column_widths(&self, section: &Section) -> Vec<usize> {
        let mut widths: Vec<usize> = match section.kind {
            SectionKind::Table => section.columns.iter().map(|c| c.label().chars().count()).collect(),
            SectionKind::List => vec![0; section.columns.len()],
        };
        for row in &section.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.display().chars().count());
                }
            }
        }
        widths
            .into_iter()
            .map(|w| (w + 2).min(self.max_column_width))
            .collect()
    }

    fn fill_sheet(&self, sheet: &mut Worksheet, section: &Section) -> std::result::Result<(), XlsxError> {
        let bold = Format::new().set_bold();
        let mut row_index: u32 = 0;

        if section.kind == SectionKind::Table {
            for (col, role) in section.columns.iter().enumerate() {
                sheet.write_string_with_format(0, col as u16, role.label(), &bold)?;
            }
            row_index = 1;
        }

        for row in &section.rows {
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Number(n) => sheet.write_number(row_index, col as u16, *n as f64)?,
                    Cell::Text(s) => sheet.write_string(row_index, col as u16, s)?,
                };
            }
            row_index += 1;
        }

        for (col, width) in self.column_widths(section).into_iter().enumerate() {
            sheet.set_column_width(col as u16, width as f64)?;
        }
        Ok(())
    }
}

impl Renderer for XlsxRenderer {
    fn render(&self, sections: &[Section], path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let mut used = HashSet::new();

        for (i, section) in sections.iter().enumerate() {
            let name = sheet_name(section, i, &mut used);
            let sheet = workbook.add_worksheet();
            sheet.set_name(&name).map_err(|e| xlsx_error(path, e))?;
            self.fill_sheet(sheet, section).map_err(|e| xlsx_error(path, e))?;
        }

        // An empty workbook is not a valid file
        if sections.is_empty() {
            workbook.add_worksheet();
        }

        workbook.save(path).map_err(|e| xlsx_error(path, e))?;
        tracing::debug!("Wrote {} worksheets to {}", sections.len(), path.display());
        Ok(())
    }
}
