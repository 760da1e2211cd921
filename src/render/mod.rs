//! Output document writers.
//!
//! A renderer turns exported [`Section`]s into one file. Renderers never
//! reorder rows; what they write back out is exactly what the export layout
//! produced.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::Section;

pub mod docx;
pub mod json;
pub mod pdf;
pub mod xlsx;

pub use self::docx::DocxRenderer;
pub use self::json::JsonRenderer;
pub use self::pdf::PdfRenderer;
pub use self::xlsx::XlsxRenderer;

/// Output document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Word table document
    #[default]
    Docx,
    /// Excel spreadsheet
    Xlsx,
    /// Paginated PDF report
    Pdf,
    /// Sections as JSON
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
        }
    }

    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Docx => Box::new(DocxRenderer::default()),
            OutputFormat::Xlsx => Box::new(XlsxRenderer::default()),
            OutputFormat::Pdf => Box::new(PdfRenderer::default()),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}

/// Writes sections to a file
pub trait Renderer {
    fn render(&self, sections: &[Section], path: &Path) -> Result<()>;
}

/// Create (or truncate) an output file
pub(crate) fn create_output(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::output_write(path, e))
}
