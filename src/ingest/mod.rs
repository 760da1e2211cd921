//! Text recovery from PDFs and image folders.
//!
//! A PDF whose pages mostly carry extractable text is read directly. Anything
//! else (scanned PDFs, image folders, PDFs whose extraction fails) goes page
//! by page through OCR. OCR failures abort the run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::IngestConfig;
use crate::error::{Error, Result};

pub mod ocr;
pub mod pdf;

pub use self::ocr::{PdftoppmRasterizer, TesseractCli};
pub use self::pdf::LopdfText;

/// Image extensions accepted in an input folder
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Recognizes text in a page image
pub trait OcrEngine {
    fn recognize(&self, image: &Path, language: &str) -> Result<String>;
}

/// Renders PDF pages to image files inside `out_dir`, returned in page order
pub trait PageRasterizer {
    fn rasterize(&self, pdf: &Path, dpi: u32, out_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Extracts embedded text, one string per page
pub trait PdfTextSource {
    fn page_texts(&self, pdf: &Path) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryMethod {
    TextExtraction,
    Ocr,
}

/// Full text of one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredText {
    pub text: String,
    pub pages: usize,
    pub method: RecoveryMethod,
}

/// True when more than `ratio` of the pages carry over `min_chars` trimmed characters
pub fn is_text_native(pages: &[String], min_chars: usize, ratio: f64) -> bool {
    if pages.is_empty() {
        return false;
    }
    let with_text = pages
        .iter()
        .filter(|p| p.trim().chars().count() > min_chars)
        .count();
    with_text as f64 / pages.len() as f64 > ratio
}

/// Image files in `dir`, sorted by file name
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_image && path.is_file() {
            images.push(path);
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Wires the text, rasterizer and OCR collaborators together
pub struct TextRecovery<'a> {
    config: &'a IngestConfig,
    pdf: &'a dyn PdfTextSource,
    rasterizer: &'a dyn PageRasterizer,
    ocr: &'a dyn OcrEngine,
}

impl<'a> TextRecovery<'a> {
    pub fn new(
        config: &'a IngestConfig,
        pdf: &'a dyn PdfTextSource,
        rasterizer: &'a dyn PageRasterizer,
        ocr: &'a dyn OcrEngine,
    ) -> Self {
        Self {
            config,
            pdf,
            rasterizer,
            ocr,
        }
    }

    /// Recover the text of a PDF file or an image folder
    pub fn recover(&self, input: &Path) -> Result<RecoveredText> {
        if !input.exists() {
            return Err(Error::MissingInput(input.to_path_buf()));
        }

        if input.is_dir() {
            let images = list_images(input)?;
            if images.is_empty() {
                return Err(Error::Extraction {
                    path: input.to_path_buf(),
                    message: "folder contains no images".to_string(),
                });
            }
            return self.ocr_images(&images);
        }

        if self.config.force_ocr {
            return self.ocr_pdf(input);
        }

        match self.pdf.page_texts(input) {
            Ok(pages) => {
                if is_text_native(&pages, self.config.min_page_chars, self.config.text_native_ratio) {
                    tracing::info!("Extracted embedded text from {} pages", pages.len());
                    Ok(RecoveredText {
                        text: pages.join("\n"),
                        pages: pages.len(),
                        method: RecoveryMethod::TextExtraction,
                    })
                } else {
                    tracing::info!("Document looks scanned, switching to OCR");
                    self.ocr_pdf(input)
                }
            }
            Err(e) => {
                tracing::warn!("Text extraction failed ({}), falling back to OCR", e);
                self.ocr_pdf(input)
            }
        }
    }

    fn ocr_pdf(&self, pdf: &Path) -> Result<RecoveredText> {
        tracing::info!("Converting PDF pages to images at {} dpi", self.config.dpi);
        let scratch = tempfile::tempdir()?;
        let images = self.rasterizer.rasterize(pdf, self.config.dpi, scratch.path())?;
        self.ocr_images(&images)
    }

    fn ocr_images(&self, images: &[PathBuf]) -> Result<RecoveredText> {
        tracing::info!("Performing OCR on {} pages", images.len());
        let mut text = String::new();
        for (i, image) in images.iter().enumerate() {
            tracing::debug!("OCR page {}: {}", i + 1, image.display());
            text.push_str(&self.ocr.recognize(image, &self.config.ocr_language)?);
            text.push('\n');
        }
        Ok(RecoveredText {
            text,
            pages: images.len(),
            method: RecoveryMethod::Ocr,
        })
    }
}
