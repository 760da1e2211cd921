//! TOML configuration.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. The CLI overrides individual fields after loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::ExportLayout;
use crate::render::OutputFormat;
use crate::segment::{ChapterSegmenter, DEFAULT_MARKER_PATTERN};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub segmentation: SegmentationConfig,
    pub ingest: IngestConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string
    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.segmentation.segmenter()?;
        let ratio = self.ingest.text_native_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(Error::Config(format!(
                "ingest.text_native_ratio must be within 0..=1, got {}",
                ratio
            )));
        }
        if self.ingest.dpi == 0 {
            return Err(Error::Config("ingest.dpi must be positive".into()));
        }
        Ok(())
    }
}

/// Text analysis options: chapter splitting and word forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Regex matching a chapter heading
    pub marker_pattern: String,
    /// Count the words of the matched heading ("chapitre") in the chapter
    pub count_heading_words: bool,
    /// Compose decomposed accents (NFC) before tokenizing
    pub compose_accents: bool,
}

impl SegmentationConfig {
    pub fn segmenter(&self) -> Result<ChapterSegmenter> {
        ChapterSegmenter::new(&self.marker_pattern)
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            marker_pattern: DEFAULT_MARKER_PATTERN.to_string(),
            count_heading_words: false,
            compose_accents: true,
        }
    }
}

/// Text recovery options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Tesseract language hint
    pub ocr_language: String,
    /// Rasterization resolution for scanned PDFs
    pub dpi: u32,
    /// Share of pages that must carry text for a PDF to count as text-native
    pub text_native_ratio: f64,
    /// Trimmed characters a page needs to count as carrying text
    pub min_page_chars: usize,
    /// Skip direct extraction and OCR every page
    pub force_ocr: bool,
    /// Tesseract executable
    pub tesseract: String,
    /// Poppler pdftoppm executable
    pub pdftoppm: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            ocr_language: "fra".to_string(),
            dpi: 600,
            text_native_ratio: 0.7,
            min_page_chars: 30,
            force_ocr: false,
            tesseract: "tesseract".to_string(),
            pdftoppm: "pdftoppm".to_string(),
        }
    }
}

/// Output options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub layout: ExportLayout,
    /// Output file name without extension
    pub file_stem: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Docx,
            layout: ExportLayout::DetailedTable,
            file_stem: "output_unique_words".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ingest.ocr_language, "fra");
        assert_eq!(config.ingest.dpi, 600);
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
            [segmentation]
            marker_pattern = '(?i)Partie\s+\d+'

            [ingest]
            dpi = 300

            [output]
            format = "xlsx"
            layout = "tagged-sheet"
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.segmentation.marker_pattern, r"(?i)Partie\s+\d+");
        assert!(!config.segmentation.count_heading_words);
        assert!(config.segmentation.compose_accents);
        assert_eq!(config.ingest.dpi, 300);
        assert_eq!(config.ingest.min_page_chars, 30);
        assert_eq!(config.output.format, OutputFormat::Xlsx);
        assert_eq!(config.output.layout, ExportLayout::FlatTaggedSheet);
        assert_eq!(config.output.file_stem, "output_unique_words");
    }

    #[test]
    fn test_bad_marker_rejected() {
        let err = Config::from_toml("[segmentation]\nmarker_pattern = 'Chapitre('").unwrap_err();
        assert!(matches!(err, Error::InvalidMarkerPattern(_)));
    }

    #[test]
    fn test_bad_ratio_rejected() {
        let err = Config::from_toml("[ingest]\ntext_native_ratio = 1.5").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(Config::from_toml("[ingest"), Err(Error::Config(_))));
    }
}
