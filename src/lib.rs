//! Chapterized French vocabulary extraction.
//!
//! Raw text (from a PDF text layer or OCR) is normalized, split into chapters
//! on heading markers, tokenized with elision merging and counted per chapter.
//! The reports are then reshaped into tables and written as DOCX, XLSX, PDF
//! or JSON.

pub mod config;
pub mod error;
pub mod export;
pub mod frequency;
pub mod ingest;
pub mod language;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod segment;
pub mod tokenize;

pub use config::Config;
pub use error::{Error, Result};
pub use export::{ExportLayout, Section, export};
pub use frequency::{ChapterReport, WordCount, document_vocabulary};
pub use normalize::{compose_accents, normalize_text};
pub use pipeline::{Analysis, ChapterAnalyzer};
pub use render::OutputFormat;
pub use segment::{Chapter, ChapterSegmenter, Segmentation};
pub use tokenize::{RuleSplitter, Token, Tokenizer, UnitSplitter};

// =============================================================================
// Python bindings
// =============================================================================

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;

    use crate::config::SegmentationConfig;
    use crate::pipeline::ChapterAnalyzer;
    use crate::tokenize::Tokenizer;

    fn analyzer(marker_pattern: Option<String>) -> PyResult<ChapterAnalyzer<'static>> {
        let mut config = SegmentationConfig::default();
        if let Some(pattern) = marker_pattern {
            config.marker_pattern = pattern;
        }
        ChapterAnalyzer::new(&config, Tokenizer::default())
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    /// Fold apostrophe variants onto '
    #[pyfunction]
    fn normalize_text(text: String) -> PyResult<String> {
        Ok(crate::normalize::normalize_text(&text))
    }

    /// Lowercase word tokens with elisions merged
    #[pyfunction]
    fn tokenize(text: String) -> PyResult<Vec<String>> {
        let text = crate::normalize::compose_accents(&crate::normalize::normalize_text(&text));
        Ok(Tokenizer::default().words(&text))
    }

    /// Per-chapter word counts
    /// Returns: (markers_found, list of (chapter_label, [(word, count)]))
    #[pyfunction]
    #[pyo3(signature = (text, marker_pattern=None))]
    fn chapter_reports(
        text: String,
        marker_pattern: Option<String>,
    ) -> PyResult<(bool, Vec<(String, Vec<(String, u64)>)>)> {
        let analysis = analyzer(marker_pattern)?.analyze(&text);
        let reports = analysis
            .reports
            .into_iter()
            .map(|r| {
                let label = r.chapter.label();
                let counts = r.entries.into_iter().map(|e| (e.word, e.count)).collect();
                (label, counts)
            })
            .collect();
        Ok((analysis.markers_found, reports))
    }

    /// Sorted distinct words across all chapters
    #[pyfunction]
    #[pyo3(signature = (text, marker_pattern=None))]
    fn document_vocabulary(text: String, marker_pattern: Option<String>) -> PyResult<Vec<String>> {
        Ok(analyzer(marker_pattern)?.analyze(&text).vocabulary())
    }

    #[pymodule]
    fn rust_ocr_vocab(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(normalize_text, m)?)?;
        m.add_function(wrap_pyfunction!(tokenize, m)?)?;
        m.add_function(wrap_pyfunction!(chapter_reports, m)?)?;
        m.add_function(wrap_pyfunction!(document_vocabulary, m)?)?;
        Ok(())
    }
}
