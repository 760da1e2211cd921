//! End-to-end run: recover text, chapterize, count, export, render.

use std::path::{Path, PathBuf};

use crate::config::{Config, SegmentationConfig};
use crate::error::{Error, Result};
use crate::export::export;
use crate::frequency::{ChapterReport, document_vocabulary};
use crate::ingest::{LopdfText, PdftoppmRasterizer, TesseractCli, TextRecovery};
use crate::language::non_french_language;
use crate::normalize::{compose_accents, normalize_text};
use crate::segment::{Chapter, ChapterSegmenter};
use crate::tokenize::Tokenizer;

/// Per-chapter reports for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub reports: Vec<ChapterReport>,
    /// False when the document had no chapter heading
    pub markers_found: bool,
}

impl Analysis {
    /// Distinct words over all chapters
    pub fn vocabulary(&self) -> Vec<String> {
        document_vocabulary(&self.reports)
    }
}

/// Normalizer, segmenter, tokenizer and aggregator in sequence
pub struct ChapterAnalyzer<'s> {
    segmenter: ChapterSegmenter,
    tokenizer: Tokenizer<'s>,
    count_heading_words: bool,
    compose_accents: bool,
}

impl<'s> ChapterAnalyzer<'s> {
    pub fn new(config: &SegmentationConfig, tokenizer: Tokenizer<'s>) -> Result<Self> {
        Ok(Self {
            segmenter: config.segmenter()?,
            tokenizer,
            count_heading_words: config.count_heading_words,
            compose_accents: config.compose_accents,
        })
    }

    /// Analyze raw document text. Chapters are processed one at a time.
    pub fn analyze(&self, raw_text: &str) -> Analysis {
        let mut text = normalize_text(raw_text);
        if self.compose_accents {
            text = compose_accents(&text);
        }

        tracing::info!("Splitting text into chapters");
        let segmentation = self.segmenter.segment(&text);
        if !segmentation.markers_found {
            tracing::warn!(
                "No chapter headings matched '{}'; treating the whole text as one chapter",
                self.segmenter.pattern()
            );
        }
        tracing::info!("Found {} chapters", segmentation.chapters.len());

        let reports = segmentation
            .chapters
            .into_iter()
            .map(|chapter| self.report(chapter))
            .collect();

        Analysis {
            reports,
            markers_found: segmentation.markers_found,
        }
    }

    fn report(&self, chapter: Chapter) -> ChapterReport {
        tracing::info!("Processing chapter {}", chapter.ordinal);
        let counted = match (&chapter.header, self.count_heading_words) {
            (Some(header), true) => format!("{}\n{}", header, chapter.body),
            _ => chapter.body.clone(),
        };
        let tokens: Vec<String> = self.tokenizer.tokenize(&counted).map(|t| t.text).collect();
        let report = ChapterReport::aggregate(chapter, tokens);
        tracing::debug!(
            "Chapter {}: {} tokens, {} distinct words",
            report.chapter.ordinal,
            report.total_tokens,
            report.distinct_words()
        );
        report
    }
}

/// Output path for a run
pub fn output_path(config: &Config, output_dir: &Path) -> PathBuf {
    output_dir.join(format!(
        "{}.{}",
        config.output.file_stem,
        config.output.format.extension()
    ))
}

/// Process `input` (PDF file or image folder) into one output document in
/// `output_dir`, using the command-line OCR collaborators.
pub fn run(config: &Config, input: &Path, output_dir: &Path) -> Result<PathBuf> {
    if !input.exists() {
        return Err(Error::MissingInput(input.to_path_buf()));
    }
    if !output_dir.is_dir() {
        return Err(Error::MissingOutputDir(output_dir.to_path_buf()));
    }

    let ocr = TesseractCli::new(&config.ingest.tesseract);
    let rasterizer = PdftoppmRasterizer::new(&config.ingest.pdftoppm);
    let recovered = TextRecovery::new(&config.ingest, &LopdfText, &rasterizer, &ocr).recover(input)?;

    render_text(config, &recovered.text, output_dir)
}

/// Analyze already recovered text and render it into `output_dir`
pub fn render_text(config: &Config, text: &str, output_dir: &Path) -> Result<PathBuf> {
    if let Some(lang) = non_french_language(text) {
        tracing::warn!(
            "Recovered text looks like {} rather than French; results may be poor",
            lang.eng_name()
        );
    }

    let analyzer = ChapterAnalyzer::new(&config.segmentation, Tokenizer::default())?;
    let analysis = analyzer.analyze(text);

    let sections = export(config.output.layout, &analysis.reports);
    let path = output_path(config, output_dir);
    config.output.format.renderer().render(&sections, &path)?;
    tracing::info!("Saved output to {}", path.display());
    Ok(path)
}
