use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use rust_ocr_vocab::config::Config;
use rust_ocr_vocab::export::ExportLayout;
use rust_ocr_vocab::pipeline;
use rust_ocr_vocab::render::OutputFormat;

/// Build per-chapter French word lists from a book PDF or a folder of page scans.
#[derive(Parser, Debug)]
#[command(name = "rust-ocr-vocab", version)]
struct Cli {
    /// PDF file or folder of page images (prompted for when omitted)
    input: Option<PathBuf>,

    /// Folder for the result document (prompted for when omitted)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output document format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Table layout
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Regex matching chapter headings
    #[arg(long)]
    marker_pattern: Option<String>,

    /// Rasterization resolution for scanned PDFs
    #[arg(long)]
    dpi: Option<u32>,

    /// OCR every page even when the PDF has a text layer
    #[arg(long)]
    force_ocr: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Docx,
    Xlsx,
    Pdf,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Docx => OutputFormat::Docx,
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Detailed,
    WordList,
    TaggedSheet,
    Vocabulary,
}

impl From<LayoutArg> for ExportLayout {
    fn from(l: LayoutArg) -> Self {
        match l {
            LayoutArg::Detailed => ExportLayout::DetailedTable,
            LayoutArg::WordList => ExportLayout::WordListOnly,
            LayoutArg::TaggedSheet => ExportLayout::FlatTaggedSheet,
            LayoutArg::Vocabulary => ExportLayout::FlatVocabulary,
        }
    }
}

impl Cli {
    /// File config first, then flag overrides
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(f) = self.format {
            config.output.format = f.into();
        }
        if let Some(l) = self.layout {
            config.output.layout = l.into();
        }
        if let Some(p) = &self.marker_pattern {
            config.segmentation.marker_pattern = p.clone();
        }
        if let Some(dpi) = self.dpi {
            config.ingest.dpi = dpi;
        }
        if self.force_ocr {
            config.ingest.force_ocr = true;
        }
        config.validate()?;
        Ok(config)
    }

    fn run(self) -> Result<()> {
        let config = self.config()?;

        let input = match self.input {
            Some(p) => p,
            None => prompt_path("Enter full path to input PDF file or image folder: ")?,
        };
        let output_dir = match self.output_dir {
            Some(p) => p,
            None => prompt_path("Enter full path to output folder where the result will be saved: ")?,
        };

        let saved = pipeline::run(&config, &input, &output_dir)
            .with_context(|| format!("Processing '{}' failed", input.display()))?;
        println!("Done! Saved output to '{}'", saved.display());
        Ok(())
    }
}

fn prompt_path(question: &str) -> Result<PathBuf> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rust_ocr_vocab=info")),
        )
        .init();

    Cli::parse().run()
}
