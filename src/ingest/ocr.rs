//! Command-line OCR and rasterization collaborators.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::{OcrEngine, PageRasterizer};
use crate::error::{Error, Result};

/// Run `cmd` and turn spawn failures or a non-zero exit into `Error::Ocr`
fn run(mut cmd: Command, subject: &Path) -> Result<Output> {
    let program = cmd.get_program().to_string_lossy().to_string();
    let output = cmd.output().map_err(|e| Error::Ocr {
        path: subject.to_path_buf(),
        message: format!("cannot run {}: {}", program, e),
    })?;
    if !output.status.success() {
        return Err(Error::Ocr {
            path: subject.to_path_buf(),
            message: format!(
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }
    Ok(output)
}

/// Tesseract invoked as `tesseract <image> stdout -l <lang>`
#[derive(Debug, Clone)]
pub struct TesseractCli {
    pub program: String,
}

impl TesseractCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, image: &Path, language: &str) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(image).arg("stdout").arg("-l").arg(language);
        let output = run(cmd, image)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Poppler's `pdftoppm -r <dpi> -png`
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    pub program: String,
}

impl PdftoppmRasterizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf: &Path, dpi: u32, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-r")
            .arg(dpi.to_string())
            .arg("-png")
            .arg(pdf)
            .arg(out_dir.join("page"));
        run(cmd, pdf)?;

        // pdftoppm zero-pads page numbers, so name order is page order
        let mut pages: Vec<PathBuf> = fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("png"))
            .collect();
        pages.sort();
        tracing::debug!("Rasterized {} pages from {}", pages.len(), pdf.display());
        Ok(pages)
    }
}
