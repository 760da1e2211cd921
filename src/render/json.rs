//! JSON dump of exported sections.

use std::io::{BufWriter, Write};
use std::path::Path;

use super::{Renderer, create_output};
use crate::error::{Error, Result};
use crate::export::Section;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, sections: &[Section], path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(create_output(path)?);
        serde_json::to_writer_pretty(&mut writer, sections)
            .map_err(|e| Error::Render(format!("JSON encoding failed: {}", e)))?;
        writer.flush().map_err(|e| Error::output_write(path, e))?;
        tracing::debug!("Wrote {} sections to {}", sections.len(), path.display());
        Ok(())
    }
}
