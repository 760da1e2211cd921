//! Chapter segmentation on heading markers.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default heading marker: "Chapitre" + whitespace + digits, any case
pub const DEFAULT_MARKER_PATTERN: &str = r"(?i)Chapitre\s+\d+";

lazy_static! {
    static ref DEFAULT_MARKER: Regex = Regex::new(DEFAULT_MARKER_PATTERN).unwrap();
}

/// A contiguous span of document text following a heading marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based position in the document
    pub ordinal: usize,
    /// Matched marker text, trimmed. `None` for the whole-document fallback.
    pub header: Option<String>,
    /// Text up to the next marker, trimmed
    pub body: String,
}

impl Chapter {
    /// Label used in flat tables: the header on one line, or "Chapter N"
    /// without one
    pub fn label(&self) -> String {
        match &self.header {
            Some(h) => h.split_whitespace().collect::<Vec<_>>().join(" "),
            None => format!("Chapter {}", self.ordinal),
        }
    }
}

/// Result of splitting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub chapters: Vec<Chapter>,
    /// False when no marker matched and the whole text became one chapter
    pub markers_found: bool,
}

/// Splits text on a configurable marker pattern.
#[derive(Debug, Clone)]
pub struct ChapterSegmenter {
    marker: Regex,
}

impl ChapterSegmenter {
    /// Build a segmenter from a regex source string
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            marker: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.marker.as_str()
    }

    /// Split `text` into chapters.
    ///
    /// Text before the first marker is dropped. With no marker at all the
    /// whole (trimmed) text becomes chapter 1 with no header and
    /// `markers_found` is false.
    pub fn segment(&self, text: &str) -> Segmentation {
        let matches: Vec<regex::Match<'_>> = self.marker.find_iter(text).collect();

        if matches.is_empty() {
            return Segmentation {
                chapters: vec![Chapter {
                    ordinal: 1,
                    header: None,
                    body: text.trim().to_string(),
                }],
                markers_found: false,
            };
        }

        let chapters = matches
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let body_end = matches.get(i + 1).map_or(text.len(), |next| next.start());
                Chapter {
                    ordinal: i + 1,
                    header: Some(m.as_str().trim().to_string()),
                    body: text[m.end()..body_end].trim().to_string(),
                }
            })
            .collect();

        Segmentation {
            chapters,
            markers_found: true,
        }
    }
}

impl Default for ChapterSegmenter {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.clone(),
        }
    }
}
