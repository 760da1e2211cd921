//! Reshapes chapter reports into renderer-neutral sections.
//!
//! Each [`ExportLayout`] is a pure mapping from reports (and the document
//! vocabulary) to a list of [`Section`]s. Renderers only ever see sections.

use serde::{Deserialize, Serialize};

use crate::frequency::{ChapterReport, document_vocabulary};

/// Which table shape to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportLayout {
    /// Per chapter: S.No | French Word | Occurrences | English Translation
    #[default]
    #[serde(rename = "detailed")]
    DetailedTable,
    /// Per chapter: one word per line
    #[serde(rename = "word-list")]
    WordListOnly,
    /// One table: Chapter | French Word | Occurrences
    #[serde(rename = "tagged-sheet")]
    FlatTaggedSheet,
    /// One column of distinct words across the document
    #[serde(rename = "vocabulary")]
    FlatVocabulary,
}

/// What a column holds; renderers pick widths from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    Index,
    Chapter,
    Word,
    Count,
    Translation,
}

impl ColumnRole {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::Index => "S.No",
            ColumnRole::Chapter => "Chapter",
            ColumnRole::Word => "French Word",
            ColumnRole::Count => "Occurrences",
            ColumnRole::Translation => "English Translation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(u64),
    Text(String),
}

impl Cell {
    pub fn display(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// Bordered table with a header row
    Table,
    /// Plain lines, no header
    List,
}

/// A titled block of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: Option<String>,
    pub kind: SectionKind,
    pub columns: Vec<ColumnRole>,
    pub rows: Vec<Vec<Cell>>,
}

impl Section {
    fn column_of(&self, role: ColumnRole) -> Option<usize> {
        self.columns.iter().position(|c| *c == role)
    }

    /// (word, count) pairs, for sections that carry both columns
    pub fn word_counts(&self) -> Vec<(String, u64)> {
        let (Some(w), Some(c)) = (self.column_of(ColumnRole::Word), self.column_of(ColumnRole::Count))
        else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| match (row.get(w), row.get(c)) {
                (Some(word), Some(Cell::Number(n))) => Some((word.display(), *n)),
                _ => None,
            })
            .collect()
    }
}

/// Title of a chapter block
pub fn chapter_title(report: &ChapterReport) -> String {
    format!("Chapter {} Unique Words", report.chapter.ordinal)
}

/// Map reports onto sections for `layout`
pub fn export(layout: ExportLayout, reports: &[ChapterReport]) -> Vec<Section> {
    match layout {
        ExportLayout::DetailedTable => reports.iter().map(detailed_table).collect(),
        ExportLayout::WordListOnly => reports.iter().map(word_list).collect(),
        ExportLayout::FlatTaggedSheet => vec![tagged_sheet(reports)],
        ExportLayout::FlatVocabulary => vec![vocabulary_table(&document_vocabulary(reports))],
    }
}

fn detailed_table(report: &ChapterReport) -> Section {
    let rows = report
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            vec![
                Cell::Number(i as u64 + 1),
                Cell::Text(e.word.clone()),
                Cell::Number(e.count),
                // Filled in by hand
                Cell::Text(String::new()),
            ]
        })
        .collect();

    Section {
        title: Some(chapter_title(report)),
        kind: SectionKind::Table,
        columns: vec![
            ColumnRole::Index,
            ColumnRole::Word,
            ColumnRole::Count,
            ColumnRole::Translation,
        ],
        rows,
    }
}

fn word_list(report: &ChapterReport) -> Section {
    Section {
        title: Some(chapter_title(report)),
        kind: SectionKind::List,
        columns: vec![ColumnRole::Word],
        rows: report.words().map(|w| vec![Cell::Text(w.to_string())]).collect(),
    }
}

fn tagged_sheet(reports: &[ChapterReport]) -> Section {
    let rows = reports
        .iter()
        .flat_map(|r| {
            let label = r.chapter.label();
            r.entries.iter().map(move |e| {
                vec![
                    Cell::Text(label.clone()),
                    Cell::Text(e.word.clone()),
                    Cell::Number(e.count),
                ]
            })
        })
        .collect();

    Section {
        title: Some("Unique Words by Chapter".to_string()),
        kind: SectionKind::Table,
        columns: vec![ColumnRole::Chapter, ColumnRole::Word, ColumnRole::Count],
        rows,
    }
}

fn vocabulary_table(vocabulary: &[String]) -> Section {
    Section {
        title: Some("Document Vocabulary".to_string()),
        kind: SectionKind::Table,
        columns: vec![ColumnRole::Word],
        rows: vocabulary.iter().map(|w| vec![Cell::Text(w.clone())]).collect(),
    }
}
