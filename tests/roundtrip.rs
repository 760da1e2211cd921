//! Render reports, read the files back, compare (word, count) pairs.

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use pretty_assertions::assert_eq;
use rust_ocr_vocab::config::SegmentationConfig;
use rust_ocr_vocab::export::{ExportLayout, Section, export};
use rust_ocr_vocab::render::OutputFormat;
use rust_ocr_vocab::{ChapterAnalyzer, ChapterReport, Tokenizer, document_vocabulary};

const BOOK: &str = "La Petite Sirène\n\
    Chapitre 1\n\
    Au large, l\u{2019}eau est bleue comme les pétales du plus beau bleuet.\n\
    Elle est claire comme le verre le plus pur.\n\
    Chapitre 2\n\
    Le roi de la mer était veuf depuis longtemps, et sa vieille mère gouvernait sa maison.\n\
    Chapitre 3\n\
    Quand tu auras quinze ans, tu pourras monter à la surface de l'eau.";

const ACCENTED: &str = "Chapitre 1\n\
    Le cœur de la sœur bat; l\u{2019}été est là, l\u{2019}été passe.\n\
    Chapitre 2\n\
    Šárka lit l'Œuvre de Zola à Noël… Ça « marche ».";

fn analyze(text: &str) -> Vec<ChapterReport> {
    ChapterAnalyzer::new(&SegmentationConfig::default(), Tokenizer::default())
        .unwrap()
        .analyze(text)
        .reports
}

fn reports() -> Vec<ChapterReport> {
    analyze(BOOK)
}

fn expected_pairs(report: &ChapterReport) -> Vec<(String, u64)> {
    report.entries.iter().map(|e| (e.word.clone(), e.count)).collect()
}

fn render(format: OutputFormat, sections: &[Section], dir: &Path) -> std::path::PathBuf {
    let path = dir.join(format!("out.{}", format.extension()));
    format.renderer().render(sections, &path).unwrap();
    path
}

#[test]
fn test_json_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let reports = reports();
    let sections = export(ExportLayout::DetailedTable, &reports);
    let path = render(OutputFormat::Json, &sections, dir.path());

    let read: Vec<Section> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(read, sections);
    for (section, report) in read.iter().zip(&reports) {
        assert_eq!(section.word_counts(), expected_pairs(report));
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => format!("{}", *f as u64),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[test]
fn test_xlsx_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let reports = reports();
    let sections = export(ExportLayout::DetailedTable, &reports);
    let path = render(OutputFormat::Xlsx, &sections, dir.path());

    let mut workbook = open_workbook_auto(&path).unwrap();
    let names = workbook.sheet_names().to_vec();
    assert_eq!(names, vec!["Chapter 1 Unique Words", "Chapter 2 Unique Words", "Chapter 3 Unique Words"]);

    for (name, report) in names.iter().zip(&reports) {
        let range = workbook.worksheet_range(name).unwrap();
        let rows: Vec<Vec<String>> = range.rows().map(|r| r.iter().map(cell_text).collect()).collect();
        assert_eq!(rows[0][..3], ["S.No", "French Word", "Occurrences"]);

        let pairs: Vec<(String, u64)> = rows[1..]
            .iter()
            .map(|r| (r[1].clone(), r[2].parse().unwrap()))
            .collect();
        assert_eq!(pairs, expected_pairs(report));
        assert_eq!(rows[1][0], "1");
    }
}

#[test]
fn test_xlsx_tagged_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let reports = reports();
    let sections = export(ExportLayout::FlatTaggedSheet, &reports);
    let path = render(OutputFormat::Xlsx, &sections, dir.path());

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range("Unique Words by Chapter").unwrap();
    let rows: Vec<Vec<String>> = range.rows().map(|r| r.iter().map(cell_text).collect()).collect();
    assert_eq!(rows[0], vec!["Chapter", "French Word", "Occurrences"]);

    let expected: Vec<(String, String, u64)> = reports
        .iter()
        .flat_map(|r| {
            r.entries
                .iter()
                .map(move |e| (r.chapter.label(), e.word.clone(), e.count))
        })
        .collect();
    let read: Vec<(String, String, u64)> = rows[1..]
        .iter()
        .map(|r| (r[0].clone(), r[1].clone(), r[2].parse().unwrap()))
        .collect();
    assert_eq!(read, expected);
}

/// Text of every cell of every table, in document order
fn docx_tables(bytes: &[u8]) -> Vec<Vec<Vec<String>>> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};

    let docx = docx_rs::read_docx(bytes).unwrap();
    let mut tables = Vec::new();
    for child in &docx.document.children {
        let DocumentChild::Table(table) = child else {
            continue;
        };
        let mut rows = Vec::new();
        for row in &table.rows {
            #[allow(irrefutable_let_patterns)]
            let TableChild::TableRow(row) = row else {
                continue;
            };
            let mut cells = Vec::new();
            for cell in &row.cells {
                #[allow(irrefutable_let_patterns)]
                let TableRowChild::TableCell(cell) = cell else {
                    continue;
                };
                let mut text = String::new();
                for content in &cell.children {
                    if let TableCellContent::Paragraph(p) = content {
                        for pc in &p.children {
                            if let ParagraphChild::Run(run) = pc {
                                for rc in &run.children {
                                    if let RunChild::Text(t) = rc {
                                        text.push_str(&t.text);
                                    }
                                }
                            }
                        }
                    }
                }
                cells.push(text);
            }
            rows.push(cells);
        }
        tables.push(rows);
    }
    tables
}

#[test]
fn test_docx_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let reports = reports();
    let sections = export(ExportLayout::DetailedTable, &reports);
    let path = render(OutputFormat::Docx, &sections, dir.path());

    let tables = docx_tables(&fs::read(path).unwrap());
    assert_eq!(tables.len(), reports.len());
    for (table, report) in tables.iter().zip(&reports) {
        assert_eq!(table[0], vec!["S.No", "French Word", "Occurrences", "English Translation"]);
        let pairs: Vec<(String, u64)> = table[1..]
            .iter()
            .map(|r| (r[1].clone(), r[2].parse().unwrap()))
            .collect();
        assert_eq!(pairs, expected_pairs(report));
        assert!(table[1..].iter().all(|r| r[3].is_empty()));
    }
}

#[test]
fn test_pdf_one_page_per_chapter() {
    let dir = tempfile::tempdir().unwrap();
    let reports = reports();
    let sections = export(ExportLayout::DetailedTable, &reports);
    let path = render(OutputFormat::Pdf, &sections, dir.path());

    let doc = lopdf::Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), reports.len());
}

/// (word, count) pairs from a one-page-per-chapter detailed table
fn pdf_pairs(doc: &lopdf::Document, page: u32) -> Vec<(String, u64)> {
    let text = doc.extract_text(&[page]).unwrap();
    let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    // Title, then the four header cells
    assert_eq!(lines[1..5], ["S.No", "French Word", "Occurrences", "English Translation"]);
    lines[5..]
        .chunks(3)
        .map(|row| (row[1].to_string(), row[2].parse().unwrap()))
        .collect()
}

#[test]
fn test_pdf_roundtrip_keeps_french_letters() {
    let dir = tempfile::tempdir().unwrap();
    let reports = analyze(ACCENTED);
    let words: Vec<&str> = reports.iter().flat_map(|r| r.words()).collect();
    for expected in ["cœur", "l'été", "šárka", "l'œuvre", "noël", "ça"] {
        assert!(words.contains(&expected), "{} missing from {:?}", expected, words);
    }

    let sections = export(ExportLayout::DetailedTable, &reports);
    let path = render(OutputFormat::Pdf, &sections, dir.path());
    let doc = lopdf::Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), reports.len());

    for (page, report) in (1u32..).zip(&reports) {
        let text = doc.extract_text(&[page]).unwrap();
        assert!(text.starts_with(&format!("Chapter {} Unique Words", page)), "{}", text);
        assert_eq!(pdf_pairs(&doc, page), expected_pairs(report));
    }
}

#[test]
fn test_pdf_refuses_words_it_cannot_encode() {
    let dir = tempfile::tempdir().unwrap();
    // OCR ligature U+FB01 has no WinAnsi slot
    let reports = analyze("Chapitre 1\nla \u{FB01}lle et Šárka");
    let sections = export(ExportLayout::DetailedTable, &reports);
    let path = dir.path().join("out.pdf");

    let err = OutputFormat::Pdf.renderer().render(&sections, &path).unwrap_err();
    assert!(matches!(err, rust_ocr_vocab::Error::Render(_)), "{}", err);
    assert!(!path.exists());

    // Formats with full Unicode keep the word
    let json = render(OutputFormat::Json, &sections, dir.path());
    let read: Vec<Section> = serde_json::from_str(&fs::read_to_string(json).unwrap()).unwrap();
    assert_eq!(read[0].word_counts(), expected_pairs(&reports[0]));
}

#[test]
fn test_xlsx_vocabulary_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let reports = analyze(ACCENTED);
    let sections = export(ExportLayout::FlatVocabulary, &reports);
    let path = render(OutputFormat::Xlsx, &sections, dir.path());

    let mut workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(workbook.sheet_names().to_vec(), vec!["Document Vocabulary"]);
    let range = workbook.worksheet_range("Document Vocabulary").unwrap();
    let column: Vec<String> = range.rows().map(|r| cell_text(&r[0])).collect();
    assert_eq!(column[0], "French Word");
    assert_eq!(column[1..].to_vec(), document_vocabulary(&reports));
}

#[test]
fn test_every_layout_renders_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let reports = reports();
    for layout in [
        ExportLayout::DetailedTable,
        ExportLayout::WordListOnly,
        ExportLayout::FlatTaggedSheet,
        ExportLayout::FlatVocabulary,
    ] {
        let sections = export(layout, &reports);
        for format in [OutputFormat::Docx, OutputFormat::Xlsx, OutputFormat::Pdf, OutputFormat::Json] {
            let path = render(format, &sections, dir.path());
            assert!(fs::metadata(&path).unwrap().len() > 0, "{:?} as {:?}", layout, format);
        }
    }
}
