//! Per-chapter word counts and the document-wide vocabulary.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::segment::Chapter;

/// A word and how many times it occurs in one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// A chapter with its word counts, sorted by word (code point order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterReport {
    pub chapter: Chapter,
    pub entries: Vec<WordCount>,
    /// Number of tokens that went into the counts
    pub total_tokens: u64,
}

impl ChapterReport {
    /// Count `tokens` for `chapter`.
    pub fn aggregate<I, S>(chapter: Chapter, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut total_tokens: u64 = 0;

        for token in tokens {
            *counts.entry(token.into()).or_insert(0) += 1;
            total_tokens += 1;
        }

        // BTreeMap iterates in ascending key order
        let entries = counts
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect();

        Self {
            chapter,
            entries,
            total_tokens,
        }
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    pub fn distinct_words(&self) -> usize {
        self.entries.len()
    }
}

/// Distinct words across every report, ascending. No counts, no chapters.
pub fn document_vocabulary(reports: &[ChapterReport]) -> Vec<String> {
    reports
        .iter()
        .flat_map(|r| r.words())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(ordinal: usize) -> Chapter {
        Chapter {
            ordinal,
            header: Some(format!("Chapitre {}", ordinal)),
            body: String::new(),
        }
    }

    fn pairs(report: &ChapterReport) -> Vec<(&str, u64)> {
        report.entries.iter().map(|e| (e.word.as_str(), e.count)).collect()
    }

    #[test]
    fn test_counts_and_sorts() {
        let report = ChapterReport::aggregate(chapter(1), ["le", "chat", "et", "le", "chien"]);
        assert_eq!(pairs(&report), vec![("chat", 1), ("chien", 1), ("et", 1), ("le", 2)]);
        assert_eq!(report.total_tokens, 5);
    }

    #[test]
    fn test_code_point_order() {
        // 'é' (U+00E9) sorts after every ASCII letter
        let report = ChapterReport::aggregate(chapter(1), ["été", "zoo", "eau", "d'eau"]);
        assert_eq!(report.words().collect::<Vec<_>>(), vec!["d'eau", "eau", "zoo", "été"]);
    }

    #[test]
    fn test_empty_chapter() {
        let report = ChapterReport::aggregate(chapter(3), Vec::<String>::new());
        assert!(report.entries.is_empty());
        assert_eq!(report.total_tokens, 0);
    }

    #[test]
    fn test_vocabulary_dedups_across_chapters() {
        let reports = vec![
            ChapterReport::aggregate(chapter(1), ["le", "chat", "le"]),
            ChapterReport::aggregate(chapter(2), ["la", "souris", "le"]),
        ];
        assert_eq!(document_vocabulary(&reports), vec!["chat", "la", "le", "souris"]);
    }

    #[test]
    fn test_vocabulary_of_nothing() {
        assert!(document_vocabulary(&[]).is_empty());
    }
}
