//! Contraction-aware word tokenizer.
//!
//! Tokenization is two layers. A [`UnitSplitter`] cuts text into word and
//! punctuation units; [`Tokenizer`] walks those units, merges French elisions
//! (`d'` + `eau`) and keeps only alphabetic words. The merge and filter rules
//! live entirely in [`Tokens`], so any splitter backend gives the same
//! contract.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::normalize::APOSTROPHE;

/// One word or punctuation unit produced by a splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'t> {
    /// Surface text, exactly as it appears in the source
    pub text: &'t str,
    /// Byte offset of `text` in the source
    pub start: usize,
    /// True when every character is a letter
    pub is_alpha: bool,
}

impl<'t> Unit<'t> {
    pub fn new(text: &'t str, start: usize) -> Self {
        Self {
            text,
            start,
            is_alpha: !text.is_empty() && text.chars().all(char::is_alphabetic),
        }
    }

    fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Capability to cut text into ordered units. Whitespace is never a unit.
pub trait UnitSplitter {
    fn units<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = Unit<'a>> + 'a>;
}

/// Shared splitter instance (compiled once, reused)
static SHARED_SPLITTER: OnceLock<RuleSplitter> = OnceLock::new();

/// Regex-based splitter.
///
/// A unit is either a run of letters/marks/digits with at most one trailing
/// apostrophe (`l'`, `jusqu'`, `1er`, `maison`), or any other single
/// non-space character.
#[derive(Debug, Clone)]
pub struct RuleSplitter {
    pattern: Regex,
}

impl RuleSplitter {
    pub const PATTERN: &'static str = r"[\p{L}\p{M}\p{N}]+'?|\S";

    pub fn new() -> Self {
        Self {
            // Constant pattern, covered by tests
            pattern: Regex::new(Self::PATTERN).expect("unit pattern compiles"),
        }
    }

    /// Process-wide instance, built on first use
    pub fn shared() -> &'static RuleSplitter {
        SHARED_SPLITTER.get_or_init(|| {
            tracing::debug!("Compiled unit splitter pattern");
            RuleSplitter::new()
        })
    }
}

impl Default for RuleSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitSplitter for RuleSplitter {
    fn units<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = Unit<'a>> + 'a> {
        Box::new(
            self.pattern
                .find_iter(text)
                .map(|m| Unit::new(m.as_str(), m.start())),
        )
    }
}

/// A normalized word form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased surface text
    pub text: String,
    /// Byte range in the source covering every constituent unit
    pub span: Range<usize>,
    /// True for elision merges (`l'` + `école`)
    pub merged: bool,
}

/// Turns normalized text into word tokens using an injected splitter.
#[derive(Clone, Copy)]
pub struct Tokenizer<'s> {
    splitter: &'s dyn UnitSplitter,
}

impl<'s> Tokenizer<'s> {
    pub fn new(splitter: &'s dyn UnitSplitter) -> Self {
        Self { splitter }
    }

    /// Lazy token sequence. Call again to restart.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> Tokens<'a> {
        Tokens {
            units: self.splitter.units(text),
        }
    }

    /// Collect token strings
    pub fn words(&self, text: &str) -> Vec<String> {
        self.tokenize(text).map(|t| t.text).collect()
    }
}

impl Default for Tokenizer<'static> {
    fn default() -> Self {
        Self::new(RuleSplitter::shared())
    }
}

/// Iterator returned by [`Tokenizer::tokenize`].
pub struct Tokens<'a> {
    units: Box<dyn Iterator<Item = Unit<'a>> + 'a>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let unit = self.units.next()?;

            if unit.text.ends_with(APOSTROPHE) {
                // Elided prefix: glue to whatever follows. A prefix at the very
                // end has no partner and is dropped.
                let partner = self.units.next()?;
                let mut surface = String::with_capacity(unit.text.len() + partner.text.len());
                surface.push_str(unit.text);
                surface.push_str(partner.text);
                return Some(Token {
                    text: surface.to_lowercase(),
                    span: unit.start..partner.end(),
                    merged: true,
                });
            }

            if unit.is_alpha {
                return Some(Token {
                    text: unit.text.to_lowercase(),
                    span: unit.start..unit.end(),
                    merged: false,
                });
            }
        }
    }
}
