//! Apostrophe canonicalization and accent composition.
//!
//! OCR and word processors emit several apostrophe look-alikes. Elision
//! detection in the tokenizer only recognizes the straight `'`, so every
//! variant is folded onto it before tokenizing. Canonical composition is a
//! separate step the analyzer applies on top.

use unicode_normalization::UnicodeNormalization;

/// The canonical apostrophe
pub const APOSTROPHE: char = '\'';

/// Apostrophe variants seen in scanned and typeset French text
pub const APOSTROPHE_VARIANTS: [char; 9] = [
    '\u{2019}', // right single quotation mark
    '\u{201B}', // single high-reversed-9 quotation mark
    '\u{2018}', // left single quotation mark
    '\u{02BC}', // modifier letter apostrophe
    '\u{02B9}', // modifier letter prime
    '\u{2032}', // prime
    '\u{FF07}', // fullwidth apostrophe
    '\u{00B4}', // acute accent
    '\u{0060}', // grave accent
];

/// Is `c` one of the apostrophe look-alikes (or the apostrophe itself)?
pub fn is_apostrophe(c: char) -> bool {
    c == APOSTROPHE || APOSTROPHE_VARIANTS.contains(&c)
}

/// Replace every apostrophe variant with `'`. Every other character is
/// passed through unchanged.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| if is_apostrophe(c) { APOSTROPHE } else { c })
        .collect()
}

/// Unicode NFC, so `e` + U+0301 and `é` count as the same word.
///
/// NFC never produces an apostrophe variant, so running this after
/// [`normalize_text`] keeps the text folded.
pub fn compose_accents(text: &str) -> String {
    text.nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curly_apostrophes_fold() {
        assert_eq!(normalize_text("l\u{2019}école"), "l'école");
        assert_eq!(normalize_text("d\u{2018}eau"), "d'eau");
        assert_eq!(normalize_text("qu\u{201B}on"), "qu'on");
        assert_eq!(normalize_text("j\u{02BC}arrive"), "j'arrive");
    }

    #[test]
    fn test_other_characters_untouched() {
        let text = "« Bonjour », dit-il. 12 € — fin\n";
        assert_eq!(normalize_text(text), text);
    }

    #[test]
    fn test_fold_leaves_composition_alone() {
        let decomposed = "e\u{0301}te\u{0301}";
        assert_eq!(normalize_text(decomposed), decomposed);
        // Angstrom and ohm signs are NFC singletons
        assert_eq!(normalize_text("\u{212B} \u{2126}"), "\u{212B} \u{2126}");
    }

    #[test]
    fn test_decomposed_accents_compose() {
        assert_eq!(compose_accents("e\u{0301}te\u{0301}"), "été");
        assert_eq!(compose_accents(&normalize_text("l\u{2019}e\u{0301}te\u{0301}")), "l'été");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(normalize_text(""), "");
    }
}
