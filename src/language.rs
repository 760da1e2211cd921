//! Sanity check that recovered text is French.

use whatlang::Lang;

/// Characters sampled for detection
const SAMPLE_CHARS: usize = 5000;

/// Detected language when it is confidently something other than French.
///
/// Short, noisy or ambiguous text returns `None`; so does French.
pub fn non_french_language(text: &str) -> Option<Lang> {
    let sample: String = text.chars().take(SAMPLE_CHARS).collect();
    let info = whatlang::detect(&sample)?;
    if info.is_reliable() && info.lang() != Lang::Fra {
        Some(info.lang())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_french_passes() {
        let text = "Il était une fois une petite fille qui vivait avec sa mère dans une \
                    maison au bord de la forêt. Chaque matin, elle allait chercher de l'eau \
                    à la fontaine et revenait en chantant.";
        assert_eq!(non_french_language(text), None);
    }

    #[test]
    fn test_english_flagged() {
        let text = "Once upon a time there was a little girl who lived with her mother in a \
                    house at the edge of the forest. Every morning she went to fetch water \
                    from the well and came back singing.";
        assert_eq!(non_french_language(text), Some(Lang::Eng));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(non_french_language(""), None);
    }
}
