//! Per-language alphabetical ordering of letter keys.
//!
//! Codepoint order puts `Ç`, `Ğ`, `İ`, `Ö`, `Ş` and `Ü` after `Z`, so Turkish
//! uses its alphabet as a fixed sequence. Every other language sorts
//! lexicographically.

use std::cmp::Ordering;

use crate::error::LayoutError;
use crate::models::Language;

/// The 29 letters of the Turkish alphabet in dictionary order.
pub const TURKISH_ALPHABET: [&str; 29] = [
    "A", "B", "C", "Ç", "D", "E", "F", "G", "Ğ", "H", "I", "İ", "J", "K", "L", "M", "N", "O", "Ö",
    "P", "R", "S", "Ş", "T", "U", "Ü", "V", "Y", "Z",
];

/// Total order over the letter keys of one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterOrder {
    Sequence(&'static [&'static str]),
    Lexicographic,
}

impl LetterOrder {
    /// Ordering used for `language`.
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Tr => LetterOrder::Sequence(&TURKISH_ALPHABET),
            Language::En => LetterOrder::Lexicographic,
        }
    }

    /// Sort key of `letter`, or `None` if this order cannot place it.
    fn rank(&self, letter: &str) -> Option<usize> {
        match self {
            LetterOrder::Sequence(sequence) => sequence.iter().position(|l| *l == letter),
            LetterOrder::Lexicographic => Some(0),
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            LetterOrder::Lexicographic => a.cmp(b),
            LetterOrder::Sequence(_) => self.rank(a).cmp(&self.rank(b)),
        }
    }
}

/// Sort `letters` into the alphabetical order of `language`.
///
/// Fails on the first letter the language's order cannot place instead of
/// guessing a position for it.
pub fn sort_letters<I, S>(letters: I, language: Language) -> Result<Vec<String>, LayoutError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let order = LetterOrder::for_language(language);
    let mut letters: Vec<String> = letters.into_iter().map(Into::into).collect();

    if let Some(unknown) = letters.iter().find(|l| order.rank(l).is_none()) {
        return Err(LayoutError::UnknownLetter {
            letter: unknown.clone(),
            language,
        });
    }

    letters.sort_by(|a, b| order.compare(a, b));
    letters.dedup();
    Ok(letters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turkish_order_matches_the_alphabet() {
        let mut shuffled: Vec<&str> = TURKISH_ALPHABET.to_vec();
        shuffled.reverse();
        shuffled.swap(3, 17);

        let sorted = sort_letters(shuffled, Language::Tr).unwrap();
        assert_eq!(sorted, TURKISH_ALPHABET.to_vec());
    }

    #[test]
    fn turkish_order_differs_from_codepoint_order() {
        let turkish = sort_letters(TURKISH_ALPHABET, Language::Tr).unwrap();
        let mut codepoint: Vec<String> = TURKISH_ALPHABET.iter().map(|l| l.to_string()).collect();
        codepoint.sort();

        assert_ne!(turkish, codepoint);
        assert_eq!(turkish[3], "Ç");
        assert_eq!(turkish[8], "Ğ");
        assert_eq!(turkish[11], "İ");
        assert_eq!(codepoint.last().map(String::as_str), Some("Ş"));
    }

    #[test]
    fn turkish_rejects_letters_outside_the_alphabet() {
        let err = sort_letters(["A", "Q", "B"], Language::Tr).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownLetter {
                letter: "Q".to_string(),
                language: Language::Tr,
            }
        );
    }

    #[test]
    fn english_sorts_lexicographically() {
        let sorted = sort_letters(["C", "A", "Z", "B"], Language::En).unwrap();
        assert_eq!(sorted, vec!["A", "B", "C", "Z"]);
    }
}
