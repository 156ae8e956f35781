//! Search normalization of display names and letter bucket keys.

use std::collections::BTreeSet;
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Key of a letter bucket. [`Letter::MAIN`] stands for the unfiltered order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(char);

impl Letter {
    /// Sentinel for the main (unfiltered) row of an entry.
    pub const MAIN: Letter = Letter('\0');

    /// Bucket for `c` after case and diacritic folding.
    ///
    /// Returns `None` for characters that fold to nothing or to `'\0'`.
    pub fn new(c: char) -> Option<Self> {
        let mut buf = [0u8; 4];
        normalize(c.encode_utf8(&mut buf))
            .chars()
            .next()
            .filter(|folded| *folded != '\0')
            .map(Self)
    }

    /// Whether this is the main-order sentinel.
    pub fn is_main(&self) -> bool {
        *self == Self::MAIN
    }

    /// The folded character.
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_main() {
            f.write_str("<main>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Letters an entry is registered under in a list, including [`Letter::MAIN`].
pub type RowsByLetter = BTreeSet<Letter>;

/// Lowercase, strip diacritics.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalized words of a name. Anything that is not alphanumeric separates words.
pub fn name_words(name: &str) -> Vec<String> {
    normalize(name)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// First letters of every word of a name.
pub fn name_letters(name: &str) -> BTreeSet<Letter> {
    name_words(name)
        .iter()
        .filter_map(|word| word.chars().next())
        .map(Letter)
        .collect()
}
