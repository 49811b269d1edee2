//! Streaming text normalization shared by rule patterns and event text.
//!
//! Matching is only correct when patterns and event text go through the
//! exact same transformation, so both sides use [`NormalizedChars`]: a
//! lazy, restartable iterator that case-folds, strips diacritics, and
//! collapses whitespace runs one code point at a time. The matcher
//! drives it inline during traversal and never materializes a
//! normalized copy of the event text.

use std::char::ToLowercase;
use std::str::Chars;

/// Combining diacritical marks block; dropped so decomposed text folds
/// the same way as precomposed text.
const COMBINING_START: char = '\u{0300}';
const COMBINING_END: char = '\u{036F}';

/// Lazy normalizing iterator over the code points of a string.
///
/// Yields lowercase, diacritic-free characters with every whitespace
/// run collapsed to a single ASCII space. Restartable: constructing a
/// new instance over the same input replays the identical sequence.
#[derive(Debug, Clone)]
pub struct NormalizedChars<'a> {
    chars: Chars<'a>,
    pending: Option<ToLowercase>,
    in_whitespace: bool,
}

impl<'a> NormalizedChars<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            pending: None,
            in_whitespace: false,
        }
    }
}

impl Iterator for NormalizedChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(lower) = &mut self.pending {
                for c in lower.by_ref() {
                    if (COMBINING_START..=COMBINING_END).contains(&c) {
                        continue;
                    }
                    return Some(strip_diacritic(c));
                }
                self.pending = None;
            }

            let c = self.chars.next()?;
            if c.is_whitespace() {
                if self.in_whitespace {
                    continue;
                }
                self.in_whitespace = true;
                return Some(' ');
            }
            if (COMBINING_START..=COMBINING_END).contains(&c) {
                continue;
            }
            self.in_whitespace = false;
            self.pending = Some(c.to_lowercase());
        }
    }
}

/// Normalize a whole string eagerly, trimming edge whitespace.
///
/// Used for rule patterns at preprocessing time; event text is always
/// normalized lazily through [`NormalizedChars`].
pub fn normalize_pattern(pattern: &str) -> String {
    let normalized: String = NormalizedChars::new(pattern).collect();
    normalized.trim_matches(' ').to_string()
}

/// Map precomposed Latin letters with diacritics to their base letter.
///
/// Covers Latin-1 Supplement and Latin Extended-A lowercase forms; the
/// input is already case-folded when this runs.
fn strip_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}
