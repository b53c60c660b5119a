//! Character categories used by the unknown-word model.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ShikiriError};

/// Category of a character, as named in `unk.def`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharCategory {
    Default,
    Space,
    Alpha,
    Numeric,
    KanjiNumeric,
    Hiragana,
    Katakana,
    Kanji,
    Hangul,
    Symbol,
}

impl CharCategory {
    pub const ALL: [CharCategory; 10] = [
        CharCategory::Default,
        CharCategory::Space,
        CharCategory::Alpha,
        CharCategory::Numeric,
        CharCategory::KanjiNumeric,
        CharCategory::Hiragana,
        CharCategory::Katakana,
        CharCategory::Kanji,
        CharCategory::Hangul,
        CharCategory::Symbol,
    ];

    /// Classify a single character.
    pub fn of(c: char) -> CharCategory {
        match c {
            c if c.is_whitespace() => CharCategory::Space,
            '0'..='9' | '\u{FF10}'..='\u{FF19}' => CharCategory::Numeric,
            '〇' | '一' | '二' | '三' | '四' | '五' | '六' | '七' | '八' | '九' | '十' | '百'
            | '千' | '万' | '億' | '兆' => CharCategory::KanjiNumeric,
            'a'..='z' | 'A'..='Z' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}' => {
                CharCategory::Alpha
            }
            '\u{00C0}'..='\u{024F}' if c.is_alphabetic() => CharCategory::Alpha,
            '\u{3041}'..='\u{309F}' => CharCategory::Hiragana,
            '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
                CharCategory::Katakana
            }
            '\u{3005}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2FFFF}' => CharCategory::Kanji,
            '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}' | '\u{AC00}'..='\u{D7AF}' => {
                CharCategory::Hangul
            }
            c if c.is_ascii_punctuation() => CharCategory::Symbol,
            '\u{2000}'..='\u{206F}'
            | '\u{3000}'..='\u{303F}'
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}' => CharCategory::Symbol,
            _ => CharCategory::Default,
        }
    }

    /// The category consulted when this one has no unknown-word entry.
    pub fn fallback(&self) -> Option<CharCategory> {
        match self {
            CharCategory::Default => None,
            CharCategory::KanjiNumeric => Some(CharCategory::Kanji),
            _ => Some(CharCategory::Default),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CharCategory::Default => "DEFAULT",
            CharCategory::Space => "SPACE",
            CharCategory::Alpha => "ALPHA",
            CharCategory::Numeric => "NUMERIC",
            CharCategory::KanjiNumeric => "KANJINUMERIC",
            CharCategory::Hiragana => "HIRAGANA",
            CharCategory::Katakana => "KATAKANA",
            CharCategory::Kanji => "KANJI",
            CharCategory::Hangul => "HANGUL",
            CharCategory::Symbol => "SYMBOL",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for CharCategory {
    type Err = ShikiriError;

    fn from_str(name: &str) -> Result<Self> {
        CharCategory::ALL
            .iter()
            .find(|c| c.as_str() == name)
            .copied()
            .ok_or_else(|| {
                ShikiriError::dictionary_load(format!("unknown character category '{name}'"))
            })
    }
}

impl fmt::Display for CharCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
