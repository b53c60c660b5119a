use serde::Deserialize;
use serde_json::Value;

use super::{CharFilter, Transformation};
use crate::error::Result;
use crate::util::deserialize_args;

pub const JAPANESE_ITERATION_MARK_CHAR_FILTER_NAME: &str = "japanese_iteration_mark";

const KANJI_ITERATION_MARK: char = '々';
const HIRAGANA_ITERATION_MARK: char = 'ゝ';
const HIRAGANA_DAKUON_ITERATION_MARK: char = 'ゞ';
const KATAKANA_ITERATION_MARK: char = 'ヽ';
const KATAKANA_DAKUON_ITERATION_MARK: char = 'ヾ';

fn shift(c: char, delta: i32) -> char {
    char::from_u32((c as u32).wrapping_add_signed(delta)).unwrap_or(c)
}

fn hiragana_add_dakuon(c: char) -> char {
    let codepoint = c as u32;
    match codepoint {
        0x304b..=0x3062 if codepoint % 2 == 1 => shift(c, 1),
        0x3064..=0x3069 if codepoint % 2 == 0 => shift(c, 1),
        0x306f..=0x307d if codepoint % 3 == 0 => shift(c, 1),
        _ => c,
    }
}

fn hiragana_remove_dakuon(c: char) -> char {
    let codepoint = c as u32;
    match codepoint {
        0x304b..=0x3062 if codepoint % 2 == 0 => shift(c, -1),
        0x3064..=0x3069 if codepoint % 2 == 1 => shift(c, -1),
        0x306f..=0x307d if codepoint % 3 == 1 => shift(c, -1),
        _ => c,
    }
}

fn katakana_add_dakuon(c: char) -> char {
    let codepoint = c as u32;
    match codepoint {
        0x30ab..=0x30c2 if codepoint % 2 == 1 => shift(c, 1),
        0x30c4..=0x30c9 if codepoint % 2 == 0 => shift(c, 1),
        0x30cf..=0x30dd if codepoint % 3 == 0 => shift(c, 1),
        _ => c,
    }
}

fn katakana_remove_dakuon(c: char) -> char {
    let codepoint = c as u32;
    match codepoint {
        0x30ab..=0x30c2 if codepoint % 2 == 0 => shift(c, -1),
        0x30c4..=0x30c9 if codepoint % 2 == 1 => shift(c, -1),
        0x30cf..=0x30dd if codepoint % 3 == 1 => shift(c, -1),
        _ => c,
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JapaneseIterationMarkArgs {
    #[serde(default = "default_true")]
    normalize_kanji: bool,
    #[serde(default = "default_true")]
    normalize_kana: bool,
}

/// Expands iteration marks (々, ゝ, ゞ, ヽ, ヾ) into the characters they repeat.
///
/// A run of `n` marks repeats the `n` characters before it ("馬鹿々々" ->
/// "馬鹿馬鹿"). When fewer than `n` characters precede the run, each mark
/// repeats the character just before it. Marks at the very start of the
/// text are left alone.
#[derive(Debug)]
pub struct JapaneseIterationMarkCharFilter {
    normalize_kanji: bool,
    normalize_kana: bool,
}

impl JapaneseIterationMarkCharFilter {
    pub fn new(normalize_kanji: bool, normalize_kana: bool) -> Self {
        Self {
            normalize_kanji,
            normalize_kana,
        }
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: JapaneseIterationMarkArgs =
            deserialize_args(JAPANESE_ITERATION_MARK_CHAR_FILTER_NAME, args)?;
        Ok(Self::new(args.normalize_kanji, args.normalize_kana))
    }

    fn is_mark(&self, c: char) -> bool {
        match c {
            KANJI_ITERATION_MARK => self.normalize_kanji,
            HIRAGANA_ITERATION_MARK
            | HIRAGANA_DAKUON_ITERATION_MARK
            | KATAKANA_ITERATION_MARK
            | KATAKANA_DAKUON_ITERATION_MARK => self.normalize_kana,
            _ => false,
        }
    }

    fn repeat(mark: char, source: char) -> char {
        match mark {
            KANJI_ITERATION_MARK => source,
            HIRAGANA_ITERATION_MARK => hiragana_remove_dakuon(source),
            HIRAGANA_DAKUON_ITERATION_MARK => hiragana_add_dakuon(source),
            KATAKANA_ITERATION_MARK => katakana_remove_dakuon(source),
            KATAKANA_DAKUON_ITERATION_MARK => katakana_add_dakuon(source),
            _ => mark,
        }
    }
}

impl CharFilter for JapaneseIterationMarkCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let chars: Vec<(usize, char)> = input.char_indices().collect();
        let mut resolved: Vec<char> = Vec::with_capacity(chars.len());
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i].1;
            if !self.is_mark(c) {
                resolved.push(c);
                output.push(c);
                i += 1;
                continue;
            }

            let run_start = i;
            while i < chars.len() && self.is_mark(chars[i].1) {
                i += 1;
            }
            let run_len = i - run_start;

            let new_start = output.len();
            let mut changed = false;
            for k in 0..run_len {
                let mark = chars[run_start + k].1;
                let source = if run_start >= run_len {
                    Some(resolved[run_start - run_len + k])
                } else {
                    (run_start + k).checked_sub(1).map(|idx| resolved[idx])
                };
                let replaced = source.map_or(mark, |source| Self::repeat(mark, source));
                changed |= replaced != mark;
                resolved.push(replaced);
                output.push(replaced);
            }

            if changed {
                let original_end = chars.get(i).map_or(input.len(), |(offset, _)| *offset);
                transformations.push(Transformation::new(
                    chars[run_start].0,
                    original_end,
                    new_start,
                    output.len(),
                ));
            }
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        JAPANESE_ITERATION_MARK_CHAR_FILTER_NAME
    }
}
