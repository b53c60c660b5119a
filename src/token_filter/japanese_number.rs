//! Normalization of Japanese and Arabic numerals.
//!
//! Recognizes ASCII digits, fullwidth digits and kanji numerals, including
//! positional kanji (`二〇二四`), the small multipliers 十 百 千, the large
//! units 万 億 兆 京, and comma digit grouping (`1,000`).

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::token::TokenStream;
use crate::token_filter::japanese_base_form::DEFAULT_BASE_FORM_INDEX;
use crate::token_filter::{TagSet, TokenFilter};
use crate::util::deserialize_args;

pub const JAPANESE_NUMBER_TOKEN_FILTER_NAME: &str = "japanese_number";

fn default_index() -> usize {
    DEFAULT_BASE_FORM_INDEX
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JapaneseNumberArgs {
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default = "default_index")]
    index: usize,
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        '０'..='９' => Some(c as u64 - '０' as u64),
        '〇' | '零' => Some(0),
        '一' | '壱' => Some(1),
        '二' | '弐' => Some(2),
        '三' | '参' => Some(3),
        '四' => Some(4),
        '五' => Some(5),
        '六' => Some(6),
        '七' => Some(7),
        '八' => Some(8),
        '九' => Some(9),
        _ => None,
    }
}

fn small_unit(c: char) -> Option<u64> {
    match c {
        '十' | '拾' => Some(10),
        '百' => Some(100),
        '千' => Some(1_000),
        _ => None,
    }
}

fn large_unit(c: char) -> Option<u64> {
    match c {
        '万' => Some(10_000),
        '億' => Some(100_000_000),
        '兆' => Some(1_000_000_000_000),
        '京' => Some(10_000_000_000_000_000),
        _ => None,
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '，')
}

/// Parse a numeral into its value.
///
/// Returns `None` when the text contains anything other than numeral
/// characters, when a separator is not between two digits, or when the
/// value does not fit in `u64`.
pub fn parse_numeral(text: &str) -> Option<u64> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut section: u64 = 0;
    let mut current: Option<u64> = None;

    for (i, &c) in chars.iter().enumerate() {
        if let Some(d) = digit_value(c) {
            current = Some(current.unwrap_or(0).checked_mul(10)?.checked_add(d)?);
        } else if is_separator(c) {
            let between_digits = i > 0
                && digit_value(chars[i - 1]).is_some()
                && chars.get(i + 1).copied().and_then(digit_value).is_some();
            if !between_digits {
                return None;
            }
        } else if let Some(unit) = small_unit(c) {
            let value = current.take().unwrap_or(1).checked_mul(unit)?;
            section = section.checked_add(value)?;
        } else if let Some(unit) = large_unit(c) {
            // A bare unit (`万`) counts once; an explicit zero stays zero.
            let value = match current.take() {
                None if section == 0 => 1,
                current => section.checked_add(current.unwrap_or(0))?,
            };
            total = total.checked_add(value.checked_mul(unit)?)?;
            section = 0;
        } else {
            return None;
        }
    }

    total
        .checked_add(section)?
        .checked_add(current.unwrap_or(0))
}

/// Rewrites numeral tokens as Arabic integers.
///
/// Only tokens matching `tags` are considered (all tokens when no tags are
/// given). The value is always written to `details[index]` (the base-form
/// column by default) when the token has that slot, and every other detail
/// equal to the old text is rewritten as well. Span and token count are
/// unchanged.
#[derive(Clone, Debug)]
pub struct JapaneseNumberTokenFilter {
    tags: Option<TagSet>,
    index: usize,
}

impl JapaneseNumberTokenFilter {
    pub fn new(tags: Option<TagSet>, index: usize) -> Self {
        Self { tags, index }
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: JapaneseNumberArgs = deserialize_args(JAPANESE_NUMBER_TOKEN_FILTER_NAME, args)?;
        let tags = args.tags.as_deref().map(TagSet::parse).transpose()?;
        Ok(Self::new(tags, args.index))
    }
}

impl Default for JapaneseNumberTokenFilter {
    fn default() -> Self {
        Self::new(None, DEFAULT_BASE_FORM_INDEX)
    }
}

impl TokenFilter for JapaneseNumberTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut out = Vec::new();

        for mut token in tokens {
            let selected = match &self.tags {
                Some(tags) => tags.matches(&token, self.name())?,
                None => true,
            };

            if !selected {
                out.push(token);
                continue;
            }

            if let Some(value) = parse_numeral(&token.text) {
                let normalized = value.to_string();
                for (i, detail) in token.details.iter_mut().enumerate() {
                    if i == self.index || *detail == token.text {
                        *detail = normalized.clone();
                    }
                }
                token.text = normalized;
            }
            out.push(token);
        }

        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        JAPANESE_NUMBER_TOKEN_FILTER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{IntoTokenStream, Token};
    use crate::token_filter::tests::token;
    use serde_json::json;

    #[test]
    fn test_parse_numeral() {
        let cases = [
            ("100", Some(100)),
            ("１００", Some(100)),
            ("一〇〇", Some(100)),
            ("二〇二四", Some(2024)),
            ("十", Some(10)),
            ("二十四", Some(24)),
            ("二千二十四", Some(2024)),
            ("百二十三万四千五百六十七", Some(1_234_567)),
            ("1万2千", Some(12_000)),
            ("3億", Some(300_000_000)),
            ("万", Some(10_000)),
            ("0万", Some(0)),
            ("〇億", Some(0)),
            ("十万", Some(100_000)),
            ("一億二千万", Some(120_000_000)),
            ("1,000,000", Some(1_000_000)),
            ("壱萬", None),
            ("1,", None),
            (",1", None),
            ("円", None),
            ("12a", None),
            ("", None),
            ("99999999999999999999", None),
        ];

        for (text, expected) in cases {
            assert_eq!(parse_numeral(text), expected, "{text}");
        }
    }

    #[test]
    fn test_rewrites_text_and_matching_details() {
        let filter = JapaneseNumberTokenFilter::from_args(&json!({"tags": ["名詞,数"]})).unwrap();
        let tokens = vec![
            token("二十", 0, &["名詞", "数", "*", "二十"]),
            token("円", 6, &["名詞", "接尾", "*", "円"]),
            token("一", 9, &["名詞", "一般", "*", "一"]),
        ];

        let result: Vec<Token> = filter.filter(tokens.into_token_stream()).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "20");
        assert_eq!(result[0].details, vec!["名詞", "数", "*", "20"]);
        assert_eq!((result[0].byte_start, result[0].byte_end), (0, 6));
        assert_eq!(result[1].text, "円");
        // Not tagged as a number.
        assert_eq!(result[2].text, "一");
    }

    #[test]
    fn test_writes_value_into_index_slot() {
        let filter = JapaneseNumberTokenFilter::from_args(&json!({"tags": ["名詞,数"]})).unwrap();
        // Details as left by a compound merge: no slot holds the surface.
        let merged = token("１００", 0, &["名詞", "数", "*", "*", "*", "*", "*", "*", "*"]);
        let short = token("五", 9, &["名詞", "数"]);

        let result: Vec<Token> = filter
            .filter(vec![merged, short].into_token_stream())
            .unwrap()
            .collect();

        assert_eq!(result[0].text, "100");
        assert_eq!(
            result[0].details,
            vec!["名詞", "数", "*", "*", "*", "*", "100", "*", "*"]
        );
        // Without the slot only the text changes.
        assert_eq!(result[1].text, "5");
        assert_eq!(result[1].details, vec!["名詞", "数"]);

        let filter =
            JapaneseNumberTokenFilter::from_args(&json!({"tags": ["名詞,数"], "index": 2})).unwrap();
        let result: Vec<Token> = filter
            .filter(vec![token("二十", 0, &["名詞", "数", "*"])].into_token_stream())
            .unwrap()
            .collect();
        assert_eq!(result[0].details, vec!["名詞", "数", "20"]);
    }

    #[test]
    fn test_without_tags_converts_every_numeral() {
        let filter = JapaneseNumberTokenFilter::from_args(&Value::Null).unwrap();
        let tokens = vec![token("一", 0, &["名詞", "一般"]), token("本", 3, &["名詞", "接尾"])];

        let result: Vec<Token> = filter.filter(tokens.into_token_stream()).unwrap().collect();

        assert_eq!(result[0].text, "1");
        assert_eq!(result[1].text, "本");
    }
}
