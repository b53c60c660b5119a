//! Token filters applied to the segmenter output.
//!
//! Filters receive the whole token stream of one `tokenize` call and return a
//! new stream. They may rewrite, drop or merge tokens, and a filter that
//! cannot interpret a token fails the call with [`ShikiriError::Filter`].
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseTokenFilter`] - Lowercases token text
//! - [`uppercase::UppercaseTokenFilter`] - Uppercases token text
//! - [`japanese_compound_word::JapaneseCompoundWordTokenFilter`] - Merges runs of tagged tokens
//! - [`japanese_number::JapaneseNumberTokenFilter`] - Normalizes numerals to Arabic integers
//! - [`japanese_stop_tags::JapaneseStopTagsTokenFilter`] - Drops tokens by tag
//! - [`japanese_keep_tags::JapaneseKeepTagsTokenFilter`] - Keeps tokens by tag
//! - [`japanese_base_form::JapaneseBaseFormTokenFilter`] - Replaces text with a detail slot
//! - [`stop_words::StopWordsTokenFilter`] - Drops listed words
//! - [`length::LengthTokenFilter`] - Keeps tokens within a length range
//!
//! # Examples
//!
//! ```
//! use shikiri::token::{IntoTokenStream, Token};
//! use shikiri::token_filter::TokenFilter;
//! use shikiri::token_filter::lowercase::LowercaseTokenFilter;
//!
//! let filter = LowercaseTokenFilter::new();
//! let tokens = vec![Token::new("Hello", 0, 5, vec![]), Token::new("WORLD", 6, 11, vec![])];
//! let filtered: Vec<_> = filter.filter(tokens.into_token_stream()).unwrap().collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

pub mod japanese_base_form;
pub mod japanese_compound_word;
pub mod japanese_keep_tags;
pub mod japanese_number;
pub mod japanese_stop_tags;
pub mod length;
pub mod lowercase;
pub mod stop_words;
pub mod uppercase;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, ShikiriError};
use crate::token::{Token, TokenStream};
use crate::token_filter::japanese_base_form::JapaneseBaseFormTokenFilter;
use crate::token_filter::japanese_compound_word::JapaneseCompoundWordTokenFilter;
use crate::token_filter::japanese_keep_tags::JapaneseKeepTagsTokenFilter;
use crate::token_filter::japanese_number::JapaneseNumberTokenFilter;
use crate::token_filter::japanese_stop_tags::JapaneseStopTagsTokenFilter;
use crate::token_filter::length::LengthTokenFilter;
use crate::token_filter::lowercase::LowercaseTokenFilter;
use crate::token_filter::stop_words::StopWordsTokenFilter;
use crate::token_filter::uppercase::UppercaseTokenFilter;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so a built tokenizer can be shared
/// between threads.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use shikiri::error::Result;
/// use shikiri::token::{Token, TokenStream};
/// use shikiri::token_filter::TokenFilter;
///
/// struct ReverseTokenFilter;
///
/// impl TokenFilter for ReverseTokenFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait TokenFilter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for errors and configuration).
    fn name(&self) -> &'static str;
}

/// A part-of-speech pattern such as `名詞,数`.
///
/// Slot `i` of the pattern must equal `details[i]` of the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    slots: Vec<String>,
}

impl TagPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(ShikiriError::config("tag patterns must not be empty"));
        }
        Ok(Self {
            slots: pattern.split(',').map(|s| s.trim().to_string()).collect(),
        })
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Whether the token's leading details equal this pattern.
    ///
    /// A dictionary token with fewer details than the pattern has slots is a
    /// schema mismatch and yields a filter error. Unknown-word and merged
    /// tokens without enough details simply do not match.
    pub fn matches(&self, token: &Token, filter: &str) -> Result<bool> {
        if token.details.len() < self.slots.len() {
            if token.details.is_empty() || token.is_unknown() {
                return Ok(false);
            }
            return Err(ShikiriError::filter(
                filter,
                format!(
                    "tag pattern '{}' has {} slots but token '{}' has only {} details",
                    self,
                    self.slots.len(),
                    token.text,
                    token.details.len()
                ),
            ));
        }

        Ok(self
            .slots
            .iter()
            .zip(&token.details)
            .all(|(slot, detail)| slot == detail))
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slots.join(","))
    }
}

/// A set of tag patterns; a token matches when any pattern matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    patterns: Vec<TagPattern>,
}

impl TagSet {
    pub fn parse<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| TagPattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn matches(&self, token: &Token, filter: &str) -> Result<bool> {
        for pattern in &self.patterns {
            if pattern.matches(token, filter)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Registry of built-in token filters, keyed by kind.
pub struct TokenFilterLoader;

impl TokenFilterLoader {
    /// Kinds accepted by [`TokenFilterLoader::load`].
    pub const KINDS: &'static [&'static str] = &[
        lowercase::LOWERCASE_TOKEN_FILTER_NAME,
        uppercase::UPPERCASE_TOKEN_FILTER_NAME,
        japanese_compound_word::JAPANESE_COMPOUND_WORD_TOKEN_FILTER_NAME,
        japanese_number::JAPANESE_NUMBER_TOKEN_FILTER_NAME,
        japanese_stop_tags::JAPANESE_STOP_TAGS_TOKEN_FILTER_NAME,
        japanese_keep_tags::JAPANESE_KEEP_TAGS_TOKEN_FILTER_NAME,
        japanese_base_form::JAPANESE_BASE_FORM_TOKEN_FILTER_NAME,
        stop_words::STOP_WORDS_TOKEN_FILTER_NAME,
        length::LENGTH_TOKEN_FILTER_NAME,
    ];

    /// Build a filter from its kind and parameters, validating the parameters.
    pub fn load(kind: &str, args: &Value) -> Result<Arc<dyn TokenFilter>> {
        let filter: Arc<dyn TokenFilter> = match kind {
            lowercase::LOWERCASE_TOKEN_FILTER_NAME => {
                Arc::new(LowercaseTokenFilter::from_args(args)?)
            }
            uppercase::UPPERCASE_TOKEN_FILTER_NAME => {
                Arc::new(UppercaseTokenFilter::from_args(args)?)
            }
            japanese_compound_word::JAPANESE_COMPOUND_WORD_TOKEN_FILTER_NAME => {
                Arc::new(JapaneseCompoundWordTokenFilter::from_args(args)?)
            }
            japanese_number::JAPANESE_NUMBER_TOKEN_FILTER_NAME => {
                Arc::new(JapaneseNumberTokenFilter::from_args(args)?)
            }
            japanese_stop_tags::JAPANESE_STOP_TAGS_TOKEN_FILTER_NAME => {
                Arc::new(JapaneseStopTagsTokenFilter::from_args(args)?)
            }
            japanese_keep_tags::JAPANESE_KEEP_TAGS_TOKEN_FILTER_NAME => {
                Arc::new(JapaneseKeepTagsTokenFilter::from_args(args)?)
            }
            japanese_base_form::JAPANESE_BASE_FORM_TOKEN_FILTER_NAME => {
                Arc::new(JapaneseBaseFormTokenFilter::from_args(args)?)
            }
            stop_words::STOP_WORDS_TOKEN_FILTER_NAME => {
                Arc::new(StopWordsTokenFilter::from_args(args)?)
            }
            length::LENGTH_TOKEN_FILTER_NAME => Arc::new(LengthTokenFilter::from_args(args)?),
            _ => {
                return Err(ShikiriError::config(format!(
                    "unknown token filter kind '{kind}', expected one of {:?}",
                    Self::KINDS
                )));
            }
        };
        Ok(filter)
    }
}

/// Keep the tokens for which `keep` returns true, stopping at the first error.
pub(crate) fn retain_tokens<F>(tokens: TokenStream, mut keep: F) -> Result<TokenStream>
where
    F: FnMut(&Token) -> Result<bool>,
{
    let mut kept = Vec::new();
    for token in tokens {
        if keep(&token)? {
            kept.push(token);
        }
    }
    Ok(Box::new(kept.into_iter()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dictionary::{WordId, WordKind};
    use serde_json::json;

    /// A dictionary-backed token with the given details.
    pub(crate) fn token(text: &str, start: usize, details: &[&str]) -> Token {
        Token::new(
            text,
            start,
            start + text.len(),
            details.iter().map(|d| d.to_string()).collect(),
        )
        .with_word_id(WordId::new(WordKind::System, 0))
    }

    #[test]
    fn test_tag_pattern_matches_prefix() {
        let pattern = TagPattern::parse("名詞,数").unwrap();
        assert!(pattern.matches(&token("1", 0, &["名詞", "数", "*"]), "t").unwrap());
        assert!(!pattern.matches(&token("円", 0, &["名詞", "接尾", "助数詞"]), "t").unwrap());
        assert!(!pattern.matches(&token("の", 0, &["助詞", "数"]), "t").unwrap());
    }

    #[test]
    fn test_tag_pattern_schema_mismatch() {
        let pattern = TagPattern::parse("名詞,数,*").unwrap();
        let err = pattern.matches(&token("1", 0, &["名詞", "数"]), "test").unwrap_err();
        assert!(err.is_filter());

        let unknown = Token::new("1", 0, 1, vec!["UNK".to_string()]);
        assert!(!pattern.matches(&unknown, "test").unwrap());
    }

    #[test]
    fn test_tag_set_matches_any() {
        let tags = TagSet::parse(&["助詞", "名詞,数"]).unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.matches(&token("の", 0, &["助詞", "連体化"]), "t").unwrap());
        assert!(tags.matches(&token("1", 0, &["名詞", "数"]), "t").unwrap());
        assert!(!tags.matches(&token("円", 0, &["名詞", "接尾"]), "t").unwrap());

        assert!(TagSet::parse(&[""]).unwrap_err().is_config());
    }

    #[test]
    fn test_loader() {
        for kind in ["lowercase", "uppercase"] {
            let filter = TokenFilterLoader::load(kind, &Value::Null).unwrap();
            assert_eq!(filter.name(), kind);
        }

        let filter =
            TokenFilterLoader::load("japanese_stop_tags", &json!({"tags": ["助詞"]})).unwrap();
        assert_eq!(filter.name(), "japanese_stop_tags");

        assert!(TokenFilterLoader::load("stemmer", &Value::Null).err().unwrap().is_config());
        assert!(
            TokenFilterLoader::load("lowercase", &json!({"locale": "tr"}))
                .err().unwrap()
                .is_config()
        );
    }
}
