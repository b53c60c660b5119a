//! Merging runs of adjacent tokens into one compound token.
//!
//! Typical use is gluing the digits a dictionary emits one by one
//! (`1`, `0`, `0`) into a single numeral before number normalization.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use shikiri::token::{IntoTokenStream, Token};
//! use shikiri::token_filter::TokenFilter;
//! use shikiri::token_filter::japanese_compound_word::JapaneseCompoundWordTokenFilter;
//!
//! let filter = JapaneseCompoundWordTokenFilter::from_args(&json!({
//!     "tags": ["名詞,数"],
//!     "new_tag": "名詞,数"
//! }))
//! .unwrap();
//!
//! let digit = |text: &str, start| {
//!     Token::new(text, start, start + 1, vec!["名詞".into(), "数".into(), "*".into()])
//! };
//! let tokens = vec![digit("1", 0), digit("0", 1), digit("0", 2)];
//! let merged: Vec<_> = filter.filter(tokens.into_token_stream()).unwrap().collect();
//!
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].text, "100");
//! assert_eq!(merged[0].details, vec!["名詞", "数", "*"]);
//! ```

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::dictionary::WordId;
use crate::error::{Result, ShikiriError};
use crate::token::{Token, TokenStream};
use crate::token_filter::{TagPattern, TagSet, TokenFilter};
use crate::util::deserialize_args;

pub const JAPANESE_COMPOUND_WORD_TOKEN_FILTER_NAME: &str = "japanese_compound_word";

const PADDING_DETAIL: &str = "*";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JapaneseCompoundWordArgs {
    /// Dictionary schema label (for example `ipadic`). Informational only.
    #[serde(default)]
    kind: Option<String>,
    tags: Vec<String>,
    #[serde(default)]
    new_tag: Option<String>,
}

/// Merges maximal runs of consecutive tokens that match any of `tags`.
///
/// The merged token spans from the first member's start to the last
/// member's end and concatenates their text. Its details are `new_tag`
/// split on `,` and padded with `*` to the first member's detail count, or
/// the first member's details when no `new_tag` is given. A run of one token
/// keeps its text and span but still takes the `new_tag` details. Without a
/// `new_tag` it passes through untouched. Applying the filter twice gives the
/// same tokens as applying it once.
#[derive(Clone, Debug)]
pub struct JapaneseCompoundWordTokenFilter {
    tags: TagSet,
    new_tag: Option<TagPattern>,
}

impl JapaneseCompoundWordTokenFilter {
    pub fn new(tags: TagSet, new_tag: Option<TagPattern>) -> Self {
        Self { tags, new_tag }
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: JapaneseCompoundWordArgs =
            deserialize_args(JAPANESE_COMPOUND_WORD_TOKEN_FILTER_NAME, args)?;
        if args.tags.is_empty() {
            return Err(ShikiriError::config(format!(
                "'{JAPANESE_COMPOUND_WORD_TOKEN_FILTER_NAME}' needs at least one tag"
            )));
        }
        if let Some(kind) = &args.kind {
            debug!("compound word filter configured for '{kind}' tags");
        }

        let tags = TagSet::parse(&args.tags)?;
        let new_tag = args.new_tag.as_deref().map(TagPattern::parse).transpose()?;
        Ok(Self::new(tags, new_tag))
    }

    fn merge(&self, run: Vec<Token>) -> Token {
        let first = &run[0];
        let last = &run[run.len() - 1];

        let details = match &self.new_tag {
            Some(new_tag) => {
                let mut details = new_tag.slots().to_vec();
                while details.len() < first.details.len() {
                    details.push(PADDING_DETAIL.to_string());
                }
                details
            }
            None => first.details.clone(),
        };

        Token {
            text: run.iter().map(|t| t.text.as_str()).collect(),
            byte_start: first.byte_start,
            byte_end: last.byte_end,
            position: first.position,
            word_id: WordId::UNKNOWN,
            details,
        }
    }

    fn flush(&self, run: &mut Vec<Token>, out: &mut Vec<Token>) {
        match run.len() {
            0 => {}
            1 if self.new_tag.is_none() => out.append(run),
            _ => out.push(self.merge(std::mem::take(run))),
        }
    }
}

impl TokenFilter for JapaneseCompoundWordTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut out = Vec::new();
        let mut run = Vec::new();

        for token in tokens {
            if self.tags.matches(&token, self.name())? {
                run.push(token);
            } else {
                self.flush(&mut run, &mut out);
                out.push(token);
            }
        }
        self.flush(&mut run, &mut out);

        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        JAPANESE_COMPOUND_WORD_TOKEN_FILTER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::IntoTokenStream;
    use crate::token_filter::tests::token;
    use serde_json::json;

    fn numeric_filter(new_tag: Option<&str>) -> JapaneseCompoundWordTokenFilter {
        JapaneseCompoundWordTokenFilter::new(
            TagSet::parse(&["名詞,数"]).unwrap(),
            new_tag.map(|t| TagPattern::parse(t).unwrap()),
        )
    }

    fn sample() -> Vec<Token> {
        vec![
            token("１", 0, &["名詞", "数", "*", "*"]).with_position(0),
            token("０", 3, &["名詞", "数", "*", "*"]).with_position(1),
            token("円", 6, &["名詞", "接尾", "助数詞", "*"]).with_position(2),
            token("2", 9, &["名詞", "数", "*", "*"]).with_position(3),
        ]
    }

    #[test]
    fn test_merges_runs() {
        let filter = numeric_filter(Some("名詞,数,複合"));
        let result: Vec<Token> = filter.filter(sample().into_token_stream()).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "１０");
        assert_eq!((result[0].byte_start, result[0].byte_end), (0, 6));
        assert_eq!(result[0].details, vec!["名詞", "数", "複合", "*"]);
        assert_eq!(result[0].position, 0);
        assert!(result[0].is_unknown());

        assert_eq!(result[1].text, "円");
        // A run of one keeps its text and span and takes the new tag.
        assert_eq!(result[2].text, "2");
        assert_eq!((result[2].byte_start, result[2].byte_end), (9, 10));
        assert_eq!(result[2].details, vec!["名詞", "数", "複合", "*"]);
        assert_eq!(result[2].position, 3);
    }

    #[test]
    fn test_single_token_run_without_new_tag_passes_through() {
        let filter = numeric_filter(None);
        let result: Vec<Token> = filter.filter(sample().into_token_stream()).unwrap().collect();

        assert_eq!(result[2].text, "2");
        assert_eq!(result[2].details, vec!["名詞", "数", "*", "*"]);
        assert!(!result[2].is_unknown());
    }

    #[test]
    fn test_keeps_first_details_without_new_tag() {
        let filter = numeric_filter(None);
        let result: Vec<Token> = filter.filter(sample().into_token_stream()).unwrap().collect();
        assert_eq!(result[0].details, vec!["名詞", "数", "*", "*"]);
    }

    #[test]
    fn test_idempotent() {
        for new_tag in [None, Some("名詞,数"), Some("名詞,数,複合")] {
            let filter = numeric_filter(new_tag);
            let once: Vec<Token> = filter.filter(sample().into_token_stream()).unwrap().collect();
            let twice: Vec<Token> = filter
                .filter(once.clone().into_token_stream())
                .unwrap()
                .collect();
            assert_eq!(once, twice, "{new_tag:?}");
        }
    }

    #[test]
    fn test_schema_mismatch_is_filter_error() {
        let filter = JapaneseCompoundWordTokenFilter::new(
            TagSet::parse(&["名詞,数,*,*,*"]).unwrap(),
            None,
        );
        let err = filter.filter(sample().into_token_stream()).err().unwrap();
        assert!(err.is_filter());
    }

    #[test]
    fn test_from_args() {
        let filter = JapaneseCompoundWordTokenFilter::from_args(&json!({
            "kind": "ipadic",
            "tags": ["名詞,数"],
            "new_tag": "名詞,数"
        }));
        assert!(filter.is_ok());

        assert!(
            JapaneseCompoundWordTokenFilter::from_args(&json!({"tags": []}))
                .unwrap_err()
                .is_config()
        );
        assert!(
            JapaneseCompoundWordTokenFilter::from_args(&Value::Null)
                .unwrap_err()
                .is_config()
        );
    }
}
