//! Lowercase filter implementation.
//!
//! # Examples
//!
//! ```
//! use shikiri::token::{IntoTokenStream, Token};
//! use shikiri::token_filter::TokenFilter;
//! use shikiri::token_filter::lowercase::LowercaseTokenFilter;
//!
//! let filter = LowercaseTokenFilter::new();
//! let tokens = vec![Token::new("Ｒｕｓｔ", 0, 12, vec![])];
//! let filtered: Vec<_> = filter.filter(tokens.into_token_stream()).unwrap().collect();
//!
//! assert_eq!(filtered[0].text, "ｒｕｓｔ");
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::token::TokenStream;
use crate::token_filter::TokenFilter;
use crate::util::deserialize_args;

pub const LOWERCASE_TOKEN_FILTER_NAME: &str = "lowercase";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LowercaseArgs {}

/// A filter that converts token text to lowercase.
///
/// Offsets, details and positions are preserved.
#[derive(Clone, Debug, Default)]
pub struct LowercaseTokenFilter;

impl LowercaseTokenFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseTokenFilter
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let _: LowercaseArgs = deserialize_args(LOWERCASE_TOKEN_FILTER_NAME, args)?;
        Ok(Self::new())
    }
}

impl TokenFilter for LowercaseTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|mut token| {
                if token.text.chars().any(char::is_uppercase) {
                    token.text = token.text.to_lowercase();
                }
                token
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        LOWERCASE_TOKEN_FILTER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{IntoTokenStream, Token};

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseTokenFilter::new();
        let tokens = vec![
            Token::new("Hello", 0, 5, vec![]),
            Token::new("WORLD", 6, 11, vec![]),
            Token::new("東京", 11, 17, vec!["名詞".to_string()]),
        ];

        let result: Vec<Token> = filter.filter(tokens.into_token_stream()).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[1].byte_start, 6);
        assert_eq!(result[2].text, "東京");
        assert_eq!(result[2].details, vec!["名詞"]);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseTokenFilter::new().name(), "lowercase");
    }
}
