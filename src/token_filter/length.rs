use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ShikiriError};
use crate::token::TokenStream;
use crate::token_filter::{TokenFilter, retain_tokens};
use crate::util::deserialize_args;

pub const LENGTH_TOKEN_FILTER_NAME: &str = "length";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LengthArgs {
    #[serde(default)]
    min: Option<usize>,
    #[serde(default)]
    max: Option<usize>,
}

/// Keeps tokens whose text length in characters lies within `[min, max]`.
#[derive(Clone, Debug, Default)]
pub struct LengthTokenFilter {
    min: Option<usize>,
    max: Option<usize>,
}

impl LengthTokenFilter {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(ShikiriError::config(format!(
                "'{LENGTH_TOKEN_FILTER_NAME}' min ({min}) is greater than max ({max})"
            ))),
            _ => Ok(Self { min, max }),
        }
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: LengthArgs = deserialize_args(LENGTH_TOKEN_FILTER_NAME, args)?;
        Self::new(args.min, args.max)
    }

    fn accepts(&self, len: usize) -> bool {
        self.min.is_none_or(|min| len >= min) && self.max.is_none_or(|max| len <= max)
    }
}

impl TokenFilter for LengthTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        retain_tokens(tokens, |token| Ok(self.accepts(token.text.chars().count())))
    }

    fn name(&self) -> &'static str {
        LENGTH_TOKEN_FILTER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{IntoTokenStream, Token};
    use serde_json::json;

    #[test]
    fn test_length_bounds() {
        let filter = LengthTokenFilter::from_args(&json!({"min": 2, "max": 3})).unwrap();
        let tokens = vec![
            Token::new("の", 0, 3, vec![]),
            Token::new("東京", 3, 9, vec![]),
            Token::new("関西国際空港", 9, 27, vec![]),
            Token::new("abc", 27, 30, vec![]),
        ];

        let result: Vec<Token> = filter.filter(tokens.into_token_stream()).unwrap().collect();
        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["東京", "abc"]);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(
            LengthTokenFilter::from_args(&json!({"min": 4, "max": 1}))
                .unwrap_err()
                .is_config()
        );
        assert!(LengthTokenFilter::from_args(&Value::Null).is_ok());
    }
}
