use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::token::TokenStream;
use crate::token_filter::TokenFilter;
use crate::util::deserialize_args;

pub const UPPERCASE_TOKEN_FILTER_NAME: &str = "uppercase";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UppercaseArgs {}

/// A filter that converts token text to uppercase.
#[derive(Clone, Debug, Default)]
pub struct UppercaseTokenFilter;

impl UppercaseTokenFilter {
    pub fn new() -> Self {
        UppercaseTokenFilter
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let _: UppercaseArgs = deserialize_args(UPPERCASE_TOKEN_FILTER_NAME, args)?;
        Ok(Self::new())
    }
}

impl TokenFilter for UppercaseTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|mut token| {
                if token.text.chars().any(char::is_lowercase) {
                    token.text = token.text.to_uppercase();
                }
                token
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        UPPERCASE_TOKEN_FILTER_NAME
    }
}
