use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ShikiriError};
use crate::token::TokenStream;
use crate::token_filter::TokenFilter;
use crate::util::deserialize_args;

pub const JAPANESE_BASE_FORM_TOKEN_FILTER_NAME: &str = "japanese_base_form";

/// Base-form column of IPADIC-style details.
pub const DEFAULT_BASE_FORM_INDEX: usize = 6;

const UNDEFINED_DETAIL: &str = "*";

fn default_index() -> usize {
    DEFAULT_BASE_FORM_INDEX
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JapaneseBaseFormArgs {
    #[serde(default = "default_index")]
    index: usize,
}

/// Replaces token text with the base form stored in `details[index]`.
///
/// Tokens whose base form is `*` keep their text. Tokens with no detail at
/// `index` fail the call, except unknown words, which carry fewer details.
#[derive(Clone, Debug)]
pub struct JapaneseBaseFormTokenFilter {
    index: usize,
}

impl JapaneseBaseFormTokenFilter {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: JapaneseBaseFormArgs =
            deserialize_args(JAPANESE_BASE_FORM_TOKEN_FILTER_NAME, args)?;
        Ok(Self::new(args.index))
    }
}

impl Default for JapaneseBaseFormTokenFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_FORM_INDEX)
    }
}

impl TokenFilter for JapaneseBaseFormTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut out = Vec::new();

        for mut token in tokens {
            match token.details.get(self.index) {
                Some(base) if base != UNDEFINED_DETAIL => token.text = base.clone(),
                Some(_) => {}
                None if token.is_unknown() => {}
                None => {
                    return Err(ShikiriError::filter(
                        self.name(),
                        format!(
                            "token '{}' has {} details, no base form at index {}",
                            token.text,
                            token.details.len(),
                            self.index
                        ),
                    ));
                }
            }
            out.push(token);
        }

        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        JAPANESE_BASE_FORM_TOKEN_FILTER_NAME
    }
}
