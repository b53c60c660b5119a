use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ShikiriError};
use crate::token::TokenStream;
use crate::token_filter::{TagSet, TokenFilter, retain_tokens};
use crate::util::deserialize_args;

pub const JAPANESE_STOP_TAGS_TOKEN_FILTER_NAME: &str = "japanese_stop_tags";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JapaneseStopTagsArgs {
    tags: Vec<String>,
}

/// Removes tokens whose part-of-speech matches any of the configured tags.
#[derive(Clone, Debug)]
pub struct JapaneseStopTagsTokenFilter {
    tags: TagSet,
}

impl JapaneseStopTagsTokenFilter {
    pub fn new(tags: TagSet) -> Self {
        Self { tags }
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: JapaneseStopTagsArgs =
            deserialize_args(JAPANESE_STOP_TAGS_TOKEN_FILTER_NAME, args)?;
        if args.tags.is_empty() {
            return Err(ShikiriError::config(format!(
                "'{JAPANESE_STOP_TAGS_TOKEN_FILTER_NAME}' needs at least one tag"
            )));
        }
        Ok(Self::new(TagSet::parse(&args.tags)?))
    }
}

impl TokenFilter for JapaneseStopTagsTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        retain_tokens(tokens, |token| {
            Ok(!self.tags.matches(token, self.name())?)
        })
    }

    fn name(&self) -> &'static str {
        JAPANESE_STOP_TAGS_TOKEN_FILTER_NAME
    }
}
