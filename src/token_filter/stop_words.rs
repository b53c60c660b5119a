use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::token::TokenStream;
use crate::token_filter::{TokenFilter, retain_tokens};
use crate::util::deserialize_args;

pub const STOP_WORDS_TOKEN_FILTER_NAME: &str = "stop_words";

const DEFAULT_JAPANESE_STOP_WORDS: &[&str] = &[
    "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある", "いる", "も",
    "する", "から", "な", "こと", "として", "い", "や", "れる", "など", "なっ", "ない", "この",
    "ため", "その", "あっ", "よう", "また", "もの", "という", "あり", "まで", "られ", "なる", "へ",
    "か", "だ", "これ", "によって", "により", "おり", "より", "による", "ず", "なり", "られる",
    "において", "ば", "なかっ", "なく", "しかし", "について", "せ", "だっ", "その後", "できる",
    "それ", "う", "ので", "なお", "のみ", "でき", "き", "つ", "における", "および", "いう",
    "さらに", "でも", "ら", "たり", "その他", "に関する", "たち", "ます", "ん", "なら",
    "に対して", "特に", "せる", "及び", "これら", "とき", "では", "にて", "ほか", "ながら",
    "うち", "そして", "とともに", "ただし", "かつて", "それぞれ", "または", "お", "ほど",
    "ものの", "に対する", "ほとんど", "と共に", "といった", "です", "とも", "ところ", "ここ",
];

/// Default Japanese stop words as a HashSet.
pub static DEFAULT_JAPANESE_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_JAPANESE_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StopWordsArgs {
    #[serde(default)]
    words: Option<Vec<String>>,
}

/// Removes tokens whose text is a stop word.
///
/// Without a word list the filter uses common Japanese particles and
/// auxiliaries.
#[derive(Clone, Debug)]
pub struct StopWordsTokenFilter {
    stop_words: Arc<HashSet<String>>,
}

impl StopWordsTokenFilter {
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_JAPANESE_STOP_WORDS_SET.clone())
    }

    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        Self {
            stop_words: Arc::new(stop_words),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(|s| s.into()).collect())
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: StopWordsArgs = deserialize_args(STOP_WORDS_TOKEN_FILTER_NAME, args)?;
        Ok(match args.words {
            Some(words) => Self::from_words(words),
            None => Self::new(),
        })
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopWordsTokenFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenFilter for StopWordsTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        retain_tokens(tokens, |token| Ok(!self.is_stop_word(&token.text)))
    }

    fn name(&self) -> &'static str {
        STOP_WORDS_TOKEN_FILTER_NAME
    }
}
