//! Tokenizer assembly and execution.
//!
//! A [`TokenizerBuilder`] collects the dictionary, the mode and the two
//! filter chains, validating each setting as it is made. [`TokenizerBuilder::build`]
//! loads the dictionary and freezes everything into an immutable
//! [`Tokenizer`], which can be cloned cheaply and shared between threads.
//!
//! # Architecture
//!
//! A `tokenize` call runs, in order:
//! 1. Char filters: rewrite the raw text, recording offset maps
//! 2. Segmenter: minimum-cost segmentation of the filtered text
//! 3. Offset mapping: token spans mapped back to the original text
//! 4. Token filters: applied in the order they were appended
//!
//! # Examples
//!
//! ```no_run
//! use serde_json::json;
//! use shikiri::tokenizer::TokenizerBuilder;
//!
//! let mut builder = TokenizerBuilder::new();
//! builder
//!     .set_dictionary("file:///usr/local/share/shikiri/ipadic")?
//!     .set_mode("normal")?
//!     .append_character_filter("unicode_normalize", &json!({"kind": "nfkc"}))?
//!     .append_token_filter(
//!         "japanese_compound_word",
//!         &json!({"tags": ["名詞,数"], "new_tag": "名詞,数"}),
//!     )?
//!     .append_token_filter("japanese_number", &json!({"tags": ["名詞,数"]}))?;
//!
//! let tokenizer = builder.build()?;
//! for token in tokenizer.tokenize("１００円")? {
//!     println!("{} {:?}", token.text, token.details);
//! }
//! # Ok::<(), shikiri::error::ShikiriError>(())
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::char_filter::{CharFilter, CharFilterLoader, FilteredText};
use crate::dictionary::loader::{kind_selector, resolve_path};
use crate::dictionary::user::SimpleEntryLayout;
use crate::dictionary::{Dictionary, DictionarySource, UserDictionary};
use crate::error::{Result, ShikiriError};
use crate::mode::Mode;
use crate::segmenter::Segmenter;
use crate::token::{IntoTokenStream, Token};
use crate::token_filter::{TokenFilter, TokenFilterLoader};

/// One entry of a filter chain in a [`TokenizerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    pub kind: String,
    #[serde(default)]
    pub args: Value,
}

impl FilterConfig {
    pub fn new<S: Into<String>>(kind: S, args: Value) -> Self {
        Self {
            kind: kind.into(),
            args,
        }
    }
}

/// The builder surface as a JSON document.
///
/// ```json
/// {
///   "dictionary_root": "/usr/local/share/shikiri",
///   "dictionary": "dict://ipadic",
///   "user_dictionary": "userdic.csv",
///   "user_dictionary_kind": "ipadic",
///   "mode": "normal",
///   "character_filters": [{"kind": "unicode_normalize", "args": {"kind": "nfkc"}}],
///   "token_filters": [{"kind": "lowercase"}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Directory holding named dictionaries (`dict://<kind>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_dictionary: Option<String>,
    /// Layout for simple user dictionary rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_dictionary_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default)]
    pub character_filters: Vec<FilterConfig>,
    #[serde(default)]
    pub token_filters: Vec<FilterConfig>,
}

impl TokenizerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ShikiriError::config(format!("invalid tokenizer config: {e}")))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ShikiriError::config(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }
}

/// Mutable tokenizer configuration.
///
/// Every setter validates its input and reports a config error right away.
/// `build` takes `&self`, so one builder can serve as a template for
/// several tokenizers; later changes never affect tokenizers already built.
#[derive(Clone, Default)]
pub struct TokenizerBuilder {
    dictionary_root: Option<PathBuf>,
    dictionary: Option<DictionarySource>,
    user_dictionary: Option<PathBuf>,
    user_dictionary_kind: Option<(String, SimpleEntryLayout)>,
    mode: Mode,
    character_filters: Vec<Arc<dyn CharFilter>>,
    token_filters: Vec<Arc<dyn TokenFilter>>,
}

impl TokenizerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a builder from a parsed config document.
    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        let mut builder = Self::new();

        if let Some(root) = &config.dictionary_root {
            builder.set_dictionary_root(root)?;
        }
        if let Some(dictionary) = &config.dictionary {
            builder.set_dictionary(dictionary)?;
        }
        if let Some(kind) = &config.user_dictionary_kind {
            builder.set_user_dictionary_kind(kind)?;
        }
        if let Some(user_dictionary) = &config.user_dictionary {
            builder.set_user_dictionary(user_dictionary)?;
        }
        if let Some(mode) = &config.mode {
            builder.set_mode(mode)?;
        }
        for filter in &config.character_filters {
            builder.append_character_filter(&filter.kind, &filter.args)?;
        }
        for filter in &config.token_filters {
            builder.append_token_filter(&filter.kind, &filter.args)?;
        }

        Ok(builder)
    }

    /// Build a builder from a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_config(&TokenizerConfig::from_file(path)?)
    }

    /// Set the directory that named dictionaries are looked up in.
    pub fn set_dictionary_root(&mut self, selector: &str) -> Result<&mut Self> {
        let path = resolve_path(selector, None)?;
        if !path.is_dir() {
            return Err(ShikiriError::config(format!(
                "dictionary root '{}' does not exist",
                path.display()
            )));
        }
        self.dictionary_root = Some(path);
        Ok(self)
    }

    /// Select the dictionary directory (`file://<dir>`, `dict://<kind>` or a
    /// bare path). Named kinds need the dictionary root to be set first.
    pub fn set_dictionary(&mut self, selector: &str) -> Result<&mut Self> {
        let source = DictionarySource::from_selector(selector, self.dictionary_root.as_deref())?;
        self.dictionary = Some(source);
        Ok(self)
    }

    /// Select a named dictionary (`ipadic`, `unidic`, ...) under the
    /// dictionary root.
    pub fn set_dictionary_kind(&mut self, kind: &str) -> Result<&mut Self> {
        self.set_dictionary(&kind_selector(kind))
    }

    /// Use an already loaded dictionary.
    pub fn set_dictionary_instance(&mut self, dictionary: Arc<dyn Dictionary>) -> &mut Self {
        self.dictionary = Some(DictionarySource::Instance(dictionary));
        self
    }

    /// Layer a user lexicon CSV over the dictionary.
    pub fn set_user_dictionary(&mut self, selector: &str) -> Result<&mut Self> {
        let path = resolve_path(selector, self.dictionary_root.as_deref())?;
        if !path.is_file() {
            return Err(ShikiriError::config(format!(
                "user dictionary '{}' does not exist",
                path.display()
            )));
        }
        self.user_dictionary = Some(path);
        Ok(self)
    }

    /// Choose how simple `surface,part_of_speech,reading` user rows expand.
    ///
    /// Without a kind the layout comes from the dictionary's metadata.
    pub fn set_user_dictionary_kind(&mut self, kind: &str) -> Result<&mut Self> {
        let layout = SimpleEntryLayout::for_kind(kind)?;
        self.user_dictionary_kind = Some((kind.to_string(), layout));
        Ok(self)
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<&mut Self> {
        self.mode = Mode::from_str(mode)?;
        Ok(self)
    }

    pub fn append_character_filter(&mut self, kind: &str, args: &Value) -> Result<&mut Self> {
        self.character_filters.push(CharFilterLoader::load(kind, args)?);
        Ok(self)
    }

    pub fn append_token_filter(&mut self, kind: &str, args: &Value) -> Result<&mut Self> {
        self.token_filters.push(TokenFilterLoader::load(kind, args)?);
        Ok(self)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Load the dictionary and freeze the configuration.
    pub fn build(&self) -> Result<Tokenizer> {
        let source = self
            .dictionary
            .as_ref()
            .ok_or_else(|| ShikiriError::config("no dictionary configured"))?;

        let mut dictionary = source.load()?;
        if let Some(path) = &self.user_dictionary {
            let user = match &self.user_dictionary_kind {
                Some((_, layout)) => UserDictionary::load_with_layout(path, dictionary, layout)?,
                None => UserDictionary::load(path, dictionary)?,
            };
            dictionary = Arc::new(user);
        }

        debug!(
            "built tokenizer: dictionary '{}', mode {}, {} char filters, {} token filters",
            dictionary.metadata().name,
            self.mode,
            self.character_filters.len(),
            self.token_filters.len()
        );

        Ok(Tokenizer {
            segmenter: Segmenter::new(self.mode, dictionary),
            character_filters: self.character_filters.clone(),
            token_filters: self.token_filters.clone(),
        })
    }
}

impl fmt::Debug for TokenizerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerBuilder")
            .field("dictionary_root", &self.dictionary_root)
            .field("dictionary", &self.dictionary)
            .field("user_dictionary", &self.user_dictionary)
            .field(
                "user_dictionary_kind",
                &self.user_dictionary_kind.as_ref().map(|(kind, _)| kind),
            )
            .field("mode", &self.mode)
            .field(
                "character_filters",
                &self.character_filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field(
                "token_filters",
                &self.token_filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Immutable tokenization pipeline.
///
/// All per-call state is local to `tokenize`, so a tokenizer can be used
/// from many threads at once.
#[derive(Clone)]
pub struct Tokenizer {
    segmenter: Segmenter,
    character_filters: Vec<Arc<dyn CharFilter>>,
    token_filters: Vec<Arc<dyn TokenFilter>>,
}

impl Tokenizer {
    /// Tokenize `text`. Token offsets refer to `text` itself.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let filtered = FilteredText::apply(text, &self.character_filters);
        let morphemes = self.segmenter.segment(&filtered.text);

        let tokens: Vec<Token> = morphemes
            .into_iter()
            .enumerate()
            .map(|(position, morpheme)| {
                let (byte_start, byte_end) = filtered.original_span(morpheme.start, morpheme.end);
                Token {
                    text: filtered.text[morpheme.start..morpheme.end].to_string(),
                    byte_start,
                    byte_end,
                    position,
                    word_id: morpheme.candidate.word_id,
                    details: morpheme.candidate.details.to_vec(),
                }
            })
            .collect();

        trace!(
            "tokenize: {} bytes in, {} filtered bytes, {} morphemes",
            text.len(),
            filtered.text.len(),
            tokens.len()
        );

        let mut stream = tokens.into_token_stream();
        for filter in &self.token_filters {
            stream = filter.filter(stream)?;
        }

        Ok(stream.collect())
    }

    /// Tokenize several texts in parallel. The first failure aborts the batch.
    pub fn tokenize_batch<S>(&self, texts: &[S]) -> Result<Vec<Vec<Token>>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.tokenize(text.as_ref()))
            .collect()
    }

    pub fn mode(&self) -> Mode {
        self.segmenter.mode()
    }

    pub fn dictionary(&self) -> &Arc<dyn Dictionary> {
        self.segmenter.dictionary()
    }

    pub fn character_filter_names(&self) -> Vec<&'static str> {
        self.character_filters.iter().map(|f| f.name()).collect()
    }

    pub fn token_filter_names(&self) -> Vec<&'static str> {
        self.token_filters.iter().map(|f| f.name()).collect()
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("segmenter", &self.segmenter)
            .field("character_filters", &self.character_filter_names())
            .field("token_filters", &self.token_filter_names())
            .finish()
    }
}
