//! # Shikiri
//!
//! A dictionary-driven morphological tokenizer for Rust.
//!
//! ## Features
//!
//! - Minimum-cost (Viterbi) segmentation over a MeCab-style text dictionary
//! - Unknown-word handling by character category
//! - `normal` and `decompose` segmentation modes
//! - Character filters with offsets mapped back to the original text
//! - Token filters for part-of-speech selection, compound merging and
//!   numeral normalization
//! - Immutable, thread-safe tokenizers built from code or a JSON config
//!
//! ## Example
//!
//! ```no_run
//! use serde_json::json;
//! use shikiri::tokenizer::TokenizerBuilder;
//!
//! let mut builder = TokenizerBuilder::new();
//! builder
//!     .set_dictionary("dict/ipadic")?
//!     .append_character_filter("unicode_normalize", &json!({"kind": "nfkc"}))?;
//! let tokenizer = builder.build()?;
//!
//! for token in tokenizer.tokenize("関西国際空港限定トートバッグ")? {
//!     println!("{}\t{}", token.text, token.details.join(","));
//! }
//! # Ok::<(), shikiri::error::ShikiriError>(())
//! ```

pub mod char_filter;
pub mod cli;
pub mod dictionary;
pub mod error;
pub mod mode;
pub mod segmenter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
pub mod util;

#[cfg(test)]
mod test_utils;

pub mod prelude {
    pub use crate::dictionary::{Dictionary, SystemDictionary, UserDictionary};
    pub use crate::error::{Result, ShikiriError};
    pub use crate::mode::Mode;
    pub use crate::token::Token;
    pub use crate::tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
