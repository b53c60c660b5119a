//! Token types produced by the tokenization pipeline.
//!
//! A [`Token`] is the unit that flows through the token filter chain and is
//! returned to callers. Offsets always refer to the *original* input, even
//! when character filters rewrote the text before segmentation.
//!
//! # Examples
//!
//! ```
//! use shikiri::token::Token;
//!
//! let token = Token::new("円", 3, 6, vec!["名詞".to_string(), "接尾".to_string()]);
//! assert_eq!(token.text, "円");
//! assert_eq!(token.byte_start, 3);
//! assert_eq!(token.byte_end, 6);
//! assert_eq!(token.detail(1), Some("接尾"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dictionary::WordId;

/// A single morpheme after segmentation and filtering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text as it appears in the filtered text (or as rewritten by a token filter)
    pub text: String,

    /// Byte offset where this token starts in the original input
    pub byte_start: usize,

    /// Byte offset where this token ends in the original input
    pub byte_end: usize,

    /// Index of the morpheme in the segmenter output (0-based)
    pub position: usize,

    /// Dictionary entry this token came from
    pub word_id: WordId,

    /// Dictionary-defined grammatical tags, in dictionary schema order
    pub details: Vec<String>,
}

impl Token {
    /// Create a new token with unknown word id and position 0.
    pub fn new<S: Into<String>>(
        text: S,
        byte_start: usize,
        byte_end: usize,
        details: Vec<String>,
    ) -> Self {
        Token {
            text: text.into(),
            byte_start,
            byte_end,
            position: 0,
            word_id: WordId::UNKNOWN,
            details,
        }
    }

    /// Set the position of this token.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Set the dictionary word id of this token.
    pub fn with_word_id(mut self, word_id: WordId) -> Self {
        self.word_id = word_id;
        self
    }

    /// Clone this token with updated text. Span and details are kept.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the detail at `index`, if the token has that many details.
    pub fn detail(&self, index: usize) -> Option<&str> {
        self.details.get(index).map(|s| s.as_str())
    }

    /// Whether this token did not come from a dictionary entry.
    pub fn is_unknown(&self) -> bool {
        self.word_id.is_unknown()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens moving through the filter chain.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordKind;

    #[test]
    fn test_token_creation() {
        let token = Token::new("関西", 0, 6, vec!["名詞".to_string()]);
        assert_eq!(token.text, "関西");
        assert_eq!(token.byte_start, 0);
        assert_eq!(token.byte_end, 6);
        assert_eq!(token.position, 0);
        assert!(token.is_unknown());
        assert_eq!(token.len(), 6);
    }

    #[test]
    fn test_token_builders() {
        let token = Token::new("空港", 12, 18, vec![])
            .with_position(2)
            .with_word_id(WordId::new(WordKind::System, 7));

        assert_eq!(token.position, 2);
        assert!(!token.is_unknown());
        assert_eq!(token.detail(0), None);

        let renamed = token.with_text("くうこう");
        assert_eq!(renamed.text, "くうこう");
        assert_eq!(renamed.byte_start, 12);
        assert_eq!(renamed.byte_end, 18);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("限定", 0, 6, vec![]);
        assert_eq!(format!("{token}"), "限定");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("a", 0, 1, vec![]), Token::new("b", 1, 2, vec![])];

        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "a");
        assert_eq!(collected[1].text, "b");
    }

    #[test]
    fn test_token_serializes_as_plain_record() {
        let token = Token::new("円", 3, 6, vec!["名詞".to_string()]);
        let value = serde_json::to_value(&token).unwrap();

        assert_eq!(value["text"], "円");
        assert_eq!(value["byte_start"], 3);
        assert_eq!(value["byte_end"], 6);
        assert_eq!(value["details"][0], "名詞");
    }
}
