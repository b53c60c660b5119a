//! Error types for the Shikiri library.
//!
//! All errors are represented by the [`ShikiriError`] enum. The three
//! pipeline-level kinds map to the stage that raised them:
//!
//! - [`ShikiriError::Config`] is returned by the builder call that introduced
//!   a bad value (unknown dictionary, mode or filter kind, invalid params).
//! - [`ShikiriError::DictionaryLoad`] is returned by `build()` when the
//!   dictionary cannot be read or parsed.
//! - [`ShikiriError::Filter`] is returned by `tokenize()` when a token filter
//!   cannot interpret its input. The tokenizer stays usable afterwards.
//!
//! # Examples
//!
//! ```
//! use shikiri::error::{Result, ShikiriError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ShikiriError::config("unknown mode 'fast'"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Shikiri operations.
#[derive(Error, Debug)]
pub enum ShikiriError {
    /// Invalid builder configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Dictionary resolution or parsing failure
    #[error("Dictionary load error: {0}")]
    DictionaryLoad(String),

    /// A token filter could not process its input
    #[error("Filter error in '{filter}': {message}")]
    Filter { filter: String, message: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for operations that may fail with ShikiriError.
pub type Result<T> = std::result::Result<T, ShikiriError>;

impl ShikiriError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ShikiriError::Config(msg.into())
    }

    /// Create a new dictionary load error.
    pub fn dictionary_load<S: Into<String>>(msg: S) -> Self {
        ShikiriError::DictionaryLoad(msg.into())
    }

    /// Create a new filter error attributed to the named filter.
    pub fn filter<F: Into<String>, S: Into<String>>(filter: F, msg: S) -> Self {
        ShikiriError::Filter {
            filter: filter.into(),
            message: msg.into(),
        }
    }

    /// Whether this error was raised while configuring a builder.
    pub fn is_config(&self) -> bool {
        matches!(self, ShikiriError::Config(_))
    }

    /// Whether this error was raised while loading a dictionary.
    pub fn is_dictionary_load(&self) -> bool {
        matches!(self, ShikiriError::DictionaryLoad(_))
    }

    /// Whether this error was raised by a token filter at tokenize time.
    pub fn is_filter(&self) -> bool {
        matches!(self, ShikiriError::Filter { .. })
    }
}
