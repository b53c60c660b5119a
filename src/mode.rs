//! Segmentation modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShikiriError};

/// How compound words found on the minimum-cost path are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Emit the minimum-cost path as is.
    #[default]
    Normal,
    /// Replace dictionary-declared compounds with their sub-morphemes.
    Decompose,
}

impl Mode {
    /// The configuration name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Decompose => "decompose",
        }
    }
}

impl FromStr for Mode {
    type Err = ShikiriError;

    fn from_str(mode: &str) -> Result<Mode> {
        match mode {
            "normal" => Ok(Mode::Normal),
            "decompose" => Ok(Mode::Decompose),
            _ => Err(ShikiriError::config(format!(
                "invalid mode '{mode}', expected 'normal' or 'decompose'"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
