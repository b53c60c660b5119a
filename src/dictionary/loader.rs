//! Resolving dictionary selectors.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dictionary::{Dictionary, SystemDictionary};
use crate::error::{Result, ShikiriError};

const FILE_SCHEME: &str = "file://";
const DICT_SCHEME: &str = "dict://";

/// Where a tokenizer gets its dictionary from.
#[derive(Clone)]
pub enum DictionarySource {
    /// A dictionary directory, read at build time.
    Path(PathBuf),
    /// An already loaded dictionary, shared read-only.
    Instance(Arc<dyn Dictionary>),
}

impl DictionarySource {
    /// Parse a selector (`file://<dir>`, `dict://<kind>` or a bare directory
    /// path). Named kinds resolve under `root`.
    ///
    /// Fails with a config error when the scheme is not supported, a named
    /// kind has no root to resolve against, or the directory does not exist.
    pub fn from_selector(selector: &str, root: Option<&Path>) -> Result<Self> {
        let path = resolve_path(selector, root)?;
        if !path.is_dir() {
            return Err(ShikiriError::config(format!(
                "dictionary directory '{}' does not exist",
                path.display()
            )));
        }
        Ok(DictionarySource::Path(path))
    }

    /// Resolve the source into a dictionary.
    pub fn load(&self) -> Result<Arc<dyn Dictionary>> {
        match self {
            DictionarySource::Path(path) => Ok(Arc::new(SystemDictionary::load(path)?)),
            DictionarySource::Instance(dictionary) => Ok(Arc::clone(dictionary)),
        }
    }
}

impl fmt::Debug for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            DictionarySource::Instance(dictionary) => f
                .debug_tuple("Instance")
                .field(&dictionary.metadata().name)
                .finish(),
        }
    }
}

/// Turn a selector into a filesystem path without checking it exists.
///
/// `dict://<kind>` names a dictionary directory `<root>/<kind>`, so the
/// same configuration works wherever the dictionaries are installed.
pub fn resolve_path(selector: &str, root: Option<&Path>) -> Result<PathBuf> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(ShikiriError::config("empty dictionary selector"));
    }

    if let Some(path) = selector.strip_prefix(FILE_SCHEME) {
        return Ok(Path::new(path).to_path_buf());
    }
    if let Some(kind) = selector.strip_prefix(DICT_SCHEME) {
        let kind = validate_kind(kind)?;
        let root = root.ok_or_else(|| {
            ShikiriError::config(format!(
                "'{selector}' names a dictionary kind but no dictionary root is set"
            ))
        })?;
        return Ok(root.join(kind));
    }
    if let Some((scheme, _)) = selector.split_once("://") {
        return Err(ShikiriError::config(format!(
            "unsupported dictionary scheme '{scheme}://' in '{selector}'"
        )));
    }

    Ok(PathBuf::from(selector))
}

/// Selector for a named dictionary kind.
pub fn kind_selector(kind: &str) -> String {
    format!("{DICT_SCHEME}{kind}")
}

/// Kind names are single path components: ASCII letters, digits, `-` and `_`.
fn validate_kind(kind: &str) -> Result<&str> {
    let valid = !kind.is_empty()
        && kind
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(kind)
    } else {
        Err(ShikiriError::config(format!("invalid dictionary kind '{kind}'")))
    }
}
