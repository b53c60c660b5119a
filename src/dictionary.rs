//! Dictionary interface consumed by the segmenter, and a text-file backed
//! implementation of it.
//!
//! The segmenter only talks to the [`Dictionary`] trait: candidate lookup at
//! a byte position, connection costs between adjacent morpheme categories,
//! the unknown-word fallback, and compound decomposition. [`SystemDictionary`]
//! implements it from a directory of plain text files:
//!
//! ```text
//! dict/
//! ├── metadata.json   (optional) {"name": "...", "detail_fields": [...]}
//! ├── lex.csv         surface,left_id,right_id,cost,detail...
//! ├── matrix.def      "num_right num_left" header, then "right_id left_id cost"
//! ├── unk.def         CATEGORY,left_id,right_id,cost,group,detail...
//! └── decompose.csv   (optional) surface,sub1/sub2/...
//! ```

pub mod character;
pub mod connector;
pub mod lexicon;
pub mod loader;
pub mod unknown;
pub mod user;

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::dictionary::connector::ConnectionMatrix;
use crate::dictionary::lexicon::Lexicon;
use crate::dictionary::unknown::UnknownDictionary;
use crate::error::{Result, ShikiriError};

pub use crate::dictionary::loader::DictionarySource;
pub use crate::dictionary::user::UserDictionary;

/// Connection id used by the beginning-of-sentence and end-of-sentence nodes.
pub const BOS_EOS_CONNECTION_ID: u16 = 0;

const LEXICON_FILE: &str = "lex.csv";
const MATRIX_FILE: &str = "matrix.def";
const UNKNOWN_FILE: &str = "unk.def";
const DECOMPOSE_FILE: &str = "decompose.csv";
const METADATA_FILE: &str = "metadata.json";

/// Which table a word id points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    System,
    User,
    Unknown,
}

/// Identifier of a dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId {
    pub kind: WordKind,
    pub id: u32,
}

impl WordId {
    /// Id carried by tokens that do not correspond to any single entry.
    pub const UNKNOWN: WordId = WordId {
        kind: WordKind::Unknown,
        id: u32::MAX,
    };

    pub const fn new(kind: WordKind, id: u32) -> Self {
        Self { kind, id }
    }

    #[inline(always)]
    pub fn is_unknown(&self) -> bool {
        self.kind == WordKind::Unknown
    }
}

/// A morpheme candidate starting at a queried position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word_id: WordId,
    /// Surface length in bytes of filtered text.
    pub length: usize,
    pub left_id: u16,
    pub right_id: u16,
    /// Emission cost.
    pub cost: i32,
    pub details: Arc<[String]>,
}

/// Descriptive information about a dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryMetadata {
    #[serde(default)]
    pub name: String,
    /// Names of the detail slots, in order. Empty when the schema is undeclared.
    #[serde(default)]
    pub detail_fields: Vec<String>,
}

/// Read-only dictionary used by the segmenter.
///
/// Implementations must be safe to share between threads without locking.
pub trait Dictionary: Send + Sync {
    /// Candidates whose surface starts at byte `position` of `text`, in
    /// registration order.
    fn lookup(&self, text: &str, position: usize) -> Vec<Candidate>;

    /// Cost of placing a morpheme with `left_id` right after one with `right_id`.
    fn connection_cost(&self, right_id: u16, left_id: u16) -> i32;

    /// Synthetic candidate used when no entry starts at `position`.
    fn unknown_fallback(&self, text: &str, position: usize) -> Candidate;

    /// Whether the candidate is a compound with registered sub-morphemes.
    fn is_compound(&self, candidate: &Candidate) -> bool;

    /// The registered sub-morphemes of a compound, in surface order.
    fn decompose(&self, candidate: &Candidate) -> Vec<Candidate>;

    fn metadata(&self) -> &DictionaryMetadata;
}

/// Dictionary assembled from a lexicon, a connection matrix and unknown-word
/// definitions.
pub struct SystemDictionary {
    metadata: DictionaryMetadata,
    lexicon: Lexicon,
    connector: ConnectionMatrix,
    unknown: UnknownDictionary,
    decompositions: AHashMap<u32, Vec<u32>>,
}

impl SystemDictionary {
    /// Assemble a dictionary, checking that every connection id fits the matrix.
    pub fn new(
        metadata: DictionaryMetadata,
        lexicon: Lexicon,
        connector: ConnectionMatrix,
        unknown: UnknownDictionary,
    ) -> Result<Self> {
        for entry in lexicon.entries() {
            connector
                .check_ids(entry.right_id, entry.left_id)
                .map_err(|e| {
                    ShikiriError::dictionary_load(format!("entry '{}': {e}", entry.surface))
                })?;
        }
        for entry in unknown.entries() {
            connector
                .check_ids(entry.right_id, entry.left_id)
                .map_err(|e| {
                    ShikiriError::dictionary_load(format!(
                        "unknown category {}: {e}",
                        entry.category
                    ))
                })?;
        }

        Ok(Self {
            metadata,
            lexicon,
            connector,
            unknown,
            decompositions: AHashMap::new(),
        })
    }

    /// Build a dictionary from in-memory sources in the directory formats.
    pub fn from_readers<L, M, U>(
        metadata: DictionaryMetadata,
        lexicon: L,
        matrix: M,
        unknown: U,
    ) -> Result<Self>
    where
        L: Read,
        M: Read,
        U: Read,
    {
        let lexicon = Lexicon::from_reader(lexicon, WordKind::System)?;
        let connector = ConnectionMatrix::from_reader(matrix)?;
        let unknown = UnknownDictionary::from_reader(unknown)?;
        Self::new(metadata, lexicon, connector, unknown)
    }

    /// Load a dictionary directory.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let metadata = match open_optional(&dir.join(METADATA_FILE))? {
            Some(file) => serde_json::from_reader(file).map_err(|e| {
                ShikiriError::dictionary_load(format!("{METADATA_FILE}: {e}"))
            })?,
            None => DictionaryMetadata {
                name: dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                detail_fields: Vec::new(),
            },
        };

        let mut dictionary = Self::from_readers(
            metadata,
            open_required(&dir.join(LEXICON_FILE))?,
            open_required(&dir.join(MATRIX_FILE))?,
            open_required(&dir.join(UNKNOWN_FILE))?,
        )?;

        if let Some(file) = open_optional(&dir.join(DECOMPOSE_FILE))? {
            dictionary.read_decompositions(file)?;
        }

        debug!(
            "loaded dictionary '{}' from {}: {} entries, {} compounds",
            dictionary.metadata.name,
            dir.display(),
            dictionary.lexicon.len(),
            dictionary.decompositions.len()
        );

        Ok(dictionary)
    }

    /// Register compound decompositions (`surface,sub1/sub2/...` lines).
    ///
    /// Every entry with the compound surface is marked; each sub surface
    /// resolves to its first registered entry.
    pub fn read_decompositions<R: Read>(&mut self, rdr: R) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(rdr);

        for (line, record) in reader.records().enumerate() {
            let line = line + 1;
            let record = record
                .map_err(|e| ShikiriError::dictionary_load(format!("{DECOMPOSE_FILE}: {e}")))?;
            if record.len() != 2 {
                return Err(ShikiriError::dictionary_load(format!(
                    "{DECOMPOSE_FILE}:{line}: expected 'surface,sub1/sub2/...'"
                )));
            }
            let surface = &record[0];
            let subs: Vec<&str> = record[1].split('/').collect();

            if subs.len() < 2 || subs.concat() != surface {
                return Err(ShikiriError::dictionary_load(format!(
                    "{DECOMPOSE_FILE}:{line}: parts of '{surface}' must concatenate to it"
                )));
            }

            let sub_ids = subs
                .iter()
                .map(|sub| {
                    self.lexicon.first_id(sub).ok_or_else(|| {
                        ShikiriError::dictionary_load(format!(
                            "{DECOMPOSE_FILE}:{line}: part '{sub}' is not in {LEXICON_FILE}"
                        ))
                    })
                })
                .collect::<Result<Vec<u32>>>()?;

            let compound_ids = self.lexicon.ids(surface);
            if compound_ids.is_empty() {
                return Err(ShikiriError::dictionary_load(format!(
                    "{DECOMPOSE_FILE}:{line}: compound '{surface}' is not in {LEXICON_FILE}"
                )));
            }
            for &id in compound_ids {
                if self.decompositions.insert(id, sub_ids.clone()).is_some() {
                    warn!("{DECOMPOSE_FILE}:{line}: decomposition of '{surface}' redefined");
                }
            }
        }

        Ok(())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl Dictionary for SystemDictionary {
    fn lookup(&self, text: &str, position: usize) -> Vec<Candidate> {
        self.lexicon.common_prefix_search(text, position)
    }

    fn connection_cost(&self, right_id: u16, left_id: u16) -> i32 {
        self.connector.cost(right_id, left_id)
    }

    fn unknown_fallback(&self, text: &str, position: usize) -> Candidate {
        self.unknown.fallback(text, position)
    }

    fn is_compound(&self, candidate: &Candidate) -> bool {
        candidate.word_id.kind == WordKind::System
            && self.decompositions.contains_key(&candidate.word_id.id)
    }

    fn decompose(&self, candidate: &Candidate) -> Vec<Candidate> {
        if candidate.word_id.kind != WordKind::System {
            return Vec::new();
        }
        self.decompositions
            .get(&candidate.word_id.id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| self.lexicon.candidate(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn metadata(&self) -> &DictionaryMetadata {
        &self.metadata
    }
}

impl fmt::Debug for SystemDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemDictionary")
            .field("name", &self.metadata.name)
            .field("entries", &self.lexicon.len())
            .field("compounds", &self.decompositions.len())
            .finish()
    }
}

fn open_required(path: &Path) -> Result<File> {
    File::open(path)
        .map_err(|e| ShikiriError::dictionary_load(format!("{}: {e}", path.display())))
}

fn open_optional(path: &Path) -> Result<Option<File>> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ShikiriError::dictionary_load(format!(
            "{}: {e}",
            path.display()
        ))),
    }
}
