//! User dictionary layered over another dictionary.
//!
//! User lexicons accept two row formats, mixed freely:
//!
//! ```text
//! 東京タワー,1,1,1000,名詞,固有名詞,一般,*,*,*,東京タワー,トウキョウタワー,トーキョータワー
//! 東京スカイツリー,カスタム名詞,トウキョウスカイツリー
//! ```
//!
//! The first is the full `lex.csv` format. The second is the simple
//! `surface,part_of_speech,reading` format; a [`SimpleEntryLayout`] chosen
//! by dictionary kind expands it into a full entry.

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::dictionary::lexicon::{Lexicon, WordEntry};
use crate::dictionary::{Candidate, Dictionary, DictionaryMetadata, WordKind};
use crate::error::{Result, ShikiriError};

/// Connection id given to simple rows. It is the BOS/EOS id, which every
/// connection matrix defines.
pub const SIMPLE_ENTRY_CONNECTION_ID: u16 = 0;

/// Cost given to simple rows, low enough to beat system entries.
pub const SIMPLE_ENTRY_COST: i16 = -10000;

const UNDEFINED_DETAIL: &str = "*";

const IPADIC_FIELDS: &[&str] = &[
    "pos1",
    "pos2",
    "pos3",
    "pos4",
    "conj_type",
    "conj_form",
    "base_form",
    "reading",
    "pronunciation",
];

const UNIDIC_FIELDS: &[&str] = &[
    "pos1", "pos2", "pos3", "pos4", "ctype", "cform", "lform", "lemma", "orth", "pron",
    "orth_base", "pron_base", "goshu", "itype", "iform", "ftype", "fform",
];

const KO_DIC_FIELDS: &[&str] = &[
    "pos",
    "semantic_class",
    "final_consonant",
    "reading",
    "type",
    "first_pos",
    "last_pos",
    "expression",
];

const CC_CEDICT_FIELDS: &[&str] = &[
    "pos1",
    "pos2",
    "pos3",
    "pos4",
    "pinyin",
    "traditional",
    "simplified",
    "definition",
];

/// Dictionary kinds with a built-in simple-row layout.
pub const SIMPLE_ENTRY_KINDS: &[&str] = &["ipadic", "unidic", "ko-dic", "cc-cedict"];

/// How a simple `surface,part_of_speech,reading` row becomes an entry.
///
/// Details follow the kind's field names: the first slot takes the part of
/// speech, base-form slots (`base_form`, `lemma`, `orth`, `simplified`) take
/// the surface, reading slots (`reading`, `pronunciation`, `lform`, `pron`,
/// `pinyin`) take the reading, and every other slot is `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleEntryLayout {
    pub left_id: u16,
    pub right_id: u16,
    pub cost: i16,
    fields: Vec<String>,
}

impl SimpleEntryLayout {
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Self {
        Self {
            left_id: SIMPLE_ENTRY_CONNECTION_ID,
            right_id: SIMPLE_ENTRY_CONNECTION_ID,
            cost: SIMPLE_ENTRY_COST,
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        }
    }

    /// Layout of a named dictionary kind.
    pub fn for_kind(kind: &str) -> Result<Self> {
        let fields = match kind {
            "ipadic" => IPADIC_FIELDS,
            "unidic" => UNIDIC_FIELDS,
            "ko-dic" => KO_DIC_FIELDS,
            "cc-cedict" => CC_CEDICT_FIELDS,
            _ => {
                return Err(ShikiriError::config(format!(
                    "unknown user dictionary kind '{kind}' (expected one of: {})",
                    SIMPLE_ENTRY_KINDS.join(", ")
                )));
            }
        };
        Ok(Self::new(fields))
    }

    /// Layout declared by a dictionary's metadata, IPADIC when it declares none.
    pub fn from_metadata(metadata: &DictionaryMetadata) -> Self {
        if metadata.detail_fields.is_empty() {
            Self::new(IPADIC_FIELDS)
        } else {
            Self::new(&metadata.detail_fields)
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn entry(&self, surface: &str, part_of_speech: &str, reading: &str) -> WordEntry {
        let details = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| match field.as_str() {
                _ if i == 0 => part_of_speech,
                "base_form" | "lemma" | "orth" | "simplified" => surface,
                "reading" | "pronunciation" | "lform" | "pron" | "pinyin" => reading,
                _ => UNDEFINED_DETAIL,
            })
            .map(String::from)
            .collect();

        WordEntry {
            surface: surface.to_string(),
            left_id: self.left_id,
            right_id: self.right_id,
            cost: self.cost,
            details,
        }
    }
}

/// Adds user lexicon entries to a base dictionary.
///
/// User candidates are returned before the base dictionary's, so they win
/// cost ties. Connection costs, unknown words and compounds come from the
/// base dictionary; user entries are never compounds.
pub struct UserDictionary {
    base: Arc<dyn Dictionary>,
    lexicon: Lexicon,
}

impl UserDictionary {
    pub fn new(base: Arc<dyn Dictionary>, lexicon: Lexicon) -> Self {
        Self { base, lexicon }
    }

    /// Load a user lexicon CSV, expanding simple rows with the layout the
    /// base dictionary's metadata declares.
    pub fn load<P: AsRef<Path>>(path: P, base: Arc<dyn Dictionary>) -> Result<Self> {
        let layout = SimpleEntryLayout::from_metadata(base.metadata());
        Self::load_with_layout(path, base, &layout)
    }

    /// Load a user lexicon CSV, expanding simple rows with `layout`.
    pub fn load_with_layout<P: AsRef<Path>>(
        path: P,
        base: Arc<dyn Dictionary>,
        layout: &SimpleEntryLayout,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ShikiriError::dictionary_load(format!("{}: {e}", path.display())))?;
        let lexicon = Lexicon::from_user_reader(file, layout).map_err(|e| match e {
            ShikiriError::DictionaryLoad(msg) => {
                ShikiriError::dictionary_load(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;

        debug!(
            "loaded user dictionary {}: {} entries",
            path.display(),
            lexicon.len()
        );

        Ok(Self::new(base, lexicon))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl Dictionary for UserDictionary {
    fn lookup(&self, text: &str, position: usize) -> Vec<Candidate> {
        let mut candidates = self.lexicon.common_prefix_search(text, position);
        candidates.extend(self.base.lookup(text, position));
        candidates
    }

    fn connection_cost(&self, right_id: u16, left_id: u16) -> i32 {
        self.base.connection_cost(right_id, left_id)
    }

    fn unknown_fallback(&self, text: &str, position: usize) -> Candidate {
        self.base.unknown_fallback(text, position)
    }

    fn is_compound(&self, candidate: &Candidate) -> bool {
        candidate.word_id.kind != WordKind::User && self.base.is_compound(candidate)
    }

    fn decompose(&self, candidate: &Candidate) -> Vec<Candidate> {
        if candidate.word_id.kind == WordKind::User {
            return Vec::new();
        }
        self.base.decompose(candidate)
    }

    fn metadata(&self) -> &DictionaryMetadata {
        self.base.metadata()
    }
}

impl fmt::Debug for UserDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDictionary")
            .field("base", &self.base.metadata().name)
            .field("entries", &self.lexicon.len())
            .finish()
    }
}
