//! Unknown-word fallback.
//!
//! When no lexicon entry starts at a position, the segmenter asks for a
//! synthetic candidate. The character at that position is classified and
//! the matching `unk.def` row supplies connection ids, cost and details.
//! Categories flagged `group` extend the candidate over the following
//! characters of the same category; all others span a single character.

use std::io::Read;
use std::sync::Arc;

use log::warn;

use crate::dictionary::character::CharCategory;
use crate::dictionary::lexicon::parse_field;
use crate::dictionary::{Candidate, WordId, WordKind};
use crate::error::{Result, ShikiriError};

/// Cost used when the dictionary defines no `DEFAULT` unknown entry.
pub const UNKNOWN_WORD_COST: i32 = 10000;

/// Details used when the dictionary defines no `DEFAULT` unknown entry.
pub const UNKNOWN_WORD_DETAILS: &[&str] = &["UNK"];

/// One row of `unk.def`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntry {
    pub category: CharCategory,
    pub left_id: u16,
    pub right_id: u16,
    pub cost: i16,
    pub group: bool,
    pub details: Arc<[String]>,
}

/// Unknown-word entries indexed by character category.
#[derive(Debug, Clone)]
pub struct UnknownDictionary {
    by_category: Vec<Option<UnknownEntry>>,
    builtin_details: Arc<[String]>,
}

impl Default for UnknownDictionary {
    fn default() -> Self {
        Self {
            by_category: vec![None; CharCategory::ALL.len()],
            builtin_details: UNKNOWN_WORD_DETAILS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UnknownDictionary {
    pub fn from_entries(entries: Vec<UnknownEntry>) -> Self {
        let mut unknown = Self::default();
        for entry in entries {
            let slot = &mut unknown.by_category[entry.category.index()];
            if slot.is_some() {
                warn!(
                    "duplicate unknown-word entry for {}, keeping the first",
                    entry.category
                );
                continue;
            }
            *slot = Some(entry);
        }
        unknown
    }

    /// Parse `CATEGORY,left_id,right_id,cost,group,detail...` records.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(rdr);

        let mut entries = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let line = line + 1;
            let record =
                record.map_err(|e| ShikiriError::dictionary_load(format!("unk.def: {e}")))?;
            if record.len() < 5 {
                return Err(ShikiriError::dictionary_load(format!(
                    "unk.def:{line}: expected at least 5 fields, found {}",
                    record.len()
                )));
            }
            let group = match record[4].trim() {
                "0" => false,
                "1" => true,
                other => {
                    return Err(ShikiriError::dictionary_load(format!(
                        "unk.def:{line}: group must be 0 or 1, found '{other}'"
                    )));
                }
            };

            entries.push(UnknownEntry {
                category: record[0].trim().parse()?,
                left_id: parse_field(&record[1], "left_id", line)?,
                right_id: parse_field(&record[2], "right_id", line)?,
                cost: parse_field(&record[3], "cost", line)?,
                group,
                details: record.iter().skip(5).map(String::from).collect(),
            });
        }

        Ok(Self::from_entries(entries))
    }

    /// Entry for a category, following the fallback chain to `DEFAULT`.
    pub fn entry(&self, category: CharCategory) -> Option<&UnknownEntry> {
        let mut current = Some(category);
        while let Some(category) = current {
            if let Some(entry) = &self.by_category[category.index()] {
                return Some(entry);
            }
            current = category.fallback();
        }
        None
    }

    pub fn entries(&self) -> impl Iterator<Item = &UnknownEntry> {
        self.by_category.iter().flatten()
    }

    /// Candidate covering at least the character at `position`.
    ///
    /// A `position` that is not a char boundary before the end of `text`
    /// yields the built-in candidate, spanning up to the next boundary.
    pub fn fallback(&self, text: &str, position: usize) -> Candidate {
        let Some(rest) = text.get(position..).filter(|rest| !rest.is_empty()) else {
            let next = (position.saturating_add(1)..=text.len())
                .find(|&i| text.is_char_boundary(i))
                .unwrap_or(position);
            return self.builtin_candidate(CharCategory::Default, next.saturating_sub(position));
        };
        let mut chars = rest.chars();
        let first = chars.next().unwrap_or_default();
        let category = CharCategory::of(first);
        let mut length = first.len_utf8();

        let Some(entry) = self.entry(category) else {
            return self.builtin_candidate(category, length);
        };

        if entry.group {
            length += chars
                .take_while(|&c| CharCategory::of(c) == category)
                .map(char::len_utf8)
                .sum::<usize>();
        }

        Candidate {
            word_id: WordId::new(WordKind::Unknown, entry.category.index() as u32),
            length,
            left_id: entry.left_id,
            right_id: entry.right_id,
            cost: i32::from(entry.cost),
            details: Arc::clone(&entry.details),
        }
    }

    fn builtin_candidate(&self, category: CharCategory, length: usize) -> Candidate {
        Candidate {
            word_id: WordId::new(WordKind::Unknown, category.index() as u32),
            length,
            left_id: 0,
            right_id: 0,
            cost: UNKNOWN_WORD_COST,
            details: Arc::clone(&self.builtin_details),
        }
    }
}
