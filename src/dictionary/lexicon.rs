//! Word entries and common-prefix lookup over them.

use std::io::Read;
use std::sync::Arc;

use ahash::AHashMap;

use crate::dictionary::user::SimpleEntryLayout;
use crate::dictionary::{Candidate, WordId, WordKind};
use crate::error::{Result, ShikiriError};

/// A registered word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub surface: String,
    pub left_id: u16,
    pub right_id: u16,
    pub cost: i16,
    pub details: Arc<[String]>,
}

/// Entries of `lex.csv` (or a user lexicon), indexed by surface.
///
/// Word ids are positions in registration order.
#[derive(Debug, Clone)]
pub struct Lexicon {
    kind: WordKind,
    entries: Vec<WordEntry>,
    index: AHashMap<String, Vec<u32>>,
    max_surface_chars: usize,
}

impl Lexicon {
    pub fn from_entries(entries: Vec<WordEntry>, kind: WordKind) -> Result<Self> {
        let mut index: AHashMap<String, Vec<u32>> = AHashMap::new();
        let mut max_surface_chars = 0;

        for (id, entry) in entries.iter().enumerate() {
            if entry.surface.is_empty() {
                return Err(ShikiriError::dictionary_load(format!(
                    "entry {} has an empty surface",
                    id + 1
                )));
            }
            let id = u32::try_from(id)
                .map_err(|_| ShikiriError::dictionary_load("too many lexicon entries"))?;
            max_surface_chars = max_surface_chars.max(entry.surface.chars().count());
            index.entry(entry.surface.clone()).or_default().push(id);
        }

        Ok(Self {
            kind,
            entries,
            index,
            max_surface_chars,
        })
    }

    /// Parse `surface,left_id,right_id,cost,detail...` records.
    pub fn from_reader<R: Read>(rdr: R, kind: WordKind) -> Result<Self> {
        Self::read(rdr, kind, None)
    }

    /// Parse a user lexicon: full records, or `surface,part_of_speech,reading`
    /// records expanded through `layout`.
    pub fn from_user_reader<R: Read>(rdr: R, layout: &SimpleEntryLayout) -> Result<Self> {
        Self::read(rdr, WordKind::User, Some(layout))
    }

    fn read<R: Read>(rdr: R, kind: WordKind, simple: Option<&SimpleEntryLayout>) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(rdr);

        let mut entries = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let line = line + 1;
            let record =
                record.map_err(|e| ShikiriError::dictionary_load(format!("lexicon: {e}")))?;
            if let (Some(layout), 3) = (simple, record.len()) {
                entries.push(layout.entry(&record[0], &record[1], &record[2]));
                continue;
            }
            if record.len() < 4 {
                let expected = if simple.is_some() { "3 or at least 4" } else { "at least 4" };
                return Err(ShikiriError::dictionary_load(format!(
                    "lexicon:{line}: expected {expected} fields, found {}",
                    record.len()
                )));
            }

            entries.push(WordEntry {
                surface: record[0].to_string(),
                left_id: parse_field(&record[1], "left_id", line)?,
                right_id: parse_field(&record[2], "right_id", line)?,
                cost: parse_field(&record[3], "cost", line)?,
                details: record.iter().skip(4).map(String::from).collect(),
            });
        }

        Self::from_entries(entries, kind)
    }

    /// Candidates for every entry whose surface is a prefix of `text[position..]`,
    /// sorted by word id.
    pub fn common_prefix_search(&self, text: &str, position: usize) -> Vec<Candidate> {
        let Some(rest) = text.get(position..) else {
            return Vec::new();
        };

        let mut ids = Vec::new();
        for (offset, c) in rest.char_indices().take(self.max_surface_chars) {
            let end = offset + c.len_utf8();
            if let Some(found) = self.index.get(&rest[..end]) {
                ids.extend_from_slice(found);
            }
        }
        ids.sort_unstable();

        ids.into_iter()
            .filter_map(|id| self.candidate(id))
            .collect()
    }

    pub fn candidate(&self, id: u32) -> Option<Candidate> {
        self.entries.get(id as usize).map(|entry| Candidate {
            word_id: WordId::new(self.kind, id),
            length: entry.surface.len(),
            left_id: entry.left_id,
            right_id: entry.right_id,
            cost: i32::from(entry.cost),
            details: Arc::clone(&entry.details),
        })
    }

    pub fn get(&self, id: u32) -> Option<&WordEntry> {
        self.entries.get(id as usize)
    }

    /// Ids of all entries with exactly this surface, in registration order.
    pub fn ids(&self, surface: &str) -> &[u32] {
        self.index.get(surface).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_id(&self, surface: &str) -> Option<u32> {
        self.ids(surface).first().copied()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn kind(&self) -> WordKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn parse_field<T: std::str::FromStr>(value: &str, name: &str, line: usize) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ShikiriError::dictionary_load(format!("line {line}: invalid {name} '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEX: &str = "\
東京,1,1,3000,名詞,固有名詞
東,1,1,4000,名詞,一般
東京都,1,1,2500,名詞,固有名詞
京都,1,1,3000,名詞,固有名詞
\"\"\"\",2,2,500,記号,括弧
";

    #[test]
    fn test_parse_lexicon() {
        let lexicon = Lexicon::from_reader(LEX.as_bytes(), WordKind::System).unwrap();

        assert_eq!(lexicon.len(), 5);
        let entry = lexicon.get(0).unwrap();
        assert_eq!(entry.surface, "東京");
        assert_eq!(entry.cost, 3000);
        assert_eq!(&*entry.details, &["名詞".to_string(), "固有名詞".to_string()]);
        // quoted fields follow csv rules
        assert_eq!(lexicon.get(4).unwrap().surface, "\"");
    }

    #[test]
    fn test_common_prefix_search() {
        let lexicon = Lexicon::from_reader(LEX.as_bytes(), WordKind::System).unwrap();

        let found = lexicon.common_prefix_search("東京都庁", 0);
        let ids: Vec<u32> = found.iter().map(|c| c.word_id.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(found[2].length, "東京都".len());

        let found = lexicon.common_prefix_search("東京都庁", 3);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].word_id.id, 3);

        assert!(lexicon.common_prefix_search("東京都庁", 12).is_empty());
    }

    #[test]
    fn test_lookup_by_surface() {
        let lexicon = Lexicon::from_reader(LEX.as_bytes(), WordKind::User).unwrap();

        assert_eq!(lexicon.first_id("京都"), Some(3));
        assert_eq!(lexicon.first_id("大阪"), None);
        assert_eq!(lexicon.candidate(3).unwrap().word_id.kind, WordKind::User);
    }

    #[test]
    fn test_rejects_bad_records() {
        let short = "東京,1,1\n";
        assert!(
            Lexicon::from_reader(short.as_bytes(), WordKind::System)
                .unwrap_err()
                .is_dictionary_load()
        );

        let bad_cost = "東京,1,1,cheap,名詞\n";
        assert!(Lexicon::from_reader(bad_cost.as_bytes(), WordKind::System).is_err());

        // Three fields are only a simple row in user lexicons.
        let simple = "東京,名詞,トウキョウ\n";
        assert!(Lexicon::from_reader(simple.as_bytes(), WordKind::System).is_err());
        let layout = SimpleEntryLayout::for_kind("ipadic").unwrap();
        let lexicon = Lexicon::from_user_reader(simple.as_bytes(), &layout).unwrap();
        assert_eq!(lexicon.kind(), WordKind::User);
        assert_eq!(lexicon.get(0).unwrap().details[6], "東京");

        let empty_surface = ",1,1,100,名詞\n";
        assert!(Lexicon::from_reader(empty_surface.as_bytes(), WordKind::System).is_err());
    }
}
