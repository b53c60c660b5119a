use std::collections::BTreeMap;

use aho_corasick::{AhoCorasick, MatchKind};
use serde::Deserialize;
use serde_json::Value;

use super::{CharFilter, Transformation};
use crate::error::{Result, ShikiriError};
use crate::util::deserialize_args;

pub const MAPPING_CHAR_FILTER_NAME: &str = "mapping";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingArgs {
    mapping: BTreeMap<String, String>,
}

/// Replaces literal strings, preferring the longest key at each position.
#[derive(Debug)]
pub struct MappingCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
}

impl MappingCharFilter {
    pub fn new(mapping: BTreeMap<String, String>) -> Result<Self> {
        let mut keys = Vec::with_capacity(mapping.len());
        let mut replacements = Vec::with_capacity(mapping.len());

        for (key, value) in mapping {
            if key.is_empty() {
                return Err(ShikiriError::config(
                    "mapping char filter keys must not be empty",
                ));
            }
            keys.push(key);
            replacements.push(value);
        }

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&keys)
            .map_err(|e| ShikiriError::config(format!("invalid mapping: {e}")))?;

        Ok(Self { ac, replacements })
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: MappingArgs = deserialize_args(MAPPING_CHAR_FILTER_NAME, args)?;
        Self::new(args.mapping)
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();
        let mut last_match_end = 0;

        for m in self.ac.find_iter(input) {
            let replacement = &self.replacements[m.pattern().as_usize()];
            if &input[m.start()..m.end()] == replacement.as_str() {
                continue;
            }

            output.push_str(&input[last_match_end..m.start()]);

            let new_start = output.len();
            output.push_str(replacement);
            transformations.push(Transformation::new(
                m.start(),
                m.end(),
                new_start,
                output.len(),
            ));

            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        MAPPING_CHAR_FILTER_NAME
    }
}
