//! Character filters that rewrite text before segmentation.
//!
//! Each filter returns the rewritten text together with the
//! [`Transformation`]s it applied, so token spans found in the filtered text
//! can be mapped back to the caller's original string.
//!
//! # Available Filters
//!
//! - [`unicode_normalize::UnicodeNormalizeCharFilter`] - Unicode normalization (NFC, NFD, NFKC, NFKD)
//! - [`mapping::MappingCharFilter`] - Literal string replacement
//! - [`regex::RegexCharFilter`] - Regex-based replacement
//! - [`japanese_iteration_mark::JapaneseIterationMarkCharFilter`] - Japanese iteration mark expansion
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use shikiri::char_filter::{CharFilterLoader, FilteredText};
//!
//! let filter = CharFilterLoader::load("regex", &json!({"pattern": "-", "replacement": ""})).unwrap();
//! let filtered = FilteredText::apply("foo-bar", &[filter]);
//!
//! assert_eq!(filtered.text, "foobar");
//! assert_eq!(filtered.original_span(0, 6), (0, 7));
//! ```

pub mod japanese_iteration_mark;
pub mod mapping;
pub mod regex;
pub mod unicode_normalize;

use std::sync::Arc;

use serde_json::Value;

use crate::char_filter::japanese_iteration_mark::JapaneseIterationMarkCharFilter;
use crate::char_filter::mapping::MappingCharFilter;
use crate::char_filter::regex::RegexCharFilter;
use crate::char_filter::unicode_normalize::UnicodeNormalizeCharFilter;
use crate::error::{Result, ShikiriError};

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }
}

/// Trait for character filters that transform text before segmentation.
///
/// Implementations return the filtered text and one [`Transformation`] per
/// edited span, in text order and non-overlapping. Spans not covered by a
/// transformation are copied unchanged.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Which side of a span an offset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Start,
    End,
}

/// Maps offsets in one filter's output back to its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetMap {
    transformations: Vec<Transformation>,
}

impl OffsetMap {
    pub fn new(mut transformations: Vec<Transformation>) -> Self {
        transformations.sort_by_key(|t| (t.new_start, t.new_end));
        Self { transformations }
    }

    pub fn is_identity(&self) -> bool {
        self.transformations.is_empty()
    }

    /// Map an offset of the filtered text to the input text.
    ///
    /// Offsets strictly inside an edited span snap outward: a start offset
    /// to the span's original start, an end offset to its original end. At a
    /// deletion, start offsets skip past the deleted text and end offsets
    /// stop before it.
    pub fn correct(&self, offset: usize, bias: Bias) -> usize {
        let mut delta: isize = 0;

        for t in &self.transformations {
            if offset < t.new_start {
                break;
            }

            let new_len = t.new_end - t.new_start;
            let original_len = t.original_end - t.original_start;

            if new_len == 0 {
                if offset > t.new_start {
                    delta += original_len as isize;
                    continue;
                }
                return match bias {
                    Bias::Start => t.original_end,
                    Bias::End => t.original_start,
                };
            }

            if offset >= t.new_end {
                delta += original_len as isize - new_len as isize;
                continue;
            }

            if offset == t.new_start {
                return t.original_start;
            }
            return match bias {
                Bias::Start => t.original_start,
                Bias::End => t.original_end,
            };
        }

        (offset as isize + delta) as usize
    }
}

/// Text after the whole character filter chain, with one offset map per filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredText {
    pub text: String,
    offset_maps: Vec<OffsetMap>,
}

impl FilteredText {
    /// Run the filters in order over `input`.
    pub fn apply(input: &str, filters: &[Arc<dyn CharFilter>]) -> Self {
        let mut text = input.to_string();
        let mut offset_maps = Vec::with_capacity(filters.len());

        for filter in filters {
            let (new_text, transformations) = filter.filter(&text);
            text = new_text;
            offset_maps.push(OffsetMap::new(transformations));
        }

        Self { text, offset_maps }
    }

    /// Map a span of the filtered text back to the original input, going
    /// from the last filter to the first.
    pub fn original_span(&self, start: usize, end: usize) -> (usize, usize) {
        let mut start = start;
        let mut end = end;
        for map in self.offset_maps.iter().rev() {
            if map.is_identity() {
                continue;
            }
            start = map.correct(start, Bias::Start);
            end = map.correct(end, Bias::End);
        }
        (start, end.max(start))
    }
}

/// Registry of built-in character filters, keyed by kind.
pub struct CharFilterLoader;

impl CharFilterLoader {
    /// Kinds accepted by [`CharFilterLoader::load`].
    pub const KINDS: &'static [&'static str] = &[
        unicode_normalize::UNICODE_NORMALIZE_CHAR_FILTER_NAME,
        mapping::MAPPING_CHAR_FILTER_NAME,
        regex::REGEX_CHAR_FILTER_NAME,
        japanese_iteration_mark::JAPANESE_ITERATION_MARK_CHAR_FILTER_NAME,
    ];

    /// Build a filter from its kind and parameters, validating the parameters.
    pub fn load(kind: &str, args: &Value) -> Result<Arc<dyn CharFilter>> {
        let filter: Arc<dyn CharFilter> = match kind {
            unicode_normalize::UNICODE_NORMALIZE_CHAR_FILTER_NAME => {
                Arc::new(UnicodeNormalizeCharFilter::from_args(args)?)
            }
            mapping::MAPPING_CHAR_FILTER_NAME => Arc::new(MappingCharFilter::from_args(args)?),
            regex::REGEX_CHAR_FILTER_NAME => Arc::new(RegexCharFilter::from_args(args)?),
            japanese_iteration_mark::JAPANESE_ITERATION_MARK_CHAR_FILTER_NAME => {
                Arc::new(JapaneseIterationMarkCharFilter::from_args(args)?)
            }
            _ => {
                return Err(ShikiriError::config(format!(
                    "unknown character filter kind '{kind}', expected one of {:?}",
                    Self::KINDS
                )));
            }
        };
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_map() {
        let map = OffsetMap::default();
        assert_eq!(map.correct(5, Bias::Start), 5);
        assert_eq!(map.correct(5, Bias::End), 5);
    }

    #[test]
    fn test_shrinking_edit() {
        // "abcXYZdef" -> "abcQdef"
        let map = OffsetMap::new(vec![Transformation::new(3, 6, 3, 4)]);

        assert_eq!(map.correct(3, Bias::Start), 3);
        assert_eq!(map.correct(4, Bias::End), 6);
        assert_eq!(map.correct(4, Bias::Start), 6);
        assert_eq!(map.correct(7, Bias::End), 9);
        assert_eq!(map.correct(2, Bias::End), 2);
    }

    #[test]
    fn test_growing_edit_snaps_outward() {
        // "㌂" (3 bytes) -> "アンペア" (12 bytes)
        let map = OffsetMap::new(vec![Transformation::new(0, 3, 0, 12)]);

        assert_eq!(map.correct(0, Bias::Start), 0);
        assert_eq!(map.correct(6, Bias::Start), 0);
        assert_eq!(map.correct(6, Bias::End), 3);
        assert_eq!(map.correct(12, Bias::End), 3);
    }

    #[test]
    fn test_deletion_point() {
        // "foo-bar" -> "foobar"
        let map = OffsetMap::new(vec![Transformation::new(3, 4, 3, 3)]);

        assert_eq!(map.correct(3, Bias::End), 3);
        assert_eq!(map.correct(3, Bias::Start), 4);
        assert_eq!(map.correct(6, Bias::End), 7);
        assert_eq!(map.correct(0, Bias::Start), 0);
    }

    #[test]
    fn test_chain_maps_back_through_every_filter() {
        let filters = vec![
            CharFilterLoader::load("regex", &json!({"pattern": "-", "replacement": ""})).unwrap(),
            CharFilterLoader::load("unicode_normalize", &json!({"kind": "nfkc"})).unwrap(),
        ];

        // "Ａ-㌂" -> "Ａ㌂" -> "Aアンペア"
        let filtered = FilteredText::apply("Ａ-㌂", &filters);
        assert_eq!(filtered.text, "Aアンペア");

        assert_eq!(filtered.original_span(0, 1), (0, 3));
        assert_eq!(filtered.original_span(1, 13), (4, 7));
        assert_eq!(filtered.original_span(4, 7), (4, 7));
    }

    #[test]
    fn test_unknown_kind_is_config_error() {
        let result = CharFilterLoader::load("html_strip", &Value::Null);
        assert!(result.err().unwrap().is_config());
    }
}
