use serde::Deserialize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use super::{CharFilter, Transformation};
use crate::error::Result;
use crate::util::deserialize_args;

pub const UNICODE_NORMALIZE_CHAR_FILTER_NAME: &str = "unicode_normalize";

/// Supported Unicode normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationForm {
    Nfc,
    Nfd,
    #[default]
    Nfkc,
    Nfkd,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UnicodeNormalizeArgs {
    #[serde(default)]
    kind: NormalizationForm,
}

/// A char filter that performs Unicode normalization.
///
/// Text is normalized one extended grapheme cluster at a time, so every
/// changed cluster yields its own [`Transformation`] and offsets outside it
/// stay exact.
#[derive(Debug)]
pub struct UnicodeNormalizeCharFilter {
    form: NormalizationForm,
}

impl UnicodeNormalizeCharFilter {
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: UnicodeNormalizeArgs =
            deserialize_args(UNICODE_NORMALIZE_CHAR_FILTER_NAME, args)?;
        Ok(Self::new(args.kind))
    }

    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    fn normalize(&self, s: &str) -> String {
        match self.form {
            NormalizationForm::Nfc => s.nfc().collect(),
            NormalizationForm::Nfd => s.nfd().collect(),
            NormalizationForm::Nfkc => s.nfkc().collect(),
            NormalizationForm::Nfkd => s.nfkd().collect(),
        }
    }
}

impl CharFilter for UnicodeNormalizeCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        for (start, grapheme) in input.grapheme_indices(true) {
            let normalized = self.normalize(grapheme);
            if normalized == grapheme {
                output.push_str(grapheme);
                continue;
            }

            let new_start = output.len();
            output.push_str(&normalized);
            transformations.push(Transformation::new(
                start,
                start + grapheme.len(),
                new_start,
                output.len(),
            ));
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        UNICODE_NORMALIZE_CHAR_FILTER_NAME
    }
}
