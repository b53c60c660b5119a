use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{CharFilter, Transformation};
use crate::error::{Result, ShikiriError};
use crate::util::deserialize_args;

pub const REGEX_CHAR_FILTER_NAME: &str = "regex";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegexArgs {
    pattern: String,
    #[serde(default)]
    replacement: String,
}

/// A char filter that replaces every match of a regex.
///
/// The replacement may refer to capture groups (`$1`, `${name}`).
#[derive(Debug)]
pub struct RegexCharFilter {
    pattern: Regex,
    replacement: String,
}

impl RegexCharFilter {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ShikiriError::config(format!("invalid regex '{pattern}' in char filter: {e}"))
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    pub fn from_args(args: &Value) -> Result<Self> {
        let args: RegexArgs = deserialize_args(REGEX_CHAR_FILTER_NAME, args)?;
        Self::new(&args.pattern, &args.replacement)
    }
}

impl CharFilter for RegexCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();
        let mut last_match_end = 0;
        let mut expanded = String::new();

        for caps in self.pattern.captures_iter(input) {
            let Some(m) = caps.get(0) else {
                continue;
            };

            expanded.clear();
            caps.expand(&self.replacement, &mut expanded);
            if m.as_str() == expanded {
                continue;
            }

            output.push_str(&input[last_match_end..m.start()]);

            let new_start = output.len();
            output.push_str(&expanded);
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
        REGEX_CHAR_FILTER_NAME
    }
}
