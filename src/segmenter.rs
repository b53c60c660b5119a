//! Minimum-cost segmentation of filtered text.
//!
//! The segmenter builds a [`Lattice`] whose edges are dictionary candidates
//! and finds the cheapest path from the start to the end of the text. Any
//! reachable position without a dictionary candidate gets the dictionary's
//! unknown-word fallback, so a path always exists and the resulting
//! morphemes cover the text exactly once.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use shikiri::dictionary::SystemDictionary;
//! use shikiri::mode::Mode;
//! use shikiri::segmenter::Segmenter;
//!
//! let dictionary = Arc::new(SystemDictionary::load("dict/ipadic").unwrap());
//! let segmenter = Segmenter::new(Mode::Normal, dictionary);
//!
//! for morpheme in segmenter.segment("関西国際空港") {
//!     println!("{}..{} {:?}", morpheme.start, morpheme.end, morpheme.candidate.details);
//! }
//! ```

pub mod lattice;

use std::fmt;
use std::sync::Arc;

use log::{trace, warn};

use crate::dictionary::{Candidate, Dictionary};
use crate::mode::Mode;

pub use crate::segmenter::lattice::Lattice;

/// A segment of the filtered text with the candidate chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    /// Byte offset into the filtered text.
    pub start: usize,
    /// Byte offset into the filtered text.
    pub end: usize,
    pub candidate: Candidate,
}

/// Viterbi segmenter over a shared, read-only dictionary.
#[derive(Clone)]
pub struct Segmenter {
    mode: Mode,
    dictionary: Arc<dyn Dictionary>,
}

impl Segmenter {
    pub fn new(mode: Mode, dictionary: Arc<dyn Dictionary>) -> Self {
        Self { mode, dictionary }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn dictionary(&self) -> &Arc<dyn Dictionary> {
        &self.dictionary
    }

    /// Segment `text` into morphemes covering `[0, text.len())` with no gaps
    /// or overlaps.
    pub fn segment(&self, text: &str) -> Vec<Morpheme> {
        if text.is_empty() {
            return Vec::new();
        }

        let dictionary = self.dictionary.as_ref();
        let mut lattice = Lattice::new(text.len());

        for (position, c) in text.char_indices() {
            if !lattice.is_reachable(position) {
                continue;
            }

            let mut candidates = dictionary.lookup(text, position);
            candidates.retain(|candidate| {
                candidate.length > 0 && text.is_char_boundary(position + candidate.length)
            });

            if candidates.is_empty() {
                let mut unknown = dictionary.unknown_fallback(text, position);
                if unknown.length == 0 || !text.is_char_boundary(position + unknown.length) {
                    unknown.length = c.len_utf8();
                }
                candidates.push(unknown);
            }

            for candidate in candidates {
                lattice.insert(position, candidate, dictionary);
            }
        }

        let path = lattice.best_path(dictionary);
        trace!("segmented {} bytes into {} morphemes", text.len(), path.len());

        let mut morphemes = Vec::with_capacity(path.len());
        for idx in path {
            let node = lattice.node(idx);
            let morpheme = Morpheme {
                start: node.start,
                end: node.end(),
                candidate: node.candidate.clone(),
            };

            if self.mode == Mode::Decompose && dictionary.is_compound(&morpheme.candidate) {
                self.push_decomposed(morpheme, &mut morphemes);
            } else {
                morphemes.push(morpheme);
            }
        }

        morphemes
    }

    /// Replace a compound by its parts, one level deep. Parts that do not
    /// tile the compound's span leave it intact.
    fn push_decomposed(&self, morpheme: Morpheme, out: &mut Vec<Morpheme>) {
        let parts = self.dictionary.decompose(&morpheme.candidate);
        let covered: usize = parts.iter().map(|part| part.length).sum();

        if parts.is_empty()
            || covered != morpheme.end - morpheme.start
            || parts.iter().any(|part| part.length == 0)
        {
            warn!(
                "decomposition of {:?} does not cover {}..{}, keeping the compound",
                morpheme.candidate.word_id, morpheme.start, morpheme.end
            );
            out.push(morpheme);
            return;
        }

        let mut start = morpheme.start;
        for part in parts {
            let end = start + part.length;
            out.push(Morpheme {
                start,
                end,
                candidate: part,
            });
            start = end;
        }
    }
}

impl fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segmenter")
            .field("mode", &self.mode)
            .field("dictionary", &self.dictionary.metadata().name)
            .finish()
    }
}
