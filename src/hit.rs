//! Candidate hits and the match acceptance filter.
//!
//! Engine relevance alone cannot tell "this name is a substring of a much
//! longer, different compound's name" from "this is the compound": scoring
//! rewards partial term overlap, and chemical names share long prefixes,
//! suffixes and substituent tokens. The [`AcceptanceFilter`] instead works
//! from the engine's highlighted excerpts and accepts a candidate only when
//! the excerpt is an essentially complete match of the query.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::lexicon::Lexicon;
use crate::record::CompoundRecord;

/// Inline markers the engine wraps matched spans in.
pub const PRE_TAG: &str = "<em>";
pub const POST_TAG: &str = "</em>";

/// Highlight excerpts kept per field when parsing a raw hit.
const EXCERPTS_PER_FIELD: usize = 3;

lazy_static! {
    /// A whole marked span, markers included.
    static ref SPAN_RE: Regex = Regex::new("<em>.+?</em>").unwrap();
    /// A single marker tag.
    static ref TAG_RE: Regex = Regex::new("</?em>").unwrap();
    /// An alphabetic word run.
    static ref WORD_RE: Regex = Regex::new("[A-Za-z]+").unwrap();
}

/// One raw candidate as returned by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_source")]
    pub source: CompoundRecord,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// Per-field highlighted excerpts; absent when the engine produced no
    /// highlight data for this hit.
    #[serde(default)]
    pub highlight: HashMap<String, Vec<String>>,
}

/// One candidate result, scoped to a single accept/reject decision.
#[derive(Debug, Clone)]
pub struct Hit {
    pub record: CompoundRecord,
    /// Highlighted excerpts in evaluation order, capped per field.
    pub highlights: Vec<String>,
    pub score: Option<f64>,
}

impl Hit {
    /// Flatten a raw engine hit.
    ///
    /// Synonyms are cleared from the record copy to keep the payload small;
    /// the title-field excerpts are evaluated before the synonym-field ones
    /// since a title match is the more authoritative signal. Within a
    /// field, engine-reported (score) order is preserved.
    pub fn from_raw(mut raw: RawHit) -> Self {
        raw.source.synonyms.clear();

        let mut highlights = Vec::new();
        for field in ["title", "synonyms.synonym"] {
            if let Some(excerpts) = raw.highlight.get(field) {
                highlights.extend(excerpts.iter().take(EXCERPTS_PER_FIELD).cloned());
            }
        }

        Self {
            record: raw.source,
            highlights,
            score: raw.score,
        }
    }
}

/// Decides whether a candidate is a complete match of the queried name.
///
/// Per excerpt, in order: strip the markers, measure the unmatched residue,
/// and reject when the residue has more than `word_threshold` word runs,
/// covers more than `char_ratio_threshold` of the excerpt's alphanumeric
/// characters, or contains a word from the domain lexicon (an unmatched
/// substituent changes the compound's identity even when short). The first
/// excerpt that passes wins and terminates the scan; no best-of-N scoring
/// happens here.
#[derive(Debug, Clone)]
pub struct AcceptanceFilter {
    lexicon: Lexicon,
    word_threshold: usize,
    char_ratio_threshold: f64,
}

impl AcceptanceFilter {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            word_threshold: 2,
            char_ratio_threshold: 0.3,
        }
    }

    /// Override the rejection thresholds. The three-check shape is fixed.
    pub fn with_thresholds(mut self, word_threshold: usize, char_ratio_threshold: f64) -> Self {
        self.word_threshold = word_threshold;
        self.char_ratio_threshold = char_ratio_threshold;
        self
    }

    /// Evaluate a candidate's excerpts in order; on the first complete
    /// match, return the marker-stripped excerpt for display. A hit with no
    /// highlight data is rejected outright.
    pub fn accept(&self, hit: &Hit) -> Option<String> {
        hit.highlights
            .iter()
            .find_map(|excerpt| self.complete_match(excerpt))
    }

    fn complete_match(&self, excerpt: &str) -> Option<String> {
        let literal = TAG_RE.replace_all(excerpt, "").into_owned();
        let total_chars = literal.chars().filter(|c| c.is_alphanumeric()).count();
        if total_chars == 0 {
            return None;
        }

        let residue = SPAN_RE.replace_all(excerpt, " ");
        let mut unmatched_words = 0usize;
        let mut unmatched_chars = 0usize;
        for word in WORD_RE.find_iter(&residue) {
            unmatched_words += 1;
            unmatched_chars += word.as_str().len();
            if unmatched_words > self.word_threshold {
                return None;
            }
            if self.lexicon.contains(word.as_str()) {
                return None;
            }
        }

        let ratio = unmatched_chars as f64 / total_chars as f64;
        if ratio > self.char_ratio_threshold {
            return None;
        }

        Some(literal)
    }
}
