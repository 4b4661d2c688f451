//! Query compilation.
//!
//! Turns a raw, informal compound-name query into an immutable structured
//! engine request. Compilation is pure and deterministic: no I/O, no
//! clock, no randomness; the same input and fuzziness flag always produce
//! the same request body.
//!
//! The compiled shape (field names and weights follow the compound index):
//!
//! - a best-of-two `dis_max` over the nested synonym field and the title
//!   field, each requiring every alphabetic token to match (AND), with the
//!   title alternative boosted 1.1 since a direct title hit is more
//!   authoritative than a synonym hit;
//! - numeric runs as an optional 0.4 boost, so an embedded registry number
//!   disambiguates without ever blocking a match;
//! - a `rank_hint` rank-feature boost that can reorder near-ties only;
//! - a top-10 rescore pass rewarding phrase proximity (slop 3) on both
//!   fields, blended 1.2 : 0.8 with the first-stage score;
//! - a highlight directive (whole-field fragments, score order) that the
//!   acceptance filter consumes downstream.

use serde::Serialize;
use serde_json::{Value, json};

/// Result-list cap requested from the engine.
pub const RESULT_SIZE: usize = 3;

/// Boost for the title alternative of the best-of-two clause.
const TITLE_BOOST: f64 = 1.1;
/// Relative weight of the optional digits clause.
const DIGITS_BOOST: f64 = 0.4;
/// Boost of the `rank_hint` rank-feature clause.
const RANK_HINT_BOOST: f64 = 1.1;

/// Fuzziness tier thresholds over the total alphabetic character count.
const FUZZY_SHORT_LEN: usize = 6;
const FUZZY_LONG_LEN: usize = 14;

/// Rescore pass parameters.
const RESCORE_WINDOW: usize = 10;
const PHRASE_SLOP: u32 = 3;
const QUERY_WEIGHT: f64 = 1.2;
const RESCORE_WEIGHT: f64 = 0.8;

/// A raw query string decomposed into its alphabetic and numeric runs.
///
/// Immutable after [`parse`](QueryTokens::parse); all other characters are
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryTokens {
    /// Lowercased alphabetic runs, space-joined. May be empty.
    pub letters: String,
    /// Numeric runs, space-joined. May be empty.
    pub digits: String,
}

impl QueryTokens {
    /// Decompose a raw query string. Assumes pre-validated text; there is
    /// no failure mode.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        let letters = lower
            .split(|c: char| !c.is_alphabetic())
            .filter(|run| !run.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let digits = lower
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self { letters, digits }
    }

    /// Total alphabetic character count, the input to the fuzziness tiers.
    pub fn letter_len(&self) -> usize {
        self.letters.chars().filter(|c| c.is_alphabetic()).count()
    }
}

/// An immutable compiled engine request.
///
/// Holds the decomposed tokens and resolved fuzziness;
/// [`body`](CompiledQuery::body) renders the full wire JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub tokens: QueryTokens,
    /// Resolved edit-distance allowance, `None` when fuzziness is disabled
    /// or the query is too short for it.
    pub fuzziness: Option<u32>,
    /// Result-list cap.
    pub size: usize,
}

/// Compile a raw query string into an engine request.
///
/// Pure and deterministic. `allow_fuzziness` gates the three-tier
/// edit-distance policy; see [`fuzziness_for_len`].
pub fn compile(raw: &str, allow_fuzziness: bool) -> CompiledQuery {
    let tokens = QueryTokens::parse(raw);
    let fuzziness = if allow_fuzziness {
        fuzziness_for_len(tokens.letter_len())
    } else {
        None
    };
    CompiledQuery {
        tokens,
        fuzziness,
        size: RESULT_SIZE,
    }
}

/// Three-tier fuzziness policy over the total alphabetic length.
///
/// Short strings are too ambiguous for edit-distance matching, so below
/// [`FUZZY_SHORT_LEN`] no allowance is granted; up to [`FUZZY_LONG_LEN`]
/// the allowance is one edit, above it two.
pub fn fuzziness_for_len(len: usize) -> Option<u32> {
    if len < FUZZY_SHORT_LEN {
        None
    } else if len <= FUZZY_LONG_LEN {
        Some(1)
    } else {
        Some(2)
    }
}

impl CompiledQuery {
    /// Render the full engine request body.
    ///
    /// Deterministic for a given compiled query; the adapter posts this
    /// verbatim.
    pub fn body(&self) -> Value {
        json!({
            "size": self.size,
            "query": {
                "bool": {
                    "must": [ { "dis_max": {
                        "tie_breaker": 0,
                        "boost": 1,
                        "queries": [
                            self.synonym_alternative(),
                            self.title_alternative(),
                        ]
                    } } ],
                    "should": [ { "rank_feature": {
                        "field": "rank_hint",
                        "boost": RANK_HINT_BOOST
                    } } ]
                }
            },
            "rescore": self.rescore(),
            "highlight": {
                "number_of_fragments": 0,
                "type": "unified",
                "order": "score",
                "fields": {
                    "title": {},
                    "synonyms.synonym": {}
                }
            }
        })
    }

    /// Required AND match over all letter tokens, with optional fuzziness.
    fn words_clause(&self, field: &str) -> Value {
        let mut clause = json!({
            "query": self.tokens.letters,
            "operator": "and"
        });
        if let Some(edits) = self.fuzziness {
            clause["fuzziness"] = json!(edits);
        }
        json!({ "match": { field: clause } })
    }

    /// Optional digits boost; contributes when present, never required.
    fn digits_clause(&self, field: &str) -> Value {
        json!({ "match": { field: {
            "query": self.tokens.digits,
            "boost": DIGITS_BOOST
        } } })
    }

    fn synonym_alternative(&self) -> Value {
        json!({ "nested": {
            "path": "synonyms",
            "score_mode": "max",
            "query": { "bool": {
                "must": [ self.words_clause("synonyms.synonym") ],
                "should": [ self.digits_clause("synonyms.synonym") ]
            } }
        } })
    }

    fn title_alternative(&self) -> Value {
        json!({ "bool": {
            "must": [ self.words_clause("title") ],
            "should": [ self.digits_clause("title") ],
            "boost": TITLE_BOOST
        } })
    }

    /// Second-stage proximity rescore over the top first-stage results.
    /// Blended below 1:1 with the base score so it refines rather than
    /// replaces relevance.
    fn rescore(&self) -> Value {
        json!({
            "window_size": RESCORE_WINDOW,
            "query": {
                "rescore_query": { "dis_max": {
                    "tie_breaker": 0.7,
                    "boost": 1.2,
                    "queries": [
                        { "match_phrase": { "title": {
                            "query": self.tokens.letters,
                            "slop": PHRASE_SLOP
                        } } },
                        { "nested": {
                            "path": "synonyms",
                            "score_mode": "max",
                            "query": { "match_phrase": { "synonyms.synonym": {
                                "query": self.tokens.letters,
                                "slop": PHRASE_SLOP
                            } } }
                        } }
                    ]
                } },
                "query_weight": QUERY_WEIGHT,
                "rescore_query_weight": RESCORE_WEIGHT
            }
        })
    }
}
