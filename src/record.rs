//! Compound record data model.
//!
//! Mirrors the engine-side document mapping: a record carries a display
//! title, a nested list of synonyms (each independently matchable), an
//! opaque structure identifier, a formula string, a popularity rank signal
//! and a source tag.

use serde::{Deserialize, Serialize};

/// One nested synonym entry, as stored in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub synonym: String,
}

impl SynonymEntry {
    pub fn new(synonym: impl Into<String>) -> Self {
        Self {
            synonym: synonym.into(),
        }
    }
}

/// A chemical compound document as returned by the engine.
///
/// All fields are optional on the wire; a searchable record has at least one
/// of `title`/`synonyms` non-empty, but that invariant is enforced at
/// index-build time, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Nested synonym sub-documents. Cleared before a record is handed back
    /// to callers to keep the payload small.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<SynonymEntry>,

    /// SMILES-like structure code, opaque to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Popularity/rarity rank-feature signal used as a soft scoring boost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_hint: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
}

/// The single confident result of a search, when one exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedMatch {
    pub record: CompoundRecord,
    /// The literal excerpt (markers stripped) that satisfied the acceptance
    /// filter, for display alongside the record.
    pub matched: String,
    /// Engine relevance score of the accepted candidate, if reported.
    pub score: Option<f64>,
}
