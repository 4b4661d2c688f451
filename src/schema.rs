//! Declarative index settings for the compound index.
//!
//! This is the setup-time export consumed when (re)building the engine
//! index: a custom analyzer wired to the [`BoundaryRule`] pattern
//! tokenizer, a length-normalized tf-idf similarity, and the field mapping
//! (nested synonyms, keyword identifier/formula, `rank_hint` rank feature).
//! No index I/O happens here; the ETL pipeline that applies these settings
//! is an external collaborator.

use serde_json::{Value, json};

use crate::analysis::BoundaryRule;

/// Analyzer name referenced by the mapping; kept stable so mappings and
/// settings can be applied independently.
pub const ANALYZER_NAME: &str = "chem_analyzer";

/// Analysis settings: sign char-filter, boundary-rule pattern tokenizer,
/// lowercase/trim filters.
pub fn analysis_settings(rule: &BoundaryRule) -> Value {
    json!({
        "char_filter": {
            "sign_filter": {
                "type": "pattern_replace",
                "pattern": r"\W+",
                "replacement": " "
            }
        },
        "tokenizer": {
            "chem_tokenizer": {
                "type": "pattern",
                "pattern": rule.tokenizer_pattern(),
                "flags": "CASE_INSENSITIVE"
            }
        },
        "analyzer": {
            ANALYZER_NAME: {
                "type": "custom",
                "tokenizer": "chem_tokenizer",
                "char_filter": ["sign_filter"],
                "filter": ["lowercase", "trim"]
            }
        }
    })
}

/// Scripted similarity: idf with add-one smoothing, inverse-sqrt length
/// norm. Chemical synonym lists are short, so default BM25 length
/// saturation buries exact synonym hits.
fn similarity_settings() -> Value {
    json!({
        "modified_tfidf": {
            "type": "scripted",
            "weight_script": {
                "source": "double idf = Math.log((field.docCount+1.0)/(term.docFreq+1.0)) + 1.0;\
                           return query.boost * idf;"
            },
            "script": {
                "source": "double norm = 1 / Math.sqrt(doc.length);\
                           return weight * norm;"
            }
        }
    })
}

/// Field mapping for [`CompoundRecord`](crate::record::CompoundRecord)
/// documents.
pub fn mapping() -> Value {
    json!({
        "properties": {
            "title": {
                "type": "text",
                "analyzer": ANALYZER_NAME,
                "similarity": "modified_tfidf"
            },
            "synonyms": {
                "type": "nested",
                "dynamic": "false",
                "properties": {
                    "synonym": {
                        "type": "text",
                        "analyzer": ANALYZER_NAME,
                        "similarity": "modified_tfidf"
                    }
                }
            },
            "identifier": { "type": "keyword" },
            "formula": { "type": "keyword" },
            "rank_hint": {
                "type": "rank_feature",
                "positive_score_impact": "false"
            },
            "data_source": { "type": "keyword" }
        }
    })
}

/// Complete index-creation body: analysis + similarity settings and the
/// field mapping.
pub fn index_settings(rule: &BoundaryRule) -> Value {
    json!({
        "settings": {
            "analysis": analysis_settings(rule),
            "similarity": similarity_settings()
        },
        "mappings": mapping()
    })
}
