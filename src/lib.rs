//! # Molseek
//!
//! Chemical-name query compilation and match filtering over a full-text
//! search engine.
//!
//! Chemical names share long common substrings (prefixes, suffixes,
//! substituent tokens), so naive relevance scoring over them produces
//! false positives. Molseek resolves an informal or partial compound name
//! to at most one high-confidence record:
//!
//! - [`analysis::BoundaryRule`] segments names at chemically meaningful
//!   points for the engine's index-time tokenizer
//! - [`query::compile`] turns a raw search string into a weighted
//!   multi-field request with a length-dependent fuzziness policy
//! - [`hit::AcceptanceFilter`] inspects highlighted excerpts and accepts a
//!   candidate only when it is an essentially complete match
//! - [`search::Searcher`] composes the three around a pluggable engine
//!   client, with identical async and blocking entry points

pub mod analysis;
pub mod client;
mod error;
pub mod hit;
pub mod lexicon;
pub mod query;
pub mod record;
pub mod schema;
pub mod search;

// Re-exports for the public API
pub use analysis::BoundaryRule;
pub use client::{BlockingHttpSearchClient, BlockingSearchClient, HttpSearchClient, SearchClient};
pub use error::{MolseekError, Result};
pub use hit::{AcceptanceFilter, Hit};
pub use lexicon::Lexicon;
pub use query::{CompiledQuery, QueryTokens, compile};
pub use record::{AcceptedMatch, CompoundRecord, SynonymEntry};
pub use search::Searcher;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
