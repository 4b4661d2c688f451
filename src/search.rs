//! Search entry point.
//!
//! Composes the query compiler, the client adapter and the acceptance
//! filter. The contract is "one confident match or none": candidates are
//! scanned in engine rank order and the first one with a complete-match
//! excerpt wins; if none passes, the result is `Ok(None)`, which is an
//! ordinary outcome, not an error.
//!
//! The async and blocking variants share the compile and selection logic;
//! they differ only in how the adapter call suspends.

use log::debug;

use crate::client::{BlockingSearchClient, SearchClient};
use crate::error::Result;
use crate::hit::{AcceptanceFilter, Hit};
use crate::lexicon::Lexicon;
use crate::query::{CompiledQuery, compile};
use crate::record::AcceptedMatch;

/// Queries shorter than this short-circuit to "no match" without touching
/// the network; they are too ambiguous to resolve confidently.
pub const MIN_QUERY_LEN: usize = 3;

/// Entry point tying compiler, adapter and filter together.
///
/// Stateless apart from the injected client and filter; safe to share
/// across concurrent queries.
pub struct Searcher<C> {
    client: C,
    filter: AcceptanceFilter,
}

impl<C> Searcher<C> {
    /// Build a searcher with the built-in lexicon and default thresholds.
    pub fn new(client: C) -> Self {
        Self::with_filter(client, AcceptanceFilter::new(Lexicon::builtin()))
    }

    pub fn with_filter(client: C, filter: AcceptanceFilter) -> Self {
        Self { client, filter }
    }

    fn prepare(query: &str, allow_fuzziness: bool) -> Option<CompiledQuery> {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            debug!("query {query:?} below minimum length, skipping engine call");
            return None;
        }
        Some(compile(query, allow_fuzziness))
    }

    /// First candidate with a complete-match excerpt wins, in engine rank
    /// order.
    fn select(&self, hits: Vec<Hit>) -> Option<AcceptedMatch> {
        for hit in hits {
            if let Some(matched) = self.filter.accept(&hit) {
                return Some(AcceptedMatch {
                    record: hit.record,
                    matched,
                    score: hit.score,
                });
            }
        }
        None
    }
}

impl<C: SearchClient> Searcher<C> {
    /// Find at most one confident match for an informal compound name.
    ///
    /// `Ok(None)` means no candidate survived the acceptance filter (or the
    /// query was too short); transport failures surface as errors, never as
    /// `None`.
    pub async fn find(&self, query: &str, allow_fuzziness: bool) -> Result<Option<AcceptedMatch>> {
        let Some(compiled) = Self::prepare(query, allow_fuzziness) else {
            return Ok(None);
        };
        let hits = self.client.execute(&compiled).await?;
        Ok(self.select(hits))
    }
}

impl<C: BlockingSearchClient> Searcher<C> {
    /// Blocking variant of [`find`](Searcher::find); identical logic.
    pub fn find_blocking(
        &self,
        query: &str,
        allow_fuzziness: bool,
    ) -> Result<Option<AcceptedMatch>> {
        let Some(compiled) = Self::prepare(query, allow_fuzziness) else {
            return Ok(None);
        };
        let hits = self.client.execute(&compiled)?;
        Ok(self.select(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CompoundRecord;

    struct CannedClient {
        hits: Vec<Hit>,
    }

    impl BlockingSearchClient for CannedClient {
        fn execute(&self, _query: &CompiledQuery) -> Result<Vec<Hit>> {
            Ok(self.hits.clone())
        }
    }

    fn hit(title: &str, highlight: &str, score: f64) -> Hit {
        Hit {
            record: CompoundRecord {
                title: Some(title.to_string()),
                ..Default::default()
            },
            highlights: vec![highlight.to_string()],
            score: Some(score),
        }
    }

    #[test]
    fn test_short_query_short_circuits() {
        struct PanicClient;
        impl BlockingSearchClient for PanicClient {
            fn execute(&self, _query: &CompiledQuery) -> Result<Vec<Hit>> {
                panic!("engine must not be called for short queries");
            }
        }
        let searcher = Searcher::new(PanicClient);
        assert!(searcher.find_blocking("co", true).unwrap().is_none());
        assert!(searcher.find_blocking("", true).unwrap().is_none());
    }

    #[test]
    fn test_first_passing_candidate_wins() {
        // Top-ranked candidate only partially matches; second is complete.
        let searcher = Searcher::new(CannedClient {
            hits: vec![
                hit(
                    "trichlorofluoromethane",
                    "<em>chloromethane</em> with extra impurity",
                    9.0,
                ),
                hit("chloromethane", "<em>chloromethane</em>", 5.0),
            ],
        });
        let found = searcher.find_blocking("chloromethane", true).unwrap().unwrap();
        assert_eq!(found.record.title.as_deref(), Some("chloromethane"));
        assert_eq!(found.matched, "chloromethane");
        assert_eq!(found.score, Some(5.0));
    }

    #[test]
    fn test_no_surviving_candidate_is_none() {
        let searcher = Searcher::new(CannedClient {
            hits: vec![hit(
                "trichlorofluoromethane",
                "<em>chloro</em>fluoromethane",
                3.0,
            )],
        });
        assert!(searcher.find_blocking("chloromethane", true).unwrap().is_none());
    }
}
