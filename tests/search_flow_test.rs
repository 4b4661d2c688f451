use std::time::Duration;

use async_trait::async_trait;

use molseek::hit::RawHit;
use molseek::query::CompiledQuery;
use molseek::{Hit, MolseekError, Result, SearchClient, Searcher};

/// Client that replays a canned engine response body.
struct ScriptedClient {
    response: serde_json::Value,
}

#[async_trait]
impl SearchClient for ScriptedClient {
    async fn execute(&self, _query: &CompiledQuery) -> Result<Vec<Hit>> {
        let raw: Vec<RawHit> = serde_json::from_value(self.response["hits"]["hits"].clone())
            .map_err(|err| MolseekError::response(err.to_string()))?;
        Ok(raw.into_iter().map(Hit::from_raw).collect())
    }
}

struct TimedOutClient;

#[async_trait]
impl SearchClient for TimedOutClient {
    async fn execute(&self, _query: &CompiledQuery) -> Result<Vec<Hit>> {
        Err(MolseekError::unavailable(Duration::from_secs(5)))
    }
}

fn engine_response() -> serde_json::Value {
    serde_json::json!({
        "hits": { "hits": [
            {
                // Rank 1: near-miss, the query name is a substring of a
                // longer, different compound's synonym.
                "_score": 11.2,
                "_source": {
                    "title": "trichlorofluoromethane",
                    "synonyms": [ { "synonym": "chlorodifluoromethane precursor mixture" } ],
                    "identifier": "C(F)(Cl)(Cl)Cl",
                    "formula": "CCl3F",
                    "rank_hint": 812.0,
                    "data_source": "vendor_a"
                },
                "highlight": {
                    "synonyms.synonym": [ "<em>chlorodifluoromethane</em> precursor mixture" ]
                }
            },
            {
                // Rank 2: the actual compound.
                "_score": 9.8,
                "_source": {
                    "title": "chlorodifluoromethane",
                    "synonyms": [ { "synonym": "R-22" }, { "synonym": "HCFC-22" } ],
                    "identifier": "C(F)(F)Cl",
                    "formula": "CHClF2",
                    "rank_hint": 63.0,
                    "data_source": "vendor_b"
                },
                "highlight": {
                    "title": [ "<em>chlorodifluoromethane</em>" ]
                }
            }
        ] }
    })
}

#[tokio::test]
async fn test_second_candidate_wins_when_first_fails_acceptance() {
    let searcher = Searcher::new(ScriptedClient {
        response: engine_response(),
    });

    let found = searcher
        .find("chlorodifluoromethane", true)
        .await
        .unwrap()
        .expect("should resolve to a confident match");

    assert_eq!(found.record.title.as_deref(), Some("chlorodifluoromethane"));
    assert_eq!(found.record.formula.as_deref(), Some("CHClF2"));
    assert_eq!(found.matched, "chlorodifluoromethane");
    assert_eq!(found.score, Some(9.8));
    // Synonyms are stripped from the returned record.
    assert!(found.record.synonyms.is_empty());
}

#[tokio::test]
async fn test_no_candidate_survives_filter() {
    // Only the near-miss candidate is returned.
    let mut response = engine_response();
    response["hits"]["hits"].as_array_mut().unwrap().truncate(1);

    let searcher = Searcher::new(ScriptedClient { response });
    let found = searcher.find("chlorodifluoromethane", true).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_candidate_without_highlight_rejected_not_error() {
    let response = serde_json::json!({
        "hits": { "hits": [ {
            "_score": 4.0,
            "_source": { "title": "chloromethane" }
        } ] }
    });
    let searcher = Searcher::new(ScriptedClient { response });
    let found = searcher.find("chloromethane", true).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_timeout_is_distinguishable_from_no_match() {
    let searcher = Searcher::new(TimedOutClient);
    let err = searcher
        .find("chlorodifluoromethane", true)
        .await
        .expect_err("timeout must not be conflated with no-match");

    match err {
        MolseekError::Unavailable { timeout } => {
            assert_eq!(timeout, Duration::from_secs(5));
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_short_query_never_reaches_engine() {
    struct PanicClient;

    #[async_trait]
    impl SearchClient for PanicClient {
        async fn execute(&self, _query: &CompiledQuery) -> Result<Vec<Hit>> {
            panic!("engine must not be called for short queries");
        }
    }

    let searcher = Searcher::new(PanicClient);
    assert!(searcher.find("co", true).await.unwrap().is_none());
    assert!(searcher.find("  ", true).await.unwrap().is_none());
}
