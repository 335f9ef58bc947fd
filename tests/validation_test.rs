//! Validation integration tests
//!
//! All of these must fail (or pass) without a single network call; the mock
//! server exists only to prove that nothing was contacted.

use gtrends::error::TrendsError;
use gtrends::models::{GoogleProduct, TimeRange};
use gtrends::query::TrendsQuery;
use wiremock::MockServer;

#[test]
fn incompatible_keyword_geo_lengths_are_rejected() {
    // 2 keywords x 3 geos: neither length divides the other.
    let err = TrendsQuery::new(&["a", "b"], &["US", "FR", "DE"], "all").unwrap_err();
    assert!(matches!(err, TrendsError::InvalidArgument(_)));

    // 3 x 2 fails the same way.
    assert!(TrendsQuery::new(&["a", "b", "c"], &["US", "FR"], "all").is_err());

    // 4 x 2 broadcasts fine.
    assert!(TrendsQuery::new(&["a", "b", "c", "d"], &["US", "FR"], "all").is_ok());
}

#[test]
fn geo_codes_are_checked_against_the_reference_table() {
    assert!(TrendsQuery::new(&["rust"], &["US"], "all").is_ok());
    assert!(TrendsQuery::new(&["rust"], &["US-CA"], "all").is_ok());

    let err = TrendsQuery::new(&["rust"], &["ZZ"], "all").unwrap_err();
    assert!(matches!(err, TrendsError::InvalidGeo(code) if code == "ZZ"));
}

#[test]
fn time_grammar_accepts_documented_shapes_only() {
    for good in [
        "now 1-H",
        "now 4-H",
        "now 1-d",
        "now 7-d",
        "today 1-m",
        "today 3-m",
        "today 12-m",
        "today+5-y",
        "all",
        "2010-01-01 2010-04-03",
    ] {
        assert!(
            TrendsQuery::new(&["rust"], &["US"], good).is_ok(),
            "{good:?} should be accepted"
        );
    }

    for bad in ["bogus", "now", "today", "2010-01-01", "now 1-h", "ALL"] {
        let err = TrendsQuery::new(&["rust"], &["US"], bad).unwrap_err();
        assert!(
            matches!(err, TrendsError::InvalidTimeFormat(_)),
            "{bad:?} should be InvalidTimeFormat"
        );
    }
}

#[test]
fn explicit_range_is_distinct_from_relative_years() {
    let explicit = TimeRange::parse("2010-01-01 2010-04-03").unwrap();
    let relative = TimeRange::parse("today+5-y").unwrap();
    assert!(matches!(explicit, TimeRange::Custom(_, _)));
    assert!(matches!(relative, TimeRange::PastYears(5)));
}

#[test]
fn unknown_product_scope_is_rejected() {
    assert!(GoogleProduct::parse("maps").is_err());
    assert_eq!(GoogleProduct::parse("shopping").unwrap(), GoogleProduct::Froogle);
}

/// An invalid category must be caught with zero HTTP traffic.
#[tokio::test]
async fn invalid_category_fails_before_any_network_call() {
    let mock_server = MockServer::start().await;

    let result = TrendsQuery::new(&["rust"], &["US"], "all")
        .and_then(|q| q.with_category(99999));
    assert!(matches!(result.unwrap_err(), TrendsError::InvalidCategory(99999)));

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "validation must not touch the network");
}

/// Same guarantee for geo and time failures.
#[tokio::test]
async fn validation_failures_never_reach_the_network() {
    let mock_server = MockServer::start().await;

    assert!(TrendsQuery::new(&["rust"], &["ZZ"], "all").is_err());
    assert!(TrendsQuery::new(&["rust"], &["US"], "bogus").is_err());
    assert!(TrendsQuery::new(&["rust"], &["US"], "all")
        .unwrap()
        .with_locale("xx-YY")
        .is_err());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}
