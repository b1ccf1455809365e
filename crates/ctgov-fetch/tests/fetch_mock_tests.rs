//! Mock-based pagination tests using wiremock.
//!
//! These tests verify the fetch loop's ordering, termination, and
//! best-effort error policy against a mocked registry.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ctgov_fetch::{Config, CtGovClient, SearchParams, StopReason};

/// Create a client pointed at a mock server.
fn setup_client(mock_server: &MockServer) -> CtGovClient {
    let config = Config::for_testing(&mock_server.uri());
    CtGovClient::new(config).unwrap()
}

/// Sample study JSON for mocking.
fn sample_study_json(nct_id: &str) -> serde_json::Value {
    json!({
        "protocolSection": {
            "identificationModule": {"nctId": nct_id},
            "statusModule": {"overallStatus": "RECRUITING"},
            "designModule": {"studyType": "INTERVENTIONAL", "phases": ["PHASE2"]}
        }
    })
}

/// Sample page JSON with an optional continuation token.
fn sample_page(studies: Vec<serde_json::Value>, token: Option<&str>) -> serde_json::Value {
    match token {
        Some(t) => json!({"studies": studies, "nextPageToken": t}),
        None => json!({"studies": studies}),
    }
}

fn nct_ids(outcome: &ctgov_fetch::FetchOutcome) -> Vec<&str> {
    outcome.studies.iter().filter_map(|s| s.nct_id()).collect()
}

// =============================================================================
// Ordering and termination
// =============================================================================

#[tokio::test]
async fn test_two_pages_preserve_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param("query.titles", "Diabetes"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![sample_study_json("NCT00000001"), sample_study_json("NCT00000002")],
            Some("page-2"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_page(vec![sample_study_json("NCT00000003")], None)),
        )
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let outcome = client.fetch_all(&SearchParams::new("Diabetes", 100, 10)).await;

    assert_eq!(nct_ids(&outcome), vec!["NCT00000001", "NCT00000002", "NCT00000003"]);
    assert_eq!(outcome.pages, 2);
    assert!(outcome.is_complete());
    assert_eq!(outcome.error_status(), None);
}

#[tokio::test]
async fn test_halts_on_first_page_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_page(vec![sample_study_json("NCT00000001")], None)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let outcome = client.fetch_all(&SearchParams::new("Diabetes", 100, 10)).await;

    assert_eq!(outcome.pages, 1);
    assert!(outcome.is_complete());
}

#[tokio::test]
async fn test_page_size_forwarded_to_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param("pageSize", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(vec![], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    client.fetch_all(&SearchParams::new("Diabetes", 250, 10)).await;
}

// =============================================================================
// Best-effort error policy
// =============================================================================

#[tokio::test]
async fn test_error_on_second_page_keeps_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![sample_study_json("NCT00000001"), sample_study_json("NCT00000002")],
            Some("page-2"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let outcome = client.fetch_all(&SearchParams::new("Diabetes", 100, 10)).await;

    // Page 1 survives; page 2's failure is reported, not thrown.
    assert_eq!(nct_ids(&outcome), vec!["NCT00000001", "NCT00000002"]);
    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.error_status(), Some(500));
    assert!(!outcome.is_complete());
    assert!(matches!(outcome.stop, StopReason::Failed(_)));
}

#[tokio::test]
async fn test_error_on_first_page_yields_empty_partial() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let outcome = client.fetch_all(&SearchParams::new("Diabetes", 100, 10)).await;

    assert!(outcome.is_empty());
    assert_eq!(outcome.pages, 0);
    assert_eq!(outcome.error_status(), Some(403));
}

#[tokio::test]
async fn test_malformed_body_stops_without_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let outcome = client.fetch_all(&SearchParams::new("Diabetes", 100, 10)).await;

    assert!(outcome.is_empty());
    assert!(matches!(outcome.stop, StopReason::Failed(_)));
    assert_eq!(outcome.error_status(), None);
}

// =============================================================================
// Empty results and page bounds
// =============================================================================

#[tokio::test]
async fn test_empty_first_page_is_no_data_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(vec![], None)))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let outcome = client.fetch_all(&SearchParams::new("NoSuchTitle", 100, 10)).await;

    assert!(outcome.is_empty());
    assert!(outcome.is_complete());
    assert_eq!(outcome.error_status(), None);
}

#[tokio::test]
async fn test_max_pages_bounds_an_always_token_server() {
    let mock_server = MockServer::start().await;

    // First page issues a token, and every continuation issues it again:
    // without the bound this server would paginate forever.
    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![sample_study_json("NCT00000001")],
            Some("again"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param("pageToken", "again"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![sample_study_json("NCT00000002")],
            Some("again"),
        )))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let outcome = client.fetch_all(&SearchParams::new("Diabetes", 100, 3)).await;

    assert_eq!(outcome.pages, 3);
    assert_eq!(outcome.studies.len(), 3);
    assert!(matches!(outcome.stop, StopReason::PageLimit));
    assert!(!outcome.is_complete());
}

// =============================================================================
// Lazy page stream
// =============================================================================

#[tokio::test]
async fn test_page_stream_yields_pages_in_order() {
    use futures::{StreamExt, pin_mut};

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![sample_study_json("NCT00000001")],
            Some("page-2"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_page(vec![sample_study_json("NCT00000002")], None)),
        )
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let stream = client.page_stream(SearchParams::new("Diabetes", 100, 10));
    pin_mut!(stream);

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.studies[0].nct_id(), Some("NCT00000001"));
    assert!(first.has_more());

    let second = stream.next().await.unwrap().unwrap();
    assert_eq!(second.studies[0].nct_id(), Some("NCT00000002"));
    assert!(!second.has_more());

    assert!(stream.next().await.is_none());
}
