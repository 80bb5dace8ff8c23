//! Integration tests for the HTTP collaborator adapters using wiremock mocks.

use siteaudit_keywords::{
    CompaniesHouseClient, HttpRankClient, HttpSettings, HttpVolumeClient, ProviderError,
    RankProvider, RegistryProvider, SuggestClient, SuggestionProvider, VolumeProvider,
};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(max_retries: u32) -> HttpSettings {
    HttpSettings {
        timeout_secs: 5,
        user_agent: "siteaudit-test".to_string(),
        max_retries,
        backoff_base_ms: 0,
    }
}

#[tokio::test]
async fn volume_client_posts_keywords_and_parses_volumes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search-volume"))
        .and(header("authorization", "Bearer vol-key"))
        .and(body_json(serde_json::json!({
            "keywords": ["plumber leeds", "boiler repair"],
            "country": "GB"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "keyword": "plumber leeds", "volume": 880 },
            { "keyword": "boiler repair", "volume": null }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpVolumeClient::with_base_url(&server.uri(), Some("vol-key"), &settings(0))
        .expect("client construction should not fail");
    let keywords = vec!["plumber leeds".to_string(), "boiler repair".to_string()];
    let volumes = client
        .search_volumes(&keywords, "GB")
        .await
        .expect("should parse volumes");

    assert_eq!(volumes.len(), 2);
    assert_eq!(volumes[0].volume, Some(880));
    assert_eq!(volumes[1].volume, None);
}

#[tokio::test]
async fn volume_client_splits_large_requests_into_chunks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search-volume"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(3)
        .mount(&server)
        .await;

    let client = HttpVolumeClient::with_base_url(&server.uri(), None, &settings(0))
        .expect("client construction should not fail");
    let keywords: Vec<String> = (0..250).map(|i| format!("keyword {i}")).collect();
    client
        .search_volumes(&keywords, "GB")
        .await
        .expect("chunked lookup should succeed");
}

#[tokio::test]
async fn volume_client_retries_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search-volume"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/search-volume"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "keyword": "plumber", "volume": 12000 }
        ])))
        .mount(&server)
        .await;

    let client = HttpVolumeClient::with_base_url(&server.uri(), None, &settings(2))
        .expect("client construction should not fail");
    let volumes = client
        .search_volumes(&["plumber".to_string()], "GB")
        .await
        .expect("second attempt should succeed");
    assert_eq!(volumes[0].volume, Some(12000));
}

#[tokio::test]
async fn volume_client_surfaces_rate_limit_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search-volume"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let client = HttpVolumeClient::with_base_url(&server.uri(), None, &settings(0))
        .expect("client construction should not fail");
    let err = client
        .search_volumes(&["plumber".to_string()], "GB")
        .await
        .expect_err("429 should fail");
    assert!(matches!(
        err,
        ProviderError::RateLimited {
            retry_after_secs: Some(7)
        }
    ));
}

#[tokio::test]
async fn volume_client_reports_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search-volume"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpVolumeClient::with_base_url(&server.uri(), None, &settings(3))
        .expect("client construction should not fail");
    let err = client
        .search_volumes(&["plumber".to_string()], "GB")
        .await
        .expect_err("malformed body should fail");
    assert!(matches!(err, ProviderError::Deserialize { .. }));
}

#[tokio::test]
async fn rank_client_returns_position() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/serp-position"))
        .and(query_param("keyword", "emergency plumber leeds"))
        .and(query_param("domain", "leedsplumbing.co.uk"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "position": 2 })),
        )
        .mount(&server)
        .await;

    let client = HttpRankClient::with_base_url(&server.uri(), Some("rank-key"), &settings(0))
        .expect("client construction should not fail");
    let position = client
        .keyword_position("emergency plumber leeds", "leedsplumbing.co.uk")
        .await
        .expect("should parse position");
    assert_eq!(position, Some(2));
}

#[tokio::test]
async fn rank_client_treats_null_position_as_unranked() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/serp-position"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "position": null })),
        )
        .mount(&server)
        .await;

    let client = HttpRankClient::with_base_url(&server.uri(), None, &settings(0))
        .expect("client construction should not fail");
    let position = client
        .keyword_position("plumber", "example.com")
        .await
        .expect("null position is not an error");
    assert_eq!(position, None);
}

#[tokio::test]
async fn rank_client_rejects_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/serp-position"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpRankClient::with_base_url(&server.uri(), None, &settings(3))
        .expect("client construction should not fail");
    let err = client
        .keyword_position("plumber", "example.com")
        .await
        .expect_err("404 should fail");
    assert!(matches!(
        err,
        ProviderError::UnexpectedStatus { status: 404, .. }
    ));
}

#[tokio::test]
async fn suggest_client_parses_toolbar_xml() {
    let server = MockServer::start().await;

    let xml = r#"<?xml version="1.0"?><toplevel>
        <CompleteSuggestion><suggestion data="boiler repair leeds"/></CompleteSuggestion>
        <CompleteSuggestion><suggestion data="boiler repair cost"/></CompleteSuggestion>
    </toplevel>"#;

    Mock::given(method("GET"))
        .and(query_param("output", "toolbar"))
        .and(query_param("q", "boiler repair"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .mount(&server)
        .await;

    let client = SuggestClient::with_base_url(&server.uri(), &settings(0))
        .expect("client construction should not fail");
    let suggestions = client
        .suggest("boiler repair")
        .await
        .expect("should parse suggestions");
    assert_eq!(suggestions, vec!["boiler repair leeds", "boiler repair cost"]);
}

#[tokio::test]
async fn registry_client_maps_first_company() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/companies"))
        .and(query_param("q", "Henry Adams"))
        .and(query_param("items_per_page", "1"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{
                "title": "HENRY ADAMS LLP",
                "address": {
                    "locality": "Chichester",
                    "postal_code": "PO19 1AB",
                    "region": "West Sussex"
                },
                "address_snippet": "1 East Street, Chichester, PO19 1AB"
            }]
        })))
        .mount(&server)
        .await;

    let client = CompaniesHouseClient::with_base_url("ch-key", &server.uri(), &settings(0))
        .expect("client construction should not fail");
    let record = client
        .lookup_company("Henry Adams")
        .await
        .expect("should parse search")
        .expect("one company should match");
    assert_eq!(record.company_name, "HENRY ADAMS LLP");
    assert_eq!(record.locality.as_deref(), Some("Chichester"));
    assert_eq!(record.region.as_deref(), Some("West Sussex"));
}

#[tokio::test]
async fn registry_client_returns_none_without_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = CompaniesHouseClient::with_base_url("ch-key", &server.uri(), &settings(0))
        .expect("client construction should not fail");
    let record = client
        .lookup_company("Nobody Ltd")
        .await
        .expect("empty search is not an error");
    assert!(record.is_none());
}
