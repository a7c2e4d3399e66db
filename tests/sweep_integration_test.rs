use card_sweep::app;
use card_sweep::domain::model::FetchFailure;
use card_sweep::utils::monitor::RunMonitor;
use card_sweep::{ScryfallClient, SweepEngine, TomlConfig};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

const QUERY_AAA: &str = "s:aaa eur>=0.01 unique:prints";

fn card(id: &str, set: &str, eur: Option<&str>) -> serde_json::Value {
    json!({
        "object": "card",
        "id": id,
        "set": set,
        "name": format!("Card {}", id),
        "image_uris": {
            "small": format!("https://img.example/{}/small.jpg", id),
            "normal": format!("https://img.example/{}/normal.jpg", id),
            "large": format!("https://img.example/{}/large.jpg", id)
        },
        "prices": {"eur": eur, "usd": "1.00"}
    })
}

fn engine_for(server: &MockServer) -> SweepEngine<ScryfallClient> {
    let client = Arc::new(ScryfallClient::new(server.base_url(), "card-sweep-tests"));
    SweepEngine::new(client, server.base_url())
}

fn prices(engine: &SweepEngine<ScryfallClient>) -> Vec<String> {
    engine
        .state()
        .cards()
        .iter()
        .map(|c| c.price().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_single_chain_follows_continuation_links() {
    let server = MockServer::start_async().await;

    let page1 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cards/search")
                .query_param("q", QUERY_AAA);
            then.status(200).json_body(json!({
                "object": "list",
                "has_more": true,
                "next_page": server.url("/page/aaa/2"),
                "data": [card("a1", "aaa", Some("1.00")), card("a2", "aaa", Some("5.00"))]
            }));
        })
        .await;
    let page2 = server
        .mock_async(|when, then| {
            when.method(GET).path("/page/aaa/2");
            then.status(200).json_body(json!({
                "object": "list",
                "has_more": false,
                "data": [card("a3", "aaa", None)]
            }));
        })
        .await;

    let mut engine = engine_for(&server);
    engine.initiate(["aaa"]);
    let state = engine.settle().await;

    assert!(state.pending_requests().is_empty());
    assert!(state.failures().is_empty());
    page1.assert_async().await;
    page2.assert_async().await;
    assert_eq!(prices(&engine), vec!["5.00", "1.00"]);
}

#[tokio::test]
async fn test_concurrent_chains_merge_sorted() {
    let server = MockServer::start_async().await;

    for (set, price) in [("xxx", "2.00"), ("yyy", "3.00")] {
        let query = format!("s:{} eur>=0.01 unique:prints", set);
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/cards/search")
                    .query_param("q", query.as_str());
                then.status(200).json_body(json!({
                    "has_more": false,
                    "data": [card(set, set, Some(price))]
                }));
            })
            .await;
    }

    let mut engine = engine_for(&server);
    engine.initiate(["xxx", "yyy"]);
    engine.settle().await;

    assert_eq!(prices(&engine), vec!["3.00", "2.00"]);
}

#[tokio::test]
async fn test_failed_source_is_reported_with_partial_results() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cards/search")
                .query_param("q", QUERY_AAA);
            then.status(200).json_body(json!({
                "has_more": true,
                "next_page": server.url("/page/aaa/2"),
                "data": [card("a1", "aaa", Some("4.00"))]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/page/aaa/2");
            then.status(500).body("internal error");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cards/search")
                .query_param("q", "s:bbb eur>=0.01 unique:prints");
            then.status(200).json_body(json!({
                "has_more": false,
                "data": [card("b1", "bbb", Some("0"))]
            }));
        })
        .await;

    let mut engine = engine_for(&server);
    engine.initiate(["aaa", "bbb"]);
    let state = engine.settle().await;

    assert!(!state.is_loading());
    assert_eq!(state.failures().len(), 1);
    let failure = &state.failures()["aaa"];
    assert_eq!(failure.url, server.url("/page/aaa/2"));
    assert!(matches!(
        failure.reason,
        FetchFailure::UpstreamError { status: 500, .. }
    ));
    assert_eq!(prices(&engine), vec!["4.00", "0"]);
}

#[tokio::test]
async fn test_unreachable_catalog_is_network_failure() {
    // Nothing listens on the discard port.
    let client = Arc::new(ScryfallClient::new("http://127.0.0.1:9", "card-sweep-tests"));
    let mut engine = SweepEngine::new(client, "http://127.0.0.1:9");

    engine.initiate(["aaa"]);
    let state = engine.settle().await;

    assert!(!state.is_loading());
    assert!(matches!(
        state.failures()["aaa"].reason,
        FetchFailure::NetworkError(_)
    ));
}

#[tokio::test]
async fn test_app_run_sweep_and_export() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cards/search")
                .query_param("q", QUERY_AAA);
            then.status(200).json_body(json!({
                "has_more": false,
                "data": [card("a1", "aaa", Some("1.50")), card("a2", "aaa", Some("12.00"))]
            }));
        })
        .await;

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[catalog]
base_url = "{}"

[selection]
sets = ["AAA"]
"#,
        server.base_url()
    ))
    .unwrap();

    let state = app::run_sweep(&config, &RunMonitor::default()).await.unwrap();
    assert_eq!(state.cards().len(), 2);
    assert_eq!(state.cards()[0].id, "a2");

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("out").join("cards.csv");
    app::export_cards(
        &state,
        path.to_str().unwrap(),
        card_sweep::adapters::export::ExportFormat::Csv,
    )
    .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("a2,aaa,Card a2,,12.00,"));
}

#[tokio::test]
async fn test_load_sets_filters_catalog() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/sets");
            then.status(200).json_body(json!({
                "data": [
                    {"code": "aaa", "name": "Alpha", "digital": false, "set_type": "expansion"},
                    {"code": "taaa", "name": "Alpha Tokens", "digital": false, "set_type": "token"},
                    {"code": "yaaa", "name": "Alchemy: Alpha", "digital": true, "set_type": "alchemy"},
                    {"code": "dig", "name": "Digital Only", "digital": true, "set_type": "expansion"}
                ]
            }));
        })
        .await;

    let config = TomlConfig::from_toml_str(&format!(
        "[catalog]\nbase_url = \"{}\"\n",
        server.base_url()
    ))
    .unwrap();

    let catalog = app::load_sets(&config).await.unwrap();
    let codes: Vec<&str> = catalog.sets().iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["aaa"]);
}
