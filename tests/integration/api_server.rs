//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, analysis, watchlist and currency.

#[path = "api_server/test_utils.rs"]
mod test_utils;

use serde_json::{json, Value};

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "tradesight-signal-engine");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_requests_in_flight"));
}

#[tokio::test]
async fn analysis_endpoint_returns_full_analysis() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/assets/stock/aapl/analysis").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["asset"]["symbol"], "AAPL");
    assert_eq!(body["asset"]["type"], "stock");
    assert_eq!(body["asset"]["price"], 175.5);
    assert_eq!(body["priceHistory"].as_array().unwrap().len(), 101);
    assert!(body["indicators"]["rsi"].as_f64().is_some());
    assert!(body["indicators"]["macd"]["histogram"].as_f64().is_some());

    let classification = body["signal"]["classification"].as_str().unwrap();
    assert!(["BUY", "SELL", "HOLD"].contains(&classification));
    assert!(!body["signal"]["reasoning"].as_array().unwrap().is_empty());
    assert!(body["signal"]["priceTarget"]["bullish"].as_f64().is_some());

    let metrics = app.metrics.export().unwrap();
    assert!(metrics.contains(&format!(
        "signals_generated_total{{classification=\"{}\"}} 1",
        classification
    )));
}

#[tokio::test]
async fn analysis_is_stable_across_requests() {
    let app = TestApiServer::new().await;
    let first: Value = app.server.get("/api/assets/crypto/bitcoin/analysis").await.json();
    let second: Value = app.server.get("/api/assets/crypto/bitcoin/analysis").await.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn quote_endpoint_rejects_unknown_type() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/assets/bond/AAPL").expect_failure().await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn quote_endpoint_returns_asset() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/assets/crypto/ethereum").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "ETHEREUM");
    assert_eq!(body["name"], "Ethereum");
    assert_eq!(body["price"], 2650.5);
    assert!(body["changePercent24h"].as_f64().is_some());
}

#[tokio::test]
async fn search_filters_by_type() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .get("/api/search")
        .add_query_param("q", "eth")
        .add_query_param("type", "crypto")
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["symbol"], "ETHEREUM");

    let all: Value = app.server.get("/api/search").await.json();
    assert_eq!(all.as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn watchlist_lifecycle() {
    let app = TestApiServer::new().await;
    let tesla = json!({
        "symbol": "TSLA",
        "name": "TSLA Inc.",
        "type": "stock",
        "price": 248.5,
        "change24h": 1.2,
        "changePercent24h": 0.48
    });

    let response = app.server.post("/api/watchlist").json(&tesla).await;
    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["added"], true);

    let response = app.server.post("/api/watchlist").json(&tesla).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["added"], false);

    let listed: Value = app.server.get("/api/watchlist").await.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["symbol"], "TSLA");

    let contains: Value = app.server.get("/api/watchlist/stock/tsla").await.json();
    assert_eq!(contains["contains"], true);

    let response = app.server.delete("/api/watchlist/stock/TSLA").await;
    assert_eq!(response.status_code(), 204);

    let response = app
        .server
        .delete("/api/watchlist/stock/TSLA")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 404);

    let contains: Value = app.server.get("/api/watchlist/stock/TSLA").await.json();
    assert_eq!(contains["contains"], false);
}

#[tokio::test]
async fn watchlist_analysis_covers_every_entry() {
    let app = TestApiServer::new().await;
    for (symbol, asset_type) in [("AAPL", "stock"), ("SOLANA", "crypto")] {
        let asset = json!({
            "symbol": symbol,
            "name": symbol,
            "type": asset_type,
            "price": 0.0,
            "change24h": 0.0,
            "changePercent24h": 0.0
        });
        app.server.post("/api/watchlist").json(&asset).await;
    }

    let response = app.server.get("/api/watchlist/analysis").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();

    let analyses = body["analyses"].as_array().unwrap();
    assert_eq!(analyses.len(), 2);
    assert_eq!(analyses[0]["asset"]["symbol"], "AAPL");
    assert_eq!(analyses[0]["asset"]["price"], 175.5);
    assert_eq!(analyses[1]["asset"]["symbol"], "SOLANA");
    assert!(body["failures"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn currency_preference_round_trip() {
    let app = TestApiServer::new().await;

    let body: Value = app.server.get("/api/currency").await.json();
    assert_eq!(body, json!({ "currency": "USD", "symbol": "$" }));

    let response = app
        .server
        .put("/api/currency")
        .json(&json!({ "currency": "EUR" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = app.server.get("/api/currency").await.json();
    assert_eq!(body["currency"], "EUR");
    assert_eq!(body["symbol"], "€");

    let body: Value = app
        .server
        .get("/api/currency/format")
        .add_query_param("amount", "175.5")
        .await
        .json();
    assert_eq!(body["formatted"], "€161.46");

    let body: Value = app
        .server
        .get("/api/currency/format")
        .add_query_param("amount", "175.5")
        .add_query_param("currency", "USD")
        .await
        .json();
    assert_eq!(body["formatted"], "$175.50");
}

#[tokio::test]
async fn unsupported_currency_is_rejected() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .put("/api/currency")
        .json(&json!({ "currency": "GBP" }))
        .expect_failure()
        .await;
    assert!(response.status_code().is_client_error());
}
