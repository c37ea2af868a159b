//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::Config;
use crate::core::analysis::AnalysisOrchestrator;
use crate::core::bootstrap::{build_provider, build_store};
use crate::core::clock::{Clock, SystemClock};
use crate::db::{KeyValueStore, StoreError};
use crate::metrics::Metrics;
use crate::models::asset::{Asset, AssetAnalysis, AssetType};
use crate::services::currency::{self, Currency, CurrencyPreferences};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::services::watchlist::Watchlist;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub watchlist: Arc<Watchlist>,
    pub currency: Arc<CurrencyPreferences>,
}

impl AppState {
    pub fn new(
        metrics: Arc<Metrics>,
        clock: Arc<dyn Clock>,
        provider: Arc<dyn MarketDataProvider>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            orchestrator: Arc::new(AnalysisOrchestrator::new(clock.clone())),
            provider,
            watchlist: Arc::new(Watchlist::new(store.clone(), clock)),
            currency: Arc::new(CurrencyPreferences::new(store)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

fn parse_asset_type(raw: &str) -> Result<AssetType, StatusCode> {
    raw.parse().map_err(|_| StatusCode::BAD_REQUEST)
}

fn market_data_status(e: &MarketDataError) -> StatusCode {
    match e {
        MarketDataError::UnknownSymbol(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn store_status(e: StoreError) -> StatusCode {
    error!(error = %e, "Storage operation failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "tradesight-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    #[serde(rename = "type")]
    asset_type: Option<String>,
}

/// Search listings; without a `type` both universes are searched.
async fn search_assets(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Asset>>, StatusCode> {
    let query = params.q.unwrap_or_default();
    let types = match params.asset_type.as_deref() {
        Some(raw) => vec![parse_asset_type(raw)?],
        None => vec![AssetType::Stock, AssetType::Crypto],
    };

    let mut results = Vec::new();
    for asset_type in types {
        let found = state.provider.search(&query, asset_type).await.map_err(|e| {
            error!(error = %e, query = %query, "Search failed");
            market_data_status(&e)
        })?;
        results.extend(found);
    }
    Ok(Json(results))
}

async fn get_quote(
    State(state): State<AppState>,
    Path((asset_type, symbol)): Path<(String, String)>,
) -> Result<Json<Asset>, StatusCode> {
    let asset_type = parse_asset_type(&asset_type)?;
    let asset = state
        .provider
        .fetch_quote(&symbol, asset_type)
        .await
        .map_err(|e| {
            error!(error = %e, symbol = %symbol, "Failed to fetch quote");
            market_data_status(&e)
        })?;
    Ok(Json(asset))
}

async fn get_analysis(
    State(state): State<AppState>,
    Path((asset_type, symbol)): Path<(String, String)>,
) -> Result<Json<AssetAnalysis>, StatusCode> {
    let asset_type = parse_asset_type(&asset_type)?;
    let analysis = state
        .orchestrator
        .analyze_symbol(state.provider.as_ref(), &symbol, asset_type)
        .await
        .map_err(|e| {
            error!(error = %e, symbol = %symbol, "Failed to analyze asset");
            market_data_status(&e)
        })?;

    state
        .metrics
        .record_signal(analysis.signal.classification.as_str());
    Ok(Json(analysis))
}

async fn list_watchlist(State(state): State<AppState>) -> Result<Json<Vec<Asset>>, StatusCode> {
    let assets = state.watchlist.list().await.map_err(store_status)?;
    Ok(Json(assets))
}

/// 201 when the asset was added, 200 when it was already on the list.
async fn add_to_watchlist(
    State(state): State<AppState>,
    Json(asset): Json<Asset>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let added = state.watchlist.add(asset).await.map_err(store_status)?;
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(json!({ "added": added }))))
}

async fn watchlist_contains(
    State(state): State<AppState>,
    Path((asset_type, symbol)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let asset_type = parse_asset_type(&asset_type)?;
    let contains = state
        .watchlist
        .contains(&symbol, asset_type)
        .await
        .map_err(store_status)?;
    Ok(Json(json!({
        "symbol": symbol,
        "type": asset_type,
        "contains": contains
    })))
}

async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path((asset_type, symbol)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    let asset_type = parse_asset_type(&asset_type)?;
    let removed = state
        .watchlist
        .remove(&symbol, asset_type)
        .await
        .map_err(store_status)?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Refresh quotes and analyze every watchlist entry concurrently.
async fn analyze_watchlist(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let targets: Vec<(String, AssetType)> = state
        .watchlist
        .list()
        .await
        .map_err(store_status)?
        .into_iter()
        .map(|asset| (asset.symbol, asset.asset_type))
        .collect();

    let results = state
        .orchestrator
        .analyze_many(state.provider.as_ref(), &targets)
        .await;

    let mut analyses = Vec::new();
    let mut failures = Vec::new();
    for ((symbol, asset_type), result) in targets.into_iter().zip(results) {
        match result {
            Ok(analysis) => {
                state
                    .metrics
                    .record_signal(analysis.signal.classification.as_str());
                analyses.push(analysis);
            }
            Err(e) => failures.push(json!({
                "symbol": symbol,
                "type": asset_type,
                "error": e.to_string()
            })),
        }
    }

    Ok(Json(json!({ "analyses": analyses, "failures": failures })))
}

fn currency_body(currency: Currency) -> Value {
    json!({ "currency": currency, "symbol": currency.symbol() })
}

async fn get_currency(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let currency = state.currency.get().await.map_err(store_status)?;
    Ok(Json(currency_body(currency)))
}

#[derive(Debug, Deserialize)]
struct CurrencyRequest {
    currency: Currency,
}

async fn set_currency(
    State(state): State<AppState>,
    Json(request): Json<CurrencyRequest>,
) -> Result<Json<Value>, StatusCode> {
    state
        .currency
        .set(request.currency)
        .await
        .map_err(store_status)?;
    info!(currency = %request.currency, "Display currency updated");
    Ok(Json(currency_body(request.currency)))
}

#[derive(Debug, Deserialize)]
struct FormatQuery {
    amount: f64,
    currency: Option<Currency>,
}

/// Convert a USD amount, using the stored preference unless `currency` is given.
async fn format_amount(
    State(state): State<AppState>,
    Query(params): Query<FormatQuery>,
) -> Result<Json<Value>, StatusCode> {
    let currency = match params.currency {
        Some(currency) => currency,
        None => state.currency.get().await.map_err(store_status)?,
    };
    Ok(Json(json!({
        "currency": currency,
        "amount": currency::convert(params.amount, currency),
        "formatted": currency::format_price(params.amount, currency)
    })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/search", get(search_assets))
        .route("/api/assets/{asset_type}/{symbol}", get(get_quote))
        .route("/api/assets/{asset_type}/{symbol}/analysis", get(get_analysis))
        .route("/api/watchlist", get(list_watchlist).post(add_to_watchlist))
        .route("/api/watchlist/analysis", get(analyze_watchlist))
        .route(
            "/api/watchlist/{asset_type}/{symbol}",
            get(watchlist_contains).delete(remove_from_watchlist),
        )
        .route("/api/currency", get(get_currency).put(set_currency))
        .route("/api/currency/format", get(format_amount))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let provider = build_provider(config, clock.clone())?;
    let store = build_store(config).await;

    let state = AppState::new(metrics, clock, provider, store);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
