//! Test utilities for API server integration tests

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tradesight::core::clock::{Clock, FixedClock};
use tradesight::core::http::{create_router, AppState};
use tradesight::db::InMemoryStore;
use tradesight::metrics::Metrics;
use tradesight::services::mock::MockMarketDataProvider;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub store: Arc<InMemoryStore>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
        ));
        let provider = Arc::new(MockMarketDataProvider::new(clock.clone()));
        let store = Arc::new(InMemoryStore::new());

        let state = AppState::new(metrics.clone(), clock, provider, store.clone());
        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            store,
        }
    }
}
