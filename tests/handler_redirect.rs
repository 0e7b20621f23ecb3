mod common;

use axum::{Router, extract::ConnectInfo, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

use geolink::api::handlers::redirect_handler;

#[derive(Clone)]
struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

fn test_app(state: geolink::state::AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

#[sqlx::test]
async fn test_redirect_uses_matching_geo_rule(pool: PgPool) {
    let (state, mut rx) =
        common::create_test_state(pool.clone(), Arc::new(common::StubGeoProvider::new("DE", "Berlin")));
    let server = TestServer::new(test_app(state)).unwrap();

    let link_id = common::create_test_link(&pool, "promo", "https://example.com/base").await;
    let rule_id = common::add_rule(&pool, link_id, "https://example.de/aktion", &["DE", "AT"]).await;

    let response = server.get("/promo").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.de/aktion");

    let event = rx.try_recv().unwrap();
    assert_eq!(event.link_id, link_id);
    assert_eq!(event.country, "DE");
    assert_eq!(event.city, "Berlin");
    assert_eq!(event.rule_id, Some(rule_id));
}

#[sqlx::test]
async fn test_redirect_falls_back_to_base_url(pool: PgPool) {
    let (state, mut rx) =
        common::create_test_state(pool.clone(), Arc::new(common::StubGeoProvider::new("FR", "Paris")));
    let server = TestServer::new(test_app(state)).unwrap();

    let link_id = common::create_test_link(&pool, "promo", "https://example.com/base").await;
    common::add_rule(&pool, link_id, "https://example.de/aktion", &["DE", "AT"]).await;

    let response = server.get("/promo").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/base");

    let event = rx.try_recv().unwrap();
    assert_eq!(event.country, "FR");
    assert_eq!(event.rule_id, None);
}

#[sqlx::test]
async fn test_redirect_first_matching_rule_wins(pool: PgPool) {
    let (state, _rx) =
        common::create_test_state(pool.clone(), Arc::new(common::StubGeoProvider::new("DE", "Berlin")));
    let server = TestServer::new(test_app(state)).unwrap();

    let link_id = common::create_test_link(&pool, "promo", "https://example.com/base").await;
    common::add_rule(&pool, link_id, "https://example.com/eu", &["DE", "FR", "IT"]).await;
    common::add_rule(&pool, link_id, "https://example.de/specific", &["DE"]).await;

    let response = server.get("/promo").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/eu");
}

#[sqlx::test]
async fn test_redirect_unknown_code_not_found(pool: PgPool) {
    let (state, mut rx) =
        common::create_test_state(pool, Arc::new(common::StubGeoProvider::new("DE", "Berlin")));
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server.get("/missing").await;

    response.assert_status_not_found();
    // No geolocation, no visit event for unknown codes
    assert!(rx.try_recv().is_err());
}

#[sqlx::test]
async fn test_redirect_inactive_link_not_found(pool: PgPool) {
    let (state, mut rx) =
        common::create_test_state(pool.clone(), Arc::new(common::StubGeoProvider::new("DE", "Berlin")));
    let server = TestServer::new(test_app(state)).unwrap();

    common::create_inactive_link(&pool, "paused", "https://example.com/base").await;

    let response = server.get("/paused").await;

    response.assert_status_not_found();
    assert!(rx.try_recv().is_err());
}

#[sqlx::test]
async fn test_redirect_survives_geo_provider_failure(pool: PgPool) {
    let (state, mut rx) = common::create_test_state(pool.clone(), Arc::new(common::FailingGeoProvider));
    let server = TestServer::new(test_app(state)).unwrap();

    let link_id = common::create_test_link(&pool, "promo", "https://example.com/base").await;
    common::add_rule(&pool, link_id, "https://example.de/aktion", &["DE"]).await;

    let response = server.get("/promo").await;

    // Unknown location matches no rule; the base URL still wins
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/base");

    let event = rx.try_recv().unwrap();
    assert_eq!(event.country, "UNKNOWN");
    assert_eq!(event.city, "Unknown");
    assert_eq!(event.rule_id, None);
}

#[sqlx::test]
async fn test_redirect_normalizes_bare_destination(pool: PgPool) {
    let (state, _rx) =
        common::create_test_state(pool.clone(), Arc::new(common::StubGeoProvider::new("DE", "Berlin")));
    let server = TestServer::new(test_app(state)).unwrap();

    let link_id = common::create_test_link(&pool, "bare", "example.com/landing").await;
    common::add_rule(&pool, link_id, "example.de/aktion", &["DE"]).await;

    let response = server.get("/bare").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.de/aktion");
}
