#![allow(dead_code)]

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use geolink::application::services::{GeoService, RedirectService};
use geolink::domain::visit_event::VisitEvent;
use geolink::infrastructure::cache::NullCache;
use geolink::infrastructure::geoip::{GeoIpProvider, GeoLookup, GeoProviderError};
use geolink::infrastructure::persistence::{PgGeoCacheRepository, PgLinkRepository};
use geolink::state::AppState;

/// Geolocation provider returning a fixed location for every IP.
pub struct StubGeoProvider {
    pub country_code: String,
    pub city: String,
}

impl StubGeoProvider {
    pub fn new(country_code: &str, city: &str) -> Self {
        Self {
            country_code: country_code.to_string(),
            city: city.to_string(),
        }
    }
}

#[async_trait]
impl GeoIpProvider for StubGeoProvider {
    async fn lookup(&self, _ip: &str) -> Result<GeoLookup, GeoProviderError> {
        Ok(GeoLookup {
            country_code: self.country_code.clone(),
            city: self.city.clone(),
        })
    }
}

/// Geolocation provider that always fails.
pub struct FailingGeoProvider;

#[async_trait]
impl GeoIpProvider for FailingGeoProvider {
    async fn lookup(&self, _ip: &str) -> Result<GeoLookup, GeoProviderError> {
        Err(GeoProviderError::Http("provider unavailable".to_string()))
    }
}

pub async fn create_test_link(pool: &PgPool, code: &str, base_url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (project_id, name, code, base_url) VALUES (1, $1, $2, $3) RETURNING id",
    )
    .bind(format!("test link {code}"))
    .bind(code)
    .bind(base_url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_inactive_link(pool: &PgPool, code: &str, base_url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (project_id, name, code, base_url, active) \
         VALUES (1, $1, $2, $3, FALSE) RETURNING id",
    )
    .bind(format!("test link {code}"))
    .bind(code)
    .bind(base_url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn add_rule(pool: &PgPool, link_id: i64, redirect_url: &str, countries: &[&str]) -> i64 {
    let countries: Vec<String> = countries.iter().map(|c| c.to_string()).collect();
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO link_rules (link_id, redirect_url, countries) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(link_id)
    .bind(redirect_url)
    .bind(&countries)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_visits(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM link_visits WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Builds an [`AppState`] over a test pool with a NullCache and the given
/// geolocation provider. The visit worker is not spawned; events land in the
/// returned receiver for assertion.
pub fn create_test_state(
    pool: PgPool,
    provider: Arc<dyn GeoIpProvider>,
) -> (AppState, mpsc::Receiver<VisitEvent>) {
    let pool_arc = Arc::new(pool.clone());
    let (tx, rx) = mpsc::channel(100);

    let cache: Arc<dyn geolink::infrastructure::cache::CacheService> = Arc::new(NullCache::new());

    let link_repo = Arc::new(PgLinkRepository::new(pool_arc.clone()));
    let geo_cache_repo = Arc::new(PgGeoCacheRepository::new(pool_arc.clone()));

    let geo = Arc::new(GeoService::new(
        cache.clone(),
        geo_cache_repo,
        provider,
        86_400,
        Duration::from_millis(3_000),
    ));

    let redirect = Arc::new(RedirectService::new(
        link_repo,
        cache.clone(),
        geo,
        tx.clone(),
        300,
    ));

    let state = AppState {
        db: pool,
        cache,
        redirect,
        visit_tx: tx,
        behind_proxy: false,
    };

    (state, rx)
}
