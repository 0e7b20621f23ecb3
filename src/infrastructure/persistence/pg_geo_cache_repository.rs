//! PostgreSQL implementation of the durable geolocation cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::GeoCacheEntry;
use crate::domain::repositories::GeoCacheRepository;
use crate::error::AppError;

/// PostgreSQL store behind the fast cache tier for geolocation results.
///
/// Single-key upserts only; concurrent writers for the same IP are
/// last-write-wins, which is acceptable because competing results are equally
/// valid.
pub struct PgGeoCacheRepository {
    pool: Arc<PgPool>,
}

impl PgGeoCacheRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct GeoCacheRow {
    ip: String,
    country_code: String,
    city: String,
    expires_at: DateTime<Utc>,
}

#[async_trait]
impl GeoCacheRepository for PgGeoCacheRepository {
    async fn find_by_ip(&self, ip: &str) -> Result<Option<GeoCacheEntry>, AppError> {
        let row: Option<GeoCacheRow> = sqlx::query_as(
            r#"
            SELECT ip, country_code, city, expires_at
            FROM ip_geo_cache
            WHERE ip = $1
            "#,
        )
        .bind(ip)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| GeoCacheEntry {
            ip: r.ip,
            country_code: r.country_code,
            city: r.city,
            expires_at: r.expires_at,
        }))
    }

    async fn upsert(&self, entry: GeoCacheEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO ip_geo_cache (ip, country_code, city, expires_at, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (ip) DO UPDATE
            SET country_code = EXCLUDED.country_code,
                city = EXCLUDED.city,
                expires_at = EXCLUDED.expires_at,
                updated_at = now()
            "#,
        )
        .bind(&entry.ip)
        .bind(&entry.country_code)
        .bind(&entry.city)
        .bind(entry.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
