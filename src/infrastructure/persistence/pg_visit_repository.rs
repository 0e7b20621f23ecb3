//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// Append-only PostgreSQL store for visit records.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    ip: String,
    country: String,
    city: String,
    rule_id: Option<i64>,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn insert(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let row: VisitRow = sqlx::query_as(
            r#"
            INSERT INTO link_visits (link_id, ip, country, city, rule_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, link_id, ip, country, city, rule_id, created_at
            "#,
        )
        .bind(new_visit.link_id)
        .bind(&new_visit.ip)
        .bind(&new_visit.country)
        .bind(&new_visit.city)
        .bind(new_visit.rule_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Visit {
            id: row.id,
            link_id: row.link_id,
            ip: row.ip,
            country: row.country,
            city: row.city,
            rule_id: row.rule_id,
            created_at: row.created_at,
        })
    }
}
