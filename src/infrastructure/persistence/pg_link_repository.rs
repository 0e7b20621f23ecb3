//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{GeoRule, Link};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link reads on the redirect path.
///
/// Short-code lookups hit the unique index on `links.code`; rules are loaded
/// with `ORDER BY id` so stored match order survives into memory.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_rules(&self, link_id: i64) -> Result<Vec<GeoRule>, AppError> {
        let rows: Vec<RuleRow> = sqlx::query_as(
            r#"
            SELECT id, link_id, redirect_url, countries
            FROM link_rules
            WHERE link_id = $1
            ORDER BY id
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(RuleRow::into_entity).collect())
    }

    async fn hydrate(&self, row: LinkRow) -> Result<Link, AppError> {
        let rules = self.load_rules(row.id).await?;
        Ok(row.into_entity(rules))
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    project_id: i64,
    name: String,
    code: String,
    base_url: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LinkRow {
    fn into_entity(self, rules: Vec<GeoRule>) -> Link {
        Link {
            id: self.id,
            project_id: self.project_id,
            name: self.name,
            code: self.code,
            base_url: self.base_url,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            rules,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RuleRow {
    id: i64,
    link_id: i64,
    redirect_url: String,
    countries: Vec<String>,
}

impl RuleRow {
    fn into_entity(self) -> GeoRule {
        GeoRule {
            id: self.id,
            link_id: self.link_id,
            redirect_url: self.redirect_url,
            countries: self.countries,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, project_id, name, code, base_url, active, created_at, updated_at
            FROM links
            WHERE code = $1 AND active = TRUE
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, project_id, name, code, base_url, active, created_at, updated_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }
}
