//! PostgreSQL repository implementations.

mod pg_geo_cache_repository;
mod pg_link_repository;
mod pg_visit_repository;

pub use pg_geo_cache_repository::PgGeoCacheRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
