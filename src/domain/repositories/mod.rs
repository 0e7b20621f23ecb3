//! Repository trait definitions for data access.
//!
//! These traits define the contracts between the domain layer and the
//! infrastructure layer. All implementations live in
//! [`crate::infrastructure::persistence`]; test mocks are generated with
//! `mockall` under `cfg(test)`.

mod geo_cache_repository;
mod link_repository;
mod visit_repository;

pub use geo_cache_repository::GeoCacheRepository;
pub use link_repository::LinkRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use geo_cache_repository::MockGeoCacheRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
