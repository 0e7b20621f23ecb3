//! Infrastructure layer: database, cache, and external service integrations.
//!
//! - [`cache`] - Fast key-value cache tier (Redis, or no-op fallback)
//! - [`geoip`] - External IP-intelligence provider
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod geoip;
pub mod persistence;
