//! Application services.
//!
//! - [`GeoService`] - Two-tier cached IP geolocation with external fallback
//! - [`RedirectService`] - Link lookup, rule matching, and visit dispatch

mod geo_service;
mod redirect_service;

pub use geo_service::GeoService;
pub use redirect_service::{RedirectService, ResolvedRedirect};
