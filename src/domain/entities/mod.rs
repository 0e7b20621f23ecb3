//! Core business entities.

mod geo;
mod link;
mod visit;

pub use geo::{GeoCacheEntry, GeoLocation, UNKNOWN_CITY, UNKNOWN_COUNTRY};
pub use link::{GeoRule, Link};
pub use visit::{NewVisit, Visit};
