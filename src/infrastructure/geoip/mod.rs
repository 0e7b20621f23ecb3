//! External IP-intelligence integration.

mod ipinfo;
mod provider;

pub use ipinfo::IpinfoProvider;
pub use provider::{GeoIpProvider, GeoLookup, GeoProviderError};

#[cfg(test)]
pub use provider::MockGeoIpProvider;
