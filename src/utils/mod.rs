//! Utility functions for URL handling and request metadata.
//!
//! - [`url_norm`] - Redirect URL scheme normalization
//! - [`client_ip`] - Client IP extraction from connection info and proxy headers

pub mod client_ip;
pub mod url_norm;
