//! HTTP layer for the redirect surface.
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - Request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
