//! Application layer: service orchestration over domain and infrastructure.

pub mod services;
