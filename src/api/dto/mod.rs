//! Response serialization types.

pub mod health;
