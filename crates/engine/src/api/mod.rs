//! API layer - HTTP entry points.

pub mod http;
