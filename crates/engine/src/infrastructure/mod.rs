//! Infrastructure layer - port traits and their concrete adapters.

pub mod ports;
pub mod random;
pub mod sqlite;
