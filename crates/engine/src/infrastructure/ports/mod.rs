//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - The transactional unit of work wrapping battle mutations
//! - Random (for testing)

mod error;
mod repos;

pub use error::RepoError;
pub use repos::{BattleTx, PokemonRepo, RandomPort, UnitOfWork};

#[cfg(test)]
pub use repos::{MockBattleTx, MockPokemonRepo, MockRandomPort, MockUnitOfWork};
