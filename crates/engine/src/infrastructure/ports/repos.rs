//! Repository and unit-of-work port traits for database access.

use async_trait::async_trait;
use pokearena_domain::{Pokemon, PokemonId, PokemonKind};

use super::error::RepoError;

/// Pokemon persistence port used by the CRUD use cases.
///
/// Reads and single-row mutations run against the pool directly; multi-row
/// battle mutations go through [`UnitOfWork`] instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonRepo: Send + Sync {
    async fn get(&self, id: PokemonId) -> Result<Option<Pokemon>, RepoError>;
    async fn list(&self) -> Result<Vec<Pokemon>, RepoError>;
    /// Insert a new record. Storage assigns the id; level starts at 1.
    async fn create(&self, kind: PokemonKind, trainer: &str) -> Result<Pokemon, RepoError>;
    async fn update_trainer(&self, id: PokemonId, trainer: &str) -> Result<(), RepoError>;
    async fn update_level(&self, id: PokemonId, level: u32) -> Result<(), RepoError>;
    async fn delete(&self, id: PokemonId) -> Result<(), RepoError>;
}

/// Factory for transactional sessions wrapping the battle mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn BattleTx>, RepoError>;
}

/// One open transaction. Mutations are invisible to other connections until
/// [`BattleTx::commit`]; dropping the session without committing rolls it
/// back, so the underlying connection is always released.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BattleTx: Send {
    async fn get(&mut self, id: PokemonId) -> Result<Option<Pokemon>, RepoError>;
    async fn update_level(&mut self, id: PokemonId, level: u32) -> Result<(), RepoError>;
    async fn delete(&mut self, id: PokemonId) -> Result<(), RepoError>;
    /// Commit the transaction. The session is spent afterwards.
    async fn commit(&mut self) -> Result<(), RepoError>;
    /// Roll back the transaction. The session is spent afterwards.
    async fn rollback(&mut self) -> Result<(), RepoError>;
}

/// Uniform randomness port, substitutable for deterministic testing.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&self) -> f64;
}
