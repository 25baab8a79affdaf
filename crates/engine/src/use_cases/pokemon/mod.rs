//! Pokemon CRUD use cases.
//!
//! Pass-through operations over the repository port: existence check, then
//! mutate. Levels are only touched here at creation (fixed at 1); battle owns
//! every other level change.

use std::sync::Arc;

use pokearena_domain::{Pokemon, PokemonId, PokemonKind};

use crate::infrastructure::ports::{PokemonRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum PokemonError {
    #[error("pokemon not found: {0}")]
    NotFound(PokemonId),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Create a Pokemon at level 1.
pub struct CreatePokemon {
    repo: Arc<dyn PokemonRepo>,
}

impl CreatePokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        kind: PokemonKind,
        trainer: &str,
    ) -> Result<Pokemon, PokemonError> {
        Ok(self.repo.create(kind, trainer).await?)
    }
}

/// Look up a Pokemon by id.
pub struct GetPokemon {
    repo: Arc<dyn PokemonRepo>,
}

impl GetPokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PokemonId) -> Result<Pokemon, PokemonError> {
        self.repo
            .get(id)
            .await?
            .ok_or(PokemonError::NotFound(id))
    }
}

/// List all Pokemon in id order.
pub struct ListPokemon {
    repo: Arc<dyn PokemonRepo>,
}

impl ListPokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<Vec<Pokemon>, PokemonError> {
        Ok(self.repo.list().await?)
    }
}

/// Update a Pokemon's trainer, the only mutable attribute outside battle.
pub struct UpdateTrainer {
    repo: Arc<dyn PokemonRepo>,
}

impl UpdateTrainer {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PokemonId, trainer: &str) -> Result<Pokemon, PokemonError> {
        let pokemon = self
            .repo
            .get(id)
            .await?
            .ok_or(PokemonError::NotFound(id))?;

        self.repo.update_trainer(id, trainer).await?;

        Ok(Pokemon {
            trainer: trainer.to_string(),
            ..pokemon
        })
    }
}

/// Delete a Pokemon by id.
pub struct DeletePokemon {
    repo: Arc<dyn PokemonRepo>,
}

impl DeletePokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PokemonId) -> Result<(), PokemonError> {
        self.repo
            .get(id)
            .await?
            .ok_or(PokemonError::NotFound(id))?;

        Ok(self.repo.delete(id).await?)
    }
}
