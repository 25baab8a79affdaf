//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{PokemonRepo, RandomPort, UnitOfWork};
use crate::use_cases::{
    Battle, CreatePokemon, DeletePokemon, GetPokemon, ListPokemon, UpdateTrainer,
};

/// Main application state.
///
/// Holds all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub create_pokemon: CreatePokemon,
    pub get_pokemon: GetPokemon,
    pub list_pokemon: ListPokemon,
    pub update_trainer: UpdateTrainer,
    pub delete_pokemon: DeletePokemon,
    pub battle: Battle,
}

impl App {
    pub fn new(
        repo: Arc<dyn PokemonRepo>,
        uow: Arc<dyn UnitOfWork>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            use_cases: UseCases {
                create_pokemon: CreatePokemon::new(repo.clone()),
                get_pokemon: GetPokemon::new(repo.clone()),
                list_pokemon: ListPokemon::new(repo.clone()),
                update_trainer: UpdateTrainer::new(repo.clone()),
                delete_pokemon: DeletePokemon::new(repo),
                battle: Battle::new(uow, random),
            },
        }
    }
}
