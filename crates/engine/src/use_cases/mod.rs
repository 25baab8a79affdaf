//! Use cases - one struct per exposed operation.

pub mod battle;
pub mod pokemon;

pub use battle::{Battle, BattleError, BattleResult};
pub use pokemon::{
    CreatePokemon, DeletePokemon, GetPokemon, ListPokemon, PokemonError, UpdateTrainer,
};
