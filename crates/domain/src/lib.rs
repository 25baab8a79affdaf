//! PokeArena domain types.
//!
//! Core entity types and invariants for the Pokemon battle API.
//! This crate stays free of I/O, randomness, and framework concerns;
//! the engine injects those at its boundaries.

pub mod entities;
pub mod ids;

pub use entities::{Pokemon, PokemonKind, PokemonKindParseError};
pub use ids::PokemonId;
