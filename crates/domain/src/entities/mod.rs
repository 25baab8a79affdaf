//! Entity types.

pub mod pokemon;

pub use pokemon::{Pokemon, PokemonKind, PokemonKindParseError};
