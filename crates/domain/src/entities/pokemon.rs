//! Pokemon entity - the battling resource managed by the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::PokemonId;

/// Closed set of Pokemon kinds. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonKind {
    Pikachu,
    Charmander,
    Squirtle,
}

impl PokemonKind {
    /// Stable lowercase form used in storage and over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pikachu => "pikachu",
            Self::Charmander => "charmander",
            Self::Squirtle => "squirtle",
        }
    }
}

impl fmt::Display for PokemonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pokemon kind: {0}")]
pub struct PokemonKindParseError(String);

impl FromStr for PokemonKind {
    type Err = PokemonKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pikachu" => Ok(Self::Pikachu),
            "charmander" => Ok(Self::Charmander),
            "squirtle" => Ok(Self::Squirtle),
            other => Err(PokemonKindParseError(other.to_string())),
        }
    }
}

/// A Pokemon record.
///
/// Plain data struct; the interesting invariants live at the storage boundary
/// (`level >= 0`, kind CHECK, id non-reuse) and in the battle use case, which
/// deletes a loser instead of persisting level 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,
    pub kind: PokemonKind,
    /// Trainer name. Mutable via the dedicated update operation only.
    pub trainer: String,
    /// Strength attribute driving battle odds. Starts at 1, moves +/-1 per
    /// battle; a record at level 0 is deleted rather than persisted.
    pub level: u32,
}

impl Pokemon {
    /// A freshly created Pokemon always starts at level 1.
    pub const STARTING_LEVEL: u32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_form() {
        for kind in [
            PokemonKind::Pikachu,
            PokemonKind::Charmander,
            PokemonKind::Squirtle,
        ] {
            assert_eq!(kind.as_str().parse::<PokemonKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("mewtwo".parse::<PokemonKind>().is_err());
        assert!("Pikachu".parse::<PokemonKind>().is_err());
    }

    #[test]
    fn pokemon_serializes_with_lowercase_kind() {
        let pokemon = Pokemon {
            id: PokemonId::from_i64(7),
            kind: PokemonKind::Squirtle,
            trainer: "Misty".to_string(),
            level: 3,
        };
        let json = serde_json::to_value(&pokemon).expect("serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["kind"], "squirtle");
        assert_eq!(json["trainer"], "Misty");
        assert_eq!(json["level"], 3);
    }
}
