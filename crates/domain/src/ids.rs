use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a Pokemon record.
///
/// Assigned by storage (monotonic, never reused after deletion), so there is
/// no `new()` constructor here - an id only exists once a row does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PokemonId(i64);

impl PokemonId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PokemonId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PokemonId> for i64 {
    fn from(value: PokemonId) -> Self {
        value.0
    }
}
