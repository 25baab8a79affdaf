//! Weighted winner selection.

use pokearena_domain::Pokemon;

/// Outcome of winner selection: the two input records, attributes untouched.
/// The caller applies level deltas afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner: Pokemon,
    pub loser: Pokemon,
}

/// Select a winner with probability proportional to relative level.
///
/// `roll` is a uniform draw in `[0, 1)`; A wins when
/// `roll < level_a / (level_a + level_b)`. Equal levels give each side 0.5
/// with no deterministic tie-break.
///
/// Precondition: at least one level is strictly positive. A level-0 record
/// is deleted rather than persisted, so loaded combatants always satisfy
/// this; with both levels 0 the denominator would be 0.
pub fn select_winner(a: Pokemon, b: Pokemon, roll: f64) -> BattleOutcome {
    let total = f64::from(a.level) + f64::from(b.level);
    let p_a = f64::from(a.level) / total;

    if roll < p_a {
        BattleOutcome {
            winner: a,
            loser: b,
        }
    } else {
        BattleOutcome {
            winner: b,
            loser: a,
        }
    }
}
